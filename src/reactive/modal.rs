use crate::domain::Card;
use crate::reactive::subject::{Replay, Subject, Subscription};
use serde::{Deserialize, Serialize};

/// Intent to open or close the detail view of a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModalState {
    pub open: bool,
    pub card: Option<Card>,
}

impl ModalState {
    pub fn opened(card: Card) -> Self {
        Self {
            open: true,
            card: Some(card),
        }
    }

    pub fn closed() -> Self {
        Self {
            open: false,
            card: None,
        }
    }
}

/// Fire-and-forget channel for modal intents. Nothing is retained: a
/// subscriber only hears notifications published after it registered.
#[derive(Clone)]
pub struct ModalSignal {
    subject: Subject<ModalState>,
}

impl ModalSignal {
    pub(crate) fn new() -> Self {
        Self {
            subject: Subject::new(Replay::Never),
        }
    }

    pub(crate) fn publish(&self, state: ModalState) {
        self.subject.publish(state);
    }

    pub fn subscribe(&self, observer: impl Fn(&ModalState) + Send + Sync + 'static) -> Subscription {
        self.subject.subscribe(observer)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }
}

impl std::fmt::Debug for ModalSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModalSignal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CardId;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_no_replay_for_late_subscriber() {
        let signal = ModalSignal::new();
        signal.publish(ModalState::opened(Card::new(CardId::new(1), "Early")));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = signal.subscribe(move |state| sink.lock().push(state.clone()));
        assert!(seen.lock().is_empty());

        signal.publish(ModalState::closed());
        assert_eq!(*seen.lock(), vec![ModalState::closed()]);
    }

    #[test]
    fn test_modal_state_serialization() {
        let state = ModalState::opened(Card::new(CardId::new(3), "Detail"));
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["open"], true);
        assert_eq!(json["card"]["id"], 3);
    }
}

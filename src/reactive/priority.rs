use crate::domain::{Board, Card};
use crate::reactive::subject::{Subject, Subscription};

/// Read-only view of every urgent card on the board.
///
/// The value is recomputed by the store after each mutation that can change
/// it. New subscribers receive the current value immediately.
#[derive(Clone)]
pub struct PriorityStream {
    subject: Subject<Vec<Card>>,
}

impl PriorityStream {
    /// Scans `board` once for the initial value
    pub(crate) fn new(board: &Board) -> Self {
        Self {
            subject: Subject::with_value(board.priority_cards()),
        }
    }

    /// Rescans `board` and publishes the result to every subscriber
    pub(crate) fn recompute(&self, board: &Board) {
        let cards = board.priority_cards();
        tracing::trace!(
            urgent = cards.len(),
            subscribers = self.subject.subscriber_count(),
            "recomputed priority cards"
        );
        self.subject.publish(cards);
    }

    /// The most recently published priority cards
    pub fn current(&self) -> Vec<Card> {
        self.subject.latest().unwrap_or_default()
    }

    /// Registers `observer`, calling it right away with the current value
    pub fn subscribe(&self, observer: impl Fn(&Vec<Card>) + Send + Sync + 'static) -> Subscription {
        self.subject.subscribe(observer)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subject.subscriber_count()
    }
}

impl std::fmt::Debug for PriorityStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityStream")
            .field("current", &self.current().len())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};
use uuid::Uuid;

/// Identifier of a registered observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Observer<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// What a late subscriber sees on registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Replay {
    /// Cache the last value and hand it to every new subscriber
    Latest,
    /// Deliver only values published after registration
    Never,
}

struct Registry<T> {
    observers: Vec<(SubscriptionId, Observer<T>)>,
    latest: Option<T>,
}

trait RemoveObserver: Send + Sync {
    fn remove(&self, id: SubscriptionId) -> bool;
}

impl<T: Send> RemoveObserver for Mutex<Registry<T>> {
    fn remove(&self, id: SubscriptionId) -> bool {
        let mut registry = self.lock();
        let before = registry.observers.len();
        registry.observers.retain(|(existing, _)| *existing != id);
        registry.observers.len() != before
    }
}

/// Push-based broker fanning values out to registered observers.
///
/// Observers run synchronously on the publishing thread, in registration
/// order. The registry lock is released before any observer runs, so an
/// observer may itself subscribe, unsubscribe or publish.
pub(crate) struct Subject<T> {
    registry: Arc<Mutex<Registry<T>>>,
    replay: Replay,
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            replay: self.replay,
        }
    }
}

impl<T: Clone + Send + 'static> Subject<T> {
    pub(crate) fn new(replay: Replay) -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                observers: Vec::new(),
                latest: None,
            })),
            replay,
        }
    }

    /// Creates a replaying subject holding `initial` as its current value
    pub(crate) fn with_value(initial: T) -> Self {
        let subject = Self::new(Replay::Latest);
        subject.registry.lock().latest = Some(initial);
        subject
    }

    pub(crate) fn subscribe(&self, observer: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = SubscriptionId::generate();
        let observer: Observer<T> = Arc::new(observer);

        let replayed = {
            let mut registry = self.registry.lock();
            registry.observers.push((id, Arc::clone(&observer)));
            match self.replay {
                Replay::Latest => registry.latest.clone(),
                Replay::Never => None,
            }
        };

        if let Some(value) = replayed {
            observer(&value);
        }

        let registry: Arc<dyn RemoveObserver> = self.registry.clone();
        Subscription {
            id,
            registry: Arc::downgrade(&registry),
            active: true,
        }
    }

    /// Delivers `value` to every current observer
    pub(crate) fn publish(&self, value: T) {
        let observers: Vec<Observer<T>> = {
            let mut registry = self.registry.lock();
            if self.replay == Replay::Latest {
                registry.latest = Some(value.clone());
            }
            registry
                .observers
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect()
        };

        tracing::trace!(observers = observers.len(), "publishing value");
        for observer in observers {
            observer(&value);
        }
    }

    pub(crate) fn latest(&self) -> Option<T> {
        self.registry.lock().latest.clone()
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.registry.lock().observers.len()
    }
}

/// Handle to a registered observer.
///
/// Dropping the handle unsubscribes; call [`Subscription::detach`] to keep the
/// observer registered for as long as the stream lives.
#[must_use = "dropping a Subscription unsubscribes its observer immediately"]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<dyn RemoveObserver>,
    active: bool,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Checks if the observer is still registered
    pub fn is_active(&self) -> bool {
        self.active && self.registry.strong_count() > 0
    }

    /// Removes the observer. Returns false if it was already gone.
    pub fn unsubscribe(&mut self) -> bool {
        if !self.active {
            return false;
        }
        self.active = false;
        self.registry
            .upgrade()
            .map(|registry| registry.remove(self.id))
            .unwrap_or(false)
    }

    /// Leaves the observer registered and discards the handle
    pub fn detach(mut self) {
        self.active = false;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &T| sink.lock().push(value.clone()))
    }

    #[test]
    fn test_replaying_subject_emits_current_on_subscribe() {
        let subject = Subject::with_value(1);
        let (seen, observer) = recorder();

        let _sub = subject.subscribe(observer);
        assert_eq!(*seen.lock(), vec![1]);

        subject.publish(2);
        assert_eq!(*seen.lock(), vec![1, 2]);
        assert_eq!(subject.latest(), Some(2));
    }

    #[test]
    fn test_non_replaying_subject_skips_past_values() {
        let subject = Subject::new(Replay::Never);
        subject.publish("early");

        let (seen, observer) = recorder();
        let _sub = subject.subscribe(observer);
        assert!(seen.lock().is_empty());

        subject.publish("late");
        assert_eq!(*seen.lock(), vec!["late"]);
        assert_eq!(subject.latest(), None);
    }

    #[test]
    fn test_every_subscriber_sees_every_value_in_order() {
        let subject = Subject::new(Replay::Never);
        let (first, observer_a) = recorder();
        let (second, observer_b) = recorder();
        let _a = subject.subscribe(observer_a);
        let _b = subject.subscribe(observer_b);

        for n in 0..5 {
            subject.publish(n);
        }

        assert_eq!(*first.lock(), vec![0, 1, 2, 3, 4]);
        assert_eq!(*second.lock(), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let subject = Subject::new(Replay::Never);
        let (seen, observer) = recorder();
        let mut sub = subject.subscribe(observer);

        subject.publish(1);
        assert!(sub.unsubscribe());
        assert!(!sub.unsubscribe());
        subject.publish(2);

        assert_eq!(*seen.lock(), vec![1]);
        assert_eq!(subject.subscriber_count(), 0);
    }

    #[test]
    fn test_drop_unsubscribes_and_detach_keeps() {
        let subject = Subject::new(Replay::Never);
        let (dropped, observer_a) = recorder();
        let (detached, observer_b) = recorder();

        drop(subject.subscribe(observer_a));
        let kept = subject.subscribe(observer_b);
        let kept_id = kept.id();
        kept.detach();
        subject.publish(9);

        assert!(dropped.lock().is_empty());
        assert_eq!(*detached.lock(), vec![9]);
        assert_eq!(subject.subscriber_count(), 1);
        assert_eq!(subject.registry.lock().observers[0].0, kept_id);
    }

    #[test]
    fn test_observer_may_publish_reentrantly() {
        let subject: Subject<u32> = Subject::new(Replay::Never);
        let (seen, observer) = recorder();
        let _recorder = subject.subscribe(observer);

        let inner = subject.clone();
        let _echo = subject.subscribe(move |value| {
            if *value == 1 {
                inner.publish(2);
            }
        });

        subject.publish(1);
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn test_subscription_outlives_subject() {
        let subject = Subject::new(Replay::Never);
        let (_seen, observer) = recorder::<u8>();
        let mut sub = subject.subscribe(observer);

        drop(subject);
        assert!(!sub.is_active());
        assert!(!sub.unsubscribe());
    }
}

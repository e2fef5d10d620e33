//! Push-based streams the store publishes to.
//!
//! [`PriorityStream`] caches its last value and replays it to new
//! subscribers. [`ModalSignal`] keeps nothing and only forwards live
//! notifications.

pub mod modal;
pub mod priority;
mod subject;

pub use modal::{ModalSignal, ModalState};
pub use priority::PriorityStream;
pub use subject::{Subscription, SubscriptionId};

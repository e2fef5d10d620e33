//! # Kanban Store
//!
//! In-memory reactive store for a kanban board: lists of cards, a live view
//! of urgent cards, and a notification channel for opening card details.
//!
//! All mutation goes through [`BoardStore`], which keeps the derived
//! [`PriorityStream`] consistent with the board after every change.
//!
//! ```
//! use kanban_store::{Board, BoardStore, List, ListId};
//! use std::sync::{Arc, Mutex};
//!
//! let seed = Board::new(vec![List::new(ListId::new(1), "Todo")]);
//! let mut store = BoardStore::new(seed).unwrap();
//!
//! let urgent = Arc::new(Mutex::new(0));
//! let sink = Arc::clone(&urgent);
//! let _sub = store
//!     .priority_cards()
//!     .subscribe(move |cards| *sink.lock().unwrap() = cards.len());
//!
//! let card = store.add_card(ListId::new(1), "Write release notes").unwrap();
//! assert_eq!(store.board().lists()[0].cards[0].id, card);
//! assert_eq!(*urgent.lock().unwrap(), 0);
//! ```

pub mod domain;
pub mod error;
pub mod reactive;
pub mod store;

// Re-export commonly used types
pub use domain::{
    board::{Board, List, ListId},
    card::{Card, CardId, Priority},
    config::StoreConfig,
};
pub use error::{BoardError, Result};
pub use reactive::{ModalSignal, ModalState, PriorityStream, Subscription, SubscriptionId};
pub use store::BoardStore;

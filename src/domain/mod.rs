pub mod board;
pub mod card;
pub mod config;
pub mod id;

pub use board::{Board, List, ListId};
pub use card::{Card, CardId, Priority};
pub use config::StoreConfig;
pub use id::IdGenerator;

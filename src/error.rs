use crate::domain::{CardId, ListId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("List not found: {0}")]
    ListNotFound(ListId),

    #[error("Card {card} not found in list {list}")]
    CardNotFound { list: ListId, card: CardId },

    #[error("No list at position {0}")]
    ListIndexOutOfRange(usize),

    #[error("No card at position {card} in list at position {list}")]
    CardIndexOutOfRange { list: usize, card: usize },

    #[error("Card id already in use: {0}")]
    DuplicateCardId(CardId),

    #[error("List id already in use: {0}")]
    DuplicateListId(ListId),

    #[error("No ids left to generate")]
    IdSpaceExhausted,

    #[error("Cannot open the modal without a card")]
    ModalCardMissing,

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

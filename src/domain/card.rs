use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a card (clock-derived, e.g. 1700000000000)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u64);

impl CardId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw numeric value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for CardId {
    type Err = crate::error::BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| crate::error::BoardError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity tag of a card. Only [`Priority::URGENT`] has meaning to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(i32);

impl Priority {
    pub const URGENT: Priority = Priority(1);
    pub const DEFAULT: Priority = Priority(3);

    pub fn new(level: i32) -> Self {
        Self(level)
    }

    pub fn level(&self) -> i32 {
        self.0
    }

    /// Checks whether cards with this priority belong in the priority view
    pub fn is_urgent(&self) -> bool {
        *self == Self::URGENT
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// A card on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub priority: Priority,
}

impl Card {
    /// Creates a card with empty content and the default priority
    pub fn new(id: CardId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            priority: Priority::DEFAULT,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn is_urgent(&self) -> bool {
        self.priority.is_urgent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_id_parsing() {
        let id = CardId::from_str("42").unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");

        assert!(CardId::from_str("abc").is_err());
        assert!(CardId::from_str("-1").is_err());
        assert!(CardId::from_str("").is_err());
    }

    #[test]
    fn test_new_card_defaults() {
        let card = Card::new(CardId::new(7), "Write docs");
        assert_eq!(card.title, "Write docs");
        assert_eq!(card.content, "");
        assert_eq!(card.priority, Priority::DEFAULT);
        assert!(!card.is_urgent());
    }

    #[test]
    fn test_only_priority_one_is_urgent() {
        assert!(Priority::new(1).is_urgent());
        assert!(!Priority::new(0).is_urgent());
        assert!(!Priority::new(2).is_urgent());
        assert!(!Priority::new(3).is_urgent());
    }

    #[test]
    fn test_card_deserializes_from_seed_shape() {
        let json = r#"{"id": 10, "title": "Fix login", "content": "", "priority": 1}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.id, CardId::new(10));
        assert!(card.is_urgent());
    }

    #[test]
    fn test_priority_accepts_any_integer() {
        let json = r#"[{"id": 1, "title": "Low", "priority": 300},
                       {"id": 2, "title": "Odd", "priority": -1}]"#;
        let cards: Vec<Card> = serde_json::from_str(json).unwrap();

        assert_eq!(cards[0].priority.level(), 300);
        assert_eq!(cards[1].priority.level(), -1);
        assert!(cards.iter().all(|card| !card.is_urgent()));
    }

    #[test]
    fn test_card_missing_optional_fields() {
        let json = r#"{"id": 11, "title": "Bare"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.content, "");
        assert_eq!(card.priority, Priority::DEFAULT);
    }
}

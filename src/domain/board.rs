use crate::domain::card::{Card, CardId};
use crate::error::{BoardError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::{fmt, str::FromStr};

/// Unique identifier for a list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(u64);

impl ListId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl FromStr for ListId {
    type Err = BoardError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| BoardError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered column of cards. The front of `cards` is the newest card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl List {
    pub fn new(id: ListId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            cards: Vec::new(),
        }
    }

    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.cards = cards;
        self
    }

    /// Gets a card by id
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// Gets the position of a card within this list
    pub fn card_position(&self, id: CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id == id)
    }
}

/// Kanban board state: lists in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    lists: Vec<List>,
}

impl Board {
    pub fn new(lists: Vec<List>) -> Self {
        Self { lists }
    }

    /// Parses a board from the seed shape: a JSON array of lists
    pub fn from_json(json: &str) -> Result<Self> {
        let board: Board = serde_json::from_str(json)?;
        board.check_unique_ids()?;
        Ok(board)
    }

    pub fn lists(&self) -> &[List] {
        &self.lists
    }

    pub(crate) fn lists_mut(&mut self) -> &mut Vec<List> {
        &mut self.lists
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Gets a list by id
    pub fn list(&self, id: ListId) -> Option<&List> {
        self.lists.iter().find(|list| list.id == id)
    }

    /// Gets the position of a list on the board
    pub fn list_position(&self, id: ListId) -> Option<usize> {
        self.lists.iter().position(|list| list.id == id)
    }

    /// Finds a card anywhere on the board, along with the list holding it
    pub fn find_card(&self, id: CardId) -> Option<(&List, &Card)> {
        self.lists
            .iter()
            .find_map(|list| list.card(id).map(|card| (list, card)))
    }

    /// Total number of cards across all lists
    pub fn card_count(&self) -> usize {
        self.lists.iter().map(|list| list.cards.len()).sum()
    }

    /// Collects every urgent card, in list order then card order
    pub fn priority_cards(&self) -> Vec<Card> {
        self.lists
            .iter()
            .flat_map(|list| list.cards.iter())
            .filter(|card| card.is_urgent())
            .cloned()
            .collect()
    }

    /// Largest list or card id on the board, used to seed id generation
    pub fn max_id(&self) -> Option<u64> {
        self.lists
            .iter()
            .flat_map(|list| {
                std::iter::once(list.id.value()).chain(list.cards.iter().map(|c| c.id.value()))
            })
            .max()
    }

    /// Verifies that no list id and no card id appears twice
    pub fn check_unique_ids(&self) -> Result<()> {
        let mut list_ids = HashSet::new();
        let mut card_ids = HashSet::new();

        for list in &self.lists {
            if !list_ids.insert(list.id) {
                return Err(BoardError::DuplicateListId(list.id));
            }
            for card in &list.cards {
                if !card_ids.insert(card.id) {
                    return Err(BoardError::DuplicateCardId(card.id));
                }
            }
        }

        Ok(())
    }
}

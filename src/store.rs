//! The board store: single owner of board data and the only mutation path.
//!
//! Every operation that can change which cards are urgent republishes the
//! [`PriorityStream`] before returning. Failed lookups return an error and
//! leave the board and streams untouched.

use crate::domain::{Board, Card, CardId, IdGenerator, List, ListId, StoreConfig};
use crate::error::{BoardError, Result};
use crate::reactive::{ModalSignal, ModalState, PriorityStream};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct BoardStore {
    board: Board,
    config: StoreConfig,
    ids: IdGenerator,
    priority: PriorityStream,
    modal: ModalSignal,
}

impl BoardStore {
    /// Creates a store from a seed board with the default configuration
    pub fn new(seed: Board) -> Result<Self> {
        Self::with_config(seed, StoreConfig::default())
    }

    /// Creates a store from a seed board
    ///
    /// # Errors
    /// Returns `DuplicateListId` or `DuplicateCardId` when the seed repeats an id.
    pub fn with_config(seed: Board, config: StoreConfig) -> Result<Self> {
        seed.check_unique_ids()?;

        let ids = IdGenerator::new(seed.max_id().unwrap_or(0));
        let priority = PriorityStream::new(&seed);
        debug!(
            lists = seed.lists().len(),
            cards = seed.card_count(),
            urgent = priority.current().len(),
            "board store initialized"
        );

        Ok(Self {
            board: seed,
            config,
            ids,
            priority,
            modal: ModalSignal::new(),
        })
    }

    /// Creates a store from a JSON seed (an array of lists)
    pub fn from_json(seed: &str) -> Result<Self> {
        Self::new(Board::from_json(seed)?)
    }

    /// Replaces the id clock, keeping ids above everything already on the board
    pub fn with_id_clock(mut self, clock: impl Fn() -> u64 + Send + 'static) -> Self {
        self.ids = IdGenerator::with_clock(self.board.max_id().unwrap_or(0), clock);
        self
    }

    /// Current board state. Mutations go through the store.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Owned copy of the current board state
    pub fn snapshot(&self) -> Board {
        self.board.clone()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Adds a card with the given title to the front of a list
    ///
    /// # Errors
    /// - `ListNotFound` when no list has `list_id`.
    /// - `IdSpaceExhausted` when no fresh id can be generated.
    pub fn add_card(&mut self, list_id: ListId, title: impl Into<String>) -> Result<CardId> {
        let index = self.list_index(list_id)?;
        let id = CardId::new(self.ids.next_id()?);
        let card = Card::new(id, title).with_priority(self.config.default_priority);

        self.board.lists_mut()[index].cards.insert(0, card);
        debug!(list = %list_id, card = %id, "card added");

        self.recompute();
        Ok(id)
    }

    /// Removes a card from a list, returning it
    pub fn delete_card(&mut self, list_id: ListId, card_id: CardId) -> Result<Card> {
        let (list_index, card_index) = self.card_index(list_id, card_id)?;
        let card = self.board.lists_mut()[list_index].cards.remove(card_index);
        debug!(list = %list_id, card = %card_id, "card deleted");

        self.recompute();
        Ok(card)
    }

    /// Replaces the card at the given positions wholesale, returning the old card.
    ///
    /// Positions shift after inserts and deletes; prefer [`BoardStore::replace_card`]
    /// when the card ids are known.
    ///
    /// # Errors
    /// - `ListIndexOutOfRange` / `CardIndexOutOfRange` when a position is stale.
    /// - `DuplicateCardId` when `card.id` belongs to a different card on the board.
    ///
    /// A new id brought in by `card` is reserved, so generated ids never reuse it.
    pub fn update_card(&mut self, list_index: usize, card_index: usize, card: Card) -> Result<Card> {
        let list = self.board.lists().get(list_index).ok_or_else(|| {
            warn!(list_index, "update_card: list position out of range");
            BoardError::ListIndexOutOfRange(list_index)
        })?;
        let current = list.cards.get(card_index).ok_or_else(|| {
            warn!(list_index, card_index, "update_card: card position out of range");
            BoardError::CardIndexOutOfRange {
                list: list_index,
                card: card_index,
            }
        })?;

        if card.id != current.id && self.board.find_card(card.id).is_some() {
            return Err(BoardError::DuplicateCardId(card.id));
        }

        let card_id = card.id;
        self.ids.reserve(card_id.value());
        let previous = std::mem::replace(&mut self.board.lists_mut()[list_index].cards[card_index], card);
        debug!(list_index, card_index, card = %card_id, "card updated");

        self.recompute();
        Ok(previous)
    }

    /// Replaces a card located by id, returning the old card
    pub fn replace_card(&mut self, list_id: ListId, card_id: CardId, card: Card) -> Result<Card> {
        let (list_index, card_index) = self.card_index(list_id, card_id)?;
        self.update_card(list_index, card_index, card)
    }

    /// Moves a card to `position` in another (or the same) list.
    ///
    /// `position` is clamped to the end of the target list.
    pub fn move_card(
        &mut self,
        from: ListId,
        card_id: CardId,
        to: ListId,
        position: usize,
    ) -> Result<()> {
        let (from_index, card_index) = self.card_index(from, card_id)?;
        let to_index = self.list_index(to)?;

        let lists = self.board.lists_mut();
        let card = lists[from_index].cards.remove(card_index);
        let target = &mut lists[to_index].cards;
        let position = position.min(target.len());
        target.insert(position, card);
        debug!(card = %card_id, from = %from, to = %to, position, "card moved");

        self.recompute();
        Ok(())
    }

    /// Appends an empty list to the end of the board
    pub fn add_list(&mut self, name: impl Into<String>) -> Result<ListId> {
        let id = ListId::new(self.ids.next_id()?);
        self.board.lists_mut().push(List::new(id, name));
        debug!(list = %id, "list added");
        Ok(id)
    }

    /// Removes a list and all of its cards, returning it
    pub fn delete_list(&mut self, list_id: ListId) -> Result<List> {
        let index = self.list_index(list_id)?;
        let list = self.board.lists_mut().remove(index);
        debug!(list = %list_id, cards = list.cards.len(), "list deleted");

        self.recompute();
        Ok(list)
    }

    /// Live view of urgent cards
    pub fn priority_cards(&self) -> PriorityStream {
        self.priority.clone()
    }

    /// Notifies modal subscribers that a card's detail view should open or close.
    ///
    /// Closing may omit the card; opening needs one.
    pub fn set_modal_state(&self, open: bool, card: Option<Card>) -> Result<()> {
        if open && card.is_none() {
            warn!("modal open requested without a card");
            return Err(BoardError::ModalCardMissing);
        }

        debug!(open, card = ?card.as_ref().map(|c| c.id), "modal state set");
        self.modal.publish(ModalState { open, card });
        Ok(())
    }

    /// Channel carrying modal open/close intents
    pub fn modal_state(&self) -> ModalSignal {
        self.modal.clone()
    }

    fn recompute(&self) {
        self.priority.recompute(&self.board);
    }

    fn list_index(&self, list_id: ListId) -> Result<usize> {
        self.board.list_position(list_id).ok_or_else(|| {
            warn!(list = %list_id, "list not found");
            BoardError::ListNotFound(list_id)
        })
    }

    fn card_index(&self, list_id: ListId, card_id: CardId) -> Result<(usize, usize)> {
        let list_index = self.list_index(list_id)?;
        let card_index = self.board.lists()[list_index]
            .card_position(card_id)
            .ok_or_else(|| {
                warn!(list = %list_id, card = %card_id, "card not found");
                BoardError::CardNotFound {
                    list: list_id,
                    card: card_id,
                }
            })?;
        Ok((list_index, card_index))
    }
}

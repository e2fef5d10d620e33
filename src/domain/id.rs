use crate::error::{BoardError, Result};
use chrono::Utc;

/// Generates list and card ids from the wall clock.
///
/// Ids are millisecond timestamps, bumped past the previous id when two
/// entities are created within the same tick. Lists and cards share one id
/// space.
pub struct IdGenerator {
    last: u64,
    clock: Box<dyn Fn() -> u64 + Send>,
}

impl IdGenerator {
    /// Creates a generator whose ids are all greater than `floor`
    pub fn new(floor: u64) -> Self {
        Self::with_clock(floor, || Utc::now().timestamp_millis().max(0) as u64)
    }

    /// Creates a generator reading time from a custom clock
    pub fn with_clock(floor: u64, clock: impl Fn() -> u64 + Send + 'static) -> Self {
        Self {
            last: floor,
            clock: Box::new(clock),
        }
    }

    /// Returns the next id, strictly greater than every id returned or reserved before
    ///
    /// # Errors
    /// Returns `IdSpaceExhausted` once `u64::MAX` has been handed out or reserved.
    pub fn next_id(&mut self) -> Result<u64> {
        let floor = self.last.checked_add(1).ok_or(BoardError::IdSpaceExhausted)?;
        let id = (self.clock)().max(floor);
        self.last = id;
        Ok(id)
    }

    /// Marks `id` as taken so later ids are generated above it
    pub fn reserve(&mut self, id: u64) {
        self.last = self.last.max(id);
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator").field("last", &self.last).finish()
    }
}

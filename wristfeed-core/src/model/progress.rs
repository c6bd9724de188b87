//! Receive counters for paginated and chunked transfers

/// Receive index and declared total of one transfer
///
/// The index never exceeds the total; reaching it completes the transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Progress {
    received: u8,
    total: u8,
}

impl Progress {
    /// Create an idle counter
    pub const fn new() -> Self {
        Self {
            received: 0,
            total: 0,
        }
    }

    /// Start a transfer of `total` units
    pub fn begin(&mut self, total: u8) {
        self.received = 0;
        self.total = total;
    }

    /// Count one received unit
    ///
    /// Returns `true` exactly once, for the unit that completes the
    /// transfer. Units beyond the total are not counted.
    pub fn advance(&mut self) -> bool {
        if self.received >= self.total {
            return false;
        }
        self.received += 1;
        self.received == self.total
    }

    /// Units received so far
    pub fn received(&self) -> u8 {
        self.received
    }

    /// Declared number of units
    pub fn total(&self) -> u8 {
        self.total
    }

    /// Check if every declared unit has arrived
    pub fn is_complete(&self) -> bool {
        self.total != 0 && self.received == self.total
    }

    /// Check if nothing has been received yet
    pub fn is_fresh(&self) -> bool {
        self.received == 0
    }

    /// Check if units are still outstanding
    pub fn is_pending(&self) -> bool {
        self.received < self.total
    }

    /// Return to the idle state
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

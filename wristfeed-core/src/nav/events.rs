//! Navigation inputs and outcomes

use wristfeed_protocol::Command;

use super::level::Level;

/// User input, already mapped from buttons by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    /// Row chosen in the current list
    SelectRow(u8),
    /// Select pressed outside a list
    Select,
    /// Select held
    LongSelect,
    /// Back pressed
    Back,
}

/// What a navigation event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transition {
    /// Guard failed or event not meaningful here
    Ignored,
    /// Level opened
    Pushed(Level),
    /// Level closed
    Popped(Level),
    /// Command issued without a level change
    Requested(Command),
    /// Back pressed at the root; the host should close the application
    Exit,
}

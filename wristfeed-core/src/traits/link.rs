//! Outbound link and retry timer traits

use wristfeed_protocol::Command;

/// Errors that can occur when handing a command to the link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Outbound queue full; the command may be retried
    Busy,
    /// Link shut down; the command can never be delivered
    Closed,
}

/// Polling rate of the underlying radio
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    /// Fast polling while a transfer burst is active
    Reduced,
    /// Power-saving default
    Normal,
}

/// Trait for the outbound half of the companion link
pub trait Link {
    /// Queue one command without blocking
    fn try_send(&mut self, command: Command) -> Result<(), LinkError>;

    /// Change the link polling rate
    fn set_power_mode(&mut self, mode: PowerMode);
}

/// Trait for the single command retry timer
///
/// When the timer expires the host calls `Session::on_retry_timer`.
pub trait RetryTimer {
    /// Arm the timer, replacing any armed deadline
    fn arm(&mut self, delay_ms: u32);

    /// Disarm the timer
    fn cancel(&mut self);
}

//! Board configuration
//!
//! Pin assignments, link parameters and timing for the reference board
//! (RP2040, companion radio on UART0, four buttons to ground).

use embassy_time::Duration;
use wristfeed_core::config::{RetryPolicy, SessionConfig};
use wristfeed_core::traits::PowerMode;

/// Companion link baud rate
pub const UART_BAUD: u32 = 115_200;

/// UART transmit buffer size
pub const UART_TX_BUF_SIZE: usize = 256;

/// UART receive buffer size (one full frame plus slack)
pub const UART_RX_BUF_SIZE: usize = 2048;

/// Bytes read from the UART per call
pub const RX_READ_SIZE: usize = 64;

/// Outbound command queue depth; a full queue is a busy link
pub const COMMAND_CHANNEL_SIZE: usize = 1;

/// Inbound packet queue depth
pub const PACKET_CHANNEL_SIZE: usize = 2;

/// Button event queue depth
pub const INPUT_CHANNEL_SIZE: usize = 8;

/// Settle time after a button edge
pub const DEBOUNCE: Duration = Duration::from_millis(20);

/// Settle time after a button release
pub const RELEASE_DEBOUNCE: Duration = Duration::from_millis(50);

/// Hold time that turns a press into a long press
pub const LONG_PRESS: Duration = Duration::from_millis(500);

/// Display width in pixels, used to estimate message wrapping
pub const SCREEN_WIDTH: u16 = 144;

/// Session configuration
pub const SESSION_CONFIG: SessionConfig = SessionConfig {
    retry: RetryPolicy {
        delay_ms: wristfeed_core::config::DEFAULT_RETRY_DELAY_MS,
        max_attempts: None,
    },
};

/// Link polling interval for a power mode
pub fn poll_interval(mode: PowerMode) -> Duration {
    match mode {
        PowerMode::Reduced => Duration::from_millis(20),
        PowerMode::Normal => Duration::from_millis(200),
    }
}

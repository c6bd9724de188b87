//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod buttons;
pub mod controller;
pub mod link_rx;
pub mod link_tx;

pub use buttons::button_task;
pub use controller::controller_task;
pub use link_rx::link_rx_task;
pub use link_tx::link_tx_task;

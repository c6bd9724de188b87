//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use heapless::Vec;

use wristfeed_core::traits::PowerMode;
use wristfeed_protocol::{Command, MAX_PAYLOAD_SIZE};

use crate::config::{COMMAND_CHANNEL_SIZE, INPUT_CHANNEL_SIZE, PACKET_CHANNEL_SIZE};

/// Dictionary payload of one inbound frame
pub type Packet = Vec<u8, MAX_PAYLOAD_SIZE>;

/// Physical buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum Button {
    Up,
    Select,
    Down,
    Back,
}

/// Debounced button input
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum ButtonEvent {
    Press(Button),
    LongPress(Button),
}

/// Commands waiting for the link transmitter
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Dictionaries received from the companion
pub static PACKET_CHANNEL: Channel<CriticalSectionRawMutex, Packet, PACKET_CHANNEL_SIZE> =
    Channel::new();

/// Button events for the controller
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, ButtonEvent, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Requested link polling rate (updated by controller)
pub static POWER_MODE: Signal<CriticalSectionRawMutex, PowerMode> = Signal::new();

//! Companion link transmit task
//!
//! Writes queued commands to the UART. After each command the task idles
//! for the polling interval of the current power mode, so a burst of
//! commands faster than the link can carry them fills the queue and the
//! dispatcher sees a busy link.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Timer;
use embedded_io_async::Write;

use wristfeed_core::traits::PowerMode;
use wristfeed_protocol::messages::COMMAND_DICT_LEN;
use wristfeed_protocol::{Command, Frame};

use crate::channels::{COMMAND_CHANNEL, POWER_MODE};
use crate::config::poll_interval;

/// Encoded size of a command frame
const COMMAND_FRAME_LEN: usize = 1 + 2 + 1 + COMMAND_DICT_LEN + 1;

/// Link TX task - sends commands to the companion
#[embassy_executor::task]
pub async fn link_tx_task(mut tx: BufferedUartTx) {
    info!("Link TX task started");

    let mut mode = PowerMode::Normal;

    loop {
        let command = COMMAND_CHANNEL.receive().await;
        send_command(&mut tx, command).await;

        if let Some(next) = POWER_MODE.try_take() {
            if next != mode {
                debug!("Link power mode {}", next);
                mode = next;
            }
        }

        Timer::after(poll_interval(mode)).await;
    }
}

/// Encode and write one command frame
async fn send_command(tx: &mut BufferedUartTx, command: Command) {
    let mut dict = [0u8; COMMAND_DICT_LEN];
    let len = match command.encode(&mut dict) {
        Ok(len) => len,
        Err(e) => {
            warn!("Failed to encode {}: {:?}", command, e);
            return;
        }
    };

    let frame = match Frame::dict(&dict[..len]) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Failed to frame {}: {:?}", command, e);
            return;
        }
    };

    let mut buf = [0u8; COMMAND_FRAME_LEN];
    if let Ok(len) = frame.encode(&mut buf) {
        if let Err(e) = tx.write_all(&buf[..len]).await {
            warn!("Failed to send {}: {:?}", command, e);
        } else {
            trace!("TX: {}", command);
        }
    }
}

//! Companion link receive task
//!
//! Reassembles frames from the UART byte stream and hands dictionary
//! payloads to the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use wristfeed_protocol::{FrameParser, MSG_DICT};

use crate::channels::PACKET_CHANNEL;
use crate::config::RX_READ_SIZE;

/// Link RX task - receives and parses frames from the companion
#[embassy_executor::task]
pub async fn link_rx_task(mut rx: BufferedUartRx) {
    info!("Link RX task started");

    let mut parser = FrameParser::new();
    let mut buf = [0u8; RX_READ_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(frame)) if frame.msg_type == MSG_DICT => {
                            // Flow control keeps at most one packet in flight
                            PACKET_CHANNEL.send(frame.payload).await;
                        }
                        Ok(Some(frame)) => {
                            warn!("Ignoring frame type {=u8:#x}", frame.msg_type);
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(e) => {
                            warn!("Frame parse error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

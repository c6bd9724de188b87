//! Wristfeed - RSS reader firmware
//!
//! Main firmware binary for RP2040-based wearables. A paired companion
//! fetches feeds and pre-renders images; this firmware browses them
//! level by level over a framed UART link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use wristfeed_core::Session;

use crate::channels::Button;
use crate::config::{SESSION_CONFIG, UART_BAUD, UART_RX_BUF_SIZE, UART_TX_BUF_SIZE};

mod channels;
mod config;
mod host;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; UART_TX_BUF_SIZE]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; UART_RX_BUF_SIZE]> = StaticCell::new();

// Session state lives for the whole program
static SESSION: StaticCell<Session> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wristfeed firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Setup UART for the companion link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = UART_BAUD;

    let tx_buf = TX_BUF.init([0u8; UART_TX_BUF_SIZE]);
    let rx_buf = RX_BUF.init([0u8; UART_RX_BUF_SIZE]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for companion link");

    // Buttons are active low with internal pull-ups
    let up = Input::new(p.PIN_2, Pull::Up);
    let select = Input::new(p.PIN_3, Pull::Up);
    let down = Input::new(p.PIN_4, Pull::Up);
    let back = Input::new(p.PIN_5, Pull::Up);

    let session = SESSION.init_with(|| Session::new(SESSION_CONFIG));

    // Spawn tasks
    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::button_task(up, Button::Up)).unwrap();
    spawner.spawn(tasks::button_task(select, Button::Select)).unwrap();
    spawner.spawn(tasks::button_task(down, Button::Down)).unwrap();
    spawner.spawn(tasks::button_task(back, Button::Back)).unwrap();
    spawner.spawn(tasks::controller_task(session)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

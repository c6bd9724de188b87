//! Button task
//!
//! One instance per button. Debounces presses and reports a long press
//! once the button has been held for `LONG_PRESS`.

use defmt::*;
use embassy_rp::gpio::Input;
use embassy_time::{with_timeout, Timer};

use crate::channels::{Button, ButtonEvent, INPUT_CHANNEL};
use crate::config::{DEBOUNCE, LONG_PRESS, RELEASE_DEBOUNCE};

/// Button task - reports presses of one active-low button
#[embassy_executor::task(pool_size = 4)]
pub async fn button_task(mut pin: Input<'static>, button: Button) {
    info!("Button task started for {}", button);

    loop {
        pin.wait_for_falling_edge().await;

        // Debounce
        Timer::after(DEBOUNCE).await;
        if pin.is_high() {
            continue;
        }

        match with_timeout(LONG_PRESS, pin.wait_for_rising_edge()).await {
            Ok(()) => report(ButtonEvent::Press(button)),
            Err(_) => {
                report(ButtonEvent::LongPress(button));
                // Wait for actual release
                pin.wait_for_rising_edge().await;
            }
        }

        // Debounce after release
        Timer::after(RELEASE_DEBOUNCE).await;
    }
}

fn report(event: ButtonEvent) {
    debug!("Button: {}", event);
    if INPUT_CHANNEL.try_send(event).is_err() {
        warn!("Input channel full, dropping {}", event);
    }
}

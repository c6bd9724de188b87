//! Main controller task
//!
//! Owns the session. Waits on inbound packets, button input and the
//! retry deadline, and feeds each to the session with the firmware host.

use defmt::*;
use embassy_futures::select::{select3, Either3};
use embassy_time::Timer;

use wristfeed_core::{Level, NavEvent, Session, Transition};

use crate::channels::{Button, ButtonEvent, INPUT_CHANNEL, PACKET_CHANNEL};
use crate::config::SESSION_CONFIG;
use crate::host::FirmwareHost;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(session: &'static mut Session) {
    info!("Controller task started");

    let mut host = FirmwareHost::new();
    session.start(&mut host);

    loop {
        let deadline = host.retry_deadline();
        let retry = async move {
            match deadline {
                Some(at) => Timer::at(at).await,
                None => core::future::pending::<()>().await,
            }
        };

        match select3(PACKET_CHANNEL.receive(), INPUT_CHANNEL.receive(), retry).await {
            Either3::First(packet) => {
                trace!("Packet: {} bytes", packet.len());
                // Rejections are logged by the session
                let _ = session.handle_packet(&packet, &mut host);
            }
            Either3::Second(event) => {
                handle_input(session, &mut host, event);
            }
            Either3::Third(()) => {
                host.expire_retry();
                if let Some(status) = session.on_retry_timer(&mut host) {
                    trace!("Retry: {}", status);
                }
            }
        }
    }
}

/// Map a button event to navigation, or handle it locally
fn handle_input(session: &mut Session, host: &mut FirmwareHost, event: ButtonEvent) {
    let level = session.level();

    let nav = match (event, level.list()) {
        (ButtonEvent::Press(button @ (Button::Up | Button::Down)), Some(list)) => {
            host.move_cursor(list, button == Button::Down, session.row_count(list));
            let row = host.cursor(list);
            let title = session.title(list, usize::from(row)).unwrap_or("");
            debug!("{} row {}: {=str}", list, row, title);
            return;
        }
        (ButtonEvent::Press(button @ (Button::Up | Button::Down)), None) => {
            if level == Level::Message {
                host.scroll(button == Button::Down);
            }
            return;
        }
        (ButtonEvent::Press(Button::Select), Some(list)) => NavEvent::SelectRow(host.cursor(list)),
        (ButtonEvent::Press(Button::Select), None) => NavEvent::Select,
        (ButtonEvent::LongPress(Button::Select), _) => NavEvent::LongSelect,
        (ButtonEvent::Press(Button::Back) | ButtonEvent::LongPress(Button::Back), _) => {
            NavEvent::Back
        }
        _ => return,
    };

    match session.handle_nav(nav, host) {
        Transition::Exit => {
            info!("Exit requested, restarting session");
            *session = Session::new(SESSION_CONFIG);
            session.start(host);
        }
        transition => debug!(
            "{} -> {} (depth {})",
            nav,
            transition,
            session.levels().depth()
        ),
    }
}

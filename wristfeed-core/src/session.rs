//! The session aggregate
//!
//! A `Session` owns every piece of client state: title tables, receive
//! counters, the transfer buffer, the level stack and the dispatcher.
//! Hosts feed it inbound packets, navigation events and retry timer
//! expiries, passing their collaborators in on each call.

use wristfeed_protocol::{decode, Command, DecodeError, DictReader};

use crate::config::{Layout, SessionConfig, MAX_FEEDS, MAX_ITEMS};
use crate::dispatch::{Dispatcher, SendStatus};
use crate::model::{ImageView, Progress, TitleTable, TransferBuffer};
use crate::nav::{Level, LevelStack, ListKind};
use crate::traits::{Host, Link, RetryTimer};

/// All state of one client session
#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) feeds: TitleTable<MAX_FEEDS>,
    pub(crate) items: TitleTable<MAX_ITEMS>,
    pub(crate) transfer: TransferBuffer,
    pub(crate) feed_progress: Progress,
    pub(crate) item_progress: Progress,
    pub(crate) chunk_progress: Progress,
    pub(crate) levels: LevelStack,
    pub(crate) selected_item: u8,
    pub(crate) has_thumbnail: bool,
    pub(crate) layout: Layout,
    pub(crate) refresh_overlay: bool,
    pub(crate) message_ready: bool,
    pub(crate) dispatcher: Dispatcher,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            feeds: TitleTable::new(),
            items: TitleTable::new(),
            transfer: TransferBuffer::new(),
            feed_progress: Progress::new(),
            item_progress: Progress::new(),
            chunk_progress: Progress::new(),
            levels: LevelStack::new(),
            selected_item: 0,
            has_thumbnail: false,
            layout: Layout::default(),
            refresh_overlay: false,
            message_ready: false,
            dispatcher: Dispatcher::new(config.retry),
        }
    }

    /// Open the feed list and greet the companion
    pub fn start<H: Host + ?Sized>(&mut self, host: &mut H) -> SendStatus {
        info!("session start");
        host.push_window(Level::Feeds);
        self.send(host, Command::Hello)
    }

    /// Decode one inbound dictionary and apply it
    ///
    /// A malformed dictionary or a channel with missing companion keys is
    /// rejected as a whole and leaves the session untouched.
    pub fn handle_packet<H: Host + ?Sized>(
        &mut self,
        bytes: &[u8],
        host: &mut H,
    ) -> Result<(), DecodeError> {
        let events = match DictReader::new(bytes)
            .map_err(DecodeError::from)
            .and_then(|dict| decode(&dict))
        {
            Ok(events) => events,
            Err(e) => {
                warn!("dropping packet: {}", e);
                return Err(e);
            }
        };
        self.on_receive(&events, host);
        Ok(())
    }

    /// The retry timer expired
    pub fn on_retry_timer<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<SendStatus> {
        self.dispatcher.fire(host)
    }

    /// Active level
    pub fn level(&self) -> Level {
        self.levels.current()
    }

    /// Open levels
    pub fn levels(&self) -> &LevelStack {
        &self.levels
    }

    /// Declared number of rows in a list
    pub fn row_count(&self, list: ListKind) -> u8 {
        self.progress(list).total()
    }

    /// Receive progress of a list
    pub fn progress(&self, list: ListKind) -> &Progress {
        match list {
            ListKind::Feeds => &self.feed_progress,
            ListKind::Items => &self.item_progress,
        }
    }

    pub fn feed_title(&self, index: usize) -> Option<&str> {
        self.feeds.get(index)
    }

    pub fn item_title(&self, index: usize) -> Option<&str> {
        self.items.get(index)
    }

    /// Title of a row in either list
    pub fn title(&self, list: ListKind, index: usize) -> Option<&str> {
        match list {
            ListKind::Feeds => self.feed_title(index),
            ListKind::Items => self.item_title(index),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Text of the transfer buffer, empty while it holds no text
    pub fn message_text(&self) -> &str {
        self.transfer.text()
    }

    /// Check if the message of the selected item has been shown
    pub fn is_message_ready(&self) -> bool {
        self.message_ready
    }

    pub fn image(&self) -> Option<ImageView<'_>> {
        self.transfer.image()
    }

    /// Check if the selected item has an image
    pub fn has_thumbnail(&self) -> bool {
        self.has_thumbnail
    }

    pub fn selected_item(&self) -> u8 {
        self.selected_item
    }

    /// Check if a chunked transfer is mid-flight
    pub fn is_transfer_in_progress(&self) -> bool {
        !self.chunk_progress.is_fresh()
    }

    /// Check if the feed list shows the "refreshing" overlay
    pub fn is_refresh_visible(&self) -> bool {
        self.refresh_overlay
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub(crate) fn send<H>(&mut self, host: &mut H, command: Command) -> SendStatus
    where
        H: Link + RetryTimer + ?Sized,
    {
        self.dispatcher.send(host, command)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::mock::*;
    use crate::traits::PowerMode;
    use wristfeed_protocol::messages::{KEY_ITEM_TITLE, KEY_ITEM_TOTAL, KEY_ITEM_OFFSET};

    #[test]
    fn test_start_opens_feeds_and_says_hello() {
        let mut session = Session::default();
        let mut host = MockHost::new();

        assert_eq!(session.start(&mut host), SendStatus::Sent);
        assert_eq!(session.level(), Level::Feeds);
        assert_eq!(host.calls, vec![ViewCall::Push(Level::Feeds)]);
        assert_eq!(host.sent, vec![Command::Hello]);
        assert_eq!(host.power, vec![PowerMode::Reduced]);
    }

    #[test]
    fn test_malformed_packet_is_rejected() {
        let mut session = Session::default();
        let mut host = MockHost::new();

        assert_eq!(
            session.handle_packet(&[2, 0xE9, 0x03], &mut host),
            Err(DecodeError::Dict(wristfeed_protocol::DictError::Truncated))
        );
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_incomplete_channel_rejects_whole_packet() {
        let mut session = Session::default();
        let mut host = MockHost::new();
        let data = packet(|w| {
            w.write_cstr(KEY_ITEM_TITLE, "orphan").unwrap();
            w.write_u8(KEY_ITEM_TOTAL, 3).unwrap();
        });

        assert_eq!(
            session.handle_packet(&data, &mut host),
            Err(DecodeError::MissingField(KEY_ITEM_OFFSET))
        );
        assert_eq!(session.item_title(0), Some(""));
        assert!(host.sent.is_empty());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_busy_hello_is_retried_by_timer() {
        let mut session = Session::default();
        let mut host = MockHost::new();
        host.busy_for = 1;

        assert_eq!(session.start(&mut host), SendStatus::Queued);
        assert_eq!(host.timer, Some(250));

        assert_eq!(session.on_retry_timer(&mut host), Some(SendStatus::Sent));
        assert_eq!(host.sent, vec![Command::Hello]);
        assert_eq!(host.timer, None);
        assert_eq!(session.on_retry_timer(&mut host), None);
    }

    #[test]
    fn test_superseded_retry_is_never_resent() {
        let mut session = Session::default();
        let mut host = MockHost::new();
        host.busy_for = 2;

        session.start(&mut host);
        session.handle_packet(&feed_packet(0, 2, "A"), &mut host).unwrap();
        assert_eq!(
            session.dispatcher().pending().map(|p| p.command),
            Some(Command::ContinueFeeds)
        );
        assert_eq!(host.arms, 2);

        session.on_retry_timer(&mut host);
        assert_eq!(host.sent, vec![Command::ContinueFeeds]);
        assert_eq!(session.on_retry_timer(&mut host), None);
    }

    #[test]
    fn test_bounded_retry_gives_up() {
        let mut session = Session::new(SessionConfig {
            retry: RetryPolicy {
                delay_ms: 50,
                max_attempts: Some(2),
            },
        });
        let mut host = MockHost::new();
        host.busy_for = usize::MAX;

        assert_eq!(session.start(&mut host), SendStatus::Queued);
        assert_eq!(session.on_retry_timer(&mut host), Some(SendStatus::Abandoned));
        assert_eq!(session.on_retry_timer(&mut host), None);
        assert!(host.sent.is_empty());
    }
}

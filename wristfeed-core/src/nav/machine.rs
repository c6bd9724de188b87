//! Navigation transitions
//!
//! Every level change is a function of the current level and an event.
//! Guards turn events into no-ops while the relevant list is empty or a
//! chunked transfer is mid-flight, so transfers never interleave.

use wristfeed_protocol::Command;

use super::events::{NavEvent, Transition};
use super::level::Level;
use crate::session::Session;
use crate::traits::Host;

impl Session {
    /// Process a navigation event
    pub fn handle_nav<H: Host + ?Sized>(&mut self, event: NavEvent, host: &mut H) -> Transition {
        use Level::*;
        use NavEvent::*;

        let transition = match (self.level(), event) {
            (Feeds | Items, SelectRow(row)) => self.select_row(row, host),
            (Message, Select) => self.open_image(host),
            (Message | Image, LongSelect) => self.long_select(host),
            (_, Back) => self.back(host),
            _ => Transition::Ignored,
        };

        trace!("{} at {} -> {}", event, self.level(), transition);
        transition
    }

    /// Open the feed or item at `row` of the current list
    fn select_row<H: Host + ?Sized>(&mut self, row: u8, host: &mut H) -> Transition {
        let Some(list) = self.level().list() else {
            return Transition::Ignored;
        };
        // Also rejects every row while the list is empty
        if row >= self.row_count(list) {
            return Transition::Ignored;
        }
        let Some(next) = self.level().deeper() else {
            return Transition::Ignored;
        };
        if !self.levels.push(next) {
            return Transition::Ignored;
        }

        match next {
            Level::Items => {
                self.item_progress.reset();
                self.items.clear();
                host.push_window(Level::Items);
                self.send(host, Command::ListItems(row));
            }
            Level::Message => {
                self.message_ready = false;
                self.has_thumbnail = false;
                self.selected_item = row;
                host.push_window(Level::Message);
                self.send(host, Command::FetchMessage(row));
            }
            _ => {}
        }
        Transition::Pushed(next)
    }

    /// Open the image of the selected item
    fn open_image<H: Host + ?Sized>(&mut self, host: &mut H) -> Transition {
        if !self.has_thumbnail || self.is_transfer_in_progress() {
            return Transition::Ignored;
        }
        if !self.levels.push(Level::Image) {
            return Transition::Ignored;
        }
        host.push_window(Level::Image);
        self.send(host, Command::FetchImage(self.selected_item));
        Transition::Pushed(Level::Image)
    }

    /// Ask the companion whether the selected item has an image
    fn long_select<H: Host + ?Sized>(&mut self, host: &mut H) -> Transition {
        if self.is_transfer_in_progress() {
            return Transition::Ignored;
        }
        let command = Command::PrepareThumbnail(self.selected_item);
        self.send(host, command);
        Transition::Requested(command)
    }

    /// Close the current level and resume whatever it interrupted
    fn back<H: Host + ?Sized>(&mut self, host: &mut H) -> Transition {
        let Some(closed) = self.levels.pop() else {
            return Transition::Exit;
        };
        host.pop_window(closed);

        match closed {
            Level::Items if self.feed_progress.is_pending() => {
                self.send(host, Command::ContinueFeeds);
            }
            Level::Message if self.item_progress.is_pending() => {
                self.send(host, Command::ContinueItems);
            }
            Level::Image => {
                self.send(host, Command::FetchMessage(self.selected_item));
            }
            _ => {}
        }
        Transition::Popped(closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::*;
    use crate::nav::ListKind;

    fn started() -> (Session, MockHost) {
        let mut session = Session::default();
        let mut host = MockHost::new();
        session.start(&mut host);
        host.clear();
        (session, host)
    }

    fn at_items(feed_total: u8) -> (Session, MockHost) {
        let (mut session, mut host) = started();
        session
            .handle_packet(&feed_packet(0, feed_total, "Feed"), &mut host)
            .unwrap();
        session.handle_nav(NavEvent::SelectRow(0), &mut host);
        host.clear();
        (session, host)
    }

    fn at_message(item_total: u8) -> (Session, MockHost) {
        let (mut session, mut host) = at_items(1);
        session
            .handle_packet(&item_packet(0, item_total, "Item"), &mut host)
            .unwrap();
        session.handle_nav(NavEvent::SelectRow(0), &mut host);
        host.clear();
        (session, host)
    }

    #[test]
    fn test_select_on_empty_list_is_ignored() {
        let (mut session, mut host) = started();
        let t = session.handle_nav(NavEvent::SelectRow(0), &mut host);
        assert_eq!(t, Transition::Ignored);
        assert_eq!(session.level(), Level::Feeds);
        assert!(host.sent.is_empty());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_select_on_empty_item_list_is_ignored() {
        let (mut session, mut host) = at_items(1);
        assert_eq!(session.row_count(ListKind::Items), 0);

        let t = session.handle_nav(NavEvent::SelectRow(0), &mut host);
        assert_eq!(t, Transition::Ignored);
        assert_eq!(session.level(), Level::Items);
        assert_eq!(session.levels().depth(), 2);
        assert!(host.sent.is_empty());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_select_row_beyond_count_is_ignored() {
        let (mut session, mut host) = started();
        session.handle_packet(&feed_packet(0, 2, "A"), &mut host).unwrap();
        host.clear();
        let t = session.handle_nav(NavEvent::SelectRow(2), &mut host);
        assert_eq!(t, Transition::Ignored);
        assert!(host.sent.is_empty());
    }

    #[test]
    fn test_select_feed_lists_items() {
        let (mut session, mut host) = started();
        session.handle_packet(&feed_packet(0, 3, "A"), &mut host).unwrap();
        host.clear();

        let t = session.handle_nav(NavEvent::SelectRow(1), &mut host);
        assert_eq!(t, Transition::Pushed(Level::Items));
        assert_eq!(session.level(), Level::Items);
        assert_eq!(host.sent, vec![Command::ListItems(1)]);
        assert_eq!(host.calls, vec![ViewCall::Push(Level::Items)]);
        assert_eq!(session.row_count(ListKind::Items), 0);
    }

    #[test]
    fn test_reentering_items_clears_titles() {
        let (mut session, mut host) = at_items(1);
        session.handle_packet(&item_packet(0, 1, "Stale"), &mut host).unwrap();
        session.handle_nav(NavEvent::Back, &mut host);
        session.handle_nav(NavEvent::SelectRow(0), &mut host);

        assert_eq!(session.item_title(0), Some(""));
        assert_eq!(session.row_count(ListKind::Items), 0);
        assert!(session.progress(ListKind::Items).is_fresh());
    }

    #[test]
    fn test_select_item_fetches_message() {
        let (mut session, mut host) = at_items(1);
        session.handle_packet(&item_packet(0, 5, "A"), &mut host).unwrap();
        host.clear();

        let t = session.handle_nav(NavEvent::SelectRow(4), &mut host);
        assert_eq!(t, Transition::Pushed(Level::Message));
        assert_eq!(session.selected_item(), 4);
        assert_eq!(host.sent, vec![Command::FetchMessage(4)]);
        assert!(!session.is_message_ready());
    }

    #[test]
    fn test_entering_message_clears_thumbnail_flag() {
        let (mut session, mut host) = at_items(1);
        session.handle_packet(&item_packet(0, 2, "A"), &mut host).unwrap();
        session.handle_packet(&thumbnail_packet(true), &mut host).unwrap();
        assert!(session.has_thumbnail());

        session.handle_nav(NavEvent::SelectRow(0), &mut host);
        assert!(!session.has_thumbnail());
    }

    #[test]
    fn test_image_requires_thumbnail() {
        let (mut session, mut host) = at_message(1);
        let t = session.handle_nav(NavEvent::Select, &mut host);
        assert_eq!(t, Transition::Ignored);
        assert!(host.sent.is_empty());
    }

    #[test]
    fn test_image_blocked_during_transfer() {
        let (mut session, mut host) = at_message(1);
        session.handle_packet(&thumbnail_packet(true), &mut host).unwrap();
        session.handle_packet(&chunk_packet(0, 2, b"Hel"), &mut host).unwrap();
        host.clear();

        assert_eq!(session.handle_nav(NavEvent::Select, &mut host), Transition::Ignored);
        assert_eq!(session.handle_nav(NavEvent::LongSelect, &mut host), Transition::Ignored);
        assert_eq!(session.level(), Level::Message);
        assert!(host.sent.is_empty());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_open_image() {
        let (mut session, mut host) = at_message(1);
        session.handle_packet(&thumbnail_packet(true), &mut host).unwrap();
        host.clear();

        let t = session.handle_nav(NavEvent::Select, &mut host);
        assert_eq!(t, Transition::Pushed(Level::Image));
        assert_eq!(host.sent, vec![Command::FetchImage(0)]);
        assert_eq!(host.calls, vec![ViewCall::Push(Level::Image)]);
    }

    #[test]
    fn test_long_select_checks_thumbnail() {
        let (mut session, mut host) = at_message(1);
        let t = session.handle_nav(NavEvent::LongSelect, &mut host);
        assert_eq!(t, Transition::Requested(Command::PrepareThumbnail(0)));
        assert_eq!(host.sent, vec![Command::PrepareThumbnail(0)]);
    }

    #[test]
    fn test_long_select_in_image_view() {
        let (mut session, mut host) = at_message(1);
        session.handle_packet(&thumbnail_packet(true), &mut host).unwrap();
        session.handle_nav(NavEvent::Select, &mut host);
        host.clear();

        let t = session.handle_nav(NavEvent::LongSelect, &mut host);
        assert_eq!(t, Transition::Requested(Command::PrepareThumbnail(0)));
    }

    #[test]
    fn test_long_select_ignored_in_lists() {
        let (mut session, mut host) = at_items(1);
        assert_eq!(session.handle_nav(NavEvent::LongSelect, &mut host), Transition::Ignored);
        assert_eq!(session.handle_nav(NavEvent::Select, &mut host), Transition::Ignored);
    }

    #[test]
    fn test_back_to_feeds_resumes_unfinished_list() {
        let (mut session, mut host) = at_items(3);

        let t = session.handle_nav(NavEvent::Back, &mut host);
        assert_eq!(t, Transition::Popped(Level::Items));
        assert_eq!(session.level(), Level::Feeds);
        assert_eq!(host.sent, vec![Command::ContinueFeeds]);
        assert_eq!(host.calls, vec![ViewCall::Pop(Level::Items)]);
    }

    #[test]
    fn test_back_to_feeds_with_complete_list() {
        let (mut session, mut host) = at_items(1);
        session.handle_nav(NavEvent::Back, &mut host);
        assert!(host.sent.is_empty());
    }

    #[test]
    fn test_back_to_items_resumes_unfinished_list() {
        let (mut session, mut host) = at_message(4);
        session.handle_nav(NavEvent::Back, &mut host);
        assert_eq!(session.level(), Level::Items);
        assert_eq!(host.sent, vec![Command::ContinueItems]);

        host.clear();
        let (mut session, mut host2) = at_message(1);
        session.handle_nav(NavEvent::Back, &mut host2);
        assert!(host2.sent.is_empty());
    }

    #[test]
    fn test_back_from_image_refetches_message() {
        let (mut session, mut host) = at_message(1);
        session.handle_packet(&thumbnail_packet(true), &mut host).unwrap();
        session.handle_nav(NavEvent::Select, &mut host);
        host.clear();

        let t = session.handle_nav(NavEvent::Back, &mut host);
        assert_eq!(t, Transition::Popped(Level::Image));
        assert_eq!(session.level(), Level::Message);
        assert_eq!(host.sent, vec![Command::FetchMessage(0)]);
    }

    #[test]
    fn test_back_at_root_exits() {
        let (mut session, mut host) = started();
        assert_eq!(session.handle_nav(NavEvent::Back, &mut host), Transition::Exit);
        assert!(host.calls.is_empty());
    }
}

//! Reassembly engine
//!
//! Applies the events decoded from one inbound packet. Each channel is
//! handled independently. Chunks are assumed to arrive lossless and in
//! transmission order; flow control keeps exactly one chunk in flight.

use wristfeed_protocol::{
    Command, ImageHeader, InboundEvent, InboundEvents, LayoutBundle, ListEntry, TransferChunk,
};

use crate::config::Layout;
use crate::model::{Payload, Progress};
use crate::nav::{Level, ListKind};
use crate::session::Session;
use crate::traits::Host;

impl Session {
    /// Apply every channel present in one packet
    pub fn on_receive<H: Host + ?Sized>(&mut self, events: &InboundEvents<'_>, host: &mut H) {
        for event in events {
            match event {
                InboundEvent::FeedTitle(entry) => self.on_list_entry(ListKind::Feeds, entry, host),
                InboundEvent::ItemTitle(entry) => self.on_list_entry(ListKind::Items, entry, host),
                InboundEvent::Layout(bundle) => self.on_layout(bundle, host),
                InboundEvent::RefreshNotice => self.on_refresh_notice(host),
                InboundEvent::ImageHeader(header) => self.on_image_header(header, host),
                InboundEvent::Chunk(chunk) => self.on_chunk(chunk, host),
                InboundEvent::ThumbnailFlag(flag) => self.on_thumbnail_flag(*flag, host),
            }
        }
    }

    /// One row of the feed or item list
    fn on_list_entry<H: Host + ?Sized>(&mut self, list: ListKind, entry: &ListEntry<'_>, host: &mut H) {
        let index = usize::from(entry.offset);
        let stored = match list {
            ListKind::Feeds => self.feeds.write(index, entry.title),
            ListKind::Items => self.items.write(index, entry.title),
        };
        if !stored {
            warn!("{} row {} out of range", list, entry.offset);
        }

        // A completed list restarting at row 0 is a new listing
        if entry.offset == 0 && self.progress(list).is_complete() {
            debug!("{} list restarted", list);
            self.progress_mut(list).reset();
        }

        if self.progress(list).is_fresh() {
            let capacity = u8::try_from(list.capacity()).unwrap_or(u8::MAX);
            self.progress_mut(list).begin(entry.total.min(capacity));
            host.reload_list(list);
            if list == ListKind::Feeds && self.refresh_overlay {
                self.refresh_overlay = false;
                host.set_refresh_overlay(false);
            }
        }

        host.mark_dirty(list.level());

        if self.progress_mut(list).advance() {
            debug!("{} list complete ({} rows)", list, self.progress(list).total());
            self.dispatcher.throttle(host);
        } else if self.progress(list).is_pending() && self.level() == list.level() {
            let next = match list {
                ListKind::Feeds => Command::ContinueFeeds,
                ListKind::Items => Command::ContinueItems,
            };
            self.send(host, next);
        }
    }

    fn on_layout<H: Host + ?Sized>(&mut self, bundle: &LayoutBundle, host: &mut H) {
        self.layout = Layout::from(bundle);
        debug!("layout {}", self.layout);

        host.set_row_height(self.layout.row_height);
        self.apply_font(Level::Feeds, host);
        host.reload_list(ListKind::Feeds);
        host.mark_dirty(Level::Feeds);

        if self.levels.contains(Level::Items) {
            self.apply_font(Level::Items, host);
            host.reload_list(ListKind::Items);
            host.mark_dirty(Level::Items);
        }

        // Also re-presented under an open image; popping refetches the text
        if self.levels.contains(Level::Message) {
            self.present_message(host);
        }
    }

    /// Only meaningful while the feed list is still waiting for its first row
    fn on_refresh_notice<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.level() == Level::Feeds && self.feed_progress.is_fresh() {
            self.refresh_overlay = true;
            host.set_refresh_overlay(true);
        }
    }

    fn on_image_header<H: Host + ?Sized>(&mut self, header: &ImageHeader, host: &mut H) {
        debug!(
            "image {}x{} ({} bytes/row)",
            header.width, header.height, header.bytes_per_row
        );
        self.transfer.arm_image(*header);
        host.replace_image_surface(header);
        self.send(host, Command::Ack);
    }

    fn on_chunk<H: Host + ?Sized>(&mut self, chunk: &TransferChunk<'_>, host: &mut H) {
        if self.chunk_progress.is_fresh() {
            // A declared total of zero is treated as a single chunk
            self.chunk_progress.begin(chunk.total.max(1));
            self.transfer.begin();
        }

        let payload = chunk.payload();
        let copied = self.transfer.write(usize::from(chunk.offset), payload);
        if copied < payload.len() {
            warn!(
                "chunk at {} clipped to {} of {} bytes",
                chunk.offset,
                copied,
                payload.len()
            );
        }

        if self.chunk_progress.advance() {
            trace!("transfer complete");
            self.dispatcher.throttle(host);
            self.chunk_progress.reset();
            if self.level() == Level::Message && self.transfer.payload() == Payload::Text {
                self.message_ready = true;
                self.present_message(host);
            }
        } else {
            self.send(host, Command::Ack);
        }

        if self.level() == Level::Image {
            host.mark_dirty(Level::Image);
        }
    }

    fn on_thumbnail_flag<H: Host + ?Sized>(&mut self, flag: bool, host: &mut H) {
        self.has_thumbnail = flag;
        self.send(host, Command::Ack);
    }

    /// Lay out the message text and show it
    fn present_message<H: Host + ?Sized>(&mut self, host: &mut H) {
        self.apply_font(Level::Message, host);
        host.set_scrollable_content(self.transfer.text());
        host.reveal(Level::Message);
    }

    fn apply_font<H: Host + ?Sized>(&self, level: Level, host: &mut H) {
        if let Some(font) = self.layout.font_for(level) {
            host.apply_font(level, font);
        }
    }

    fn progress_mut(&mut self, list: ListKind) -> &mut Progress {
        match list {
            ListKind::Feeds => &mut self.feed_progress,
            ListKind::Items => &mut self.item_progress,
        }
    }
}

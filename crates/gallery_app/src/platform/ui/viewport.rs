use gallery_core::ScrollMetrics;

use super::constants::{CARD_ROWS, ROW_PX};
use super::keys::ScrollCommand;

/// Scroll position over the card pane, in terminal rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    offset: u32,
    height: u32,
}

impl Viewport {
    pub fn new(height: u32) -> Self {
        Self { offset: 0, height }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_height(&mut self, height: u32, content_rows: u32) {
        self.height = height;
        self.offset = self.offset.min(self.max_offset(content_rows));
    }

    pub fn reset(&mut self) {
        self.offset = 0;
    }

    pub fn apply(&mut self, command: ScrollCommand, content_rows: u32) {
        let page = self.height.max(1);
        match command {
            ScrollCommand::CardDown => self.scroll_by(CARD_ROWS, content_rows),
            ScrollCommand::CardUp => self.offset = self.offset.saturating_sub(CARD_ROWS),
            ScrollCommand::PageDown => self.scroll_by(page, content_rows),
            ScrollCommand::PageUp => self.offset = self.offset.saturating_sub(page),
            ScrollCommand::Top => self.offset = 0,
            ScrollCommand::Bottom => self.offset = self.max_offset(content_rows),
        }
    }

    pub fn scroll_by(&mut self, rows: u32, content_rows: u32) {
        self.offset = self
            .offset
            .saturating_add(rows)
            .min(self.max_offset(content_rows));
    }

    /// Index of the first card whose title row is visible.
    pub fn focused_card(&self) -> usize {
        self.offset.div_ceil(CARD_ROWS) as usize
    }

    /// Scroll position in pixels, one row being `ROW_PX`.
    pub fn metrics(&self, content_rows: u32) -> ScrollMetrics {
        ScrollMetrics {
            offset: self.offset.saturating_mul(ROW_PX),
            viewport_height: self.height.saturating_mul(ROW_PX),
            content_height: content_rows.saturating_mul(ROW_PX),
        }
    }

    fn max_offset(&self, content_rows: u32) -> u32 {
        content_rows.saturating_sub(self.height)
    }
}

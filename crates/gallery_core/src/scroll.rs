/// Distance from the content bottom at which the next page is requested.
pub const NEAR_END_THRESHOLD: u32 = 100;
/// Scroll offset beyond which the "scroll to top" affordance is shown.
pub const SCROLL_TOP_THRESHOLD: u32 = 20;

/// Geometry of the scrolling gallery surface, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollMetrics {
    pub offset: u32,
    pub viewport_height: u32,
    pub content_height: u32,
}

impl ScrollMetrics {
    pub fn is_near_end(&self) -> bool {
        let visible_bottom = self.offset.saturating_add(self.viewport_height);
        visible_bottom >= self.content_height.saturating_sub(NEAR_END_THRESHOLD)
    }

    pub fn shows_scroll_to_top(&self) -> bool {
        self.offset > SCROLL_TOP_THRESHOLD
    }
}

pub mod constants;
pub mod keys;
pub mod notify;
pub mod render;
pub mod viewport;

use gallery_core::{ImageRecord, Notification};

/// Persistent display surface for image cards.
pub trait GallerySurface {
    fn clear(&mut self);
    /// Appends cards in order, then re-indexes every card that can be enlarged.
    fn append(&mut self, items: &[ImageRecord]);
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fire-and-forget user notifications.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

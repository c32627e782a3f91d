use engine_logging::{engine_info, engine_warn};
use gallery_core::Notification;

use super::Notifier;

/// Keeps the most recent notification for the notice line.
#[derive(Debug, Default)]
pub struct NoticeBoard {
    current: Option<Notification>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }
}

impl Notifier for NoticeBoard {
    fn notify(&mut self, notification: &Notification) {
        match notification {
            Notification::Warning(_) | Notification::Failure(_) => {
                engine_warn!("Notify {}: {}", label(notification), notification.message());
            }
            Notification::Success { .. } | Notification::Info(_) => {
                engine_info!("Notify {}: {}", label(notification), notification.message());
            }
        }
        self.current = Some(notification.clone());
    }
}

pub fn label(notification: &Notification) -> &'static str {
    match notification {
        Notification::Warning(_) => "warning",
        Notification::Success { .. } => "success",
        Notification::Failure(_) => "failure",
        Notification::Info(_) => "info",
    }
}

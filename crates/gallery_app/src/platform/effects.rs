use engine_logging::{engine_debug, engine_info};
use gallery_core::{Effect, PageRequest};
use gallery_engine::EngineHandle;

use super::ui::{GallerySurface, Notifier};

/// Destination for page requests.
pub trait FetchQueue {
    fn enqueue(&self, request: PageRequest);
}

impl FetchQueue for EngineHandle {
    fn enqueue(&self, request: PageRequest) {
        EngineHandle::enqueue(self, request);
    }
}

/// What a batch of effects did to the surface and notifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectSummary {
    pub cleared: bool,
    pub appended: usize,
    pub notified: bool,
}

impl EffectSummary {
    /// Whether anything on screen changed.
    pub fn changed(&self) -> bool {
        self.cleared || self.appended > 0 || self.notified
    }
}

pub struct EffectRunner<Q, G, N> {
    queue: Q,
    gallery: G,
    notifier: N,
}

impl<Q: FetchQueue, G: GallerySurface, N: Notifier> EffectRunner<Q, G, N> {
    pub fn new(queue: Q, gallery: G, notifier: N) -> Self {
        Self {
            queue,
            gallery,
            notifier,
        }
    }

    pub fn gallery(&self) -> &G {
        &self.gallery
    }

    #[cfg(test)]
    pub fn gallery_mut(&mut self) -> &mut G {
        &mut self.gallery
    }

    #[cfg(test)]
    pub fn queue(&self) -> &Q {
        &self.queue
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn run(&mut self, effects: Vec<Effect>) -> EffectSummary {
        let mut summary = EffectSummary::default();
        for effect in effects {
            match effect {
                Effect::ClearGallery => {
                    engine_debug!("ClearGallery cards={}", self.gallery.len());
                    self.gallery.clear();
                    summary.cleared = true;
                }
                Effect::FetchPage(request) => {
                    engine_info!(
                        "FetchPage request_id={} page={} query={:?}",
                        request.request_id,
                        request.page,
                        request.query
                    );
                    self.queue.enqueue(request);
                }
                Effect::RenderItems(items) => {
                    engine_debug!("RenderItems count={}", items.len());
                    self.gallery.append(&items);
                    summary.appended += items.len();
                }
                Effect::Notify(notification) => {
                    self.notifier.notify(&notification);
                    summary.notified = true;
                }
            }
        }
        summary
    }
}

use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_debug, engine_warn};
use gallery_core::PageRequest;

use crate::fetch::{fetch_page, FetchSettings, ImageSearch, ReqwestImageSearch};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    Fetch(PageRequest),
}

/// Receives engine events; called from runtime worker threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs page fetches on a background tokio runtime.
///
/// Dropping the handle stops the worker thread once queued commands are handed off.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let search = Arc::new(ReqwestImageSearch::new(settings)?);
        Self::with_search(search, sink)
    }

    pub fn with_search(
        search: Arc<dyn ImageSearch>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let search = search.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(search.as_ref(), command, sink.as_ref()).await;
                });
            }
            engine_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    pub fn enqueue(&self, request: PageRequest) {
        let request_id = request.request_id;
        if self.cmd_tx.send(EngineCommand::Fetch(request)).is_err() {
            engine_warn!("Engine stopped; dropping request {}", request_id);
        }
    }
}

async fn handle_command(search: &dyn ImageSearch, command: EngineCommand, sink: &dyn EventSink) {
    match command {
        EngineCommand::Fetch(request) => {
            let outcome = fetch_page(search, &request).await;
            sink.emit(EngineEvent::PageFetched {
                request_id: request.request_id,
                outcome,
            });
        }
    }
}

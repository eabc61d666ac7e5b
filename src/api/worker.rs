//! Background threads for service calls.
//!
//! Requests (library loads, generation) and duration probes each get their
//! own thread so a slow synthesis never holds up probing, and neither blocks
//! the UI. Results come back on a single event channel.

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};
use std::thread;
use std::time::Duration;

use crate::library::{AudioItem, DurationError, ItemKey, probe_duration};

use super::client::AudioService;
use super::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCmd {
    /// Fetch the whole library listing.
    LoadLibrary,
    /// Generate audio for the given page URL.
    Generate(String),
}

#[derive(Debug)]
pub enum ApiEvent {
    Library(Result<Vec<AudioItem>, ApiError>),
    Generated {
        /// The page URL that was submitted.
        source: String,
        result: Result<String, ApiError>,
    },
    /// `None` when the media could not be fetched or parsed.
    Duration {
        key: ItemKey,
        duration: Option<Duration>,
    },
}

pub struct ApiWorker {
    requests: Sender<ApiCmd>,
    probes: Sender<ItemKey>,
    events: Receiver<ApiEvent>,
}

impl ApiWorker {
    pub fn new(service: Arc<dyn AudioService>) -> Self {
        let (requests_tx, requests_rx) = mpsc::channel::<ApiCmd>();
        let (probes_tx, probes_rx) = mpsc::channel::<ItemKey>();
        let (events_tx, events_rx) = mpsc::channel::<ApiEvent>();

        let request_service = service.clone();
        let request_events = events_tx.clone();
        thread::spawn(move || {
            while let Ok(cmd) = requests_rx.recv() {
                let event = handle_request(cmd, request_service.as_ref());
                if request_events.send(event).is_err() {
                    break;
                }
            }
        });

        thread::spawn(move || {
            while let Ok(key) = probes_rx.recv() {
                let event = probe_item(key, service.as_ref());
                if events_tx.send(event).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: requests_tx,
            probes: probes_tx,
            events: events_rx,
        }
    }

    pub fn send(&self, cmd: ApiCmd) -> Result<(), SendError<ApiCmd>> {
        self.requests.send(cmd)
    }

    /// Queue a duration probe for `key`.
    pub fn probe(&self, key: ItemKey) -> Result<(), SendError<ItemKey>> {
        self.probes.send(key)
    }

    pub fn try_recv(&self) -> Result<ApiEvent, TryRecvError> {
        self.events.try_recv()
    }

    #[cfg(test)]
    pub(crate) fn recv_timeout(
        &self,
        timeout: Duration,
    ) -> Result<ApiEvent, mpsc::RecvTimeoutError> {
        self.events.recv_timeout(timeout)
    }
}

pub(crate) fn handle_request(cmd: ApiCmd, service: &dyn AudioService) -> ApiEvent {
    match cmd {
        ApiCmd::LoadLibrary => {
            let result = service.fetch_library();
            match &result {
                Ok(items) => log::info!("library loaded: {} item(s)", items.len()),
                Err(e) => log::error!("failed to load library: {e}"),
            }
            ApiEvent::Library(result)
        }
        ApiCmd::Generate(source) => {
            log::info!("requesting audio for {source}");
            let result = service.generate(&source);
            match &result {
                Ok(path) => log::info!("generation finished for {source}: {path:?}"),
                Err(e) => log::error!("generation failed for {source}: {e}"),
            }
            ApiEvent::Generated { source, result }
        }
    }
}

pub(crate) fn probe_item(key: ItemKey, service: &dyn AudioService) -> ApiEvent {
    let probed = service
        .fetch_media(key.as_str())
        .map_err(DurationError::from)
        .and_then(|bytes| probe_duration(&bytes));

    let duration = match probed {
        Ok(d) => Some(d),
        Err(e) => {
            log::warn!("could not determine duration of {key}: {e}");
            None
        }
    };
    ApiEvent::Duration { key, duration }
}

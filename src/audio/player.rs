use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::api::AudioService;

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle, PlaybackInfo};

/// Extra time the audio thread gets past the fade-out before quitting
/// stops waiting for it. A download in progress does not see `Quit`.
const QUIT_GRACE: Duration = Duration::from_secs(1);

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    events: Receiver<AudioEvent>,
    playback: PlaybackHandle,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(service: Arc<dyn AudioService>) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let (events_tx, events_rx) = mpsc::channel::<AudioEvent>();
        let playback_info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));

        let audio_handle = spawn_audio_thread(service, rx, events_tx, playback_info.clone());

        Self {
            tx,
            events: events_rx,
            playback: playback_info,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.playback.clone()
    }

    pub fn send(&self, cmd: AudioCmd) -> Result<(), mpsc::SendError<AudioCmd>> {
        self.tx.send(cmd)
    }

    pub fn try_recv_event(&self) -> Result<AudioEvent, TryRecvError> {
        self.events.try_recv()
    }

    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        let handle = self.join.lock().ok().and_then(|mut j| j.take());
        if let Some(h) = handle {
            if !join_within(h, fade_out + QUIT_GRACE) {
                log::warn!("audio thread still busy, leaving it behind");
            }
        }
    }
}

/// Join `handle` if it finishes within `limit`; otherwise detach it.
pub(super) fn join_within(handle: JoinHandle<()>, limit: Duration) -> bool {
    let deadline = Instant::now() + limit;
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(10));
    }
    let _ = handle.join();
    true
}

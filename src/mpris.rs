//! MPRIS (desktop media keys / `playerctl`) integration.
//!
//! Commands from the session bus are forwarded to the event loop as
//! `ControlCmd`s; the loop pushes what is playing back through `MprisHandle`.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::app::PlaybackStatus;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
}

/// What the active item looks like to media controls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NowPlaying {
    /// Row of the item in the listing; used for the track id.
    pub index: usize,
    pub title: String,
    pub url: Option<String>,
    pub length: Option<Duration>,
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackStatus,
    title: Option<String>,
    url: Option<String>,
    length_micros: Option<u64>,
    track_id: Option<OwnedObjectPath>,
}

pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn set_playback(&self, playback: PlaybackStatus) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
        let _ = self.notify.send(());
    }

    pub fn set_now_playing(&self, now: Option<&NowPlaying>) {
        if let Ok(mut s) = self.state.lock() {
            match now {
                Some(n) => {
                    s.title = Some(n.title.clone());
                    s.url = n.url.clone();
                    s.length_micros = n.length.map(|d| d.as_micros() as u64);
                    s.track_id =
                        OwnedObjectPath::try_from(format!("{OBJECT_PATH}/track/{}", n.index)).ok();
                }
                None => {
                    s.title = None;
                    s.url = None;
                    s.length_micros = None;
                    s.track_id = None;
                }
            }
        }
        let _ = self.notify.send(());
    }
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {
        // No-op for TUI.
    }

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "blogcast"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec![]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackStatus::Stopped => "Stopped",
            PlaybackStatus::Playing => "Playing",
            PlaybackStatus::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        let mut map = HashMap::new();
        let Ok(s) = self.state.lock() else {
            return map;
        };

        if let Some(id) = s.track_id.clone() {
            let path: ObjectPath<'static> = id.into_inner();
            if let Some(v) = owned(Value::from(path)) {
                map.insert("mpris:trackid".to_string(), v);
            }
        }
        if let Some(v) = owned(Value::from(s.title.clone().unwrap_or_default())) {
            map.insert("xesam:title".to_string(), v);
        }
        if let Some(url) = s.url.clone() {
            if let Some(v) = owned(Value::from(url)) {
                map.insert("xesam:url".to_string(), v);
            }
        }
        if let Some(len) = s.length_micros {
            if let Some(v) = owned(Value::from(len as i64)) {
                map.insert("mpris:length".to_string(), v);
            }
        }
        map
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(async move {
            let connection = match Connection::session().await {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("MPRIS: failed to connect to session bus: {e}");
                    return;
                }
            };

            if let Err(e) = connection
                .request_name("org.mpris.MediaPlayer2.blogcast")
                .await
            {
                log::warn!("MPRIS: failed to acquire name: {e}");
                return;
            }

            let object_server = connection.object_server();

            if let Err(e) = object_server
                .at(OBJECT_PATH, RootIface { tx: tx.clone() })
                .await
            {
                log::warn!("MPRIS: failed to register root iface: {e}");
                return;
            }

            if let Err(e) = object_server
                .at(
                    OBJECT_PATH,
                    PlayerIface {
                        tx,
                        state: state_for_thread,
                    },
                )
                .await
            {
                log::warn!("MPRIS: failed to register player iface: {e}");
                return;
            }

            let iface = match object_server
                .interface::<_, PlayerIface>(OBJECT_PATH)
                .await
            {
                Ok(iface) => iface,
                Err(e) => {
                    log::warn!("MPRIS: player iface not reachable: {e}");
                    return;
                }
            };

            log::info!("MPRIS: registered on the session bus");

            loop {
                Timer::after(Duration::from_millis(200)).await;
                if !drain(&notify_rx) {
                    continue;
                }

                let emitter = iface.signal_emitter();
                let player = iface.get().await;
                if let Err(e) = player.playback_status_changed(emitter).await {
                    log::debug!("MPRIS: failed to signal status change: {e}");
                }
                if let Err(e) = player.metadata_changed(emitter).await {
                    log::debug!("MPRIS: failed to signal metadata change: {e}");
                }
            }
        });
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

/// Empty the notify channel; true if anything was waiting.
fn drain(rx: &Receiver<()>) -> bool {
    let mut any = false;
    while rx.try_recv().is_ok() {
        any = true;
    }
    any
}

#[cfg(test)]
mod tests;

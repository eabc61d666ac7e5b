//! Application model types: `App` and the submission/message state it owns.
//!
//! The `App` struct holds the library listing, the cursor and focus, the
//! global playback selection and everything the URL submission flow shows.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use crate::api::ApiError;
use crate::audio::PlaybackHandle;
use crate::config::AfterGenerate;
use crate::library::{AudioItem, ItemKey};

use super::playback::{PlaybackState, PlaybackStatus, PlaybackTransition};

pub const INVALID_URL_MESSAGE: &str = "Please enter a valid URL.";
pub const GENERATION_FAILED_MESSAGE: &str = "Failed to generate audio.";
pub const GENERATION_ERROR_MESSAGE: &str = "Error occurred";
pub const SEND_ERROR_TEXT: &str = "Error occurred while sending the URL.";
pub const EMPTY_LIBRARY_MESSAGE: &str = "No audio files in the library yet.";

/// Which part of the screen receives key presses.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Input,
    Library,
}

/// Outcome of the most recent generation request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CurrentAudio {
    /// Playable path of the generated audio, always starting with `/`.
    Ready(String),
    Failed,
}

impl CurrentAudio {
    pub fn text(&self) -> &str {
        match self {
            CurrentAudio::Ready(path) => path,
            CurrentAudio::Failed => SEND_ERROR_TEXT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    /// Transient messages disappear once this instant is reached.
    pub expires_at: Option<Instant>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Input was unusable; nothing should be sent.
    Rejected,
    /// Send a generation request for this URL.
    Send(String),
}

/// Work the runtime should schedule after a state change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FollowUp {
    ReloadLibrary,
    ProbeDuration(ItemKey),
}

/// The main application model.
pub struct App {
    pub library: Vec<AudioItem>,
    pub selected: usize,
    pub focus: Focus,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,

    pub url_input: String,
    pub current_audio: Option<CurrentAudio>,
    pub message: Option<StatusMessage>,
    /// Generation requests sent but not answered yet.
    pub pending_generations: usize,

    durations: HashMap<ItemKey, Duration>,
    /// Keys a duration probe was requested for, answered or not. A key is
    /// probed at most once while it stays in the listing.
    probed: HashSet<ItemKey>,
    message_timeout: Duration,
    after_generate: AfterGenerate,
}

impl App {
    pub fn new(message_timeout: Duration, after_generate: AfterGenerate) -> Self {
        Self {
            library: Vec::new(),
            selected: 0,
            focus: Focus::Input,
            playback: PlaybackState::default(),
            playback_handle: None,

            url_input: String::new(),
            current_audio: None,
            message: None,
            pending_generations: 0,

            durations: HashMap::new(),
            probed: HashSet::new(),
            message_timeout,
            after_generate,
        }
    }

    /// Attach a `PlaybackHandle` used to observe playback progress.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// Return true if the library contains any items.
    pub fn has_items(&self) -> bool {
        !self.library.is_empty()
    }

    /// Row under the cursor while the library has focus.
    pub fn hovered(&self) -> Option<usize> {
        (self.focus == Focus::Library && self.selected < self.library.len())
            .then_some(self.selected)
    }

    pub fn active_item(&self) -> Option<&AudioItem> {
        let key = self.playback.active.as_ref()?;
        self.library.iter().find(|item| &item.key() == key)
    }

    pub fn status(&self) -> PlaybackStatus {
        self.playback.status()
    }

    pub fn duration(&self, key: &ItemKey) -> Option<Duration> {
        self.durations.get(key).copied()
    }

    pub fn set_duration(&mut self, key: ItemKey, duration: Option<Duration>) {
        if let Some(d) = duration {
            self.durations.insert(key, d);
        }
    }

    // Focus and cursor

    pub fn focus_input(&mut self) {
        self.focus = Focus::Input;
    }

    pub fn focus_library(&mut self) {
        self.focus = Focus::Library;
    }

    /// Move the cursor down, wrapping to the top.
    pub fn next(&mut self) {
        if self.has_items() {
            self.selected = (self.selected + 1) % self.library.len();
        }
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn prev(&mut self) {
        if self.has_items() {
            self.selected = match self.selected {
                0 => self.library.len() - 1,
                i => i - 1,
            };
        }
    }

    // URL input and submission

    pub fn push_input_char(&mut self, c: char) {
        self.url_input.push(c);
    }

    pub fn pop_input_char(&mut self) {
        self.url_input.pop();
    }

    /// Validate the URL input. Empty input shows a transient message instead.
    pub fn submit(&mut self, now: Instant) -> SubmitOutcome {
        let url = self.url_input.trim();
        if url.is_empty() {
            self.flash(INVALID_URL_MESSAGE, now);
            return SubmitOutcome::Rejected;
        }

        let url = url.to_string();
        self.pending_generations += 1;
        SubmitOutcome::Send(url)
    }

    /// Record the answer to a generation request for `source`.
    pub fn apply_generation(
        &mut self,
        source: &str,
        result: Result<String, ApiError>,
    ) -> Option<FollowUp> {
        self.pending_generations = self.pending_generations.saturating_sub(1);

        match result {
            Ok(path) if !path.trim().is_empty() => {
                let path = path.trim();
                self.current_audio = Some(CurrentAudio::Ready(format!(
                    "/{}",
                    path.trim_start_matches('/')
                )));
                self.clear_message();
                self.after_generation(source, path)
            }
            Ok(_) => {
                self.set_message(GENERATION_FAILED_MESSAGE);
                None
            }
            Err(_) => {
                self.current_audio = Some(CurrentAudio::Failed);
                self.set_message(GENERATION_ERROR_MESSAGE);
                None
            }
        }
    }

    fn after_generation(&mut self, source: &str, path: &str) -> Option<FollowUp> {
        match self.after_generate {
            AfterGenerate::Keep => None,
            AfterGenerate::Refetch => Some(FollowUp::ReloadLibrary),
            AfterGenerate::Append => {
                let item = AudioItem::new(path, source);
                let key = item.key();
                if self.library.iter().any(|i| i.key() == key) {
                    return None;
                }
                self.library.push(item);
                if !self.probed.insert(key.clone()) {
                    return None;
                }
                Some(FollowUp::ProbeDuration(key))
            }
        }
    }

    /// Replace the listing with a fresh one. Failures keep the current listing.
    ///
    /// Returns the keys that were never probed; they count as probed from now on.
    pub fn apply_library(&mut self, result: Result<Vec<AudioItem>, ApiError>) -> Vec<ItemKey> {
        let Ok(items) = result else {
            return Vec::new();
        };

        self.library = items;
        if self.selected >= self.library.len() {
            self.selected = self.library.len().saturating_sub(1);
        }

        let mut keys: Vec<ItemKey> = self.library.iter().map(AudioItem::key).collect();
        self.durations.retain(|k, _| keys.contains(k));
        self.probed.retain(|k| keys.contains(k));

        keys.sort();
        keys.dedup();
        keys.retain(|k| !self.durations.contains_key(k) && !self.probed.contains(k));
        self.probed.extend(keys.iter().cloned());
        keys
    }

    // Playback

    /// Click on the row under the cursor.
    pub fn click_selected(&mut self) -> Option<PlaybackTransition> {
        let key = self.library.get(self.selected)?.key();
        Some(self.playback.click(key))
    }

    /// Click on whatever is active, or the cursor row when nothing is.
    pub fn click_active(&mut self) -> Option<PlaybackTransition> {
        match self.playback.active.clone() {
            Some(key) => Some(self.playback.click(key)),
            None => self.click_selected(),
        }
    }

    /// Play the item after (or before) the active one, wrapping around the
    /// listing. Without an active item the cursor row is used.
    pub fn step_active(&mut self, forward: bool) -> Option<PlaybackTransition> {
        if !self.has_items() {
            return None;
        }

        let len = self.library.len();
        let current = self
            .playback
            .active
            .as_ref()
            .and_then(|key| self.library.iter().position(|i| &i.key() == key));

        let target = match current {
            Some(i) if forward => (i + 1) % len,
            Some(0) => len - 1,
            Some(i) => i - 1,
            None => self.selected.min(len - 1),
        };

        self.selected = target;
        let key = self.library[target].key();
        if self.playback.is_playing(&key) {
            return None;
        }
        Some(self.playback.click(key))
    }

    pub fn playback_ended(&mut self, key: &ItemKey) {
        self.playback.stopped(key);
    }

    pub fn playback_failed(&mut self, key: &ItemKey, reason: &str, now: Instant) {
        self.playback.stopped(key);
        self.flash(&format!("Playback failed: {reason}"), now);
    }

    // Messages

    /// Show `text` until the configured timeout elapses.
    pub fn flash(&mut self, text: &str, now: Instant) {
        self.message = Some(StatusMessage {
            text: text.to_string(),
            expires_at: Some(now + self.message_timeout),
        });
    }

    /// Show `text` until something replaces it.
    pub fn set_message(&mut self, text: &str) {
        self.message = Some(StatusMessage {
            text: text.to_string(),
            expires_at: None,
        });
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    /// Drop a transient message once its time is up.
    pub fn tick(&mut self, now: Instant) {
        let expired = self
            .message
            .as_ref()
            .and_then(|m| m.expires_at)
            .is_some_and(|at| now >= at);
        if expired {
            self.message = None;
        }
    }
}

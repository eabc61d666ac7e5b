//! Audio-related small types and handles.
//!
//! This module defines the commands and events exchanged with the audio
//! thread and the playback info it publishes.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::library::ItemKey;

#[derive(Debug)]
pub enum AudioCmd {
    /// Make `key` audible: resume it when it is loaded, otherwise download and start it.
    Play(ItemKey),
    /// Pause whatever is loaded.
    Pause,
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioEvent {
    /// The track ran out.
    Ended(ItemKey),
    /// The track could not be downloaded, decoded or played.
    Failed { key: ItemKey, reason: String },
}

#[derive(Debug, Clone, Default)]
/// Runtime playback information shared with the UI.
pub struct PlaybackInfo {
    /// Item loaded in the player (if any).
    pub key: Option<ItemKey>,
    /// Elapsed playback time for the loaded item.
    pub elapsed: Duration,
    /// Whether audio is currently coming out.
    pub playing: bool,
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;

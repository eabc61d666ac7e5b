//! The single global player selection.

use crate::library::ItemKey;

/// Which item (if any) is bound to the player, and whether it is playing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub active: Option<ItemKey>,
    pub playing: bool,
}

/// What a click asks the player to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackTransition {
    /// Bind a different item and start it.
    Start(ItemKey),
    /// Continue the already active item.
    Resume(ItemKey),
    Pause,
}

/// Status reported to desktop media controls.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn is_active(&self, key: &ItemKey) -> bool {
        self.active.as_ref() == Some(key)
    }

    /// True when `key` is the active item and it is playing.
    pub fn is_playing(&self, key: &ItemKey) -> bool {
        self.playing && self.is_active(key)
    }

    /// Click on `key`: pause it when it is the one playing, otherwise make it
    /// the active item and play it.
    pub fn click(&mut self, key: ItemKey) -> PlaybackTransition {
        if self.is_playing(&key) {
            self.playing = false;
            return PlaybackTransition::Pause;
        }

        self.playing = true;
        if self.is_active(&key) {
            PlaybackTransition::Resume(key)
        } else {
            self.active = Some(key.clone());
            PlaybackTransition::Start(key)
        }
    }

    /// The player stopped on its own (track ended or failed).
    pub fn stopped(&mut self, key: &ItemKey) {
        if self.is_active(key) {
            self.playing = false;
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        match (&self.active, self.playing) {
            (None, _) => PlaybackStatus::Stopped,
            (Some(_), true) => PlaybackStatus::Playing,
            (Some(_), false) => PlaybackStatus::Paused,
        }
    }
}

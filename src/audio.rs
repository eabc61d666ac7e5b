//! The single global player.
//!
//! A dedicated thread owns the output device and at most one sink. The UI
//! talks to it through `AudioCmd`s and hears back through `AudioEvent`s and
//! the shared `PlaybackHandle`.

mod error;
mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;

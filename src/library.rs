//! Library records and per-item derived data.
//!
//! `AudioItem` is what the library service hands back. Durations are probed
//! from the media itself and are never stored alongside the item.

mod duration;
mod model;

pub use duration::*;
pub use model::*;

#[cfg(test)]
pub(crate) mod tests;

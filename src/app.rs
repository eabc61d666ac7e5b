//! Application module: exposes the app model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model`; the single-player selection it
//! carries lives in `app::playback`.

mod model;
mod playback;

pub use model::*;
pub use playback::*;

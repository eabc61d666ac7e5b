//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive the service client, the UI
//! and logging, plus helpers to locate and load them from disk.

mod load;
mod schema;

pub use load::default_log_path;
pub use schema::*;

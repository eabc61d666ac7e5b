//! Access to the generation and library services.
//!
//! `client` talks HTTP, `worker` keeps that off the UI thread and reports
//! results back as `ApiEvent`s.

mod client;
mod error;
mod types;
mod worker;

pub use client::*;
pub use error::*;
pub use types::*;
pub use worker::*;

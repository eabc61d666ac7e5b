//! Duration probing and formatting.
//!
//! The library service does not report lengths, so the client reads them
//! from the container metadata of the downloaded media.

use std::io::Cursor;
use std::time::Duration;

use lofty::error::LoftyError;
use lofty::prelude::*;
use lofty::probe::Probe;
use thiserror::Error;

use crate::api::ApiError;

/// Shown for rows whose duration is not known (yet).
pub const UNKNOWN_DURATION: &str = "00:00";

#[derive(Error, Debug)]
pub enum DurationError {
    #[error("failed to fetch media: {0}")]
    Fetch(#[from] ApiError),
    #[error("failed to read media metadata: {0}")]
    Metadata(#[from] LoftyError),
    #[error("failed to identify media format: {0}")]
    Format(#[from] std::io::Error),
}

/// Read the playback length of an in-memory audio file.
pub fn probe_duration(bytes: &[u8]) -> Result<Duration, DurationError> {
    let tagged = Probe::new(Cursor::new(bytes)).guess_file_type()?.read()?;
    Ok(tagged.properties().duration())
}

/// Format a duration as `MM:SS`, or `H:MM:SS` from one hour on when `with_hours` is set.
///
/// Partial seconds are truncated. Without hours, minutes keep counting past 59.
pub fn format_duration(d: Duration, with_hours: bool) -> String {
    let secs = d.as_secs();
    if with_hours && secs >= 3600 {
        format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    } else {
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

/// Format an optional duration, falling back to [`UNKNOWN_DURATION`].
pub fn format_known(d: Option<Duration>, with_hours: bool) -> String {
    match d {
        Some(d) => format_duration(d, with_hours),
        None => UNKNOWN_DURATION.to_string(),
    }
}

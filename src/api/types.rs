//! Wire records exchanged with the services.

use serde::{Deserialize, Serialize};

use crate::library::AudioItem;

use super::error::ApiError;

/// Body of `GET /get-audio-library`.
#[derive(Debug, Deserialize)]
pub struct LibraryResponse {
    pub audio_library_data: Vec<AudioItem>,
}

/// Body of `POST /search-view/`.
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub url: &'a str,
}

/// Response of `POST /search-view/`.
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub audio_url: String,
}

pub fn parse_library(body: &str) -> Result<Vec<AudioItem>, ApiError> {
    let parsed: LibraryResponse = serde_json::from_str(body)?;
    Ok(parsed.audio_library_data)
}

/// Returns the raw `audio_url`; an empty string means the server produced nothing.
pub fn parse_generated(body: &str) -> Result<String, ApiError> {
    let parsed: GenerateResponse = serde_json::from_str(body)?;
    Ok(parsed.audio_url)
}

use rodio::decoder::DecoderError;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("download failed: {0}")]
    Fetch(#[from] ApiError),
    #[error("unsupported or corrupt audio: {0}")]
    Decode(#[from] DecoderError),
    #[error("no audio output device")]
    NoDevice,
}

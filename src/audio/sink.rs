//! Utilities for turning downloaded media into `rodio` sinks.

use std::io::Cursor;

use rodio::{Decoder, OutputStream, Sink};

use crate::api::AudioService;
use crate::library::ItemKey;

use super::error::AudioError;

pub(super) type MediaDecoder = Decoder<Cursor<Vec<u8>>>;

/// Decode an in-memory media file.
pub(super) fn decode(bytes: Vec<u8>) -> Result<MediaDecoder, AudioError> {
    Ok(Decoder::new(Cursor::new(bytes))?)
}

/// Download the media behind `key` and prepare a paused `Sink` for it.
pub(super) fn load_sink(
    service: &dyn AudioService,
    stream: &OutputStream,
    key: &ItemKey,
) -> Result<Sink, AudioError> {
    let bytes = service.fetch_media(key.as_str())?;
    log::debug!("downloaded {} byte(s) for {key}", bytes.len());

    let source = decode(bytes)?;
    let sink = Sink::connect_new(stream.mixer());
    sink.append(source);
    sink.pause();
    Ok(sink)
}

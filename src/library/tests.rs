use std::time::Duration;

use super::*;

/// Build a silent 16-bit mono PCM WAV file of `seconds` length.
pub(crate) fn wav_fixture(seconds: u32) -> Vec<u8> {
    let sample_rate: u32 = 8000;
    let block_align: u16 = 2;
    let data_len = sample_rate * u32::from(block_align) * seconds;

    let mut out = Vec::with_capacity(44 + data_len as usize);
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + data_len).to_le_bytes());
    out.extend_from_slice(b"WAVE");
    out.extend_from_slice(b"fmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes()); // PCM
    out.extend_from_slice(&1u16.to_le_bytes()); // mono
    out.extend_from_slice(&sample_rate.to_le_bytes());
    out.extend_from_slice(&(sample_rate * u32::from(block_align)).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&16u16.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&data_len.to_le_bytes());
    out.resize(out.len() + data_len as usize, 0);
    out
}

#[test]
fn format_duration_pads_minutes_and_seconds() {
    assert_eq!(format_duration(Duration::from_secs(65), false), "01:05");
    assert_eq!(format_duration(Duration::from_secs(9), false), "00:09");
    assert_eq!(format_duration(Duration::ZERO, false), "00:00");
    assert_eq!(format_duration(Duration::from_secs(65), true), "01:05");
}

#[test]
fn format_duration_truncates_partial_seconds() {
    assert_eq!(format_duration(Duration::from_secs_f64(65.9), false), "01:05");
}

#[test]
fn format_duration_hours_are_opt_in() {
    let long = Duration::from_secs(4530);
    assert_eq!(format_duration(long, false), "75:30");
    assert_eq!(format_duration(long, true), "1:15:30");
    assert_eq!(format_duration(Duration::from_secs(3599), true), "59:59");
    assert_eq!(format_duration(Duration::from_secs(3600), true), "1:00:00");
}

#[test]
fn format_known_falls_back_to_placeholder() {
    assert_eq!(format_known(None, true), UNKNOWN_DURATION);
    assert_eq!(format_known(Some(Duration::from_secs(61)), true), "01:01");
}

#[test]
fn probe_duration_reads_wav_length() {
    let d = probe_duration(&wav_fixture(2)).unwrap();
    assert_eq!(d.as_secs(), 2);
}

#[test]
fn probe_duration_rejects_garbage() {
    assert!(probe_duration(b"definitely not audio").is_err());
}

#[test]
fn item_key_is_derived_from_url() {
    let a = AudioItem::new("static/a.wav", "Track A");
    let b = AudioItem::new("static/a.wav", "Renamed");
    assert_eq!(a.key(), b.key());
    assert_eq!(a.key().as_str(), "static/a.wav");
    assert_ne!(a.key(), AudioItem::new("static/b.wav", "Track A").key());
}

#[test]
fn audio_item_deserializes_from_library_record() {
    let item: AudioItem =
        serde_json::from_str(r#"{"url":"static/x.wav","title":"Post"}"#).unwrap();
    assert_eq!(item, AudioItem::new("static/x.wav", "Post"));
}

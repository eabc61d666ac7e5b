use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use url::Url;

use super::error::AudioError;
use super::player::join_within;
use super::sink::decode;
use super::thread::elapsed_since;
use crate::api::{ApiError, AudioService};
use crate::library::AudioItem;
use crate::library::tests::wav_fixture;

/// Backend whose media download never finishes until `release` is dropped.
struct StalledMedia {
    release: Mutex<Receiver<()>>,
}

impl AudioService for StalledMedia {
    fn fetch_library(&self) -> Result<Vec<AudioItem>, ApiError> {
        Ok(Vec::new())
    }

    fn generate(&self, _url: &str) -> Result<String, ApiError> {
        Ok(String::new())
    }

    fn fetch_media(&self, _path: &str) -> Result<Vec<u8>, ApiError> {
        let _ = self.release.lock().unwrap().recv();
        Err(ApiError::Transport("stalled".to_string()))
    }

    fn media_url(&self, path: &str) -> Result<Url, ApiError> {
        Url::parse("http://stalled.test/")
            .unwrap()
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }
}

#[test]
fn decode_accepts_pcm_wav() {
    assert!(decode(wav_fixture(1)).is_ok());
}

#[test]
fn decode_rejects_garbage() {
    assert!(matches!(
        decode(b"<html>not found</html>".to_vec()),
        Err(AudioError::Decode(_))
    ));
}

#[test]
fn elapsed_adds_running_stretch_to_accumulated_time() {
    let paused = elapsed_since(Duration::from_secs(3), None);
    assert_eq!(paused, Duration::from_secs(3));

    let started = Instant::now() - Duration::from_secs(2);
    let running = elapsed_since(Duration::from_secs(3), Some(started));
    assert!(running >= Duration::from_secs(5));
}

#[test]
fn join_gives_up_on_a_thread_stuck_in_a_download() {
    let (release_tx, release_rx) = mpsc::channel::<()>();
    let service: Arc<dyn AudioService> = Arc::new(StalledMedia {
        release: Mutex::new(release_rx),
    });

    let worker = thread::spawn(move || {
        let _ = service.fetch_media("/slow.wav");
    });

    let started = Instant::now();
    assert!(!join_within(worker, Duration::from_millis(100)));
    assert!(started.elapsed() < Duration::from_secs(5));
    drop(release_tx);
}

#[test]
fn join_waits_for_a_thread_that_finishes() {
    let worker = thread::spawn(|| thread::sleep(Duration::from_millis(20)));
    assert!(join_within(worker, Duration::from_secs(5)));
}

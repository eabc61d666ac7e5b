use std::sync::Arc;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStreamBuilder, Sink};

use crate::api::AudioService;
use crate::library::ItemKey;

use super::error::AudioError;
use super::sink::load_sink;
use super::types::{AudioCmd, AudioEvent, PlaybackHandle};

/// Time played so far: everything before the last pause plus the running stretch.
pub(super) fn elapsed_since(accumulated: Duration, started_at: Option<Instant>) -> Duration {
    accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed())
}

pub(super) fn spawn_audio_thread(
    service: Arc<dyn AudioService>,
    rx: Receiver<AudioCmd>,
    events: Sender<AudioEvent>,
    playback_info: PlaybackHandle,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut stream = match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => stream,
            Err(e) => {
                log::error!("failed to open audio output: {e}");
                refuse_playback(&rx, &events);
                return;
            }
        };
        // rodio logs to stderr when OutputStream is dropped, which would tear
        // through the TUI.
        stream.log_on_drop(false);

        let mut loaded: Option<(ItemKey, Sink)> = None;

        // Track start time and accumulated elapsed when paused.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;

        fn publish(
            playback_info: &PlaybackHandle,
            key: Option<&ItemKey>,
            elapsed: Duration,
            playing: bool,
        ) {
            if let Ok(mut info) = playback_info.lock() {
                info.key = key.cloned();
                info.elapsed = elapsed;
                info.playing = playing;
            }
        }

        fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
            if fade_out_ms == 0 {
                sink.set_volume(0.0);
                return;
            }
            let steps: u64 = 20;
            let step_ms = (fade_out_ms / steps).max(1);
            sink.set_volume(1.0);
            for step in 1..=steps {
                let t = step as f32 / steps as f32;
                sink.set_volume(1.0 - t);
                thread::sleep(Duration::from_millis(step_ms));
            }
            sink.set_volume(0.0);
        }

        loop {
            match rx.recv_timeout(Duration::from_millis(200)) {
                Ok(AudioCmd::Play(key)) => {
                    let resumable = matches!(&loaded, Some((k, s)) if *k == key && !s.empty());
                    if resumable {
                        if let Some((_, s)) = loaded.as_ref() {
                            s.play();
                        }
                        if started_at.is_none() {
                            started_at = Some(Instant::now());
                        }
                        publish(
                            &playback_info,
                            Some(&key),
                            elapsed_since(accumulated, started_at),
                            true,
                        );
                        continue;
                    }

                    if let Some((_, old)) = loaded.take() {
                        old.stop();
                    }
                    started_at = None;
                    accumulated = Duration::ZERO;

                    match load_sink(service.as_ref(), &stream, &key) {
                        Ok(sink) => {
                            sink.play();
                            log::info!("playing {key}");
                            loaded = Some((key.clone(), sink));
                            started_at = Some(Instant::now());
                            publish(&playback_info, Some(&key), Duration::ZERO, true);
                        }
                        Err(e) => {
                            log::error!("cannot play {key}: {e}");
                            publish(&playback_info, None, Duration::ZERO, false);
                            let _ = events.send(AudioEvent::Failed {
                                key,
                                reason: e.to_string(),
                            });
                        }
                    }
                }

                Ok(AudioCmd::Pause) => {
                    if let Some((key, s)) = loaded.as_ref() {
                        s.pause();
                        if let Some(st) = started_at.take() {
                            accumulated += st.elapsed();
                        }
                        publish(&playback_info, Some(key), accumulated, false);
                    }
                }

                Ok(AudioCmd::Quit { fade_out_ms }) => {
                    if let Some((_, s)) = loaded.as_ref() {
                        if started_at.is_some() {
                            fade_out_sink(s, fade_out_ms);
                        }
                        s.stop();
                    }
                    // Update shared state so UI/MPRIS don't keep showing Playing.
                    if let Ok(mut info) = playback_info.lock() {
                        info.playing = false;
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    let Some((key, s)) = loaded.as_ref() else {
                        continue;
                    };
                    if started_at.is_none() {
                        continue;
                    }

                    if s.empty() {
                        accumulated = elapsed_since(accumulated, started_at);
                        started_at = None;
                        publish(&playback_info, Some(key), accumulated, false);
                        let _ = events.send(AudioEvent::Ended(key.clone()));
                    } else {
                        publish(
                            &playback_info,
                            Some(key),
                            elapsed_since(accumulated, started_at),
                            true,
                        );
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

/// Answer every play request with a failure when there is no output device.
fn refuse_playback(rx: &Receiver<AudioCmd>, events: &Sender<AudioEvent>) {
    while let Ok(cmd) = rx.recv() {
        match cmd {
            AudioCmd::Play(key) => {
                let _ = events.send(AudioEvent::Failed {
                    key,
                    reason: AudioError::NoDevice.to_string(),
                });
            }
            AudioCmd::Pause => {}
            AudioCmd::Quit { .. } => break,
        }
    }
}

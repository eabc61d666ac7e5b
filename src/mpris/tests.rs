use super::*;
use std::sync::mpsc;
use std::time::Duration;

fn make_now_playing() -> NowPlaying {
    NowPlaying {
        index: 7,
        title: "Why Rust".to_string(),
        url: Some("http://localhost:8000/media/why-rust.mp3".to_string()),
        length: Some(Duration::from_micros(1_234_567)),
    }
}

#[test]
fn set_now_playing_sets_and_clears_shared_state() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };

    handle.set_now_playing(Some(&make_now_playing()));

    {
        let s = state.lock().unwrap();
        assert_eq!(s.title.as_deref(), Some("Why Rust"));
        assert_eq!(
            s.url.as_deref(),
            Some("http://localhost:8000/media/why-rust.mp3")
        );
        assert_eq!(s.length_micros, Some(1_234_567));
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
    }

    handle.set_now_playing(None);
    {
        let s = state.lock().unwrap();
        assert_eq!(s.title, None);
        assert_eq!(s.url, None);
        assert_eq!(s.length_micros, None);
        assert!(s.track_id.is_none());
    }

    assert!(drain(&notify_rx));
    assert!(!drain(&notify_rx));
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");

    state.lock().unwrap().playback = PlaybackStatus::Playing;
    assert_eq!(iface.playback_status(), "Playing");

    state.lock().unwrap().playback = PlaybackStatus::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_includes_expected_keys_when_present() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    {
        let mut s = state.lock().unwrap();
        s.title = Some("Title".to_string());
        s.url = Some("http://localhost:8000/a.mp3".to_string());
        s.length_micros = Some(42);
        s.track_id = OwnedObjectPath::try_from("/org/mpris/MediaPlayer2/track/1").ok();
    }

    let map = iface.metadata();
    for k in ["mpris:trackid", "xesam:title", "xesam:url", "mpris:length"] {
        assert!(map.contains_key(k), "missing key: {k}");
    }
}

#[test]
fn metadata_omits_unknown_length_and_url() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    let map = iface.metadata();
    assert!(map.contains_key("xesam:title"));
    assert!(!map.contains_key("xesam:url"));
    assert!(!map.contains_key("mpris:length"));
    assert!(!map.contains_key("mpris:trackid"));
}

#[test]
fn player_methods_forward_control_commands() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface { tx, state };

    iface.play_pause();
    iface.next();
    iface.previous();
    iface.stop();

    let got: Vec<ControlCmd> = rx.try_iter().collect();
    assert_eq!(
        got,
        vec![
            ControlCmd::PlayPause,
            ControlCmd::Next,
            ControlCmd::Prev,
            ControlCmd::Stop
        ]
    );
}

use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{ApiCmd, ApiEvent, ApiWorker, AudioService};
use crate::app::{App, FollowUp, PlaybackStatus, PlaybackTransition, SubmitOutcome};
use crate::audio::{AudioCmd, AudioEvent, AudioPlayer};
use crate::config;
use crate::library::ItemKey;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::keys::{Intent, intent_for};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// Long-lived handles the loop talks to.
pub struct Context<'a> {
    pub settings: &'a config::Settings,
    pub service: &'a dyn AudioService,
    pub api: &'a ApiWorker,
    pub audio_player: &'a AudioPlayer,
    pub mpris: &'a MprisHandle,
}

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Last-known active item as emitted to MPRIS.
    pub last_mpris_key: Option<ItemKey>,
    /// Last-known playback status as emitted to MPRIS.
    pub last_mpris_status: PlaybackStatus,
    /// Known durations when MPRIS was last updated; a new probe result can
    /// fill in the active item's length.
    last_mpris_length: Option<Duration>,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `app`.
    pub fn new(app: &App) -> Self {
        Self {
            last_mpris_key: app.playback.active.clone(),
            last_mpris_status: app.status(),
            last_mpris_length: None,
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, results from the
/// worker threads and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ctx: &Context<'_>,
    app: &mut App,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let now = Instant::now();
        app.tick(now);

        while let Ok(ev) = ctx.api.try_recv() {
            handle_api_event(ev, ctx, app);
        }

        while let Ok(ev) = ctx.audio_player.try_recv_event() {
            match ev {
                AudioEvent::Ended(key) => {
                    log::debug!("playback ended: {key}");
                    app.playback_ended(&key);
                }
                AudioEvent::Failed { key, reason } => {
                    app.playback_failed(&key, &reason, now);
                }
            }
        }

        // Keep MPRIS in sync even when playback changes come from the player
        // itself (track ended or failed).
        let length = app.playback.active.as_ref().and_then(|k| app.duration(k));
        if app.playback.active != state.last_mpris_key
            || app.status() != state.last_mpris_status
            || length != state.last_mpris_length
        {
            update_mpris(ctx.mpris, app, ctx.service);
            state.last_mpris_key = app.playback.active.clone();
            state.last_mpris_status = app.status();
            state.last_mpris_length = length;
        }

        terminal.draw(|f| ui::draw(f, app, &ctx.settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, ctx, app) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                let Some(intent) = intent_for(app.focus, key) else {
                    continue;
                };
                if handle_intent(intent, ctx, app) {
                    break;
                }
            }
        }
    }

    Ok(())
}

fn handle_api_event(ev: ApiEvent, ctx: &Context<'_>, app: &mut App) {
    match ev {
        ApiEvent::Library(result) => {
            for key in app.apply_library(result) {
                let _ = ctx.api.probe(key);
            }
        }
        ApiEvent::Generated { source, result } => {
            match app.apply_generation(&source, result) {
                Some(FollowUp::ReloadLibrary) => {
                    let _ = ctx.api.send(ApiCmd::LoadLibrary);
                }
                Some(FollowUp::ProbeDuration(key)) => {
                    let _ = ctx.api.probe(key);
                }
                None => {}
            }
        }
        ApiEvent::Duration { key, duration } => app.set_duration(key, duration),
    }
}

/// Forward a playback transition to the audio thread.
fn apply_transition(transition: Option<PlaybackTransition>, audio_player: &AudioPlayer) {
    let cmd = match transition {
        Some(PlaybackTransition::Start(key)) | Some(PlaybackTransition::Resume(key)) => {
            AudioCmd::Play(key)
        }
        Some(PlaybackTransition::Pause) => AudioCmd::Pause,
        None => return,
    };
    if let Err(e) = audio_player.send(cmd) {
        log::error!("audio thread is gone: {e}");
    }
}

fn quit(ctx: &Context<'_>) {
    ctx.audio_player
        .quit_softly(Duration::from_millis(ctx.settings.audio.quit_fade_out_ms));
}

/// Returns true when the loop should exit.
fn handle_control_cmd(cmd: ControlCmd, ctx: &Context<'_>, app: &mut App) -> bool {
    let playing = app.status() == PlaybackStatus::Playing;
    let transition = match cmd {
        ControlCmd::Quit => {
            quit(ctx);
            return true;
        }
        ControlCmd::PlayPause => app.click_active(),
        ControlCmd::Play if !playing => app.click_active(),
        ControlCmd::Pause | ControlCmd::Stop if playing => app.click_active(),
        ControlCmd::Play | ControlCmd::Pause | ControlCmd::Stop => None,
        ControlCmd::Next => app.step_active(true),
        ControlCmd::Prev => app.step_active(false),
    };
    apply_transition(transition, ctx.audio_player);
    false
}

/// Returns true when the loop should exit.
fn handle_intent(intent: Intent, ctx: &Context<'_>, app: &mut App) -> bool {
    match intent {
        Intent::Quit => {
            quit(ctx);
            return true;
        }
        Intent::Type(c) => app.push_input_char(c),
        Intent::Erase => app.pop_input_char(),
        Intent::Submit => {
            if let SubmitOutcome::Send(url) = app.submit(Instant::now()) {
                let _ = ctx.api.send(ApiCmd::Generate(url));
            }
        }
        Intent::FocusInput => app.focus_input(),
        Intent::FocusLibrary => app.focus_library(),
        Intent::CursorDown => app.next(),
        Intent::CursorUp => app.prev(),
        Intent::Click => apply_transition(app.click_selected(), ctx.audio_player),
        Intent::NextActive => apply_transition(app.step_active(true), ctx.audio_player),
        Intent::PrevActive => apply_transition(app.step_active(false), ctx.audio_player),
        Intent::Reload => {
            let _ = ctx.api.send(ApiCmd::LoadLibrary);
        }
    }
    false
}

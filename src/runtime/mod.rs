use std::env;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::api::{ApiCmd, ApiWorker, AudioService, HttpService};
use crate::app::App;
use crate::audio::AudioPlayer;
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod keys;
mod mpris_sync;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, warnings) = settings::load_settings(env::args().nth(1));
    logging::init(&settings.logging);
    for w in warnings {
        log::warn!("{w}");
    }
    let http = HttpService::new(&settings.server)?;
    log::info!("blogcast starting against {}", http.base());

    let service: Arc<dyn AudioService> = Arc::new(http);
    let api = ApiWorker::new(service.clone());
    let audio_player = AudioPlayer::new(service.clone());

    let mut app = App::new(
        Duration::from_millis(settings.ui.message_timeout_ms),
        settings.library.after_generate,
    );
    app.set_playback_handle(audio_player.playback_handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &app, service.as_ref());

    let _ = api.send(ApiCmd::LoadLibrary);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&app);
        let ctx = event_loop::Context {
            settings: &settings,
            service: service.as_ref(),
            api: &api,
            audio_player: &audio_player,
            mpris: &mpris,
        };
        event_loop::run(&mut terminal, &ctx, &mut app, &control_rx, &mut state)
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    log::info!("blogcast exiting");
    run_result
}

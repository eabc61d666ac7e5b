//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap},
};

use crate::app::{App, EMPTY_LIBRARY_MESSAGE, Focus};
use crate::config::UiSettings;
use crate::library::{format_duration, format_known};

pub const INPUT_PLACEHOLDER: &str = "Add link to a blogpost.";
pub const GENERATE_HINT: &str = "Generate Audio";
pub const PLAY_GLYPH: &str = "▶";
pub const PAUSE_GLYPH: &str = "⏸";

const INPUT_CONTROLS: &str = "[enter] generate | [tab/esc] library | [ctrl-c] quit";
const LIBRARY_CONTROLS: &str =
    "[j/k] up/down | [enter/space] play/pause | [h/l] prev/next | [r] reload | [i/tab] input | [q] quit";

fn left_pad() -> Padding {
    Padding {
        left: 1,
        right: 0,
        top: 0,
        bottom: 0,
    }
}

/// Label of the first column: a play/pause glyph on the hovered row, the
/// 1-based position otherwise.
pub fn row_label(app: &App, index: usize) -> String {
    if app.hovered() != Some(index) {
        return format!("{}.", index + 1);
    }
    let playing = app
        .library
        .get(index)
        .is_some_and(|item| app.playback.is_playing(&item.key()));
    let glyph = if playing { PAUSE_GLYPH } else { PLAY_GLYPH };
    glyph.to_string()
}

/// Horizontal scroll and cursor column for `len` input chars shown in
/// `width` columns. The end of the input, and the cursor after it, stay visible.
pub fn input_view(len: usize, width: u16) -> (u16, u16) {
    let len = u16::try_from(len).unwrap_or(u16::MAX);
    let scroll = len.saturating_sub(width.saturating_sub(1));
    (scroll, len - scroll)
}

/// The line under the input box: pending work, the last message and the
/// current audio.
fn submission_line(app: &App) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();

    match &app.current_audio {
        None => spans.push(Span::from(format!("[enter] {GENERATE_HINT}")).bold()),
        Some(current) => spans.push(Span::from(current.text().to_string())),
    }

    if app.pending_generations > 0 {
        spans.push(Span::from(" • "));
        spans.push(Span::from("Generating...").italic());
    }

    if let Some(msg) = &app.message {
        spans.push(Span::from(" • "));
        spans.push(Span::from(msg.text.clone()).add_modifier(Modifier::BOLD));
    }

    Line::from(spans)
}

/// "Now playing" text for the status box.
///
/// While a started item is still downloading, the player has not picked it
/// up yet and the item shows as loading.
fn now_playing_text(app: &App, with_hours: bool) -> String {
    let Some(item) = app.active_item() else {
        return "Stopped".to_string();
    };

    let player = app
        .playback_handle
        .as_ref()
        .and_then(|h| h.lock().ok().map(|info| (info.key.clone(), info.elapsed, info.playing)))
        .filter(|(key, _, _)| key.as_ref() == app.playback.active.as_ref());

    let state = match (app.playback.playing, &player) {
        (false, _) => "Paused",
        (true, Some((_, _, true))) => "Playing",
        (true, None) if app.playback_handle.is_none() => "Playing",
        (true, _) => "Loading",
    };

    let mut text = format!("{state}: {}", item.title);
    if let Some((_, elapsed, _)) = player {
        let total = format_known(app.duration(&item.key()), with_hours);
        text.push_str(&format!(
            " [{}/{}]",
            format_duration(elapsed, with_hours),
            total
        ));
    }
    text
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw(frame: &mut Frame, app: &App, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" blogcast ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // URL input
    let input_focused = app.focus == Focus::Input;
    let input_line = if app.url_input.is_empty() {
        Line::from(Span::from(INPUT_PLACEHOLDER).dim())
    } else {
        Line::from(app.url_input.as_str())
    };
    let mut input_block = Block::default()
        .borders(Borders::ALL)
        .title(" url ")
        .padding(left_pad());
    if input_focused {
        input_block = input_block.border_style(Style::default().add_modifier(Modifier::BOLD));
    }
    // Borders plus left padding.
    let text_width = chunks[1].width.saturating_sub(3);
    let (scroll, cursor) = input_view(app.url_input.chars().count(), text_width);
    frame.render_widget(
        Paragraph::new(input_line)
            .block(input_block)
            .scroll((0, scroll)),
        chunks[1],
    );
    if input_focused {
        let x = chunks[1].x.saturating_add(2).saturating_add(cursor);
        frame.set_cursor_position((x, chunks[1].y.saturating_add(1)));
    }

    let submission = Paragraph::new(submission_line(app))
        .block(Block::bordered().padding(left_pad()).title(" audio "))
        .wrap(Wrap { trim: true });
    frame.render_widget(submission, chunks[2]);

    // Library
    let library_block = Block::default()
        .borders(Borders::ALL)
        .title(" Your Library ");
    if app.library.is_empty() {
        let empty = Paragraph::new(EMPTY_LIBRARY_MESSAGE)
            .alignment(Alignment::Center)
            .block(library_block);
        frame.render_widget(empty, chunks[3]);
    } else {
        let rows: Vec<Row> = app
            .library
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let duration = format_known(app.duration(&item.key()), ui_settings.duration_hours);
                let mut row = Row::new(vec![
                    Cell::from(row_label(app, i)),
                    Cell::from(item.title.as_str()),
                    Cell::from(duration),
                ]);
                if app.playback.is_active(&item.key()) {
                    row = row.style(Style::default().add_modifier(Modifier::BOLD));
                }
                row
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Min(10),
                Constraint::Length(9),
            ],
        )
        .header(Row::new(vec!["#", "Title", "Duration"]).underlined())
        .block(library_block)
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        let mut state = TableState::default();
        if app.focus == Focus::Library {
            state.select(Some(app.selected));
        }
        frame.render_stateful_widget(table, chunks[3], &mut state);
    }

    // Status box
    let status = Paragraph::new(now_playing_text(app, ui_settings.duration_hours))
        .block(Block::bordered().padding(left_pad()).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[4]);

    let footer_text = match app.focus {
        Focus::Input => INPUT_CONTROLS,
        Focus::Library => LIBRARY_CONTROLS,
    };
    let footer = Paragraph::new(footer_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(left_pad()),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::api::ApiError;
    use crate::audio::PlaybackInfo;
    use crate::config::AfterGenerate;
    use crate::library::AudioItem;

    fn app_with(items: Vec<AudioItem>) -> App {
        let mut app = App::new(Duration::from_millis(5000), AfterGenerate::Refetch);
        app.apply_library(Ok(items));
        app
    }

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal
            .draw(|f| draw(f, app, &UiSettings::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn renders_rows_with_index_title_and_unknown_duration() {
        let app = app_with(vec![
            AudioItem::new("/a.mp3", "Track A"),
            AudioItem::new("/b.mp3", "Track B"),
        ]);
        let screen = render(&app);
        assert!(screen.contains("Your Library"));
        assert!(screen.contains("1."));
        assert!(screen.contains("Track A"));
        assert!(screen.contains("2."));
        assert!(screen.contains("00:00"));
        assert!(screen.contains(INPUT_PLACEHOLDER));
        assert!(screen.contains(GENERATE_HINT));
    }

    #[test]
    fn single_item_listing_renders_exactly_one_row() {
        let app = app_with(vec![AudioItem::new("a.mp3", "Track A")]);
        let screen = render(&app);
        assert_eq!(screen.matches("1.").count(), 1);
        assert_eq!(screen.matches("Track A").count(), 1);
        assert!(!screen.contains("2."));
    }

    #[test]
    fn input_view_keeps_the_end_of_long_input_visible() {
        assert_eq!(input_view(0, 20), (0, 0));
        assert_eq!(input_view(10, 20), (0, 10));
        assert_eq!(input_view(19, 20), (0, 19));
        assert_eq!(input_view(25, 20), (6, 19));
        assert_eq!(input_view(5, 0), (5, 0));
        assert_eq!(input_view(200_000, 20), (u16::MAX - 19, 19));
    }

    #[test]
    fn long_url_scrolls_to_its_end() {
        let mut app = app_with(Vec::new());
        app.url_input = format!("https://blog.example/{}/tail-marker", "x".repeat(300));
        let screen = render(&app);
        assert!(screen.contains("tail-marker"));
        assert!(!screen.contains("https://blog.example"));
    }

    #[test]
    fn started_item_shows_loading_until_the_player_runs_it() {
        let mut app = app_with(vec![AudioItem::new("/a.mp3", "Track A")]);
        let handle = Arc::new(Mutex::new(PlaybackInfo::default()));
        app.set_playback_handle(handle.clone());

        app.click_selected();
        assert!(render(&app).contains("Loading: Track A"));

        {
            let mut info = handle.lock().unwrap();
            info.key = Some(AudioItem::new("/a.mp3", "").key());
            info.elapsed = Duration::from_secs(5);
            info.playing = true;
        }
        assert!(render(&app).contains("Playing: Track A [00:05/00:00]"));

        app.click_selected();
        assert!(render(&app).contains("Paused: Track A"));
    }

    #[test]
    fn known_duration_is_rendered() {
        let mut app = app_with(vec![AudioItem::new("/a.mp3", "Track A")]);
        app.set_duration(
            AudioItem::new("/a.mp3", "").key(),
            Some(Duration::from_secs(65)),
        );
        assert!(render(&app).contains("01:05"));
    }

    #[test]
    fn empty_or_failed_library_shows_the_empty_message() {
        let app = app_with(Vec::new());
        assert!(render(&app).contains(EMPTY_LIBRARY_MESSAGE));

        let mut failed = App::new(Duration::from_millis(5000), AfterGenerate::Refetch);
        failed.apply_library(Err(ApiError::Transport("refused".to_string())));
        assert!(render(&failed).contains(EMPTY_LIBRARY_MESSAGE));
    }

    #[test]
    fn hovered_row_swaps_its_index_for_a_glyph() {
        let mut app = app_with(vec![
            AudioItem::new("/a.mp3", "Track A"),
            AudioItem::new("/b.mp3", "Track B"),
        ]);
        assert_eq!(row_label(&app, 0), "1.");

        app.focus_library();
        assert_eq!(row_label(&app, 0), PLAY_GLYPH);
        assert_eq!(row_label(&app, 1), "2.");

        app.click_selected();
        assert_eq!(row_label(&app, 0), PAUSE_GLYPH);

        app.click_selected();
        assert_eq!(row_label(&app, 0), PLAY_GLYPH);

        app.next();
        assert_eq!(row_label(&app, 0), "1.");
        assert_eq!(row_label(&app, 1), PLAY_GLYPH);
    }

    #[test]
    fn hint_is_replaced_by_the_generated_path_and_messages_show() {
        let mut app = app_with(Vec::new());
        app.apply_generation("https://blog.example/post", Ok("media/x.mp3".to_string()));
        let screen = render(&app);
        assert!(!screen.contains(GENERATE_HINT));
        assert!(screen.contains("/media/x.mp3"));

        app.url_input.clear();
        app.submit(Instant::now());
        assert!(render(&app).contains("Please enter a valid URL."));
    }

    #[test]
    fn status_reports_the_active_item() {
        let mut app = app_with(vec![AudioItem::new("/a.mp3", "Track A")]);
        assert!(render(&app).contains("Stopped"));

        app.click_selected();
        assert!(render(&app).contains("Playing: Track A"));
    }
}

// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, frame ticks)
// - Rendering the carousel

pub mod app;
pub mod components;
pub mod input;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::deck::Deck;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use std::time::{Duration, Instant};

/// Frame interval while running (about 60 FPS, smooth enough for scrolling)
const FRAME: Duration = Duration::from_millis(16);

/// Run the TUI
///
/// This function sets up the terminal, runs the event loop, and cleans up
/// when done.
pub async fn run_tui(deck: Deck, config: Config, log_buffer: LogBuffer) -> Result<()> {
    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let result = match terminal.size() {
        Ok(size) => {
            let area = Rect::new(0, 0, size.width, size.height);
            match App::new(deck, &config, log_buffer, area, Instant::now()) {
                Ok(mut app) => run_event_loop(&mut terminal, &mut app).await,
                Err(e) => Err(e).context("Failed to mount carousel"),
            }
        }
        Err(e) => Err(e).context("Failed to read terminal size"),
    };

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Two sources feed the loop:
/// 1. Terminal input (keys, mouse), mapped to carousel events
/// 2. Frame ticks, which advance scroll animation, settle and hint timers
///
/// tokio::select! wakes on whichever is ready first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut frame_interval = tokio::time::interval(FRAME);

    loop {
        terminal
            .draw(|f| {
                app.relayout(f.area());
                ui::draw(f, app);
            })
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard or mouse input
            _ = async {
                if event::poll(Duration::from_millis(5)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => {
                            app.handle_mouse(mouse_event, Instant::now())
                        }
                        Ok(_) => {}
                        Err(e) => tracing::warn!(error = %e, "failed to read terminal event"),
                    }
                }
            } => {}

            _ = frame_interval.tick() => {
                app.frame(Instant::now());
            }
        }

        if app.should_quit {
            tracing::info!(index = app.carousel.index(), "quitting");
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Press goes through the InputHandler for repeat and debounce; release
/// keeps its key state in sync.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    match key_event.kind {
        KeyEventKind::Press => app.handle_key_press(key_event.code, Instant::now()),
        KeyEventKind::Release => app.handle_key_release(key_event.code),
        _ => {}
    }
}

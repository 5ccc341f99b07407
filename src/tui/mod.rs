//! Terminal User Interface module using ratatui

mod app;
mod components;
mod events;
mod keys;
mod styles;
mod utils;

pub use app::App;
pub use events::{Event, EventHandler};
pub use utils::truncate_to_width;

use crate::catalog::sample_catalog;
use crate::config::Config;
use anyhow::Result;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use tracing::{debug, info};

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;

/// Initialize the terminal for TUI mode
pub fn init_terminal(mouse: bool) -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
pub fn restore_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Best-effort terminal reset for the panic hook
pub fn reset_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Main TUI entry point
pub async fn run(config: &Config) -> Result<()> {
    let items = sample_catalog(config.item_count, config.seed);
    info!(
        items = items.len(),
        page_size = config.page_size,
        delay_ms = config.transition_delay_ms,
        "Starting card browser"
    );

    let mut terminal = init_terminal(config.mouse_enabled)?;
    let mut events = EventHandler::new(config.tick_rate());
    let input = events.start();
    let mut app = App::new(config, items, events.sender());

    let result = run_app(&mut terminal, &mut app, &mut events).await;

    app.shutdown();
    drop(events);
    if let Err(e) = input.await {
        debug!("Input reader ended abnormally: {}", e);
    }

    restore_terminal(&mut terminal)?;
    result
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    let mut state_changes = app.subscribe();
    let mut redraw = true;

    loop {
        if redraw {
            terminal.draw(|frame| app.render(frame))?;
        }

        redraw = tokio::select! {
            event = events.next() => {
                let Some(event) = event else { break };
                let is_tick = matches!(event, Event::Tick);
                let animating = app.is_animating();
                if app.handle_event(event).await? {
                    break;
                }
                !is_tick || animating
            }
            changed = state_changes.changed() => {
                if changed.is_err() {
                    break;
                }
                app.on_state_changed().await?;
                true
            }
        };
    }

    Ok(())
}

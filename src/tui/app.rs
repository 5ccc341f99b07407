use crate::catalog::Item;
use crate::config::Config;
use crate::pager::PageState;
use crate::tui::{
    components::{pager_view::PagerView, Component},
    events::Event,
    keys::{Action, KeyMap},
    styles::Theme,
    utils::centered_rect,
    Frame,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// How long a status message stays in the status bar
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Main application state and controller
pub struct App {
    /// Whether the application should quit
    pub should_quit: bool,

    /// Current application dimensions
    pub size: Rect,

    /// Key mappings for the application
    key_map: KeyMap,

    /// The card browser screen
    view: PagerView,

    /// Current theme for styling
    theme: Theme,

    /// Status message to display, with the time it was posted
    status_message: Option<(String, Instant)>,

    /// Show the key binding overlay
    show_help: bool,

    /// Enable mouse support
    mouse_enabled: bool,

    /// Loop-back channel for follow-up events
    event_sender: mpsc::UnboundedSender<Event>,
}

impl App {
    /// Create a new application instance
    pub fn new(config: &Config, items: Vec<Item>, event_sender: mpsc::UnboundedSender<Event>) -> Self {
        Self {
            should_quit: false,
            size: Rect::default(),
            key_map: KeyMap::default(),
            view: PagerView::new(items, config, event_sender.clone()),
            theme: Theme::default(),
            status_message: None,
            show_help: false,
            mouse_enabled: config.mouse_enabled,
            event_sender,
        }
    }

    /// Receiver woken whenever the page state changes
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.view.subscribe()
    }

    /// Whether the screen must be redrawn on every tick
    pub fn is_animating(&self) -> bool {
        self.view.is_animating(Instant::now())
    }

    /// Handle incoming events
    pub async fn handle_event(&mut self, event: Event) -> Result<bool> {
        match event {
            Event::Key(key_event) => {
                let action = self.key_map.action_for(&key_event);
                let capturing = self.view.is_capturing_input();
                let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

                if action == Some(Action::Quit) && (ctrl || !capturing) {
                    self.should_quit = true;
                    return Ok(true);
                }

                if !capturing {
                    if action == Some(Action::ToggleHelp) {
                        self.show_help = !self.show_help;
                        return Ok(false);
                    }
                    if self.show_help && key_event.code == KeyCode::Esc {
                        self.show_help = false;
                        return Ok(false);
                    }
                }

                self.view.handle_key_event(key_event).await?;
            }

            Event::Mouse(mouse_event) => {
                if self.mouse_enabled {
                    self.view.handle_mouse_event(mouse_event).await?;
                }
            }

            Event::Resize(width, height) => {
                self.size = Rect::new(0, 0, width, height);
            }

            Event::Tick => {
                self.view.tick().await?;
                if self.status_expired(Instant::now()) {
                    // Sent as its own event so the loop redraws without the message
                    if self.event_sender.send(Event::ClearStatus).is_err() {
                        debug!("Event channel closed, clearing status in place");
                        self.status_message = None;
                    }
                }
            }

            Event::StatusMessage(message) => {
                self.status_message = Some((message, Instant::now()));
            }

            Event::ClearStatus => {
                self.status_message = None;
            }
        }

        Ok(self.should_quit)
    }

    /// Pull in a page state change published by the controller
    pub async fn on_state_changed(&mut self) -> Result<()> {
        self.view.tick().await
    }

    /// Render the application UI
    pub fn render(&mut self, frame: &mut Frame) {
        self.size = frame.size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Main content
                Constraint::Length(1), // Status bar
            ])
            .split(frame.size());

        frame.render_widget(Block::default().style(self.theme.base_style()), frame.size());
        self.view.render(frame, chunks[0], &self.theme);
        self.render_status_bar(frame, chunks[1]);

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    /// Tear down the screen, discarding any pending page transition
    pub fn shutdown(self) {
        self.view.shutdown();
    }

    fn status_expired(&self, now: Instant) -> bool {
        self.status_message
            .as_ref()
            .is_some_and(|(_, posted)| now.duration_since(*posted) >= STATUS_TIMEOUT)
    }

    /// Render the status bar
    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status_text = if let Some((message, _)) = &self.status_message {
            message.clone()
        } else {
            let state = self.view.state();
            format!(
                "Page {}/{} | {} | Press ? for help | q to quit",
                state.current_page,
                state.total_pages,
                if state.is_loading { "Loading" } else { "Ready" }
            )
        };

        let status_paragraph = Paragraph::new(status_text).style(self.theme.status_bar_style());
        frame.render_widget(status_paragraph, area);
    }

    /// Render help overlay
    fn render_help_overlay(&self, frame: &mut Frame) {
        let help_area = centered_rect(60, 70, frame.size());

        let help_block = Block::default()
            .borders(Borders::ALL)
            .title("Help")
            .border_style(self.theme.border_style())
            .style(self.theme.help_style());

        let help_paragraph = Paragraph::new(self.key_map.help_text())
            .block(help_block)
            .style(self.theme.text_style());

        frame.render_widget(Clear, help_area);
        frame.render_widget(help_paragraph, help_area);
    }
}

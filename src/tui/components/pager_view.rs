//! Main screen: the card grid for the visible page plus its controls.
//!
//! The view never changes the page itself. Key presses become navigation
//! intents on the [`PageController`], and the view redraws from the state
//! the controller publishes.

use super::card_grid::{CardGrid, CARD_HEIGHT};
use super::pagination::{JumpInput, PaginationControls};
use super::Component;
use crate::catalog::Item;
use crate::config::{Config, DisplayStyle};
use crate::pager::{PageController, PageState, Transition, JUMP_PAGES};
use crate::tui::events::Event;
use crate::tui::keys::{Action, KeyMap};
use crate::tui::styles::Theme;
use crate::tui::Frame;
use anyhow::Result;
use async_trait::async_trait;
use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::time::Instant;
use tokio::sync::{mpsc, watch};
use tracing::debug;

/// Card browser screen
pub struct PagerView {
    controller: PageController<Item>,
    state: PageState,
    grid: CardGrid,
    controls: PaginationControls,
    key_map: KeyMap,
    page_sizes: Vec<usize>,
    show_page_sizes: bool,
    jump_enabled: bool,
    jump: Option<JumpInput>,
    mouse_enabled: bool,
    event_sender: mpsc::UnboundedSender<Event>,
}

impl PagerView {
    pub fn new(items: Vec<Item>, config: &Config, event_sender: mpsc::UnboundedSender<Event>) -> Self {
        let controller = PageController::from_config(items, config);
        let state = controller.snapshot();

        Self {
            controller,
            state,
            grid: CardGrid::new(config.animations),
            controls: PaginationControls::new(config.display_style),
            key_map: KeyMap::default(),
            page_sizes: config.effective_page_size_options(),
            show_page_sizes: config.show_page_size_options,
            jump_enabled: config.show_page_jump,
            jump: None,
            mouse_enabled: config.mouse_enabled,
            event_sender,
        }
    }

    /// Receiver woken on every page state change
    pub fn subscribe(&self) -> watch::Receiver<PageState> {
        self.controller.subscribe()
    }

    /// State the view last rendered from
    pub fn state(&self) -> PageState {
        self.state
    }

    /// Whether keys go to the "go to page" prompt
    pub fn is_capturing_input(&self) -> bool {
        self.jump.is_some()
    }

    /// Whether the view needs redrawing on every tick
    pub fn is_animating(&self, now: Instant) -> bool {
        self.grid.is_animating(now, self.controller.visible_slice().len())
    }

    /// Pick up the latest published state and start the matching effect
    pub fn sync(&mut self, now: Instant) {
        let state = self.controller.snapshot();
        if state == self.state {
            return;
        }

        if state.is_loading && !self.state.is_loading {
            self.grid.on_loading_started(now);
        } else if !state.is_loading && self.state.is_loading {
            self.grid.on_page_shown(now);
        }
        self.state = state;
    }

    /// Turn a navigation action into a controller request
    pub fn perform(&mut self, action: Action) {
        let transition = match action {
            Action::PreviousPage => self.controller.previous_page(),
            Action::NextPage => self.controller.next_page(),
            Action::FirstPage => self.controller.first_page(),
            Action::LastPage => self.controller.last_page(),
            Action::JumpBack => self.controller.jump(-JUMP_PAGES),
            Action::JumpForward => self.controller.jump(JUMP_PAGES),
            Action::GoTo(page) => self.controller.request_page(i64::from(page)),
            Action::NextPageSize | Action::PreviousPageSize => {
                let Some(size) = self.adjacent_page_size(action == Action::NextPageSize) else {
                    return;
                };
                self.controller.request_page_size_change(size)
            }
            Action::OpenJump => {
                if self.jump_enabled && !self.state.is_empty() {
                    self.jump = Some(JumpInput::default());
                }
                return;
            }
            Action::CycleStyle => {
                let style = next_style(self.controls.style());
                self.controls.set_style(style);
                self.status(format!("Control style: {:?}", style));
                return;
            }
            Action::Quit | Action::ToggleHelp => return,
        };

        self.after_request(transition);
    }

    /// Tear down the controller, discarding any pending transition
    pub fn shutdown(self) {
        self.controller.dispose();
    }

    fn after_request(&mut self, transition: Transition) {
        if transition.is_ignored() && self.state.is_loading {
            self.status("Still loading, request ignored".to_string());
        }
        self.sync(Instant::now());
    }

    fn adjacent_page_size(&self, forward: bool) -> Option<usize> {
        let current = self.state.page_size;
        if forward {
            self.page_sizes.iter().copied().find(|size| *size > current)
        } else {
            self.page_sizes.iter().rev().copied().find(|size| *size < current)
        }
    }

    fn handle_jump_key(&mut self, key: KeyEvent) {
        let Some(jump) = self.jump.as_mut() else {
            return;
        };

        match key.code {
            KeyCode::Char(ch) if ch.is_ascii_digit() => jump.push(ch),
            KeyCode::Backspace => jump.pop(),
            KeyCode::Enter => {
                let target = jump.target();
                self.jump = None;
                if let Some(target) = target {
                    let transition = self.controller.request_page(target);
                    self.after_request(transition);
                }
            }
            KeyCode::Esc => self.jump = None,
            _ => {}
        }
    }

    fn status(&self, message: String) {
        if self.event_sender.send(Event::StatusMessage(message)).is_err() {
            debug!("Event channel closed, dropping status message");
        }
    }

    fn header(&self, theme: &Theme) -> Line<'static> {
        let mut spans = vec![
            Span::styled("Card Catalog", theme.title_style()),
            Span::styled(
                format!("  {} items · {} per page", self.state.total_items, self.state.page_size),
                theme.dim_style(),
            ),
        ];
        if self.state.is_loading {
            spans.push(Span::styled("  loading…", theme.placeholder_style()));
        }
        Line::from(spans)
    }
}

fn next_style(style: DisplayStyle) -> DisplayStyle {
    match style {
        DisplayStyle::Compact => DisplayStyle::Full,
        DisplayStyle::Full => DisplayStyle::Numbers,
        DisplayStyle::Numbers => DisplayStyle::Google,
        DisplayStyle::Google => DisplayStyle::Compact,
    }
}

#[async_trait]
impl Component for PagerView {
    async fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        if self.jump.is_some() {
            self.handle_jump_key(event);
        } else if let Some(action) = self.key_map.action_for(&event) {
            self.perform(action);
        }
        Ok(())
    }

    async fn handle_mouse_event(&mut self, event: MouseEvent) -> Result<()> {
        if !self.mouse_enabled {
            return Ok(());
        }

        match event.kind {
            MouseEventKind::ScrollUp => self.perform(Action::PreviousPage),
            MouseEventKind::ScrollDown => self.perform(Action::NextPage),
            _ => {}
        }
        Ok(())
    }

    async fn tick(&mut self) -> Result<()> {
        self.sync(Instant::now());
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let now = Instant::now();
        self.sync(now);

        let controls_height = 2 + u16::from(self.show_page_sizes) + u16::from(self.jump.is_some());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(CARD_HEIGHT),
                Constraint::Length(controls_height),
            ])
            .split(area);

        frame.render_widget(Paragraph::new(self.header(theme)), chunks[0]);

        self.grid.render(
            frame,
            chunks[1],
            &self.state,
            self.controller.visible_slice(),
            theme,
            now,
        );

        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme.border_style());
        let controls_area = block.inner(chunks[2]);
        frame.render_widget(block, chunks[2]);

        let page_sizes = self.show_page_sizes.then_some(self.page_sizes.as_slice());
        self.controls.render(
            frame,
            controls_area,
            &self.state,
            page_sizes,
            self.jump.as_ref(),
            theme,
        );
    }
}

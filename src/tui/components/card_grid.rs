//! Grid of item cards for the visible page.
//!
//! While a page is loading the grid shows one shimmering placeholder per
//! page slot; once the page settles the cards fade in one after another.

use super::animations::{fade_color, Shimmer, StaggeredFade};
use crate::catalog::Item;
use crate::pager::PageState;
use crate::tui::styles::Theme;
use crate::tui::utils::truncate_to_width;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::time::Instant;

/// Narrowest card before the grid drops a column
pub const CARD_MIN_WIDTH: u16 = 24;
pub const CARD_HEIGHT: u16 = 8;
pub const MAX_COLUMNS: u16 = 4;

/// Split `area` into up to `count` card slots, row by row.
///
/// Slots that do not fit vertically are left out.
pub fn card_areas(area: Rect, count: usize) -> Vec<Rect> {
    if count == 0 || area.width == 0 || area.height < CARD_HEIGHT {
        return Vec::new();
    }

    let columns = (area.width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS);
    let columns = usize::from(columns).min(count);
    let width = area.width / columns as u16;

    (0..count)
        .map_while(|index| {
            let row = u16::try_from(index / columns).ok()?;
            let col = (index % columns) as u16;
            let y = area.y.checked_add(row.checked_mul(CARD_HEIGHT)?)?;
            if y.checked_add(CARD_HEIGHT)? > area.bottom() {
                return None;
            }
            Some(Rect::new(area.x + col * width, y, width, CARD_HEIGHT))
        })
        .collect()
}

/// Card grid renderer with loading and entrance effects
#[derive(Debug, Clone)]
pub struct CardGrid {
    shimmer: Shimmer,
    fade: StaggeredFade,
    animations: bool,
}

impl CardGrid {
    pub fn new(animations: bool) -> Self {
        Self {
            shimmer: Shimmer::default(),
            fade: StaggeredFade::default(),
            animations,
        }
    }

    /// A transition started: swap the cards for placeholders
    pub fn on_loading_started(&mut self, now: Instant) {
        self.fade.stop();
        if self.animations {
            self.shimmer.start_at(now);
        }
    }

    /// A transition finished: fade the new page in
    pub fn on_page_shown(&mut self, now: Instant) {
        self.shimmer.stop();
        if self.animations {
            self.fade.start_at(now);
        }
    }

    /// Whether the grid needs redrawing on every tick
    pub fn is_animating(&self, now: Instant, count: usize) -> bool {
        self.shimmer.is_active() || self.fade.is_animating_at(now, count)
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &PageState,
        items: &[Item],
        theme: &Theme,
        now: Instant,
    ) {
        let slots = if state.is_loading { state.page_size } else { items.len() };
        let areas = card_areas(area, slots);
        let hidden = slots.saturating_sub(areas.len());

        if state.is_empty() {
            let empty = Paragraph::new("No items to display")
                .alignment(Alignment::Center)
                .style(theme.placeholder_style())
                .block(Block::default().borders(Borders::ALL).border_style(theme.border_style()));
            frame.render_widget(empty, area);
            return;
        }

        if state.is_loading {
            for (index, slot) in areas.iter().enumerate() {
                self.render_placeholder(frame, *slot, index, now);
            }
        } else {
            for (index, (item, slot)) in items.iter().zip(areas.iter()).enumerate() {
                let opacity = if self.animations {
                    self.fade.opacity_at(now, index)
                } else {
                    1.0
                };
                self.render_card(frame, *slot, item, opacity, theme);
            }
        }

        if hidden > 0 {
            if let Some(last) = areas.last() {
                let below = Rect::new(area.x, last.bottom(), area.width, area.bottom() - last.bottom());
                if below.height > 0 {
                    let note = Paragraph::new(format!("{} more on this page, enlarge the terminal", hidden))
                        .alignment(Alignment::Center)
                        .style(theme.placeholder_style());
                    frame.render_widget(note, below);
                }
            }
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect, index: usize, now: Instant) {
        let color = self.shimmer.color_at(now, index);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color));
        let width = area.width.saturating_sub(2);
        let placeholder = Paragraph::new(self.shimmer.placeholder_lines(width, now, index)).block(block);
        frame.render_widget(placeholder, area);
    }

    fn render_card(&self, frame: &mut Frame, area: Rect, item: &Item, opacity: f32, theme: &Theme) {
        let fade = |color| fade_color(color, theme.background, opacity);
        let width = usize::from(area.width.saturating_sub(2));

        let stock_color = if item.in_stock { theme.success } else { theme.error };
        let lines = vec![
            Line::from(Span::styled(
                truncate_to_width(&item.name, width),
                Style::default().fg(fade(theme.text_bright)).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                truncate_to_width(&item.description, width),
                Style::default().fg(fade(theme.text_dim)),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled(item.category.to_string(), Style::default().fg(fade(theme.secondary))),
                Span::styled("  ", Style::default()),
                Span::styled(item.price(), Style::default().fg(fade(theme.warning))),
            ]),
            Line::from(vec![
                Span::styled(format!("★ {}", item.rating_label()), Style::default().fg(fade(theme.accent))),
                Span::styled("  ", Style::default()),
                Span::styled(item.stock_label(), Style::default().fg(fade(stock_color))),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(fade(theme.border)))
            .title(Span::styled(
                format!(" {} ", item.id),
                Style::default().fg(fade(theme.text_dim)),
            ));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_catalog;
    use crate::pager::layout::PageLayout;
    use ratatui::{backend::TestBackend, Terminal};

    fn state(total_items: usize, page_size: usize, page: usize, is_loading: bool) -> PageState {
        PageState {
            current_page: page,
            page_size,
            total_pages: PageLayout::new(total_items, page_size).total_pages(),
            total_items,
            is_loading,
        }
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(grid: &CardGrid, state: &PageState, items: &[Item]) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.size();
                grid.render(frame, area, state, items, &Theme::default(), Instant::now());
            })
            .unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_card_areas_fill_rows() {
        let areas = card_areas(Rect::new(0, 0, 100, 30), 8);
        assert_eq!(areas.len(), 8);
        assert_eq!(areas[0], Rect::new(0, 0, 25, CARD_HEIGHT));
        assert_eq!(areas[3], Rect::new(75, 0, 25, CARD_HEIGHT));
        assert_eq!(areas[4], Rect::new(0, CARD_HEIGHT, 25, CARD_HEIGHT));
    }

    #[test]
    fn test_card_areas_drop_rows_that_do_not_fit() {
        let areas = card_areas(Rect::new(0, 0, 50, 20), 8);
        assert_eq!(areas.len(), 4);

        assert!(card_areas(Rect::new(0, 0, 50, 5), 8).is_empty());
        assert!(card_areas(Rect::new(0, 0, 50, 20), 0).is_empty());
    }

    #[test]
    fn test_single_column_on_narrow_area() {
        let areas = card_areas(Rect::new(0, 0, 20, 16), 3);
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[1], Rect::new(0, CARD_HEIGHT, 20, CARD_HEIGHT));
    }

    #[test]
    fn test_renders_visible_items() {
        let items = sample_catalog(50, Some(3));
        let text = draw(&CardGrid::new(false), &state(50, 8, 1, false), &items[..8]);

        assert!(text.contains("Product 1"));
        assert!(text.contains("Product 8"));
        assert!(text.contains("ID-1007"));
        assert!(!text.contains("Product 9"));
    }

    #[test]
    fn test_renders_placeholders_while_loading() {
        let items = sample_catalog(50, Some(3));
        let text = draw(&CardGrid::new(true), &state(50, 8, 1, true), &items[..8]);

        assert!(!text.contains("Product"));
        assert!(text.contains('█'));
    }

    #[test]
    fn test_renders_empty_message() {
        let text = draw(&CardGrid::new(true), &state(0, 8, 1, false), &[]);
        assert!(text.contains("No items to display"));
    }

    #[test]
    fn test_animation_lifecycle() {
        let mut grid = CardGrid::new(true);
        let now = Instant::now();
        assert!(!grid.is_animating(now, 8));

        grid.on_loading_started(now);
        assert!(grid.is_animating(now, 8));

        grid.on_page_shown(now);
        assert!(grid.is_animating(now, 8));
        assert!(!grid.is_animating(now + std::time::Duration::from_secs(2), 8));
    }
}

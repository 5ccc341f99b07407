//! Pagination controls rendered from the published page state.
//!
//! Controls are drawn disabled at the collection boundaries and while a
//! transition is in progress.

use crate::config::DisplayStyle;
use crate::pager::PageState;
use crate::tui::styles::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use std::ops::Range;

/// Input state of the "go to page" prompt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JumpInput {
    buffer: String,
}

impl JumpInput {
    pub fn push(&mut self, ch: char) {
        if ch.is_ascii_digit() && self.buffer.len() < 9 {
            self.buffer.push(ch);
        }
    }

    pub fn pop(&mut self) {
        self.buffer.pop();
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Parsed page number, if any digits were typed
    pub fn target(&self) -> Option<i64> {
        self.buffer.parse().ok()
    }
}

/// Pagination controls renderer
#[derive(Debug, Clone)]
pub struct PaginationControls {
    style: DisplayStyle,
    max_page_numbers: usize,
}

impl PaginationControls {
    pub fn new(style: DisplayStyle) -> Self {
        Self {
            style,
            max_page_numbers: 7,
        }
    }

    pub fn style(&self) -> DisplayStyle {
        self.style
    }

    pub fn set_style(&mut self, style: DisplayStyle) {
        self.style = style;
    }

    /// Lines making up the controls
    pub fn lines(
        &self,
        state: &PageState,
        page_sizes: Option<&[usize]>,
        jump: Option<&JumpInput>,
        theme: &Theme,
    ) -> Vec<Line<'static>> {
        let mut lines = vec![match self.style {
            DisplayStyle::Compact => self.render_compact_style(state, theme),
            DisplayStyle::Full => self.render_full_style(state, theme),
            DisplayStyle::Numbers => self.render_numbers_style(state, theme),
            DisplayStyle::Google => self.render_google_style(state, theme),
        }];

        if let Some(sizes) = page_sizes {
            lines.push(self.render_page_sizes(state, sizes, theme));
        }

        if let Some(jump) = jump {
            lines.push(Line::from(vec![
                Span::styled("Go to page: ", theme.text_style()),
                Span::styled(jump.as_str().to_string(), theme.input_style()),
                Span::styled("_", theme.input_style()),
            ]));
        }

        lines
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &PageState,
        page_sizes: Option<&[usize]>,
        jump: Option<&JumpInput>,
        theme: &Theme,
    ) {
        let lines = self.lines(state, page_sizes, jump, theme);
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
    }

    fn summary(state: &PageState) -> String {
        format!("Page {} of {}", state.current_page, state.total_pages)
    }

    fn render_compact_style(&self, state: &PageState, theme: &Theme) -> Line<'static> {
        Line::from(vec![
            self.previous_span("← ", state, theme),
            Span::styled(Self::summary(state), theme.text_style()),
            self.next_span(" →", state, theme),
        ])
    }

    fn render_full_style(&self, state: &PageState, theme: &Theme) -> Line<'static> {
        let range = state.item_range();
        let counts = if range.is_empty() {
            format!(" (0 of {} items)", state.total_items)
        } else {
            format!(" ({}-{} of {} items)", range.start + 1, range.end, state.total_items)
        };

        Line::from(vec![
            self.previous_span("← Previous  ", state, theme),
            Span::styled(Self::summary(state), theme.text_style()),
            Span::styled(counts, theme.dim_style()),
            self.next_span("  Next →", state, theme),
        ])
    }

    fn render_numbers_style(&self, state: &PageState, theme: &Theme) -> Line<'static> {
        let mut spans = vec![self.previous_span("< ", state, theme)];
        spans.extend(self.page_number_spans(state, theme));
        spans.push(self.next_span(">", state, theme));
        Line::from(spans)
    }

    fn render_google_style(&self, state: &PageState, theme: &Theme) -> Line<'static> {
        let mut spans = Vec::new();

        if state.current_page > 1 {
            spans.push(self.previous_span("< Previous ", state, theme));
        }

        spans.extend(self.page_number_spans(state, theme));

        if state.current_page < state.total_pages {
            spans.push(self.next_span("Next >", state, theme));
        }

        Line::from(spans)
    }

    fn render_page_sizes(&self, state: &PageState, sizes: &[usize], theme: &Theme) -> Line<'static> {
        let mut spans = vec![Span::styled("Per page: ", theme.dim_style())];

        for size in sizes {
            if *size == state.page_size {
                spans.push(Span::styled(format!("[{}] ", size), theme.selection_style()));
            } else if state.is_loading {
                spans.push(Span::styled(format!("{} ", size), theme.disabled_style()));
            } else {
                spans.push(Span::styled(format!("{} ", size), theme.text_style()));
            }
        }

        Line::from(spans)
    }

    /// Window of page numbers centred on the current page
    pub fn visible_page_numbers(&self, state: &PageState) -> Range<usize> {
        if state.total_pages == 0 {
            return 0..0;
        }

        let window = self.max_page_numbers.min(state.total_pages);
        let start = state
            .current_page
            .saturating_sub(self.max_page_numbers / 2)
            .max(1)
            .min(state.total_pages + 1 - window);
        start..start + window
    }

    fn page_number_spans(&self, state: &PageState, theme: &Theme) -> Vec<Span<'static>> {
        self.visible_page_numbers(state)
            .map(|page| {
                if page == state.current_page {
                    Span::styled(format!("[{}] ", page), theme.selection_style())
                } else if state.is_loading {
                    Span::styled(format!("{} ", page), theme.disabled_style())
                } else {
                    Span::styled(format!("{} ", page), theme.control_style())
                }
            })
            .collect()
    }

    fn previous_span(&self, label: &'static str, state: &PageState, theme: &Theme) -> Span<'static> {
        if state.can_go_previous() {
            Span::styled(label, theme.control_style())
        } else {
            Span::styled(label, theme.disabled_style())
        }
    }

    fn next_span(&self, label: &'static str, state: &PageState, theme: &Theme) -> Span<'static> {
        if state.can_go_next() {
            Span::styled(label, theme.control_style())
        } else {
            Span::styled(label, theme.disabled_style())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pager::layout::PageLayout;

    fn state(total_items: usize, page_size: usize, page: usize) -> PageState {
        let layout = PageLayout::new(total_items, page_size);
        PageState {
            current_page: page,
            page_size,
            total_pages: layout.total_pages(),
            total_items,
            is_loading: false,
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_compact_style() {
        let controls = PaginationControls::new(DisplayStyle::Compact);
        let lines = controls.lines(&state(50, 8, 3), None, None, &Theme::default());
        assert_eq!(text(&lines[0]), "← Page 3 of 7 →");
    }

    #[test]
    fn test_full_style_item_counts() {
        let controls = PaginationControls::new(DisplayStyle::Full);
        let lines = controls.lines(&state(50, 8, 7), None, None, &Theme::default());
        assert_eq!(text(&lines[0]), "← Previous  Page 7 of 7 (49-50 of 50 items)  Next →");
    }

    #[test]
    fn test_numbers_window_is_centred_and_clamped() {
        let controls = PaginationControls::new(DisplayStyle::Numbers);
        assert_eq!(controls.visible_page_numbers(&state(200, 10, 10)), 7..14);
        assert_eq!(controls.visible_page_numbers(&state(200, 10, 1)), 1..8);
        assert_eq!(controls.visible_page_numbers(&state(200, 10, 20)), 14..21);
        assert_eq!(controls.visible_page_numbers(&state(30, 10, 2)), 1..4);
        assert!(controls.visible_page_numbers(&state(0, 10, 1)).is_empty());

        let lines = controls.lines(&state(30, 10, 2), None, None, &Theme::default());
        assert_eq!(text(&lines[0]), "< 1 [2] 3 >");
    }

    #[test]
    fn test_google_style_hides_links_at_boundaries() {
        let controls = PaginationControls::new(DisplayStyle::Google);
        let theme = Theme::default();

        let first = controls.lines(&state(30, 10, 1), None, None, &theme);
        assert_eq!(text(&first[0]), "[1] 2 3 Next >");

        let last = controls.lines(&state(30, 10, 3), None, None, &theme);
        assert_eq!(text(&last[0]), "< Previous 1 2 [3] ");
    }

    #[test]
    fn test_controls_disabled_while_loading() {
        let controls = PaginationControls::new(DisplayStyle::Numbers);
        let theme = Theme::default();
        let mut loading = state(50, 8, 3);
        loading.is_loading = true;

        let lines = controls.lines(&loading, None, None, &theme);
        let first = &lines[0].spans[0];
        let last = lines[0].spans.last().unwrap();
        assert_eq!(first.style, theme.disabled_style());
        assert_eq!(last.style, theme.disabled_style());
    }

    #[test]
    fn test_page_sizes_and_jump_prompt() {
        let controls = PaginationControls::new(DisplayStyle::Compact);
        let mut jump = JumpInput::default();
        jump.push('1');
        jump.push('x');
        jump.push('2');

        let lines = controls.lines(
            &state(50, 8, 1),
            Some(&[4, 8, 12]),
            Some(&jump),
            &Theme::default(),
        );
        assert_eq!(lines.len(), 3);
        assert_eq!(text(&lines[1]), "Per page: 4 [8] 12 ");
        assert_eq!(text(&lines[2]), "Go to page: 12_");
        assert_eq!(jump.target(), Some(12));
    }
}

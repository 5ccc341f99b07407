//! Shimmering skeleton placeholders shown while a page is loading.

use super::animation_engine::{AnimationConfig, AnimationEngine};
use super::interpolation::RgbColor;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use std::time::Instant;

/// Phase shift between neighbouring placeholders, as a fraction of a cycle
const CARD_PHASE_OFFSET: f32 = 0.08;

/// Bar lengths of a placeholder, as percentages of the available width
const BAR_PERCENTS: [usize; 3] = [80, 50, 65];

/// Configuration for skeleton placeholders
#[derive(Debug, Clone)]
pub struct ShimmerConfig {
    pub base_color: RgbColor,
    pub highlight_color: RgbColor,
    pub animation: AnimationConfig,
}

impl Default for ShimmerConfig {
    fn default() -> Self {
        Self {
            base_color: RgbColor::new(40, 48, 64),
            highlight_color: RgbColor::new(100, 116, 139),
            animation: AnimationConfig::pulse(),
        }
    }
}

/// Pulsing skeleton placeholder renderer
#[derive(Debug, Clone)]
pub struct Shimmer {
    config: ShimmerConfig,
    pulse: AnimationEngine,
}

impl Shimmer {
    pub fn new(config: ShimmerConfig) -> Self {
        let pulse = AnimationEngine::new(config.animation.clone());
        Self { config, pulse }
    }

    pub fn start_at(&mut self, now: Instant) {
        if !self.pulse.is_started() {
            self.pulse.start_at(now);
        }
    }

    pub fn stop(&mut self) {
        self.pulse.stop();
    }

    pub fn is_active(&self) -> bool {
        self.pulse.is_started()
    }

    /// Pulse intensity (0.0 to 1.0) for the placeholder at `index`
    pub fn intensity_at(&self, now: Instant, index: usize) -> f32 {
        if !self.pulse.is_started() {
            return 0.0;
        }

        let phase = self.pulse.progress_at(now) - index as f32 * CARD_PHASE_OFFSET;
        (phase * std::f32::consts::PI).sin().abs()
    }

    pub fn color_at(&self, now: Instant, index: usize) -> Color {
        self.config
            .base_color
            .lerp(&self.config.highlight_color, self.intensity_at(now, index))
            .to_color()
    }

    /// Skeleton bars filling a placeholder of `width` columns
    pub fn placeholder_lines(&self, width: u16, now: Instant, index: usize) -> Vec<Line<'static>> {
        let style = Style::default().fg(self.color_at(now, index));

        let mut lines = Vec::with_capacity(BAR_PERCENTS.len() * 2);
        for (row, percent) in BAR_PERCENTS.iter().enumerate() {
            if row > 0 {
                lines.push(Line::default());
            }
            let len = (usize::from(width) * percent / 100).max(1);
            lines.push(Line::from(Span::styled("█".repeat(len), style)));
        }
        lines
    }
}

impl Default for Shimmer {
    fn default() -> Self {
        Self::new(ShimmerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_idle_shimmer_uses_base_color() {
        let shimmer = Shimmer::default();
        let now = Instant::now();
        assert!(!shimmer.is_active());
        assert_eq!(shimmer.color_at(now, 3), Color::Rgb(40, 48, 64));
    }

    #[test]
    fn test_intensity_pulses() {
        let mut shimmer = Shimmer::default();
        let start = Instant::now();
        shimmer.start_at(start);

        let low = shimmer.intensity_at(start, 0);
        let peak = shimmer.intensity_at(start + Duration::from_millis(600), 0);
        assert!(low < 0.01);
        assert!(peak > 0.99);

        let neighbour = shimmer.intensity_at(start + Duration::from_millis(600), 1);
        assert!(neighbour < peak);
    }

    #[test]
    fn test_placeholder_lines_fit_width() {
        let shimmer = Shimmer::default();
        let lines = shimmer.placeholder_lines(20, Instant::now(), 0);
        assert_eq!(lines.len(), 5);

        let widths: Vec<usize> = lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.chars().count()).sum())
            .collect();
        assert_eq!(widths, vec![16, 0, 10, 0, 13]);
    }
}

//! Fade-in effect played when a new page of cards appears.
//!
//! The whole grid fades in while each card additionally fades in with a
//! delay proportional to its position on the page.

use super::animation_engine::{ease, AnimationConfig, AnimationEngine};
use std::time::{Duration, Instant};

/// Delay between consecutive cards
pub const DEFAULT_STAGGER: Duration = Duration::from_millis(50);

/// Staggered fade for a page of items
#[derive(Debug, Clone)]
pub struct StaggeredFade {
    grid: AnimationEngine,
    item: AnimationConfig,
    stagger: Duration,
    started: Option<Instant>,
}

impl StaggeredFade {
    pub fn new(grid: AnimationConfig, item: AnimationConfig, stagger: Duration) -> Self {
        Self {
            grid: AnimationEngine::new(grid),
            item,
            stagger,
            started: None,
        }
    }

    pub fn start_at(&mut self, now: Instant) {
        self.grid.start_at(now);
        self.started = Some(now);
    }

    pub fn stop(&mut self) {
        self.grid.stop();
        self.started = None;
    }

    /// Opacity (0.0 to 1.0) of the card at `index`. Fully opaque when idle.
    pub fn opacity_at(&self, now: Instant, index: usize) -> f32 {
        let Some(started) = self.started else {
            return 1.0;
        };

        let item_start = started + self.item_delay(index);
        let item = if now < item_start {
            0.0
        } else if self.item.duration.is_zero() {
            1.0
        } else {
            let t = now.duration_since(item_start).as_secs_f32() / self.item.duration.as_secs_f32();
            ease(t, self.item.easing)
        };

        self.grid.eased_progress_at(now) * item
    }

    /// Whether any of the first `count` cards is still fading in
    pub fn is_animating_at(&self, now: Instant, count: usize) -> bool {
        let Some(started) = self.started else {
            return false;
        };

        let last_card = self.item_delay(count.saturating_sub(1)) + self.item.duration;
        !self.grid.is_complete_at(now) || now < started + last_card
    }

    fn item_delay(&self, index: usize) -> Duration {
        self.stagger
            .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX))
            + self.item.delay
    }
}

impl Default for StaggeredFade {
    fn default() -> Self {
        Self::new(
            AnimationConfig::fade_in(),
            AnimationConfig::card_entrance(),
            DEFAULT_STAGGER,
        )
    }
}

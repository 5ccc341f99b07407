//! Core animation engine with easing functions and timing control.
//!
//! Animations are sampled against an explicit `Instant` so a frame renders
//! every element against the same clock reading.

use std::time::{Duration, Instant};

/// Easing function types for smooth animations
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EasingType {
    Linear,
    EaseOut,
    EaseInOut,
    EaseOutCubic,
}

/// Animation configuration
#[derive(Debug, Clone)]
pub struct AnimationConfig {
    pub duration: Duration,
    pub easing: EasingType,
    pub delay: Duration,
    /// Restart from zero after each cycle
    pub looping: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(300),
            easing: EasingType::EaseInOut,
            delay: Duration::ZERO,
            looping: false,
        }
    }
}

impl AnimationConfig {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }

    pub fn with_easing(mut self, easing: EasingType) -> Self {
        self.easing = easing;
        self
    }

    pub fn infinite(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Whole-grid fade after a page change
    pub fn fade_in() -> Self {
        Self::new(Duration::from_millis(300)).with_easing(EasingType::EaseOut)
    }

    /// Per-card entrance
    pub fn card_entrance() -> Self {
        Self::new(Duration::from_millis(200)).with_easing(EasingType::EaseOutCubic)
    }

    /// Placeholder shimmer cycle
    pub fn pulse() -> Self {
        Self::new(Duration::from_millis(1200))
            .with_easing(EasingType::Linear)
            .infinite()
    }
}

/// Core animation engine
#[derive(Debug, Clone)]
pub struct AnimationEngine {
    config: AnimationConfig,
    start_time: Option<Instant>,
}

impl AnimationEngine {
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            start_time: None,
        }
    }

    /// Start (or restart) the animation at `now`
    pub fn start_at(&mut self, now: Instant) {
        self.start_time = Some(now + self.config.delay);
    }

    pub fn stop(&mut self) {
        self.start_time = None;
    }

    pub fn is_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Linear progress (0.0 to 1.0) at `now`
    pub fn progress_at(&self, now: Instant) -> f32 {
        let Some(start_time) = self.start_time else {
            return 0.0;
        };

        if now < start_time {
            // Still in delay period
            return 0.0;
        }

        let duration = self.config.duration.as_secs_f32();
        if duration <= 0.0 {
            return 1.0;
        }

        let elapsed = now.duration_since(start_time).as_secs_f32();
        if self.config.looping {
            (elapsed % duration) / duration
        } else {
            (elapsed / duration).clamp(0.0, 1.0)
        }
    }

    /// Progress passed through the configured easing function
    pub fn eased_progress_at(&self, now: Instant) -> f32 {
        ease(self.progress_at(now), self.config.easing)
    }

    /// Whether a started, non-looping animation has reached its end
    pub fn is_complete_at(&self, now: Instant) -> bool {
        match self.start_time {
            Some(start_time) if !self.config.looping => {
                now >= start_time && now.duration_since(start_time) >= self.config.duration
            }
            _ => false,
        }
    }
}

/// Apply an easing function to a linear progress value
pub fn ease(t: f32, easing: EasingType) -> f32 {
    let t = t.clamp(0.0, 1.0);

    match easing {
        EasingType::Linear => t,
        EasingType::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        EasingType::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - 2.0 * (1.0 - t) * (1.0 - t)
            }
        }
        EasingType::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
    }
}

//! Animation primitives for the card browser
//!
//! - frame-independent animation engine with easing functions
//! - RGB colour interpolation
//! - shimmering skeleton placeholders for the loading phase
//! - staggered fade-in for a freshly shown page

pub mod animation_engine;
pub mod fade;
pub mod interpolation;
pub mod loading;

pub use fade::StaggeredFade;
pub use interpolation::fade_color;
pub use loading::Shimmer;

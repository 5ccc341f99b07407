//! Pagination core: page geometry, observable page state and the
//! controller that sequences loading transitions between pages.

pub mod controller;
pub mod layout;
pub mod state;

pub use controller::{
    NavigationStats, PageController, Transition, TransitionOutcome, DEFAULT_TRANSITION_DELAY,
    JUMP_PAGES,
};
pub use state::{PageState, Phase};

//! Choosing a suggestion and putting it into the composer

pub mod apply;
pub mod keybindings;
pub mod state;

pub use apply::{ApplyMode, ApplyResult, Composer, apply_suggestion};
pub use state::SelectionState;

mod app_events;
mod app_render;
mod app_state;
mod composer;
pub mod outbox;

pub use app_state::App;
pub use composer::ComposerBox;
pub use outbox::Outbox;

//! Clipboard support for copying suggestions

pub mod backend;
mod osc52;
mod system;

pub use backend::{ClipboardError, copy_to_clipboard};

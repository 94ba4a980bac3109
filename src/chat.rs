//! Chat transcript observation
//!
//! The host chat is modelled as a stream of [`ChatEvent`]s read from a feed.
//! Events fan out through an [`EventBus`]; the inbound subscription only sees
//! customer messages whose text survived extraction.

pub mod extract;
pub mod feed;
mod message;
pub mod observer;
mod transcript;

pub use message::{ChatEvent, Message, Role};
pub use observer::{EventBus, EventFilter, Subscription};
pub use transcript::Transcript;

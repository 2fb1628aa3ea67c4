//! Synchronous, typed publish/subscribe used to decouple storefront state
//! from the views that react to it.

pub mod broker;
pub mod event;
pub mod matcher;

pub use broker::{EventBroker, Handler, Tap};
pub use event::Event;
pub use matcher::Matcher;

//! Authoritative storefront session state.
//!
//! [`ShopState`] is the only place the catalog, basket and checkout draft
//! change, and the only producer of state-change events. Views never talk to
//! each other; they subscribe to [`ShopEvent`]s on the shared broker.

pub mod basket;
pub mod event;
pub mod shop;

pub use basket::{Basket, BasketAction};
pub use event::{BasketSnapshot, ShopEvent, names};
pub use shop::{ShopContext, ShopState};

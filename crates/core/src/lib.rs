//! `shopfront-core`: storefront foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by every other crate
//! (identifiers, error model, entity/value markers). No IO, no events.

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{ShopError, ShopResult};
pub use id::{OrderId, ProductId};
pub use value_object::ValueObject;

//! Remote storefront API: the catalog source and order submission.
//!
//! The storefront core only depends on the [`ShopApi`] trait; [`HttpShopApi`]
//! is the production implementation over HTTP/JSON.

pub mod client;
pub mod config;
pub mod error;

pub use client::{HttpShopApi, ShopApi};
pub use config::{ApiConfig, ConfigError};
pub use error::ApiError;

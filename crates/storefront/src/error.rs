use thiserror::Error;

use shopfront_api::ApiError;
use shopfront_core::ShopError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorefrontError {
    #[error(transparent)]
    Shop(#[from] ShopError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

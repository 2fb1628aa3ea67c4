use thiserror::Error;

/// Failure of a remote API call.
///
/// Transport failures never touch storefront state; callers log them and
/// leave the catalog/basket as they were.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Api(u16, String),
    #[error("parse error: {0}")]
    Parse(String),
}

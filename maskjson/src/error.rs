//! Errors surfaced by [`crate::Masker`].
//!
//! Building a masked tree never fails. Errors come from encoding the tree and
//! from values nested deeper than the configured bound.

use thiserror::Error;

/// Failure to produce masked JSON.
#[derive(Debug, Error)]
pub enum Error {
    /// The JSON encoder rejected the masked tree.
    #[error("failed to encode masked value: {0}")]
    Encoding(#[from] serde_json::Error),

    /// The value nests deeper than `MaskConfig::max_depth`.
    #[error("value nests deeper than the maximum depth of {limit}")]
    DepthLimitExceeded {
        /// The configured bound.
        limit: usize,
    },
}

/// Result alias for masking operations.
pub type Result<T> = std::result::Result<T, Error>;

//! The masking engine.

use serde_json::Value as JsonValue;

use crate::{
    builder::{build, Built},
    config::MaskConfig,
    error::{Error, Result},
    mask::mask_str,
    shape::{Maskable, Shape},
    tree::MaskedTree,
};

/// Produces masked JSON from [`Maskable`] values.
///
/// A `Masker` owns an immutable [`MaskConfig`] and holds no other state, so
/// one instance can be shared freely across threads.
///
/// ```ignore
/// let masker = Masker::new(false, 3);
/// let bytes = masker.marshal(&profile)?;
/// ```
#[derive(Clone, Debug)]
pub struct Masker {
    config: MaskConfig,
    #[cfg(feature = "slog")]
    logger: ::slog::Logger,
}

impl Masker {
    /// Constructs a masker from the two masking knobs.
    pub fn new(full_mask: bool, granularity: usize) -> Self {
        Self::with_config(MaskConfig::new(full_mask, granularity))
    }

    /// Constructs a masker from a full configuration.
    pub fn with_config(config: MaskConfig) -> Self {
        Self {
            config,
            #[cfg(feature = "slog")]
            logger: ::slog::Logger::root(::slog::Discard, ::slog::o!()),
        }
    }

    /// Attaches a logger for truncation warnings and adapter fallbacks.
    #[cfg(feature = "slog")]
    #[must_use]
    pub fn with_logger(mut self, logger: ::slog::Logger) -> Self {
        self.logger = logger;
        self
    }

    #[cfg(feature = "slog")]
    pub(crate) const fn logger(&self) -> &::slog::Logger {
        &self.logger
    }

    /// The configuration this masker applies.
    pub const fn config(&self) -> &MaskConfig {
        &self.config
    }

    /// Masks a single string with this masker's configuration.
    pub fn mask(&self, value: &str) -> String {
        mask_str(value, &self.config)
    }

    /// Builds the masked tree for `value`.
    ///
    /// This never fails. Subtrees nested deeper than the configured bound are
    /// replaced by `null`; use [`Masker::marshal`] to turn that into an error.
    pub fn to_tree<T>(&self, value: &T) -> MaskedTree
    where
        T: Maskable + ?Sized,
    {
        let Built { tree, truncated } = build(&self.config, value.shape());
        if truncated {
            self.log_truncation();
        }
        tree
    }

    /// Masks `value` and encodes it as JSON bytes.
    ///
    /// Fails when the value nests deeper than the configured bound or when
    /// the encoder rejects the tree (non-finite floats).
    pub fn marshal<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Maskable + ?Sized,
    {
        let tree = self.checked_tree(value.shape())?;
        Ok(serde_json::to_vec(&tree)?)
    }

    /// Masks `value` and encodes it as a JSON string.
    pub fn to_string<T>(&self, value: &T) -> Result<String>
    where
        T: Maskable + ?Sized,
    {
        let tree = self.checked_tree(value.shape())?;
        Ok(serde_json::to_string(&tree)?)
    }

    /// Masks `value` into a `serde_json::Value`.
    pub fn to_value<T>(&self, value: &T) -> Result<JsonValue>
    where
        T: Maskable + ?Sized,
    {
        let tree = self.checked_tree(value.shape())?;
        Ok(serde_json::to_value(tree)?)
    }

    fn checked_tree(&self, root: Shape<'_>) -> Result<MaskedTree> {
        let Built { tree, truncated } = build(&self.config, root);
        if truncated {
            self.log_truncation();
            return Err(Error::DepthLimitExceeded {
                limit: self.config.max_depth(),
            });
        }
        Ok(tree)
    }

    #[cfg(feature = "slog")]
    fn log_truncation(&self) {
        ::slog::warn!(self.logger, "masked value truncated at depth limit";
            "max_depth" => self.config.max_depth());
    }

    #[cfg(not(feature = "slog"))]
    #[allow(clippy::unused_self)]
    fn log_truncation(&self) {}
}

impl Default for Masker {
    fn default() -> Self {
        Self::with_config(MaskConfig::default())
    }
}

impl From<MaskConfig> for Masker {
    fn from(config: MaskConfig) -> Self {
        Self::with_config(config)
    }
}

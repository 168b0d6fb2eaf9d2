//! Masking configuration.
//!
//! A [`MaskConfig`] is fixed once constructed. It can be built in code or
//! deserialized from an application's configuration file:
//!
//! ```toml
//! [masking]
//! full_mask = false
//! granularity = 3
//! ```

use serde::Deserialize;

/// Character used for every masked position.
pub const MASK_CHAR: char = '*';

/// Granularity used when none is configured.
pub const DEFAULT_GRANULARITY: usize = 3;

/// Maximum nesting depth walked before a subtree is cut off.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Controls how masked fields are rendered.
///
/// `granularity` plays two roles:
/// - it is the minimum number of asterisks any masked value carries, and
/// - a string of `n` characters keeps `ceil(n / granularity)` leading
///   characters visible.
///
/// With `full_mask` set, every masked value becomes exactly `granularity`
/// asterisks regardless of its content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaskConfig {
    full_mask: bool,
    granularity: usize,
    max_depth: usize,
}

impl MaskConfig {
    /// Constructs a configuration with the default depth bound.
    #[must_use]
    pub const fn new(full_mask: bool, granularity: usize) -> Self {
        Self {
            full_mask,
            granularity,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Partial masking: a prefix stays visible.
    #[must_use]
    pub const fn partial(granularity: usize) -> Self {
        Self::new(false, granularity)
    }

    /// Full masking: every masked value becomes `granularity` asterisks.
    #[must_use]
    pub const fn full(granularity: usize) -> Self {
        Self::new(true, granularity)
    }

    /// Overrides the maximum traversal depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns `true` when masked values never reveal a prefix.
    pub const fn full_mask(&self) -> bool {
        self.full_mask
    }

    /// Minimum asterisk run and inverse visible fraction.
    pub const fn granularity(&self) -> usize {
        self.granularity
    }

    /// Depth at which traversal stops.
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// A run of exactly `granularity` mask characters.
    pub(crate) fn asterisks(&self) -> String {
        mask_run(self.granularity)
    }
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self::new(false, DEFAULT_GRANULARITY)
    }
}

pub(crate) fn mask_run(len: usize) -> String {
    std::iter::repeat(MASK_CHAR).take(len).collect()
}

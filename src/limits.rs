//! Bounds applied while decoding untrusted aggregate graphs.

/// Hard cap on nesting for every `DecodeLimits`. Decoding recurses once per
/// level, so this keeps it within a normal thread stack.
pub const MAX_SAFE_DEPTH: usize = 512;

/// Decode limits configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeLimits {
    /// Maximum nesting of containers and records (default: 128, never more
    /// than `MAX_SAFE_DEPTH`).
    pub max_depth: usize,
    /// Maximum element count or byte length of a single node (default: u32::MAX).
    pub max_len: usize,
    /// Maximum number of zero-width elements (such as records without
    /// fields) in one graph (default: 65536).
    ///
    /// These occupy no payload bytes, so the input length cannot bound them.
    pub max_empty_elements: usize,
}

impl Default for DecodeLimits {
    fn default() -> Self {
        Self {
            max_depth: 128,
            max_len: u32::MAX as usize,
            max_empty_elements: 1 << 16,
        }
    }
}

impl DecodeLimits {
    /// Limits suited to small messages from untrusted peers.
    pub fn strict() -> Self {
        Self {
            max_depth: 16,
            max_len: 1 << 20,
            max_empty_elements: 1024,
        }
    }

    /// No limits beyond available input, except nesting, which stays at
    /// `MAX_SAFE_DEPTH`.
    ///
    /// Zero-width elements are not counted, so a few bytes can still ask for
    /// billions of them. Do not use this for untrusted input.
    pub fn unbounded() -> Self {
        Self {
            max_depth: MAX_SAFE_DEPTH,
            max_len: usize::MAX,
            max_empty_elements: usize::MAX,
        }
    }
}

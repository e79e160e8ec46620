/// Default limit on nested hashes, arrays and references.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// What to do with a value that has no Storable encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Unsupported {
    /// Fail the encode with [`Error::UnsupportedShape`](crate::Error::UnsupportedShape).
    Error,
    /// Write nothing for the value. The enclosing hash entry or array element is still counted,
    /// and a hash entry still gets its key, which is what older encoders produced. Decoders will
    /// misread such streams; use only when matching that output byte-for-byte.
    Skip,
}

/// Encoder settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub unsupported: Unsupported,
    pub max_depth: usize,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            unsupported: Unsupported::Error,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unsupported(mut self, unsupported: Unsupported) -> Self {
        self.unsupported = unsupported;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

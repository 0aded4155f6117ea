/// Errors from decoding a self-describing aggregate graph.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    #[error("bad magic byte 0x{0:02x}")]
    BadMagic(u8),

    #[error("unsupported format version {0}")]
    UnsupportedVersion(u8),

    #[error("truncated data: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    #[error("unknown schema tag 0x{0:02x}")]
    UnknownTag(u8),

    #[error("varint overflows 64 bits")]
    VarintOverflow,

    #[error("invalid utf-8 string: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    #[error("schema mismatch: expected {expected}, found {found}")]
    SchemaMismatch { expected: String, found: String },

    #[error("duplicate {0} in payload")]
    DuplicateEntry(&'static str),

    #[error("duplicate record field '{0}'")]
    DuplicateField(String),

    #[error("nesting deeper than {0} levels")]
    DepthExceeded(usize),

    #[error("length {found} exceeds limit {limit}")]
    LengthExceeded { limit: usize, found: u64 },

    #[error("more than {0} zero-width elements")]
    TooManyEmptyElements(usize),

    #[error("{0} trailing bytes after graph")]
    TrailingBytes(usize),

    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
}

/// Errors from `Convertible::from_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The input length differs from the fixed width of the target type.
    #[error("size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The input is not valid UTF-8.
    #[error("invalid utf-8 encoding: {0}")]
    InvalidEncoding(#[from] std::str::Utf8Error),

    /// The aggregate graph is malformed or does not match the requested shape.
    #[error("decode failure: {0}")]
    DecodeFailure(#[from] GraphError),

    /// The decoded value does not fit the target type on this platform.
    #[error("value out of range for {type_name}")]
    OutOfRange { type_name: &'static str },
}

impl DecodeError {
    /// Returns the graph error if this is a `DecodeFailure`.
    pub fn as_graph_error(&self) -> Option<&GraphError> {
        match self {
            DecodeError::DecodeFailure(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

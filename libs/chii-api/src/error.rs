use std::fmt;

/// Coarse error category. Lets callers branch without inspecting messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Corrupt or truncated compressed stream.
    Decompression,
    /// Grammar violation or unexpected record shape.
    MalformedInput,
    /// Size or depth ceiling hit.
    LimitExceeded,
    /// Attempted encode/write on a decode-only column.
    NotSupported,
    /// Invalid decoder configuration.
    Config,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Decompression => f.write_str("decompression"),
            ErrorKind::MalformedInput => f.write_str("malformed input"),
            ErrorKind::LimitExceeded => f.write_str("limit exceeded"),
            ErrorKind::NotSupported => f.write_str("not supported"),
            ErrorKind::Config => f.write_str("config"),
        }
    }
}

/// Error returned by every decode and aggregate operation.
///
/// All variants are terminal for the call that produced them: no partial
/// value is ever returned alongside an error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CodecError {
    #[error("deflate: {0}")]
    Decompression(String),

    #[error("unexpected tag {:?} at offset {offset}", tag_char(.tag))]
    UnexpectedTag { offset: usize, tag: u8 },

    #[error("syntax error at offset {offset}: {reason}")]
    Syntax { offset: usize, reason: String },

    #[error("unexpected end of input at offset {offset}")]
    UnexpectedEof { offset: usize },

    #[error("record {index}: {reason}")]
    Record { index: usize, reason: String },

    #[error("{limit} exceeds maximum of {max}")]
    LimitExceeded { limit: &'static str, max: usize },

    #[error("{0} is not supported for legacy columns")]
    NotSupported(&'static str),

    #[error("config error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<CodecError>,
    },
}

fn tag_char(tag: &u8) -> char {
    char::from(*tag)
}

impl CodecError {
    pub fn syntax(offset: usize, reason: impl Into<String>) -> Self {
        Self::Syntax { offset, reason: reason.into() }
    }

    pub fn record(index: usize, reason: impl Into<String>) -> Self {
        Self::Record { index, reason: reason.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::Decompression(_) => ErrorKind::Decompression,
            CodecError::UnexpectedTag { .. }
            | CodecError::Syntax { .. }
            | CodecError::UnexpectedEof { .. }
            | CodecError::Record { .. } => ErrorKind::MalformedInput,
            CodecError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
            CodecError::NotSupported(_) => ErrorKind::NotSupported,
            CodecError::Config(_) => ErrorKind::Config,
            CodecError::Context { source, .. } => source.kind(),
        }
    }

    /// Add context to the error, preserving the original `ErrorKind`.
    ///
    /// Produces: `"context: original message"`.
    pub fn with_context(self, ctx: impl fmt::Display) -> Self {
        Self::Context { context: ctx.to_string(), source: Box::new(self) }
    }

    /// Byte offset into the serialized text, when the error came from the parser.
    pub fn offset(&self) -> Option<usize> {
        match self {
            CodecError::UnexpectedTag { offset, .. }
            | CodecError::Syntax { offset, .. }
            | CodecError::UnexpectedEof { offset } => Some(*offset),
            CodecError::Context { source, .. } => source.offset(),
            _ => None,
        }
    }
}

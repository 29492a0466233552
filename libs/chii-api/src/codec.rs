use crate::error::CodecError;
use crate::value::Value;

/// Column codec: performs `stored bytes → Value` for one legacy column type.
///
/// - `decode()`: parses the raw column payload into a normalized `Value`.
/// - `decode_nullable()`: SQL `NULL` stays `None`, anything else is decoded.
/// - `encode()`: the legacy columns are read-only; implementations return
///   `CodecError::NotSupported`.
pub trait ColumnCodec: Send + Sync {
    /// Column name for logs and error context.
    fn column(&self) -> &str;

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError>;

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    fn decode_nullable(&self, raw: Option<&[u8]>) -> Result<Option<Value>, CodecError> {
        raw.map(|bytes| self.decode(bytes)).transpose()
    }
}

use chii_api::{CodecError, ColumnCodec, Value};

use crate::config::DecodeConfig;
use crate::deflate::inflate_raw;
use crate::normalize::normalize;
use crate::parser::parse;

// ═══════════════════════════════════════════════════════════════
//  Free functions
// ═══════════════════════════════════════════════════════════════

/// Decode a raw-DEFLATE compressed serialized blob with default limits.
pub fn decode_compressed_legacy_blob(bytes: &[u8]) -> Result<Value, CodecError> {
    decode_compressed_legacy_blob_with(bytes, &DecodeConfig::default())
}

pub fn decode_compressed_legacy_blob_with(
    bytes: &[u8],
    config: &DecodeConfig,
) -> Result<Value, CodecError> {
    let inflated = inflate_raw(bytes, config.max_input_bytes)?;
    let value = decode_serialized(&inflated, config)?;
    tracing::debug!(compressed = bytes.len(), inflated = inflated.len(), "decoded legacy blob");
    Ok(value)
}

/// Decode uncompressed serialized text with default limits.
pub fn decode_legacy_text(text: &str) -> Result<Value, CodecError> {
    decode_legacy_text_with(text, &DecodeConfig::default())
}

pub fn decode_legacy_text_with(text: &str, config: &DecodeConfig) -> Result<Value, CodecError> {
    let value = decode_serialized(text.as_bytes(), config)?;
    tracing::debug!(bytes = text.len(), "decoded legacy text");
    Ok(value)
}

/// Legacy columns are decode-only.
pub fn encode_legacy(_value: &Value) -> Result<Vec<u8>, CodecError> {
    Err(CodecError::NotSupported("write"))
}

fn decode_serialized(bytes: &[u8], config: &DecodeConfig) -> Result<Value, CodecError> {
    let parsed = parse(bytes, config)?;
    if parsed.consumed < bytes.len() {
        tracing::trace!(
            consumed = parsed.consumed,
            trailing = bytes.len() - parsed.consumed,
            "ignoring trailing bytes"
        );
    }
    Ok(normalize(parsed.value))
}

// ═══════════════════════════════════════════════════════════════
//  Column codecs
// ═══════════════════════════════════════════════════════════════

/// `rev_text`: raw DEFLATE, then serialized.
pub struct CompressedBlobCodec {
    column: String,
    config: DecodeConfig,
}

impl CompressedBlobCodec {
    pub fn new(column: impl Into<String>, config: DecodeConfig) -> Self {
        Self { column: column.into(), config }
    }
}

impl Default for CompressedBlobCodec {
    fn default() -> Self {
        Self::new("rev_text", DecodeConfig::default())
    }
}

impl ColumnCodec for CompressedBlobCodec {
    fn column(&self) -> &str {
        &self.column
    }

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError> {
        decode_compressed_legacy_blob_with(raw, &self.config).map_err(|e| {
            tracing::debug!(column = %self.column, error = %e, "legacy blob unavailable");
            e.with_context(&self.column)
        })
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        encode_legacy(value).map_err(|e| e.with_context(&self.column))
    }
}

/// `field_tags` and other serialized text columns stored uncompressed.
pub struct SerializedTextCodec {
    column: String,
    config: DecodeConfig,
}

impl SerializedTextCodec {
    pub fn new(column: impl Into<String>, config: DecodeConfig) -> Self {
        Self { column: column.into(), config }
    }

    pub fn decode_text(&self, text: &str) -> Result<Value, CodecError> {
        self.decode(text.as_bytes())
    }
}

impl Default for SerializedTextCodec {
    fn default() -> Self {
        Self::new("field_tags", DecodeConfig::default())
    }
}

impl ColumnCodec for SerializedTextCodec {
    fn column(&self) -> &str {
        &self.column
    }

    fn decode(&self, raw: &[u8]) -> Result<Value, CodecError> {
        decode_serialized(raw, &self.config).map_err(|e| {
            tracing::debug!(column = %self.column, error = %e, "legacy text unavailable");
            e.with_context(&self.column)
        })
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        encode_legacy(value).map_err(|e| e.with_context(&self.column))
    }
}

use std::borrow::Cow;
use std::collections::HashMap;

use chii_api::{CodecError, Value};
use chii_codec::{DecodeConfig, decode_legacy_text_with};

/// One tag of a subject's tag cloud.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TagEntry {
    pub name: String,
    /// The record's `"result"`, passed through as decoded.
    pub count: Value,
}

impl TagEntry {
    /// Numeric view of `count`. Legacy rows store it as an integer or as
    /// decimal text.
    pub fn count_i64(&self) -> Option<i64> {
        match &self.count {
            Value::Int(n) => Some(*n),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Turn a decoded tag list into `(name, count)` entries.
///
/// The list is a sequence keyed `"0"` .. `"n-1"`; records are read in index
/// order. Records whose `"tag_name"` is null are skipped. A record that is
/// not an array, or lacks `"tag_name"` or `"result"`, fails the whole call.
pub fn compute_tags(tags: Option<&Value>) -> Result<Vec<TagEntry>, CodecError> {
    let Some(list) = tags.filter(|v| !v.is_null()) else {
        return Ok(Vec::new());
    };
    let Some(entries) = list.as_array() else {
        return Err(CodecError::record(
            0,
            format!("tag list must be an array, got {}", list.type_name()),
        ));
    };

    // Later duplicates win, as with `Value::get`.
    let slots: HashMap<Cow<'_, str>, &Value> =
        entries.iter().map(|(k, v)| (k.as_text(), v)).collect();

    let mut out = Vec::with_capacity(entries.len());

    for index in 0..entries.len() {
        let record = *slots
            .get(index.to_string().as_str())
            .ok_or_else(|| CodecError::record(index, "tag list is not a 0-based sequence"))?;

        if !matches!(record, Value::Array(_)) {
            return Err(CodecError::record(
                index,
                format!("tag record must be an array, got {}", record.type_name()),
            ));
        }

        let name = record
            .get("tag_name")
            .ok_or_else(|| CodecError::record(index, "missing \"tag_name\""))?;
        let result = record
            .get("result")
            .ok_or_else(|| CodecError::record(index, "missing \"result\""))?;

        let name = match name {
            Value::Null => {
                tracing::trace!(index, "skipping tag without name");
                continue;
            }
            Value::Text(s) => s.clone(),
            Value::Int(n) => n.to_string(),
            other => {
                return Err(CodecError::record(
                    index,
                    format!("\"tag_name\" must be a string, got {}", other.type_name()),
                ));
            }
        };

        out.push(TagEntry { name, count: result.clone() });
    }

    Ok(out)
}

/// Decode a `field_tags` column and aggregate it. Empty text yields no tags.
pub fn tags_from_text(text: &str, config: &DecodeConfig) -> Result<Vec<TagEntry>, CodecError> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    let decoded = decode_legacy_text_with(text, config)?;
    compute_tags(Some(&decoded))
}

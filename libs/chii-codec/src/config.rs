use serde::Deserialize;

use chii_api::CodecError;

/// Decoder limits and leniency switches, parsed from TOML.
///
/// ```toml
/// max_input_bytes = 16777216
/// max_depth = 128
/// strict = false
/// invalid_utf8 = "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeConfig {
    /// Ceiling for serialized text, and for inflated output of compressed blobs.
    #[serde(default = "default_max_input_bytes")]
    pub max_input_bytes: usize,

    /// Maximum array nesting depth.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Reject bytes after the top-level value instead of ignoring them.
    #[serde(default)]
    pub strict: bool,

    /// What to do with string payloads that are not valid UTF-8.
    #[serde(default)]
    pub invalid_utf8: InvalidUtf8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidUtf8 {
    /// Fail with a syntax error at the string's offset.
    #[default]
    Reject,
    /// Substitute U+FFFD for invalid sequences.
    Replace,
}

// MEDIUMBLOB / MEDIUMTEXT ceiling.
fn default_max_input_bytes() -> usize {
    16 * 1024 * 1024
}

fn default_max_depth() -> usize {
    128
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: default_max_input_bytes(),
            max_depth: default_max_depth(),
            strict: false,
            invalid_utf8: InvalidUtf8::default(),
        }
    }
}

impl DecodeConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self, CodecError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CodecError::Config(format!("{path}: {e}")))?;
        Self::parse(&content).map_err(|e| e.with_context(path))
    }

    /// Parse configuration from a TOML string.
    pub fn parse(toml_str: &str) -> Result<Self, CodecError> {
        let cfg: Self = toml::from_str(toml_str).map_err(|e| CodecError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), CodecError> {
        if self.max_input_bytes == 0 {
            return Err(CodecError::Config("max_input_bytes must be positive".into()));
        }
        if self.max_depth == 0 {
            return Err(CodecError::Config("max_depth must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chii_api::ErrorKind;

    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(DecodeConfig::parse("").unwrap(), DecodeConfig::default());
    }

    #[test]
    fn parses_all_fields() {
        let cfg = DecodeConfig::parse(
            r#"
            max_input_bytes = 1024
            max_depth = 4
            strict = true
            invalid_utf8 = "replace"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.max_input_bytes, 1024);
        assert_eq!(cfg.max_depth, 4);
        assert!(cfg.strict);
        assert_eq!(cfg.invalid_utf8, InvalidUtf8::Replace);
    }

    #[test]
    fn rejects_zero_limits_and_unknown_keys() {
        let err = DecodeConfig::parse("max_depth = 0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(DecodeConfig::parse("max_dept = 3").is_err());
        assert!(DecodeConfig::parse(r#"invalid_utf8 = "ignore""#).is_err());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = DecodeConfig::load("/nonexistent/decode.toml").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.to_string().contains("/nonexistent/decode.toml"));
    }
}

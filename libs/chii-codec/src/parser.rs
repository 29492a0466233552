use chii_api::{CodecError, Key, Value};

use crate::config::{DecodeConfig, InvalidUtf8};

// ═══════════════════════════════════════════════════════════════
//  Public entry
// ═══════════════════════════════════════════════════════════════

/// Parsed top-level value and the number of bytes it occupied.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub value: Value,
    pub consumed: usize,
}

/// Parse one serialized value from the start of `input`.
///
/// Array keys are returned raw (`Key::Int` or `Key::Text`); see
/// [`crate::normalize`] for the canonical form. Bytes after the value are
/// ignored unless `config.strict` is set.
pub fn parse(input: &[u8], config: &DecodeConfig) -> Result<Parsed, CodecError> {
    if input.len() > config.max_input_bytes {
        return Err(CodecError::LimitExceeded { limit: "input size", max: config.max_input_bytes });
    }

    let mut parser = Parser { buf: input, pos: 0, depth: 0, config };
    let value = parser.value()?;

    if config.strict && parser.pos < input.len() {
        return Err(CodecError::syntax(
            parser.pos,
            format!("{} trailing bytes after value", input.len() - parser.pos),
        ));
    }

    Ok(Parsed { value, consumed: parser.pos })
}

// ═══════════════════════════════════════════════════════════════
//  Recursive descent
// ═══════════════════════════════════════════════════════════════

struct Parser<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
    config: &'a DecodeConfig,
}

impl<'a> Parser<'a> {
    fn value(&mut self) -> Result<Value, CodecError> {
        let start = self.pos;
        match self.next_byte()? {
            b'N' => {
                self.expect(b';')?;
                Ok(Value::Null)
            }
            b'b' => {
                self.expect(b':')?;
                let at = self.pos;
                let flag = match self.next_byte()? {
                    b'0' => false,
                    b'1' => true,
                    other => {
                        return Err(CodecError::syntax(
                            at,
                            format!("bool must be 0 or 1, got {:?}", char::from(other)),
                        ));
                    }
                };
                self.expect(b';')?;
                Ok(Value::Bool(flag))
            }
            b'i' => {
                self.expect(b':')?;
                let n = self.integer(b';')?;
                Ok(Value::Int(n))
            }
            b'd' => {
                self.expect(b':')?;
                let f = self.float()?;
                Ok(Value::Float(f))
            }
            b's' => {
                self.expect(b':')?;
                let s = self.string_body()?;
                Ok(Value::Text(s))
            }
            b'a' => {
                self.expect(b':')?;
                self.array()
            }
            tag => Err(CodecError::UnexpectedTag { offset: start, tag }),
        }
    }

    /// Array key: only `i:` and `s:` are legal.
    fn key(&mut self) -> Result<Key, CodecError> {
        let start = self.pos;
        match self.next_byte()? {
            b'i' => {
                self.expect(b':')?;
                Ok(Key::Int(self.integer(b';')?))
            }
            b's' => {
                self.expect(b':')?;
                Ok(Key::Text(self.string_body()?))
            }
            tag => Err(CodecError::UnexpectedTag { offset: start, tag }),
        }
    }

    /// `<count>:{` key value ... `}`. The leading `a:` is already consumed.
    fn array(&mut self) -> Result<Value, CodecError> {
        let count_at = self.pos;
        let count = self.length(b':')?;
        self.expect(b'{')?;

        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(CodecError::LimitExceeded { limit: "nesting depth", max: self.config.max_depth });
        }

        // Smallest possible pair is `i:0;N;` (6 bytes).
        if count > self.remaining() / 6 {
            return Err(CodecError::syntax(
                count_at,
                format!("array count {count} cannot fit in {} remaining bytes", self.remaining()),
            ));
        }

        let mut entries = Vec::with_capacity(count);
        for _ in 0..count {
            let key = self.key()?;
            let value = self.value()?;
            entries.push((key, value));
        }

        self.expect(b'}')?;
        self.depth -= 1;
        Ok(Value::Array(entries))
    }

    /// `<byteLen>:"<bytes>";`. The leading `s:` is already consumed.
    fn string_body(&mut self) -> Result<String, CodecError> {
        let len_at = self.pos;
        let len = self.length(b':')?;
        self.expect(b'"')?;

        let start = self.pos;
        if len > self.remaining() {
            return Err(CodecError::syntax(
                len_at,
                format!("string length {len} exceeds {} remaining bytes", self.remaining()),
            ));
        }
        let buf = self.buf;
        let raw = &buf[start..start + len];
        self.pos += len;

        self.expect(b'"')?;
        self.expect(b';')?;

        match std::str::from_utf8(raw) {
            Ok(s) => Ok(s.to_string()),
            Err(e) => match self.config.invalid_utf8 {
                InvalidUtf8::Replace => Ok(String::from_utf8_lossy(raw).into_owned()),
                InvalidUtf8::Reject => Err(CodecError::syntax(
                    start + e.valid_up_to(),
                    "string payload is not valid UTF-8",
                )),
            },
        }
    }

    // ---- Scalars ----

    /// Signed decimal terminated by `end`.
    fn integer(&mut self, end: u8) -> Result<i64, CodecError> {
        let at = self.pos;
        let token = self.token(end)?;
        // At most one sign.
        let unsigned = token.strip_prefix(['+', '-']).unwrap_or(token);
        if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::syntax(at, format!("invalid integer {token:?}")));
        }
        token
            .parse::<i64>()
            .map_err(|e| CodecError::syntax(at, format!("integer {token:?}: {e}")))
    }

    /// Unsigned decimal length or count terminated by `end`.
    fn length(&mut self, end: u8) -> Result<usize, CodecError> {
        let at = self.pos;
        let token = self.token(end)?;
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodecError::syntax(at, format!("invalid length {token:?}")));
        }
        token
            .parse::<usize>()
            .map_err(|e| CodecError::syntax(at, format!("length {token:?}: {e}")))
    }

    fn float(&mut self) -> Result<f64, CodecError> {
        let at = self.pos;
        let token = self.token(b';')?;
        match token {
            "INF" => Ok(f64::INFINITY),
            "-INF" => Ok(f64::NEG_INFINITY),
            "NAN" => Ok(f64::NAN),
            _ => {
                let numeric = !token.is_empty()
                    && token
                        .bytes()
                        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
                if !numeric {
                    return Err(CodecError::syntax(at, format!("invalid float {token:?}")));
                }
                token
                    .parse::<f64>()
                    .map_err(|e| CodecError::syntax(at, format!("float {token:?}: {e}")))
            }
        }
    }

    // ---- Byte-level helpers ----

    /// ASCII run up to (not including) `end`; consumes the terminator.
    fn token(&mut self, end: u8) -> Result<&'a str, CodecError> {
        let start = self.pos;
        let rest = &self.buf[start..];
        let Some(len) = rest.iter().position(|&b| b == end) else {
            return Err(CodecError::UnexpectedEof { offset: self.buf.len() });
        };
        let raw = &rest[..len];
        self.pos = start + len + 1;
        std::str::from_utf8(raw)
            .ok()
            .filter(|s| s.is_ascii())
            .ok_or_else(|| CodecError::syntax(start, "non-ASCII bytes in numeric field"))
    }

    fn next_byte(&mut self) -> Result<u8, CodecError> {
        let b = *self
            .buf
            .get(self.pos)
            .ok_or(CodecError::UnexpectedEof { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    fn expect(&mut self, want: u8) -> Result<(), CodecError> {
        let at = self.pos;
        let got = self.next_byte()?;
        if got != want {
            return Err(CodecError::syntax(
                at,
                format!("expected {:?}, found {:?}", char::from(want), char::from(got)),
            ));
        }
        Ok(())
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }
}

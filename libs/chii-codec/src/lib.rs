pub mod column;
pub mod config;
pub mod deflate;
pub mod normalize;
pub mod parser;

pub use column::{
    CompressedBlobCodec, SerializedTextCodec, decode_compressed_legacy_blob,
    decode_compressed_legacy_blob_with, decode_legacy_text, decode_legacy_text_with,
    encode_legacy,
};
pub use config::{DecodeConfig, InvalidUtf8};
pub use normalize::normalize;
pub use parser::{Parsed, parse};

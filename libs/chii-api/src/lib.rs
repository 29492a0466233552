pub mod codec;
pub mod error;
pub mod value;

pub use codec::ColumnCodec;
pub use error::{CodecError, ErrorKind};
pub use value::{Key, Value};

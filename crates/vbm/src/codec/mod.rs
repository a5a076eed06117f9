//! Binary encoding/decoding for brain model files.
//!
//! Layered bottom-up: the two prefix-length integer codecs, a byte
//! reader/writer built on them, per-record layouts, and the whole-file
//! layout.

pub mod model;
pub mod primitives;
pub mod record;
pub mod varint;
pub mod varuint;

pub use model::{decode_model, encode_model, encode_model_with_options, is_supported_version, EncodeOptions};
pub use primitives::{Reader, Writer};
pub use varint::{decode_varint, encode_varint, varint_len};
pub use varuint::{decode_varuint, encode_varuint, varuint_len};

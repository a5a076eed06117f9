//! VBM: binary and text codecs for simulated brain model files.
//!
//! A model file describes a spiking neural network: soma types, somas with
//! their axonal and dendritic terminal fields, synapses (optionally routed
//! through a via-point) and gap junctions. The same model can be stored as
//! compact binary or as line-oriented text, and this crate converts between
//! the two without losing any integer or count.
//!
//! # Quick Start
//!
//! ```rust
//! use vbm::{binary_to_text, text_to_binary};
//! use vbm::model::{ModelBuilder, SomaType};
//! use vbm::codec::{encode_model, decode_model};
//!
//! let model = ModelBuilder::new()
//!     .comment("one synapse")
//!     .soma_type(SomaType::new(b'N').unwrap())
//!     .soma(0, 1, [0, 0, 0], |s| s.axonal([0, 10, 0, 10, 0, 10]))
//!     .soma(0, 2, [20, 0, 0], |s| s.dendritic([15, 25, -5, 5, -5, 5]))
//!     .synapse(1, 1, 2, [18, 0, 0])
//!     .build();
//!
//! let bytes = encode_model(&model).unwrap();
//! assert_eq!(decode_model(&bytes).unwrap(), model);
//!
//! // Binary -> text -> binary is byte-identical.
//! let text = binary_to_text(&bytes).unwrap();
//! assert_eq!(text_to_binary(&text).unwrap(), bytes);
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Model, Soma, Field, Synapse, GapJunction)
//! - [`codec`]: VarUint/VarInt codecs and the binary file layout
//! - [`text`]: The text representation
//! - [`transcode`]: Representation detection and whole-file conversion
//! - [`validate`]: Opt-in semantic validation
//! - [`summary`]: Record counts and synapse histograms
//! - [`error`]: Error types
//! - [`limits`]: Format constants and decoding limits
//!
//! # Wire Format
//!
//! Integers use two prefix-length encodings. The number of leading one
//! bits in the first byte gives the encoded length:
//!
//! - VarUint: 1 to 8 bytes, or `0xFF` followed by 8 raw bytes
//! - VarInt: sign-magnitude, 1 to 4 bytes with separate positive and
//!   negative tiers, or `0xFF` followed by 4 raw bytes
//!
//! # Security
//!
//! Decoders treat input as untrusted: declared counts are checked against
//! [`limits`] before allocating, truncated input and trailing bytes are
//! rejected, and every error carries a stable code (see [`ErrorCode`]).

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod summary;
pub mod text;
pub mod transcode;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{decode_model, encode_model, encode_model_with_options, EncodeOptions};
pub use error::{ConvertError, DecodeError, EncodeError, ErrorCode, ParseError, ValidationError};
pub use model::{Field, GapJunction, Model, ModelBuilder, Point, Soma, SomaType, Synapse, TypeTable};
pub use summary::{synapse_histogram, ModelSummary, Side, SynapseHistogram};
pub use text::{parse_text, write_text, TextOptions};
pub use transcode::{binary_to_text, convert, decode, encode, text_to_binary, ConvertOptions, Representation};
pub use validate::validate_model;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Format constants and decoding limits.
//!
//! Counts read from untrusted input are checked against these limits
//! before any allocation is sized from them.

/// Binary model file signature (`"\aRJV\xF7"`).
pub const MAGIC: &[u8; 5] = b"\x07RJV\xF7";

/// Oldest binary format version this crate reads.
pub const MIN_FORMAT_VERSION: u8 = 1;

/// Newest binary format version this crate reads and writes.
pub const FORMAT_VERSION: u8 = 2;

/// First version that carries the total field count after the soma count.
pub const FIELD_COUNT_VERSION: u8 = 2;

/// The type table count is a single byte.
pub const MAX_TYPES: usize = u8::MAX as usize;

/// Maximum number of somas in one model.
pub const MAX_SOMAS: usize = 1 << 28;

/// Maximum number of axonal (or dendritic) fields on one soma.
pub const MAX_FIELDS_PER_SOMA: usize = 1 << 16;

/// Maximum number of synapses in one model.
pub const MAX_SYNAPSES: usize = 1 << 30;

/// Maximum number of gap junctions in one model.
pub const MAX_GAP_JUNCTIONS: usize = 1 << 28;

/// Maximum comment length in bytes.
pub const MAX_COMMENT_LEN: usize = 1 << 20;

/// Values at or above this bound cannot use the 8-byte VarUint tier
/// without their high bits merging into the tier prefix.
pub const VARUINT_SAFE_BOUND: u64 = 1 << 56;

/// Declared upper bound of the 8-byte VarUint tier.
pub const VARUINT_TIER8_BOUND: u64 = 1 << 60;

/// VarInt magnitudes must stay below this bound (31 bits plus sign).
pub const VARINT_MAGNITUDE_BOUND: u64 = 1 << 31;

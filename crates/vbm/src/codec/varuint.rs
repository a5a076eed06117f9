//! Prefix-length unsigned integers (VarUint).
//!
//! The number of leading one bits in the first byte selects the tier:
//! `L - 1` ones followed by a zero mean an `L`-byte big-endian word whose
//! prefix bits are the tier bias, and a first byte of `0xFF` escapes to
//! eight raw bytes. Tiers are disjoint, so decoding never has to reject a
//! longer-than-necessary form.
//!
//! An `L`-byte tier spends `L` bits on its prefix and so carries `7 * L`
//! payload bits. From the 5-byte tier up the format's declared ranges run
//! four bits past that width. The encoder moves such values to the next
//! tier wide enough to hold them, except in `[2^56, 2^60)` where the
//! declared 8-byte range is kept and the value is rejected.

use crate::error::{DecodeError, EncodeError};
use crate::limits::{VARUINT_SAFE_BOUND, VARUINT_TIER8_BOUND};

/// One fixed-length form of the unsigned codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnsignedTier {
    /// Total encoded length in bytes, including the prefix.
    pub len: usize,
    /// Mask selecting the prefix bits of the first byte.
    pub mask: u8,
    /// Expected value of the masked prefix bits.
    pub prefix: u8,
    /// Value OR'd into the `len`-byte word when encoding.
    pub bias: u64,
    /// Declared exclusive upper bound of values using this tier.
    pub bound: u64,
    /// Escape tier: flag byte followed by the raw 64-bit value.
    pub escape: bool,
}

const fn tier(len: usize, mask: u8, prefix: u8, bias: u64, bound: u64) -> UnsignedTier {
    UnsignedTier { len, mask, prefix, bias, bound, escape: false }
}

impl UnsignedTier {
    /// Exclusive upper bound of values whose bits stay clear of the prefix.
    ///
    /// The escape tier holds any `u64` and reports `u64::MAX`.
    pub const fn capacity(&self) -> u64 {
        if self.escape {
            u64::MAX
        } else {
            1 << (7 * self.len)
        }
    }

    /// Whether `value` can be written in this tier and read back unchanged.
    pub const fn holds(&self, value: u64) -> bool {
        self.escape || (value < self.bound && value < self.capacity())
    }
}

/// Tiers indexed by the number of leading one bits in the first byte.
pub const UNSIGNED_TIERS: [UnsignedTier; 9] = [
    tier(1, 0x80, 0x00, 0, 0x80),
    tier(2, 0xC0, 0x80, 0x8000, 0x4000),
    tier(3, 0xE0, 0xC0, 0xC0_0000, 0x20_0000),
    tier(4, 0xF0, 0xE0, 0xE000_0000, 0x1000_0000),
    tier(5, 0xF8, 0xF0, 0xF0_0000_0000, 0x80_0000_0000),
    tier(6, 0xFC, 0xF8, 0xF800_0000_0000, 0x4000_0000_0000),
    tier(7, 0xFE, 0xFC, 0xFC_0000_0000_0000, 0x20_0000_0000_0000),
    // Declared bounds of tiers 5 to 8 exceed `capacity`; see the module docs.
    tier(8, 0xFF, 0xFE, 0xFE00_0000_0000_0000, 0x1000_0000_0000_0000),
    UnsignedTier {
        len: 9,
        mask: 0xFF,
        prefix: 0xFF,
        bias: 0,
        bound: u64::MAX,
        escape: true,
    },
];

/// Returns the tier the encoder picks for `value`, or `None` inside the
/// 8-byte collision window `[2^56, 2^60)`.
pub fn varuint_tier(value: u64) -> Option<&'static UnsignedTier> {
    if (VARUINT_SAFE_BOUND..VARUINT_TIER8_BOUND).contains(&value) {
        return None;
    }
    UNSIGNED_TIERS.iter().find(|t| t.holds(value))
}

/// Returns the tier announced by a first byte.
#[inline]
pub fn varuint_tier_for_prefix(first: u8) -> &'static UnsignedTier {
    &UNSIGNED_TIERS[first.leading_ones() as usize]
}

/// Returns the encoded length of `value` in bytes.
pub fn varuint_len(value: u64) -> Option<usize> {
    varuint_tier(value).map(|t| t.len)
}

/// Appends the shortest lossless encoding of `value` to `out`.
///
/// Values in `[2^56, 2^60)` fall in the 8-byte tier's declared range but
/// would overwrite its prefix bits, so they are rejected instead of being
/// written in a form no decoder can recover.
pub fn encode_varuint(value: u64, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let tier = varuint_tier(value).ok_or(EncodeError::VarUintBiasCollision { value })?;
    if tier.escape {
        out.push(tier.prefix);
        out.extend_from_slice(&value.to_be_bytes());
        return Ok(());
    }
    let word = (value | tier.bias).to_be_bytes();
    out.extend_from_slice(&word[8 - tier.len..]);
    Ok(())
}

/// Decodes one value from the front of `input`.
///
/// Returns the value and the number of bytes consumed.
#[inline]
pub fn decode_varuint(input: &[u8], context: &'static str) -> Result<(u64, usize), DecodeError> {
    let first = *input.first().ok_or(DecodeError::UnexpectedEof { context })?;
    let tier = varuint_tier_for_prefix(first);
    let bytes = input
        .get(..tier.len)
        .ok_or(DecodeError::UnexpectedEof { context })?;

    let payload = if tier.escape { &bytes[1..] } else { bytes };
    let word = payload.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
    Ok((word - tier.bias, tier.len))
}

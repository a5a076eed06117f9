//! Sign-magnitude signed integers (VarInt).
//!
//! Like [`super::varuint`], the count of leading one bits in the first byte
//! selects the tier, but each length comes in a positive and a negative
//! flavour with its own prefix, so the sign costs no payload bit. The
//! 5-byte escape carries the sign in the top bit of a raw 32-bit word.

use crate::error::{DecodeError, EncodeError};

/// One fixed-length, fixed-sign form of the signed codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedTier {
    /// Total encoded length in bytes, including the prefix.
    pub len: usize,
    /// Mask selecting the prefix bits of the first byte.
    pub mask: u8,
    /// Expected value of the masked prefix bits.
    pub prefix: u8,
    /// Whether this tier holds negative values.
    pub negative: bool,
    /// Value OR'd into the magnitude word when encoding.
    pub bias: u32,
    /// Exclusive upper bound of magnitudes using this tier.
    pub bound: u32,
    /// Escape tier: flag byte followed by a raw sign-and-magnitude word.
    pub escape: bool,
}

const fn tier(len: usize, mask: u8, prefix: u8, negative: bool, bias: u32, bound: u32) -> SignedTier {
    SignedTier { len, mask, prefix, negative, bias, bound, escape: false }
}

/// Sign bit of the escape tier's payload word.
const ESCAPE_SIGN: u32 = 0x8000_0000;

/// Tiers indexed by the number of leading one bits in the first byte.
pub const SIGNED_TIERS: [SignedTier; 9] = [
    tier(1, 0x80, 0x00, false, 0x00, 0x80),
    tier(1, 0xC0, 0x80, true, 0x80, 0x40),
    tier(2, 0xE0, 0xC0, false, 0xC000, 0x2000),
    tier(2, 0xF0, 0xE0, true, 0xE000, 0x1000),
    tier(3, 0xF8, 0xF0, false, 0xF0_0000, 0x08_0000),
    tier(3, 0xFC, 0xF8, true, 0xF8_0000, 0x04_0000),
    tier(4, 0xFE, 0xFC, false, 0xFC00_0000, 0x0200_0000),
    tier(4, 0xFF, 0xFE, true, 0xFE00_0000, 0x0100_0000),
    SignedTier {
        len: 5,
        mask: 0xFF,
        prefix: 0xFF,
        negative: false,
        bias: 0,
        bound: ESCAPE_SIGN,
        escape: true,
    },
];

/// Returns the tier the encoder picks for `value`, or `None` for
/// `i32::MIN`, whose magnitude needs 32 bits.
pub fn varint_tier(value: i32) -> Option<&'static SignedTier> {
    let negative = value < 0;
    let magnitude = value.unsigned_abs();
    SIGNED_TIERS.iter().find(|t| {
        if t.escape {
            magnitude < t.bound
        } else {
            t.negative == negative && magnitude < t.bound
        }
    })
}

/// Returns the tier announced by a first byte.
#[inline]
pub fn varint_tier_for_prefix(first: u8) -> &'static SignedTier {
    &SIGNED_TIERS[first.leading_ones() as usize]
}

/// Returns the encoded length of `value` in bytes.
pub fn varint_len(value: i32) -> Option<usize> {
    varint_tier(value).map(|t| t.len)
}

/// Appends the minimal encoding of `value` to `out`.
pub fn encode_varint(value: i32, out: &mut Vec<u8>) -> Result<(), EncodeError> {
    let tier = varint_tier(value).ok_or(EncodeError::VarIntOutOfRange { value })?;
    let magnitude = value.unsigned_abs();
    if tier.escape {
        let word = if value < 0 { magnitude | ESCAPE_SIGN } else { magnitude };
        out.push(tier.prefix);
        out.extend_from_slice(&word.to_be_bytes());
        return Ok(());
    }
    let word = (magnitude | tier.bias).to_be_bytes();
    out.extend_from_slice(&word[4 - tier.len..]);
    Ok(())
}

/// Decodes one value from the front of `input`.
///
/// Returns the value and the number of bytes consumed.
#[inline]
pub fn decode_varint(input: &[u8], context: &'static str) -> Result<(i32, usize), DecodeError> {
    let first = *input.first().ok_or(DecodeError::UnexpectedEof { context })?;
    let tier = varint_tier_for_prefix(first);
    let bytes = input
        .get(..tier.len)
        .ok_or(DecodeError::UnexpectedEof { context })?;

    let payload = if tier.escape { &bytes[1..] } else { bytes };
    let word = payload.iter().fold(0u32, |acc, &b| (acc << 8) | u32::from(b));

    let (negative, magnitude) = if tier.escape {
        (word & ESCAPE_SIGN != 0, word & !ESCAPE_SIGN)
    } else {
        (tier.negative, word - tier.bias)
    };
    // Magnitudes are at most 31 bits wide in every tier.
    let magnitude = magnitude as i32;
    let value = if negative { -magnitude } else { magnitude };
    Ok((value, tier.len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode(value: i32) -> Vec<u8> {
        let mut out = Vec::new();
        encode_varint(value, &mut out).unwrap();
        out
    }

    #[test]
    fn test_tier_table_is_prefix_consistent() {
        for (ones, tier) in SIGNED_TIERS.iter().enumerate() {
            assert_eq!(tier.prefix.leading_ones() as usize, ones);
            assert_eq!(tier.prefix & tier.mask, tier.prefix);
            if !tier.escape {
                assert_eq!(tier.bias >> (8 * (tier.len - 1)), u32::from(tier.prefix));
                // Magnitude bits never reach into the prefix.
                assert_eq!((tier.bound - 1) & tier.bias, 0);
            }
        }
    }

    #[test]
    fn test_every_first_byte_selects_one_tier() {
        for b in 0..=u8::MAX {
            let matching = SIGNED_TIERS
                .iter()
                .filter(|t| b & t.mask == t.prefix)
                .count();
            assert_eq!(matching, 1, "byte {b:#04X}");
        }
    }

    #[test]
    fn test_known_encodings() {
        assert_eq!(encode(0), [0x00]);
        assert_eq!(encode(1), [0x01]);
        assert_eq!(encode(-1), [0x81]);
        assert_eq!(encode(127), [0x7F]);
        assert_eq!(encode(-63), [0xBF]);
        assert_eq!(encode(-64), [0xE0, 0x40]);
        assert_eq!(encode(128), [0xC0, 0x80]);
        assert_eq!(encode(i32::MAX), [0xFF, 0x7F, 0xFF, 0xFF, 0xFF]);
        assert_eq!(encode(-i32::MAX), [0xFF, 0xFF, 0xFF, 0xFF, 0xFF]);
    }

    #[test]
    fn test_tier_boundaries() {
        let expected = [
            (0x7F, 1),
            (0x80, 2),
            (-0x3F, 1),
            (-0x40, 2),
            (0x1FFF, 2),
            (0x2000, 3),
            (-0x0FFF, 2),
            (-0x1000, 3),
            (0x07_FFFF, 3),
            (0x08_0000, 4),
            (-0x03_FFFF, 3),
            (-0x04_0000, 4),
            (0x01FF_FFFF, 4),
            (0x0200_0000, 5),
            (-0x00FF_FFFF, 4),
            (-0x0100_0000, 5),
        ];
        for (value, len) in expected {
            let bytes = encode(value);
            assert_eq!(bytes.len(), len, "value {value}");
            assert_eq!(varint_len(value), Some(len));
            assert_eq!(decode_varint(&bytes, "test").unwrap(), (value, len));
        }
    }

    #[test]
    fn test_min_value_rejected() {
        let mut out = Vec::new();
        assert_eq!(
            encode_varint(i32::MIN, &mut out),
            Err(EncodeError::VarIntOutOfRange { value: i32::MIN })
        );
        assert!(out.is_empty());
        assert_eq!(varint_len(i32::MIN), None);
    }

    #[test]
    fn test_escape_negative_zero_decodes_to_zero() {
        assert_eq!(decode_varint(&[0xFF, 0x80, 0, 0, 0], "test").unwrap(), (0, 5));
    }

    #[test]
    fn test_truncated_input() {
        assert!(matches!(
            decode_varint(&[0xFC, 0x00], "x"),
            Err(DecodeError::UnexpectedEof { context: "x" })
        ));
        assert!(matches!(
            decode_varint(&[0xFF, 0x00, 0x00, 0x00], "x"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(value in (i32::MIN + 1)..=i32::MAX) {
            let bytes = encode(value);
            prop_assert_eq!(decode_varint(&bytes, "prop").unwrap(), (value, bytes.len()));
        }

        #[test]
        fn prop_picks_minimal_tier(value in (i32::MIN + 1)..=i32::MAX) {
            let magnitude = value.unsigned_abs();
            let smallest = SIGNED_TIERS
                .iter()
                .filter(|t| !t.escape && t.negative == (value < 0))
                .find(|t| magnitude < t.bound)
                .map_or(5, |t| t.len);
            prop_assert_eq!(encode(value).len(), smallest);
        }
    }
}

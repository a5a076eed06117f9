//! Error types for model encoding, decoding, parsing and validation.

use thiserror::Error;

/// Error classes shared by the binary and text readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// E001: Wrong magic signature or unsupported version
    MalformedHeader,
    /// E002: Input ended before a declared count was satisfied
    TruncatedStream,
    /// E003: Reference to a type that is not in the type table
    UnknownReference,
    /// E004: Integer outside the range the format can represent
    RangeViolation,
    /// E005: Malformed record, flag, letter, token or trailing data
    MalformedEncoding,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::MalformedHeader => "E001",
            ErrorCode::TruncatedStream => "E002",
            ErrorCode::UnknownReference => "E003",
            ErrorCode::RangeViolation => "E004",
            ErrorCode::MalformedEncoding => "E005",
        }
    }
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === E001: Malformed header ===
    #[error("[E001] invalid magic bytes: found {found:02X?}")]
    InvalidMagic { found: [u8; 5] },

    #[error("[E001] unsupported version: {version}")]
    UnsupportedVersion { version: u8 },

    // === E002: Truncated stream ===
    #[error("[E002] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    // === E003: Unknown reference ===
    #[error("[E003] soma {soma} has type id {type_id} but only {types} types are defined")]
    UnknownType { soma: u64, type_id: u8, types: usize },

    // === E005: Malformed encoding ===
    #[error("[E005] invalid type letter: 0x{letter:02X}")]
    InvalidTypeLetter { letter: u8 },

    #[error("[E005] invalid bool value: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("[E005] {field} count {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: u64,
        max: usize,
    },

    #[error("[E005] {count} trailing bytes after the gap junction table")]
    TrailingData { count: usize },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::InvalidMagic { .. } | DecodeError::UnsupportedVersion { .. } => {
                ErrorCode::MalformedHeader
            }
            DecodeError::UnexpectedEof { .. } => ErrorCode::TruncatedStream,
            DecodeError::UnknownType { .. } => ErrorCode::UnknownReference,
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("[E001] unsupported version: {version}")]
    UnsupportedVersion { version: u8 },

    #[error("[E003] soma {soma} has type id {type_id} but only {types} types are defined")]
    UnknownType { soma: u64, type_id: u8, types: usize },

    #[error("[E004] unsigned value {value:#X} would collide with the 8-byte tier prefix")]
    VarUintBiasCollision { value: u64 },

    #[error("[E004] signed value {value} has no sign-magnitude encoding")]
    VarIntOutOfRange { value: i32 },

    #[error("[E005] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[E005] comment contains a NUL byte")]
    CommentContainsNul,
}

impl EncodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            EncodeError::UnsupportedVersion { .. } => ErrorCode::MalformedHeader,
            EncodeError::UnknownType { .. } => ErrorCode::UnknownReference,
            EncodeError::VarUintBiasCollision { .. } | EncodeError::VarIntOutOfRange { .. } => {
                ErrorCode::RangeViolation
            }
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error while reading the text representation.
///
/// Line numbers are 1-based positions in the source text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("[E001] line {line}: unsupported version: {version}")]
    UnsupportedVersion { line: usize, version: String },

    #[error("[E002] unexpected end of input while reading {context}")]
    UnexpectedEnd { context: &'static str },

    #[error("[E003] line {line}: soma type id {type_id} but only {types} types are defined")]
    UnknownType {
        line: usize,
        type_id: u8,
        types: usize,
    },

    #[error("[E004] line {line}: {context} value {token} is out of range")]
    OutOfRange {
        line: usize,
        context: &'static str,
        token: String,
    },

    #[error("[E005] line {line}: expected {expected} tokens for {context}, found {found}")]
    TokenCount {
        line: usize,
        context: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("[E005] line {line}: invalid integer {token:?} in {context}")]
    InvalidInteger {
        line: usize,
        context: &'static str,
        token: String,
    },

    #[error("[E005] line {line}: invalid type letter {token:?}")]
    InvalidTypeLetter { line: usize, token: String },

    #[error("[E005] line {line}: type row has id {found}, expected {expected}")]
    TypeIndexMismatch {
        line: usize,
        expected: usize,
        found: u64,
    },

    #[error("[E005] line {line}: {field} count {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        line: usize,
        field: &'static str,
        len: u64,
        max: usize,
    },

    #[error("[E005] line {line}: unexpected data after the gap junction table")]
    TrailingData { line: usize },

    #[error("[E005] text input is not valid UTF-8")]
    InvalidUtf8,
}

impl ParseError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ParseError::UnsupportedVersion { .. } => ErrorCode::MalformedHeader,
            ParseError::UnexpectedEnd { .. } => ErrorCode::TruncatedStream,
            ParseError::UnknownType { .. } => ErrorCode::UnknownReference,
            ParseError::OutOfRange { .. } => ErrorCode::RangeViolation,
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error during semantic validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("[E003] soma {soma} has type id {type_id} but only {types} types are defined")]
    UnknownType { soma: u64, type_id: u8, types: usize },

    #[error("[E003] type letter {letter:?} is not in the type table")]
    UnknownTypeLetter { letter: char },

    #[error("[E004] {context} {id} has a coordinate with no sign-magnitude encoding")]
    CoordinateOutOfRange { context: &'static str, id: u64 },

    #[error("[E005] soma id {id} appears more than once")]
    DuplicateSomaId { id: u64 },

    #[error("[E003] synapse {synapse} references missing soma {soma}")]
    DanglingSynapseSoma { synapse: u64, soma: u64 },

    #[error("[E003] gap junction #{index} references missing soma {soma}")]
    DanglingGapJunctionSoma { index: usize, soma: u64 },
}

impl ValidationError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::CoordinateOutOfRange { .. } => ErrorCode::RangeViolation,
            ValidationError::DuplicateSomaId { .. } => ErrorCode::MalformedEncoding,
            _ => ErrorCode::UnknownReference,
        }
    }
}

/// Error from a full conversion between representations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ConvertError {
    /// Returns the error code of the wrapped error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConvertError::Decode(e) => e.code(),
            ConvertError::Encode(e) => e.code(),
            ConvertError::Parse(e) => e.code(),
            ConvertError::Validation(e) => e.code(),
        }
    }
}

//! Whole-file encoding/decoding for the binary model format.
//!
//! ```text
//! file := magic[5] version:u8 comment:cstring
//!         type_count:u8 letter:u8{type_count}
//!         soma_count:vu [field_total:vu, version >= 2] soma{soma_count}
//!         synapse_count:vu synapse{synapse_count}
//!         gap_junction_count:vu gap_junction{gap_junction_count}
//! ```

use tracing::{debug, warn};

use crate::codec::primitives::{Reader, Writer};
use crate::codec::record::{
    decode_gap_junction, decode_soma, decode_synapse, encode_gap_junction, encode_soma,
    encode_synapse,
};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{
    FIELD_COUNT_VERSION, FORMAT_VERSION, MAGIC, MAX_COMMENT_LEN, MAX_GAP_JUNCTIONS, MAX_SOMAS,
    MAX_SYNAPSES, MAX_TYPES, MIN_FORMAT_VERSION,
};
use crate::model::{Model, SomaType, TypeTable};

/// Returns true if `version` is one this crate reads and writes.
pub fn is_supported_version(version: u8) -> bool {
    (MIN_FORMAT_VERSION..=FORMAT_VERSION).contains(&version)
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a Model from a complete binary model file.
///
/// The whole input must be consumed: a missing gap junction table is a
/// truncation, and bytes after it are rejected as trailing data.
pub fn decode_model(input: &[u8]) -> Result<Model, DecodeError> {
    let mut reader = Reader::new(input);

    let magic = reader.read_bytes(MAGIC.len(), "magic")?;
    if magic != MAGIC {
        let mut found = [0u8; 5];
        found.copy_from_slice(magic);
        return Err(DecodeError::InvalidMagic { found });
    }

    let version = reader.read_byte("version")?;
    if !is_supported_version(version) {
        return Err(DecodeError::UnsupportedVersion { version });
    }

    let mut model = Model::new(version);
    model.comment = reader.read_cstring(MAX_COMMENT_LEN, "comment")?;

    // Types
    let type_count = usize::from(reader.read_byte("type_count")?);
    let letters = reader.read_bytes(type_count, "type_letters")?;
    model.types = letters
        .iter()
        .map(|&letter| SomaType::new(letter).ok_or(DecodeError::InvalidTypeLetter { letter }))
        .collect::<Result<TypeTable, _>>()?;
    debug!(version, types = type_count, "decoded header");

    // Somas
    let soma_count = reader.read_count(MAX_SOMAS, "somas")?;
    let declared_fields = if version >= FIELD_COUNT_VERSION {
        Some(reader.read_varuint("field_count")?)
    } else {
        None
    };
    // Every soma takes at least seven bytes.
    model.somas = Vec::with_capacity(soma_count.min(reader.remaining_len() / 7));
    for _ in 0..soma_count {
        model.somas.push(decode_soma(&mut reader, type_count)?);
    }
    if let Some(declared) = declared_fields {
        let actual = model.field_count() as u64;
        if declared != actual {
            warn!(declared, actual, "field count header disagrees with soma records");
        }
    }
    debug!(somas = soma_count, fields = model.field_count(), "decoded somas");

    // Synapses
    let synapse_count = reader.read_count(MAX_SYNAPSES, "synapses")?;
    model.synapses = Vec::with_capacity(synapse_count.min(reader.remaining_len() / 7));
    for _ in 0..synapse_count {
        model.synapses.push(decode_synapse(&mut reader)?);
    }
    debug!(synapses = synapse_count, "decoded synapses");

    // Gap junctions
    let gap_junction_count = reader.read_count(MAX_GAP_JUNCTIONS, "gap_junctions")?;
    model.gap_junctions = Vec::with_capacity(gap_junction_count.min(reader.remaining_len() / 5));
    for _ in 0..gap_junction_count {
        model.gap_junctions.push(decode_gap_junction(&mut reader)?);
    }
    debug!(gap_junctions = gap_junction_count, "decoded gap junctions");

    if !reader.is_empty() {
        return Err(DecodeError::TrailingData {
            count: reader.remaining_len(),
        });
    }

    Ok(model)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Options for binary encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Version to write instead of the model's own.
    pub version: Option<u8>,
}

impl EncodeOptions {
    /// Creates options that keep the model's version.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that write the given version.
    pub fn with_version(version: u8) -> Self {
        Self {
            version: Some(version),
        }
    }
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<(), EncodeError> {
    if len > max {
        return Err(EncodeError::LengthExceedsLimit { field, len, max });
    }
    Ok(())
}

/// Encodes a Model to binary using the model's version.
pub fn encode_model(model: &Model) -> Result<Vec<u8>, EncodeError> {
    encode_model_with_options(model, EncodeOptions::new())
}

/// Encodes a Model to binary with options.
pub fn encode_model_with_options(model: &Model, options: EncodeOptions) -> Result<Vec<u8>, EncodeError> {
    let version = options.version.unwrap_or(model.version);
    if !is_supported_version(version) {
        return Err(EncodeError::UnsupportedVersion { version });
    }
    check_len("comment", model.comment.len(), MAX_COMMENT_LEN)?;
    check_len("types", model.types.len(), MAX_TYPES)?;
    check_len("somas", model.somas.len(), MAX_SOMAS)?;
    check_len("synapses", model.synapses.len(), MAX_SYNAPSES)?;
    check_len("gap_junctions", model.gap_junctions.len(), MAX_GAP_JUNCTIONS)?;

    let estimate = 64
        + model.comment.len()
        + model.somas.len() * 12
        + model.field_count() * 12
        + model.synapses.len() * 14
        + model.gap_junctions.len() * 10;
    let mut writer = Writer::with_capacity(estimate);

    writer.write_bytes(MAGIC);
    writer.write_byte(version);
    writer.write_cstring(&model.comment)?;

    // Checked against MAX_TYPES above.
    writer.write_byte(model.types.len() as u8);
    for ty in model.types.iter() {
        writer.write_byte(ty.letter());
    }

    let type_count = model.types.len();
    writer.write_count(model.somas.len())?;
    if version >= FIELD_COUNT_VERSION {
        writer.write_count(model.field_count())?;
    }
    for soma in &model.somas {
        encode_soma(&mut writer, soma, type_count)?;
    }

    writer.write_count(model.synapses.len())?;
    for synapse in &model.synapses {
        encode_synapse(&mut writer, synapse)?;
    }

    writer.write_count(model.gap_junctions.len())?;
    for gap_junction in &model.gap_junctions {
        encode_gap_junction(&mut writer, gap_junction)?;
    }

    debug!(
        version,
        somas = model.somas.len(),
        synapses = model.synapses.len(),
        gap_junctions = model.gap_junctions.len(),
        bytes = writer.len(),
        "encoded model"
    );
    Ok(writer.into_bytes())
}

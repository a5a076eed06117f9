//! Record encoding/decoding for the binary model format.
//!
//! Layouts (`vu` = VarUint, `vi` = VarInt, `u8` = one raw byte):
//!
//! ```text
//! field        := x1:vi x2:vi y1:vi y2:vi z1:vi z2:vi
//! soma         := type:u8 id:vu x:vi y:vi z:vi A:vu D:vu field{A} field{D}
//! synapse      := id:vu has_via:u8 axonal:vu dendritic:vu [vx:vi vy:vi vz:vi] x:vi y:vi z:vi
//! gap_junction := soma1:vu soma2:vu x:vi y:vi z:vi
//! ```
//!
//! Counts are never followed by a terminator; the count alone says how
//! many records follow.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_FIELDS_PER_SOMA;
use crate::model::{Field, GapJunction, Point, Soma, Synapse};

// =============================================================================
// DECODING
// =============================================================================

fn decode_point(reader: &mut Reader<'_>, context: &'static str) -> Result<Point, DecodeError> {
    Ok(Point {
        x: reader.read_varint(context)?,
        y: reader.read_varint(context)?,
        z: reader.read_varint(context)?,
    })
}

/// Decodes one neuritic field.
pub fn decode_field(reader: &mut Reader<'_>) -> Result<Field, DecodeError> {
    let mut coords = [0i32; 6];
    for c in &mut coords {
        *c = reader.read_varint("field")?;
    }
    Ok(Field::from(coords))
}

fn decode_fields(
    reader: &mut Reader<'_>,
    count: usize,
) -> Result<Vec<Field>, DecodeError> {
    // Every field takes at least six bytes.
    let mut fields = Vec::with_capacity(count.min(reader.remaining_len() / 6));
    for _ in 0..count {
        fields.push(decode_field(reader)?);
    }
    Ok(fields)
}

/// Decodes one soma and its fields.
///
/// `type_count` is the size of the type table; a type id outside it is
/// rejected.
pub fn decode_soma(reader: &mut Reader<'_>, type_count: usize) -> Result<Soma, DecodeError> {
    let type_id = reader.read_byte("soma_type")?;
    let id = reader.read_varuint("soma_id")?;
    if usize::from(type_id) >= type_count {
        return Err(DecodeError::UnknownType {
            soma: id,
            type_id,
            types: type_count,
        });
    }
    let position = decode_point(reader, "soma_position")?;
    let axonal_count = reader.read_count(MAX_FIELDS_PER_SOMA, "axonal_fields")?;
    let dendritic_count = reader.read_count(MAX_FIELDS_PER_SOMA, "dendritic_fields")?;
    let axonal = decode_fields(reader, axonal_count)?;
    let dendritic = decode_fields(reader, dendritic_count)?;

    Ok(Soma {
        type_id,
        id,
        position,
        axonal,
        dendritic,
    })
}

/// Decodes one synapse.
pub fn decode_synapse(reader: &mut Reader<'_>) -> Result<Synapse, DecodeError> {
    let id = reader.read_varuint("synapse_id")?;
    let has_via = reader.read_bool("synapse_has_via")?;
    let axonal_soma = reader.read_varuint("synapse_axonal_soma")?;
    let dendritic_soma = reader.read_varuint("synapse_dendritic_soma")?;
    let via = if has_via {
        Some(decode_point(reader, "synapse_via")?)
    } else {
        None
    };
    let endpoint = decode_point(reader, "synapse_endpoint")?;

    Ok(Synapse {
        id,
        axonal_soma,
        dendritic_soma,
        via,
        endpoint,
    })
}

/// Decodes one gap junction.
pub fn decode_gap_junction(reader: &mut Reader<'_>) -> Result<GapJunction, DecodeError> {
    let soma1 = reader.read_varuint("gap_junction_soma1")?;
    let soma2 = reader.read_varuint("gap_junction_soma2")?;
    let point = decode_point(reader, "gap_junction_point")?;
    Ok(GapJunction { soma1, soma2, point })
}

// =============================================================================
// ENCODING
// =============================================================================

fn encode_point(writer: &mut Writer, point: &Point) -> Result<(), EncodeError> {
    for c in point.coords() {
        writer.write_varint(c)?;
    }
    Ok(())
}

/// Encodes one neuritic field.
pub fn encode_field(writer: &mut Writer, field: &Field) -> Result<(), EncodeError> {
    for c in field.coords() {
        writer.write_varint(c)?;
    }
    Ok(())
}

/// Encodes one soma; the field counts are taken from the field lists.
pub fn encode_soma(writer: &mut Writer, soma: &Soma, type_count: usize) -> Result<(), EncodeError> {
    if usize::from(soma.type_id) >= type_count {
        return Err(EncodeError::UnknownType {
            soma: soma.id,
            type_id: soma.type_id,
            types: type_count,
        });
    }
    for (field, list) in [("axonal_fields", &soma.axonal), ("dendritic_fields", &soma.dendritic)] {
        if list.len() > MAX_FIELDS_PER_SOMA {
            return Err(EncodeError::LengthExceedsLimit {
                field,
                len: list.len(),
                max: MAX_FIELDS_PER_SOMA,
            });
        }
    }

    writer.write_byte(soma.type_id);
    writer.write_varuint(soma.id)?;
    encode_point(writer, &soma.position)?;
    writer.write_count(soma.axonal.len())?;
    writer.write_count(soma.dendritic.len())?;
    for field in soma.fields() {
        encode_field(writer, field)?;
    }
    Ok(())
}

/// Encodes one synapse.
pub fn encode_synapse(writer: &mut Writer, synapse: &Synapse) -> Result<(), EncodeError> {
    writer.write_varuint(synapse.id)?;
    writer.write_bool(synapse.has_via());
    writer.write_varuint(synapse.axonal_soma)?;
    writer.write_varuint(synapse.dendritic_soma)?;
    if let Some(via) = &synapse.via {
        encode_point(writer, via)?;
    }
    encode_point(writer, &synapse.endpoint)
}

/// Encodes one gap junction.
pub fn encode_gap_junction(writer: &mut Writer, gap_junction: &GapJunction) -> Result<(), EncodeError> {
    writer.write_varuint(gap_junction.soma1)?;
    writer.write_varuint(gap_junction.soma2)?;
    encode_point(writer, &gap_junction.point)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn soma_with_fields(axonal: usize, dendritic: usize) -> Soma {
        let mut soma = Soma::new(0, 42, Point::new(-3, 0, 900));
        for i in 0..axonal as i32 {
            soma.axonal.push(Field::new(i, i + 1, -i, -i - 1, 100 * i, 100 * i + 1));
        }
        for i in 0..dendritic as i32 {
            soma.dendritic.push(Field::new(-i, i, 7, 8, -9000, 9000));
        }
        soma
    }

    #[test]
    fn test_soma_roundtrip_preserves_field_lists() {
        let soma = soma_with_fields(2, 1);
        let mut writer = Writer::new();
        encode_soma(&mut writer, &soma, 1).unwrap();

        let mut reader = Reader::new(writer.as_bytes());
        let decoded = decode_soma(&mut reader, 1).unwrap();
        assert!(reader.is_empty());
        assert_eq!(decoded.axonal.len(), 2);
        assert_eq!(decoded.dendritic.len(), 1);
        assert_eq!(decoded, soma);
    }

    #[test]
    fn test_soma_missing_field_is_truncation() {
        let soma = soma_with_fields(2, 1);
        let mut writer = Writer::new();
        encode_soma(&mut writer, &soma, 1).unwrap();

        // Drop the last field record entirely.
        let mut last = Writer::new();
        encode_field(&mut last, &soma.dendritic[0]).unwrap();
        let bytes = writer.as_bytes();
        let truncated = &bytes[..bytes.len() - last.len()];

        let mut reader = Reader::new(truncated);
        assert!(matches!(
            decode_soma(&mut reader, 1),
            Err(DecodeError::UnexpectedEof { context: "field" })
        ));
    }

    #[test]
    fn test_soma_unknown_type() {
        let soma = Soma::new(3, 5, Point::default());
        let mut writer = Writer::new();
        assert_eq!(
            encode_soma(&mut writer, &soma, 3),
            Err(EncodeError::UnknownType { soma: 5, type_id: 3, types: 3 })
        );

        let bytes = [3u8, 5, 0, 0, 0, 0, 0];
        let mut reader = Reader::new(&bytes);
        assert_eq!(
            decode_soma(&mut reader, 2),
            Err(DecodeError::UnknownType { soma: 5, type_id: 3, types: 2 })
        );
    }

    #[test]
    fn test_synapse_without_via_reads_three_coordinates() {
        let synapse = Synapse::new(9, 1, 2, Point::new(4, 5, 6));
        let mut writer = Writer::new();
        encode_synapse(&mut writer, &synapse).unwrap();
        assert_eq!(writer.as_bytes(), &[9, 0, 1, 2, 4, 5, 6]);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(decode_synapse(&mut reader).unwrap(), synapse);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_synapse_with_via_reads_six_coordinates() {
        let synapse = Synapse::with_via(9, 1, 2, Point::new(-1, -2, -3), Point::new(4, 5, 6));
        let mut writer = Writer::new();
        encode_synapse(&mut writer, &synapse).unwrap();
        assert_eq!(writer.as_bytes(), &[9, 1, 1, 2, 0x81, 0x82, 0x83, 4, 5, 6]);

        let mut reader = Reader::new(writer.as_bytes());
        let decoded = decode_synapse(&mut reader).unwrap();
        assert!(decoded.has_via());
        assert_eq!(decoded, synapse);
    }

    #[test]
    fn test_synapse_bad_via_flag() {
        let bytes = [9u8, 2, 1, 2, 4, 5, 6];
        let mut reader = Reader::new(&bytes);
        assert!(matches!(
            decode_synapse(&mut reader),
            Err(DecodeError::InvalidBool { value: 2 })
        ));
    }

    #[test]
    fn test_gap_junction_roundtrip() {
        let gj = GapJunction::new(300, 1, Point::new(0, -70000, 12));
        let mut writer = Writer::new();
        encode_gap_junction(&mut writer, &gj).unwrap();
        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(decode_gap_junction(&mut reader).unwrap(), gj);
    }

    #[test]
    fn test_min_coordinate_rejected() {
        let gj = GapJunction::new(1, 2, Point::new(0, i32::MIN, 0));
        let mut writer = Writer::new();
        assert_eq!(
            encode_gap_junction(&mut writer, &gj),
            Err(EncodeError::VarIntOutOfRange { value: i32::MIN })
        );
    }
}

//! Text representation reader.

use std::num::IntErrorKind;

use tracing::{debug, warn};

use crate::codec::is_supported_version;
use crate::error::ParseError;
use crate::limits::{
    FIELD_COUNT_VERSION, MAX_FIELDS_PER_SOMA, MAX_GAP_JUNCTIONS, MAX_SOMAS, MAX_SYNAPSES,
    MAX_TYPES, MIN_FORMAT_VERSION,
};
use crate::model::{Field, GapJunction, Model, Point, Soma, SomaType, Synapse};
use crate::text::lines::{leading_comment, DataLine, Lines};
use crate::text::{VERSION_DIRECTIVE, VIA_MARKER};

// =============================================================================
// TOKENS
// =============================================================================

fn parse_int<T: TryFrom<i128>>(line: usize, token: &str, context: &'static str) -> Result<T, ParseError> {
    let out_of_range = || ParseError::OutOfRange {
        line,
        context,
        token: token.to_string(),
    };
    let wide: i128 = token.parse().map_err(|e: std::num::ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => out_of_range(),
        _ => ParseError::InvalidInteger {
            line,
            context,
            token: token.to_string(),
        },
    })?;
    T::try_from(wide).map_err(|_| out_of_range())
}

/// Parses a coordinate; `i32::MIN` has no sign-magnitude encoding.
fn parse_coord(line: usize, token: &str, context: &'static str) -> Result<i32, ParseError> {
    let value: i32 = parse_int(line, token, context)?;
    if value == i32::MIN {
        return Err(ParseError::OutOfRange {
            line,
            context,
            token: token.to_string(),
        });
    }
    Ok(value)
}

fn parse_point(line: usize, tokens: &[&str], context: &'static str) -> Result<Point, ParseError> {
    Ok(Point {
        x: parse_coord(line, tokens[0], context)?,
        y: parse_coord(line, tokens[1], context)?,
        z: parse_coord(line, tokens[2], context)?,
    })
}

fn parse_count(line: usize, token: &str, max: usize, field: &'static str) -> Result<usize, ParseError> {
    let len: u64 = parse_int(line, token, field)?;
    match usize::try_from(len) {
        Ok(count) if count <= max => Ok(count),
        _ => Err(ParseError::LengthExceedsLimit { line, field, len, max }),
    }
}

fn read_count(lines: &mut Lines<'_>, max: usize, field: &'static str) -> Result<usize, ParseError> {
    let line = lines.next_line(field)?;
    parse_count(line.number, line.single(field)?, max, field)
}

// =============================================================================
// RECORDS
// =============================================================================

fn parse_type_row(line: &DataLine<'_>, index: usize) -> Result<SomaType, ParseError> {
    let tokens = line.expect_tokens(2, "type row")?;
    let id: u64 = parse_int(line.number, tokens[0], "type id")?;
    if id != index as u64 {
        return Err(ParseError::TypeIndexMismatch {
            line: line.number,
            expected: index,
            found: id,
        });
    }
    let mut chars = tokens[1].chars();
    match (chars.next().and_then(SomaType::from_char), chars.next()) {
        (Some(ty), None) => Ok(ty),
        _ => Err(ParseError::InvalidTypeLetter {
            line: line.number,
            token: tokens[1].to_string(),
        }),
    }
}

fn parse_field(line: &DataLine<'_>) -> Result<Field, ParseError> {
    let tokens = line.expect_tokens(6, "field row")?;
    let mut coords = [0i32; 6];
    for (c, token) in coords.iter_mut().zip(tokens) {
        *c = parse_coord(line.number, token, "field")?;
    }
    Ok(Field::from(coords))
}

fn parse_soma(lines: &mut Lines<'_>, type_count: usize) -> Result<Soma, ParseError> {
    let line = lines.next_line("soma row")?;
    let tokens = line.expect_tokens(7, "soma row")?;
    let n = line.number;

    let type_id: u8 = parse_int(n, tokens[0], "soma type id")?;
    if usize::from(type_id) >= type_count {
        return Err(ParseError::UnknownType {
            line: n,
            type_id,
            types: type_count,
        });
    }
    let id = parse_int(n, tokens[1], "soma id")?;
    let position = parse_point(n, &tokens[2..5], "soma position")?;
    let axonal_count = parse_count(n, tokens[5], MAX_FIELDS_PER_SOMA, "axonal_fields")?;
    let dendritic_count = parse_count(n, tokens[6], MAX_FIELDS_PER_SOMA, "dendritic_fields")?;

    let mut soma = Soma::new(type_id, id, position);
    soma.axonal.reserve(axonal_count);
    for _ in 0..axonal_count {
        soma.axonal.push(parse_field(&lines.next_line("axonal field row")?)?);
    }
    soma.dendritic.reserve(dendritic_count);
    for _ in 0..dendritic_count {
        soma.dendritic.push(parse_field(&lines.next_line("dendritic field row")?)?);
    }
    Ok(soma)
}

fn parse_synapse(line: &DataLine<'_>) -> Result<Synapse, ParseError> {
    let n = line.number;
    if line.tokens.get(1) == Some(&VIA_MARKER) {
        let tokens = line.expect_tokens(10, "via synapse row")?;
        Ok(Synapse {
            id: parse_int(n, tokens[0], "synapse id")?,
            axonal_soma: parse_int(n, tokens[2], "synapse axonal soma")?,
            dendritic_soma: parse_int(n, tokens[3], "synapse dendritic soma")?,
            via: Some(parse_point(n, &tokens[4..7], "synapse via")?),
            endpoint: parse_point(n, &tokens[7..10], "synapse endpoint")?,
        })
    } else {
        let tokens = line.expect_tokens(6, "synapse row")?;
        Ok(Synapse {
            id: parse_int(n, tokens[0], "synapse id")?,
            axonal_soma: parse_int(n, tokens[1], "synapse axonal soma")?,
            dendritic_soma: parse_int(n, tokens[2], "synapse dendritic soma")?,
            via: None,
            endpoint: parse_point(n, &tokens[3..6], "synapse endpoint")?,
        })
    }
}

fn parse_gap_junction(line: &DataLine<'_>) -> Result<GapJunction, ParseError> {
    let tokens = line.expect_tokens(5, "gap junction row")?;
    let n = line.number;
    Ok(GapJunction {
        soma1: parse_int(n, tokens[0], "gap junction soma1")?,
        soma2: parse_int(n, tokens[1], "gap junction soma2")?,
        point: parse_point(n, &tokens[2..5], "gap junction point")?,
    })
}

// =============================================================================
// MODEL
// =============================================================================

/// Parses a Model from UTF-8 bytes.
pub fn parse_text_bytes(input: &[u8]) -> Result<Model, ParseError> {
    let text = std::str::from_utf8(input).map_err(|_| ParseError::InvalidUtf8)?;
    parse_text(text)
}

/// Parses a Model from its text representation.
///
/// A missing gap junction section reads as zero gap junctions; any data
/// line after the last expected record is rejected.
pub fn parse_text(text: &str) -> Result<Model, ParseError> {
    let mut lines = Lines::new(text);

    // Version directive, then the type count
    let mut first = lines.next_line("type count")?;
    // Both `v 2` and `v2` are accepted.
    let head = first.tokens[0];
    let version = match head.strip_prefix(VERSION_DIRECTIVE) {
        Some(attached) => {
            let number = if attached.is_empty() {
                first.expect_tokens(2, "version directive")?[1]
            } else {
                first.single("version directive")?;
                attached
            };
            let version = number
                .parse::<u8>()
                .ok()
                .filter(|v| is_supported_version(*v))
                .ok_or_else(|| ParseError::UnsupportedVersion {
                    line: first.number,
                    version: number.to_string(),
                })?;
            first = lines.next_line("type count")?;
            version
        }
        None => MIN_FORMAT_VERSION,
    };

    let mut model = Model::new(version);
    model.comment = leading_comment(text);

    // Types
    let type_count = parse_count(first.number, first.single("type count")?, MAX_TYPES, "types")?;
    for index in 0..type_count {
        let line = lines.next_line("type row")?;
        model.types.push(parse_type_row(&line, index)?);
    }
    debug!(version, types = type_count, "parsed header");

    // Somas
    let soma_count = read_count(&mut lines, MAX_SOMAS, "somas")?;
    let declared_fields = if version >= FIELD_COUNT_VERSION {
        let line = lines.next_line("field count")?;
        Some(parse_int::<u64>(line.number, line.single("field count")?, "field count")?)
    } else {
        None
    };
    model.somas.reserve(soma_count.min(text.len() / 14));
    for _ in 0..soma_count {
        model.somas.push(parse_soma(&mut lines, type_count)?);
    }
    if let Some(declared) = declared_fields {
        let actual = model.field_count() as u64;
        if declared != actual {
            warn!(declared, actual, "field count line disagrees with soma rows");
        }
    }
    debug!(somas = soma_count, fields = model.field_count(), "parsed somas");

    // Synapses
    let synapse_count = read_count(&mut lines, MAX_SYNAPSES, "synapses")?;
    model.synapses.reserve(synapse_count.min(text.len() / 12));
    for _ in 0..synapse_count {
        model.synapses.push(parse_synapse(&lines.next_line("synapse row")?)?);
    }
    debug!(synapses = synapse_count, "parsed synapses");

    // Gap junctions
    let gap_junction_count = match lines.next() {
        Some(line) => parse_count(
            line.number,
            line.single("gap junction count")?,
            MAX_GAP_JUNCTIONS,
            "gap_junctions",
        )?,
        None => 0,
    };
    model.gap_junctions.reserve(gap_junction_count.min(text.len() / 10));
    for _ in 0..gap_junction_count {
        model
            .gap_junctions
            .push(parse_gap_junction(&lines.next_line("gap junction row")?)?);
    }
    debug!(gap_junctions = gap_junction_count, "parsed gap junctions");

    if let Some(extra) = lines.next() {
        return Err(ParseError::TrailingData { line: extra.number });
    }

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# Example network
# two neurons
2
0 N
1 P
2
0 1 10 -20 30 2 1
\t0 10 -5 5 -5 5
\t10 20 -5 5 -5 5
\t-10 0 -5 5 -5 5
1 2 100 0 -100 0 0
2
7 1 2 5 5 5
8 v 2 1 1 1 1 -4 -4 -4
1
1 2 0 0 0
";

    #[test]
    fn test_parse_sample() {
        let model = parse_text(SAMPLE).unwrap();
        assert_eq!(model.version, 1);
        assert_eq!(model.comment, "Example network\ntwo neurons");
        assert_eq!(model.types.len(), 2);
        assert_eq!(model.types.get(1).map(|t| t.as_char()), Some('P'));

        let soma = &model.somas[0];
        assert_eq!(soma.id, 1);
        assert_eq!(soma.position, Point::new(10, -20, 30));
        assert_eq!(soma.axonal.len(), 2);
        assert_eq!(soma.dendritic.len(), 1);
        assert_eq!(soma.dendritic[0], Field::new(-10, 0, -5, 5, -5, 5));

        assert!(!model.synapses[0].has_via());
        assert_eq!(model.synapses[1].via, Some(Point::new(1, 1, 1)));
        assert_eq!(model.synapses[1].endpoint, Point::new(-4, -4, -4));
        assert_eq!(model.synapses[1].axonal_soma, 2);
        assert_eq!(model.gap_junctions.len(), 1);
    }

    #[test]
    fn test_missing_gap_junction_section_is_zero() {
        let model = parse_text("0\n0\n0\n").unwrap();
        assert!(model.is_empty());
        assert!(model.gap_junctions.is_empty());
    }

    #[test]
    fn test_version_directive() {
        let model = parse_text("v 2\n1\n0 N\n1\n2\n0 5 0 0 0 1 1\n1 1 1 1 1 1\n2 2 2 2 2 2\n0\n0\n").unwrap();
        assert_eq!(model.version, 2);
        assert_eq!(model.field_count(), 2);
    }

    #[test]
    fn test_attached_version_directive() {
        let model = parse_text("v2\n0\n0\n0\n0\n").unwrap();
        assert_eq!(model.version, 2);

        let err = parse_text("v9\n0\n0\n0\n0\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedVersion {
                line: 1,
                version: "9".to_string()
            }
        );
        assert!(matches!(
            parse_text("v2 1\n0\n0\n0\n0\n"),
            Err(ParseError::TokenCount { line: 1, .. })
        ));
    }

    #[test]
    fn test_field_count_line_is_not_trusted() {
        let model = parse_text("v 2\n1\n0 N\n1\n40\n0 5 0 0 0 0 1\n1 1 1 1 1 1\n0\n").unwrap();
        assert_eq!(model.field_count(), 1);
    }

    #[test]
    fn test_unsupported_version_directive() {
        let err = parse_text("v 7\n0\n0\n0\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnsupportedVersion {
                line: 1,
                version: "7".to_string()
            }
        );
        assert_eq!(err.code().code(), "E001");
    }

    #[test]
    fn test_truncated_field_rows() {
        let text = "1\n0 N\n1\n0 1 0 0 0 2 1\n1 1 1 1 1 1\n1 1 1 1 1 1\n";
        // Two axonal rows present, the dendritic row is missing; the
        // synapse count is never reached.
        assert_eq!(
            parse_text(text),
            Err(ParseError::UnexpectedEnd { context: "dendritic field row" })
        );
    }

    #[test]
    fn test_field_row_consumed_as_soma_is_token_error() {
        // Declares one axonal field but supplies none before the next soma.
        let text = "1\n0 N\n2\n0 1 0 0 0 1 0\n0 2 0 0 0 0 0\n0\n";
        assert!(matches!(
            parse_text(text),
            Err(ParseError::TokenCount { line: 5, expected: 6, found: 7, .. })
        ));
    }

    #[test]
    fn test_unknown_type() {
        let err = parse_text("1\n0 N\n1\n1 9 0 0 0 0 0\n0\n").unwrap_err();
        assert_eq!(err, ParseError::UnknownType { line: 4, type_id: 1, types: 1 });
        assert_eq!(err.code().code(), "E003");
    }

    #[test]
    fn test_type_row_errors() {
        assert!(matches!(
            parse_text("1\n1 N\n0\n0\n"),
            Err(ParseError::TypeIndexMismatch { expected: 0, found: 1, .. })
        ));
        assert!(matches!(
            parse_text("1\n0 NP\n0\n0\n"),
            Err(ParseError::InvalidTypeLetter { line: 2, .. })
        ));
        assert!(matches!(
            parse_text("1\n0 3\n0\n0\n"),
            Err(ParseError::InvalidTypeLetter { .. })
        ));
    }

    #[test]
    fn test_via_marker_must_be_second_token() {
        // A `v` elsewhere is just a bad integer.
        let text = "0\n0\n1\n1 2 v 0 0 0\n";
        assert!(matches!(
            parse_text(text),
            Err(ParseError::InvalidInteger { line: 4, .. })
        ));
        // Via row with a missing coordinate.
        let text = "0\n0\n1\n1 v 2 3 0 0 0 0 0\n";
        assert!(matches!(
            parse_text(text),
            Err(ParseError::TokenCount { expected: 10, found: 9, .. })
        ));
    }

    #[test]
    fn test_out_of_range_values() {
        let err = parse_text("0\n0\n1\n1 2 3 0 0 2147483648\n").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { line: 4, .. }));
        assert_eq!(err.code().code(), "E004");

        let err = parse_text("0\n0\n1\n-1 2 3 0 0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { .. }));

        let err = parse_text("0\n0\n0\n1\n1 2 0 -2147483648 0\n").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { line: 5, .. }));

        let err = parse_text("0\n0\n1\n99999999999999999999999999999999999999999 2 3 0 0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { .. }));
    }

    #[test]
    fn test_trailing_data() {
        assert_eq!(
            parse_text("0\n0\n0\n0\n5\n"),
            Err(ParseError::TrailingData { line: 5 })
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            parse_text("# nothing here\n"),
            Err(ParseError::UnexpectedEnd { context: "type count" })
        );
    }

    #[test]
    fn test_invalid_utf8() {
        assert_eq!(parse_text_bytes(&[b'0', b'\n', 0xFF]), Err(ParseError::InvalidUtf8));
    }
}

//! Text representation writer.

use std::fmt;

use crate::limits::FIELD_COUNT_VERSION;
use crate::model::Model;
use crate::text::{
    TextOptions, FIELDS_LEGEND, FIELD_TOTAL_LEGEND, GAP_JUNCTIONS_BANNER, GAP_JUNCTIONS_LEGEND,
    SOMAS_BANNER, SOMAS_LEGEND, SYNAPSES_BANNER, SYNAPSES_LEGEND, SYNAPSES_LEGEND_OR,
    SYNAPSES_VIA_LEGEND, TYPES_BANNER, TYPES_LEGEND, VERSION_DIRECTIVE, VIA_MARKER,
};

/// Displays a Model in its text representation.
///
/// ```rust
/// use vbm::model::Model;
/// use vbm::text::{TextModel, TextOptions};
///
/// let model = Model::new(1);
/// let text = TextModel::new(&model, &TextOptions::compact()).to_string();
/// assert_eq!(text, "0\n0\n0\n0\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TextModel<'a> {
    model: &'a Model,
    options: &'a TextOptions,
}

impl<'a> TextModel<'a> {
    pub fn new(model: &'a Model, options: &'a TextOptions) -> Self {
        Self { model, options }
    }

    fn banner(&self, f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
        if self.options.banners {
            writeln!(f, "# {text}")?;
        }
        Ok(())
    }
}

struct Coords<'a>(&'a [i32]);

impl fmt::Display for Coords<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl fmt::Display for TextModel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model;

        let comment = model.comment.replace("\r\n", "\n").replace('\r', "\n");
        for line in comment.split('\n').filter(|l| !l.is_empty()) {
            writeln!(f, "# {line}")?;
        }
        if model.version >= FIELD_COUNT_VERSION {
            writeln!(f, "{VERSION_DIRECTIVE} {}", model.version)?;
        }

        // Types
        self.banner(f, TYPES_BANNER)?;
        writeln!(f, "{}", model.types.len())?;
        self.banner(f, TYPES_LEGEND)?;
        for (id, ty) in model.types.iter().enumerate() {
            writeln!(f, "{id} {ty}")?;
        }

        // Somas
        self.banner(f, SOMAS_BANNER)?;
        writeln!(f, "{}", model.somas.len())?;
        if model.version >= FIELD_COUNT_VERSION {
            self.banner(f, FIELD_TOTAL_LEGEND)?;
            writeln!(f, "{}", model.field_count())?;
        }
        self.banner(f, SOMAS_LEGEND)?;
        self.banner(f, FIELDS_LEGEND)?;
        let indent = &self.options.field_indent;
        for soma in &model.somas {
            writeln!(
                f,
                "{} {} {} {} {}",
                soma.type_id,
                soma.id,
                Coords(&soma.position.coords()),
                soma.axonal.len(),
                soma.dendritic.len()
            )?;
            for fl in soma.fields() {
                writeln!(f, "{indent}{}", Coords(&fl.coords()))?;
            }
        }

        // Synapses
        self.banner(f, SYNAPSES_BANNER)?;
        writeln!(f, "{}", model.synapses.len())?;
        self.banner(f, SYNAPSES_LEGEND)?;
        self.banner(f, SYNAPSES_LEGEND_OR)?;
        self.banner(f, SYNAPSES_VIA_LEGEND)?;
        for synapse in &model.synapses {
            match &synapse.via {
                Some(via) => writeln!(
                    f,
                    "{} {VIA_MARKER} {} {} {} {}",
                    synapse.id,
                    synapse.axonal_soma,
                    synapse.dendritic_soma,
                    Coords(&via.coords()),
                    Coords(&synapse.endpoint.coords())
                )?,
                None => writeln!(
                    f,
                    "{} {} {} {}",
                    synapse.id,
                    synapse.axonal_soma,
                    synapse.dendritic_soma,
                    Coords(&synapse.endpoint.coords())
                )?,
            }
        }

        // Gap junctions
        self.banner(f, GAP_JUNCTIONS_BANNER)?;
        writeln!(f, "{}", model.gap_junctions.len())?;
        self.banner(f, GAP_JUNCTIONS_LEGEND)?;
        for gap_junction in &model.gap_junctions {
            writeln!(
                f,
                "{} {} {}",
                gap_junction.soma1,
                gap_junction.soma2,
                Coords(&gap_junction.point.coords())
            )?;
        }

        Ok(())
    }
}

/// Writes a Model in its text representation.
pub fn write_text(model: &Model, options: &TextOptions) -> String {
    TextModel::new(model, options).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ModelBuilder, SomaType};
    use crate::text::parse_text;

    fn small_model(version: u8) -> Model {
        ModelBuilder::new()
            .version(version)
            .comment("Example\r\nwith two lines")
            .soma_types([b'N', b'P'].into_iter().filter_map(SomaType::new))
            .soma(1, 3, [1, -2, 3], |s| s.axonal([0, 1, 2, 3, 4, 5]).dendritic([-5, -4, -3, -2, -1, 0]))
            .synapse(10, 3, 3, [7, 8, 9])
            .synapse_via(11, 3, 3, [1, 1, 1], [-7, -8, -9])
            .gap_junction(3, 3, [0, 0, 0])
            .build()
    }

    #[test]
    fn test_write_with_banners() {
        let text = write_text(&small_model(1), &TextOptions::default());
        let expected = "\
# Example
# with two lines
# Types Start (first line is the total count to follow)
2
# <id> <letter>
0 N
1 P
# Somas Start (first line is the total count to follow)
1
# <type id> <id> <x> <y> <z> <number of axonal fields> <number of dendritic fields>
#     <x1> <x2> <y1> <y2> <z1> <z2>
1 3 1 -2 3 1 1
\t0 1 2 3 4 5
\t-5 -4 -3 -2 -1 0
# Synapses Start (first line is the total count to follow)
2
# <id> <axonal id> <dendritic id> <x> <y> <z>
# or
# <id> 'v' <axonal id> <dendritic id> <vx> <vy> <vz> <x> <y> <z>
10 3 3 7 8 9
11 v 3 3 1 1 1 -7 -8 -9
# Gap Junctions Start (first line is the total count to follow)
1
# <soma1 id> <soma2 id> <x> <y> <z>
3 3 0 0 0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_write_compact_v2() {
        let text = write_text(&small_model(2), &TextOptions::compact());
        let expected = "\
# Example
# with two lines
v 2
2
0 N
1 P
1
2
1 3 1 -2 3 1 1
0 1 2 3 4 5
-5 -4 -3 -2 -1 0
2
10 3 3 7 8 9
11 v 3 3 1 1 1 -7 -8 -9
1
3 3 0 0 0
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_written_text_parses_back() {
        for version in [1, 2] {
            for options in [TextOptions::default(), TextOptions::compact()] {
                let model = small_model(version);
                let parsed = parse_text(&write_text(&model, &options)).unwrap();
                assert_eq!(parsed.comment, "Example\nwith two lines");
                assert_eq!(parsed.version, version);
                assert_eq!(parsed.types, model.types);
                assert_eq!(parsed.somas, model.somas);
                assert_eq!(parsed.synapses, model.synapses);
                assert_eq!(parsed.gap_junctions, model.gap_junctions);
            }
        }
    }

    #[test]
    fn test_empty_comment_writes_no_comment_lines() {
        let text = write_text(&Model::new(1), &TextOptions::default());
        assert!(text.starts_with("# Types Start"));
        assert_eq!(parse_text(&text).unwrap(), Model::new(1));
    }
}

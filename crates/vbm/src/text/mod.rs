//! Text representation of brain model files.
//!
//! The text form mirrors the binary layout section by section, one record
//! per line with space-separated decimal integers:
//!
//! ```text
//! # optional comment lines
//! v 2                                      (only for version 2 and later)
//! <type count>
//! <id> <letter>                            x type count
//! <soma count>
//! <total field count>                      (only for version 2 and later)
//! <type id> <id> <x> <y> <z> <A> <D>       x soma count
//!     <x1> <x2> <y1> <y2> <z1> <z2>        x (A + D) after each soma
//! <synapse count>
//! <id> <axonal id> <dendritic id> <x> <y> <z>
//! <id> v <axonal id> <dendritic id> <vx> <vy> <vz> <x> <y> <z>
//! <gap junction count>                     (may be omitted when zero)
//! <soma1 id> <soma2 id> <x> <y> <z>
//! ```
//!
//! Everything after a `#` is ignored, as are blank lines and indentation.

pub mod lines;
pub mod reader;
pub mod writer;

pub use lines::{leading_comment, DataLine, Lines};
pub use reader::{parse_text, parse_text_bytes};
pub use writer::{write_text, TextModel};

/// Token that marks a synapse row as carrying a via-point.
pub const VIA_MARKER: &str = "v";

/// Token that starts the optional version directive line.
pub const VERSION_DIRECTIVE: &str = "v";

pub(crate) const TYPES_BANNER: &str = "Types Start (first line is the total count to follow)";
pub(crate) const TYPES_LEGEND: &str = "<id> <letter>";
pub(crate) const SOMAS_BANNER: &str = "Somas Start (first line is the total count to follow)";
pub(crate) const FIELD_TOTAL_LEGEND: &str = "<total number of axonal and dendritic fields>";
pub(crate) const SOMAS_LEGEND: &str =
    "<type id> <id> <x> <y> <z> <number of axonal fields> <number of dendritic fields>";
pub(crate) const FIELDS_LEGEND: &str = "    <x1> <x2> <y1> <y2> <z1> <z2>";
pub(crate) const SYNAPSES_BANNER: &str = "Synapses Start (first line is the total count to follow)";
pub(crate) const SYNAPSES_LEGEND: &str = "<id> <axonal id> <dendritic id> <x> <y> <z>";
pub(crate) const SYNAPSES_LEGEND_OR: &str = "or";
pub(crate) const SYNAPSES_VIA_LEGEND: &str =
    "<id> 'v' <axonal id> <dendritic id> <vx> <vy> <vz> <x> <y> <z>";
pub(crate) const GAP_JUNCTIONS_BANNER: &str =
    "Gap Junctions Start (first line is the total count to follow)";
pub(crate) const GAP_JUNCTIONS_LEGEND: &str = "<soma1 id> <soma2 id> <x> <y> <z>";

/// Comment lines the writer produces itself; never part of a model comment.
pub(crate) const GENERATED_COMMENTS: &[&str] = &[
    TYPES_BANNER,
    TYPES_LEGEND,
    SOMAS_BANNER,
    FIELD_TOTAL_LEGEND,
    SOMAS_LEGEND,
    FIELDS_LEGEND,
    SYNAPSES_BANNER,
    SYNAPSES_LEGEND,
    SYNAPSES_VIA_LEGEND,
    GAP_JUNCTIONS_BANNER,
    GAP_JUNCTIONS_LEGEND,
];

/// Options for writing the text representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    /// Emit the section banner and legend comment lines.
    pub banners: bool,
    /// Prefix for field rows under their soma.
    pub field_indent: String,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            banners: true,
            field_indent: "\t".to_string(),
        }
    }
}

impl TextOptions {
    /// Creates the default options: banners on, tab-indented fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for data lines only, with no banners or indentation.
    pub fn compact() -> Self {
        Self {
            banners: false,
            field_indent: String::new(),
        }
    }
}

//! The top-level model aggregate.

use crate::limits::MIN_FORMAT_VERSION;
use crate::model::{GapJunction, Soma, Synapse, TypeTable};

/// A complete simulated network as stored in one model file.
///
/// Built once per conversion by appending records in file order, then
/// iterated to write the opposite representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Binary format version (1 or 2).
    pub version: u8,
    /// Free-text comment; lines separated by `\n`.
    pub comment: String,
    pub types: TypeTable,
    pub somas: Vec<Soma>,
    pub synapses: Vec<Synapse>,
    pub gap_junctions: Vec<GapJunction>,
}

impl Model {
    /// Creates an empty model with the given format version.
    pub fn new(version: u8) -> Self {
        Self {
            version,
            comment: String::new(),
            types: TypeTable::new(),
            somas: Vec::new(),
            synapses: Vec::new(),
            gap_junctions: Vec::new(),
        }
    }

    /// Total number of axonal and dendritic fields over all somas.
    pub fn field_count(&self) -> usize {
        self.somas.iter().map(Soma::field_count).sum()
    }

    /// Returns true if the model has no records at all.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.somas.is_empty()
            && self.synapses.is_empty()
            && self.gap_junctions.is_empty()
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(MIN_FORMAT_VERSION)
    }
}

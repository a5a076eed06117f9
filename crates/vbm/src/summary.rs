//! Model statistics and per-type synapse histograms.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::ValidationError;
use crate::model::{Model, SomaType};

/// Record counts for a Model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSummary {
    pub version: u8,
    pub types: usize,
    pub somas: usize,
    /// Soma count per type, in type table order.
    pub somas_per_type: Vec<(SomaType, usize)>,
    pub axonal_fields: usize,
    pub dendritic_fields: usize,
    pub synapses: usize,
    pub via_synapses: usize,
    pub gap_junctions: usize,
}

impl ModelSummary {
    /// Counts the records of a Model.
    pub fn of(model: &Model) -> Self {
        let mut per_type = vec![0usize; model.types.len()];
        let mut axonal_fields = 0;
        let mut dendritic_fields = 0;
        for soma in &model.somas {
            if let Some(count) = per_type.get_mut(usize::from(soma.type_id)) {
                *count += 1;
            }
            axonal_fields += soma.axonal.len();
            dendritic_fields += soma.dendritic.len();
        }

        Self {
            version: model.version,
            types: model.types.len(),
            somas: model.somas.len(),
            somas_per_type: model.types.iter().zip(per_type).collect(),
            axonal_fields,
            dendritic_fields,
            synapses: model.synapses.len(),
            via_synapses: model.synapses.iter().filter(|s| s.has_via()).count(),
            gap_junctions: model.gap_junctions.len(),
        }
    }

    /// Total axonal and dendritic fields.
    pub fn fields(&self) -> usize {
        self.axonal_fields + self.dendritic_fields
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "version:        {}", self.version)?;
        writeln!(f, "types:          {}", self.types)?;
        writeln!(f, "somas:          {}", self.somas)?;
        for (ty, count) in &self.somas_per_type {
            writeln!(f, "  {ty}:            {count}")?;
        }
        writeln!(
            f,
            "fields:         {} ({} axonal, {} dendritic)",
            self.fields(),
            self.axonal_fields,
            self.dendritic_fields
        )?;
        writeln!(f, "synapses:       {} ({} via)", self.synapses, self.via_synapses)?;
        writeln!(f, "gap junctions:  {}", self.gap_junctions)
    }
}

/// Which end of a synapse a soma sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Axonal,
    Dendritic,
}

/// Synapse counts for every soma of one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideCounts {
    pub soma_type: SomaType,
    /// `(soma id, synapse count)` in Model order.
    pub counts: Vec<(u64, usize)>,
}

impl SideCounts {
    fn new(soma_type: SomaType) -> Self {
        Self {
            soma_type,
            counts: Vec::new(),
        }
    }

    /// Number of somas on this side.
    pub fn somas(&self) -> usize {
        self.counts.len()
    }

    /// Number of somas per synapse count; index `n` holds how many somas
    /// have exactly `n` synapses.
    pub fn histogram(&self) -> Vec<usize> {
        let max = self.counts.iter().map(|&(_, n)| n).max().unwrap_or(0);
        let mut histogram = vec![0; max + 1];
        for &(_, n) in &self.counts {
            histogram[n] += 1;
        }
        histogram
    }

    /// Mean synapse count, or 0 with no somas.
    pub fn average(&self) -> f64 {
        if self.counts.is_empty() {
            return 0.0;
        }
        let total: usize = self.counts.iter().map(|&(_, n)| n).sum();
        total as f64 / self.counts.len() as f64
    }
}

/// Counts of synapses from somas of one type onto somas of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynapseHistogram {
    pub axonal: SideCounts,
    pub dendritic: SideCounts,
    /// Synapses joining an axonal-type soma to a dendritic-type soma.
    pub synapses: usize,
}

impl SynapseHistogram {
    pub fn side(&self, side: Side) -> &SideCounts {
        match side {
            Side::Axonal => &self.axonal,
            Side::Dendritic => &self.dendritic,
        }
    }

    /// Lists somas on one side whose synapse count is in `[min, max]`.
    ///
    /// At most `limit` entries are returned; a limit of 0 means no limit.
    pub fn somas_between(&self, side: Side, min: usize, max: usize, limit: usize) -> Vec<(u64, usize)> {
        let matching = self
            .side(side)
            .counts
            .iter()
            .copied()
            .filter(|&(_, n)| (min..=max).contains(&n));
        if limit == 0 {
            matching.collect()
        } else {
            matching.take(limit).collect()
        }
    }
}

fn resolve(model: &Model, letter: char) -> Result<(u8, SomaType), ValidationError> {
    model
        .types
        .id_of(letter)
        .and_then(|id| model.types.get(id).map(|ty| (id, ty)))
        .ok_or(ValidationError::UnknownTypeLetter { letter })
}

/// Counts the synapses from somas of type `axonal` onto somas of type
/// `dendritic`.
///
/// Letters match the type table ignoring ASCII case. When both letters
/// name the same type, each soma of that type appears on both sides.
/// A repeated soma id is counted once, at its first position.
pub fn synapse_histogram(
    model: &Model,
    axonal: char,
    dendritic: char,
) -> Result<SynapseHistogram, ValidationError> {
    let (axonal_id, axonal_type) = resolve(model, axonal)?;
    let (dendritic_id, dendritic_type) = resolve(model, dendritic)?;

    let mut axonal_side = SideCounts::new(axonal_type);
    let mut dendritic_side = SideCounts::new(dendritic_type);
    let mut axonal_index: FxHashMap<u64, usize> = FxHashMap::default();
    let mut dendritic_index: FxHashMap<u64, usize> = FxHashMap::default();

    for soma in &model.somas {
        if soma.type_id == axonal_id && !axonal_index.contains_key(&soma.id) {
            axonal_index.insert(soma.id, axonal_side.counts.len());
            axonal_side.counts.push((soma.id, 0));
        }
        if soma.type_id == dendritic_id && !dendritic_index.contains_key(&soma.id) {
            dendritic_index.insert(soma.id, dendritic_side.counts.len());
            dendritic_side.counts.push((soma.id, 0));
        }
    }

    let mut synapses = 0;
    for synapse in &model.synapses {
        let (Some(&a), Some(&d)) = (
            axonal_index.get(&synapse.axonal_soma),
            dendritic_index.get(&synapse.dendritic_soma),
        ) else {
            continue;
        };
        axonal_side.counts[a].1 += 1;
        dendritic_side.counts[d].1 += 1;
        synapses += 1;
    }

    Ok(SynapseHistogram {
        axonal: axonal_side,
        dendritic: dendritic_side,
        synapses,
    })
}

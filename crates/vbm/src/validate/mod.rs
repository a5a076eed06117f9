//! Semantic validation for decoded models.
//!
//! The codecs only check structure: counts, tiers, flags and type indices.
//! This module checks what a well-formed model means: every referenced
//! soma exists, soma ids are unique, and every coordinate is in the
//! VarInt contract.
//!
//! Nothing in the codec calls this; the transcoder runs it on request.

use rustc_hash::FxHashSet;

use crate::error::ValidationError;
use crate::model::{Model, Point};

/// Runs every check on a Model, stopping at the first failure.
///
/// Checks run in this order: type references, coordinate contract,
/// duplicate soma ids, synapse soma references, gap junction soma
/// references.
pub fn validate_model(model: &Model) -> Result<(), ValidationError> {
    validate_types(model)?;
    validate_coordinates(model)?;
    let ids = validate_soma_ids(model)?;
    validate_references(model, &ids)
}

fn validate_types(model: &Model) -> Result<(), ValidationError> {
    for soma in &model.somas {
        if !model.types.contains_id(soma.type_id) {
            return Err(ValidationError::UnknownType {
                soma: soma.id,
                type_id: soma.type_id,
                types: model.types.len(),
            });
        }
    }
    Ok(())
}

fn in_contract(coords: &[i32]) -> bool {
    !coords.contains(&i32::MIN)
}

fn point_ok(point: &Point) -> bool {
    in_contract(&point.coords())
}

fn validate_coordinates(model: &Model) -> Result<(), ValidationError> {
    for soma in &model.somas {
        if !point_ok(&soma.position) || !soma.fields().all(|f| in_contract(&f.coords())) {
            return Err(ValidationError::CoordinateOutOfRange {
                context: "soma",
                id: soma.id,
            });
        }
    }
    for synapse in &model.synapses {
        if !point_ok(&synapse.endpoint) || !synapse.via.as_ref().is_none_or(point_ok) {
            return Err(ValidationError::CoordinateOutOfRange {
                context: "synapse",
                id: synapse.id,
            });
        }
    }
    for (index, gap_junction) in model.gap_junctions.iter().enumerate() {
        if !point_ok(&gap_junction.point) {
            return Err(ValidationError::CoordinateOutOfRange {
                context: "gap junction",
                id: index as u64,
            });
        }
    }
    Ok(())
}

fn validate_soma_ids(model: &Model) -> Result<FxHashSet<u64>, ValidationError> {
    let mut ids = FxHashSet::default();
    ids.reserve(model.somas.len());
    for soma in &model.somas {
        if !ids.insert(soma.id) {
            return Err(ValidationError::DuplicateSomaId { id: soma.id });
        }
    }
    Ok(ids)
}

fn validate_references(model: &Model, ids: &FxHashSet<u64>) -> Result<(), ValidationError> {
    for synapse in &model.synapses {
        for soma in [synapse.axonal_soma, synapse.dendritic_soma] {
            if !ids.contains(&soma) {
                return Err(ValidationError::DanglingSynapseSoma {
                    synapse: synapse.id,
                    soma,
                });
            }
        }
    }
    for (index, gap_junction) in model.gap_junctions.iter().enumerate() {
        for soma in [gap_junction.soma1, gap_junction.soma2] {
            if !ids.contains(&soma) {
                return Err(ValidationError::DanglingGapJunctionSoma { index, soma });
            }
        }
    }
    Ok(())
}

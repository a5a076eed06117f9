//! Synapses and gap junctions.

use crate::model::Point;

/// A directed connection from one soma's axon to another soma's dendrite.
///
/// Soma ids are not checked against the model by the codec; see
/// [`crate::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synapse {
    pub id: u64,
    pub axonal_soma: u64,
    pub dendritic_soma: u64,
    /// Intermediate routing point, if the synapse has one.
    pub via: Option<Point>,
    pub endpoint: Point,
}

impl Synapse {
    /// Creates a synapse without a via-point.
    pub fn new(id: u64, axonal_soma: u64, dendritic_soma: u64, endpoint: Point) -> Self {
        Self {
            id,
            axonal_soma,
            dendritic_soma,
            via: None,
            endpoint,
        }
    }

    /// Creates a synapse routed through `via`.
    pub fn with_via(
        id: u64,
        axonal_soma: u64,
        dendritic_soma: u64,
        via: Point,
        endpoint: Point,
    ) -> Self {
        Self {
            id,
            axonal_soma,
            dendritic_soma,
            via: Some(via),
            endpoint,
        }
    }

    pub fn has_via(&self) -> bool {
        self.via.is_some()
    }
}

/// An undirected electrical connection between two somas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapJunction {
    pub soma1: u64,
    pub soma2: u64,
    pub point: Point,
}

impl GapJunction {
    pub fn new(soma1: u64, soma2: u64, point: Point) -> Self {
        Self { soma1, soma2, point }
    }
}

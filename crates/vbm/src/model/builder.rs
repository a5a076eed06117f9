//! Builder API for ergonomic Model construction.
//!
//! # Example
//!
//! ```rust
//! use vbm::model::{ModelBuilder, SomaType};
//!
//! let n = SomaType::new(b'N').unwrap();
//! let model = ModelBuilder::new()
//!     .comment("two neurons")
//!     .soma_type(n)
//!     .soma(0, 1, [0, 0, 0], |s| s
//!         .axonal([0, 10, 0, 10, 0, 10])
//!     )
//!     .soma(0, 2, [20, 0, 0], |s| s
//!         .dendritic([15, 25, -5, 5, -5, 5])
//!     )
//!     .synapse(1, 1, 2, [18, 0, 0])
//!     .build();
//!
//! assert_eq!(model.field_count(), 2);
//! ```

use crate::model::{Field, GapJunction, Model, Point, Soma, SomaType, Synapse};

/// Builder for constructing a Model.
#[derive(Debug, Clone, Default)]
pub struct ModelBuilder {
    model: Model,
}

impl ModelBuilder {
    /// Creates a builder for an empty version 1 model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the format version.
    pub fn version(mut self, version: u8) -> Self {
        self.model.version = version;
        self
    }

    /// Sets the comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.model.comment = comment.into();
        self
    }

    /// Appends a soma type; its id is the number of types before it.
    pub fn soma_type(mut self, ty: SomaType) -> Self {
        self.model.types.push(ty);
        self
    }

    /// Appends several soma types in order.
    pub fn soma_types(mut self, types: impl IntoIterator<Item = SomaType>) -> Self {
        for ty in types {
            self.model.types.push(ty);
        }
        self
    }

    /// Appends a soma whose fields are added by a builder function.
    pub fn soma<F>(mut self, type_id: u8, id: u64, position: impl Into<Point>, f: F) -> Self
    where
        F: FnOnce(SomaBuilder) -> SomaBuilder,
    {
        let fields = f(SomaBuilder::default());
        self.model.somas.push(Soma {
            type_id,
            id,
            position: position.into(),
            axonal: fields.axonal,
            dendritic: fields.dendritic,
        });
        self
    }

    /// Appends a soma with no fields.
    pub fn bare_soma(mut self, type_id: u8, id: u64, position: impl Into<Point>) -> Self {
        self.model.somas.push(Soma::new(type_id, id, position.into()));
        self
    }

    /// Appends a synapse without a via-point.
    pub fn synapse(
        mut self,
        id: u64,
        axonal_soma: u64,
        dendritic_soma: u64,
        endpoint: impl Into<Point>,
    ) -> Self {
        self.model
            .synapses
            .push(Synapse::new(id, axonal_soma, dendritic_soma, endpoint.into()));
        self
    }

    /// Appends a synapse routed through a via-point.
    pub fn synapse_via(
        mut self,
        id: u64,
        axonal_soma: u64,
        dendritic_soma: u64,
        via: impl Into<Point>,
        endpoint: impl Into<Point>,
    ) -> Self {
        self.model.synapses.push(Synapse::with_via(
            id,
            axonal_soma,
            dendritic_soma,
            via.into(),
            endpoint.into(),
        ));
        self
    }

    /// Appends a gap junction.
    pub fn gap_junction(mut self, soma1: u64, soma2: u64, point: impl Into<Point>) -> Self {
        self.model
            .gap_junctions
            .push(GapJunction::new(soma1, soma2, point.into()));
        self
    }

    /// Returns the model.
    pub fn build(self) -> Model {
        self.model
    }
}

/// Collects the fields of one soma.
#[derive(Debug, Clone, Default)]
pub struct SomaBuilder {
    axonal: Vec<Field>,
    dendritic: Vec<Field>,
}

impl SomaBuilder {
    /// Adds an axonal field.
    pub fn axonal(mut self, field: impl Into<Field>) -> Self {
        self.axonal.push(field.into());
        self
    }

    /// Adds a dendritic field.
    pub fn dendritic(mut self, field: impl Into<Field>) -> Self {
        self.dendritic.push(field.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_preserves_order() {
        let model = ModelBuilder::new()
            .version(2)
            .soma_types([b'N', b'P'].into_iter().filter_map(SomaType::new))
            .soma(1, 7, [1, 2, 3], |s| {
                s.axonal([1, 2, 3, 4, 5, 6])
                    .dendritic([-1, -2, -3, -4, -5, -6])
                    .axonal([0; 6])
            })
            .bare_soma(0, 8, [0, 0, 0])
            .synapse_via(3, 7, 8, [1, 1, 1], [2, 2, 2])
            .gap_junction(7, 8, [0, 5, 0])
            .build();

        assert_eq!(model.version, 2);
        assert_eq!(model.types.len(), 2);
        let soma = &model.somas[0];
        assert_eq!(soma.axonal.len(), 2);
        assert_eq!(soma.dendritic.len(), 1);
        assert_eq!(soma.axonal[0], Field::new(1, 2, 3, 4, 5, 6));
        assert_eq!(model.somas[1].field_count(), 0);
        assert!(model.synapses[0].has_via());
        assert_eq!(model.gap_junctions[0].point, Point::new(0, 5, 0));
    }
}

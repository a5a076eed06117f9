//! Data model types for brain model files.
//!
//! - Soma types and the type table
//! - Somas with axonal and dendritic fields
//! - Synapses and gap junctions
//! - The [`Model`] aggregate and its builder

pub mod brain;
pub mod builder;
pub mod soma;
pub mod synapse;
pub mod types;

pub use brain::Model;
pub use builder::{ModelBuilder, SomaBuilder};
pub use soma::{Field, Point, Soma};
pub use synapse::{GapJunction, Synapse};
pub use types::{SomaType, TypeTable};

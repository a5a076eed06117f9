//! CLI command implementations.

pub mod check;
pub mod convert;
pub mod summary;
pub mod synapses;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use vbm::{Model, Representation};

/// Reads a model file and decodes it in whichever representation it is.
pub fn load(input: &Path) -> Result<(Vec<u8>, Representation, Model)> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let from = Representation::detect(&bytes);
    let model = vbm::decode(&bytes, from)
        .with_context(|| format!("decoding {} as {from}", input.display()))?;
    Ok((bytes, from, model))
}

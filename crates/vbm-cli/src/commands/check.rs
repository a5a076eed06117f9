//! `vbm check`: decode a model and run semantic validation.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use vbm::ModelSummary;

/// Decodes and validates `input`; returns its summary on success.
pub fn run(input: &Path, out: &mut dyn Write) -> Result<ModelSummary> {
    let (bytes, from, model) = super::load(input)?;
    vbm::validate_model(&model).with_context(|| format!("validating {}", input.display()))?;

    let summary = ModelSummary::of(&model);
    writeln!(
        out,
        "{}: ok ({from} v{}, {} bytes): {} types, {} somas, {} fields, {} synapses, {} gap junctions",
        input.display(),
        summary.version,
        bytes.len(),
        summary.types,
        summary.somas,
        summary.fields(),
        summary.synapses,
        summary.gap_junctions
    )?;
    Ok(summary)
}

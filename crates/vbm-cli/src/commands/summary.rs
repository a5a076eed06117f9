//! `vbm summary`: print record counts.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use vbm::ModelSummary;

pub fn run(input: &Path, out: &mut dyn Write) -> Result<()> {
    let (_, from, model) = super::load(input)?;
    writeln!(out, "Model file: {} ({from})", input.display())?;
    if !model.comment.is_empty() {
        for line in model.comment.lines() {
            writeln!(out, "# {line}")?;
        }
    }
    write!(out, "{}", ModelSummary::of(&model))?;
    Ok(())
}

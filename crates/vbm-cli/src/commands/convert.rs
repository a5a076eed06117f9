//! `vbm convert`: binary to text or text to binary.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use vbm::{ConvertOptions, Representation};

/// Output path next to the input: `converted_binary_<stem>.vbm` or
/// `converted_text_<stem>.txt`.
pub fn default_output_path(input: &Path, to: Representation) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match to {
        Representation::Binary => format!("converted_binary_{stem}.vbm"),
        Representation::Text => format!("converted_text_{stem}.txt"),
    };
    input.with_file_name(name)
}

/// Converts `input` and writes the result; returns the output path.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    options: &ConvertOptions,
    out: &mut dyn Write,
) -> Result<PathBuf> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let from = Representation::detect(&bytes);
    let to = from.opposite();

    let converted = vbm::convert(&bytes, from, options)
        .with_context(|| format!("converting {} from {from}", input.display()))?;

    let output = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_output_path(input, to));
    fs::write(&output, &converted).with_context(|| format!("writing {}", output.display()))?;

    writeln!(
        out,
        "{} ({from}) -> {} ({to}, {} bytes)",
        input.display(),
        output.display(),
        converted.len()
    )?;
    Ok(output)
}

//! Conversion between the binary and text representations.
//!
//! Every conversion decodes the whole input into a [`Model`] before the
//! first output byte is produced.

use std::fmt;

use tracing::info;

use crate::codec::{decode_model, encode_model_with_options, is_supported_version, EncodeOptions};
use crate::error::{ConvertError, EncodeError};
use crate::limits::MAGIC;
use crate::model::Model;
use crate::text::{parse_text, parse_text_bytes, write_text, TextOptions};
use crate::validate::validate_model;

/// One of the two forms a model file can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Binary,
    Text,
}

impl Representation {
    /// Input starting with the binary magic is binary; anything else is text.
    pub fn detect(input: &[u8]) -> Self {
        if input.starts_with(MAGIC) {
            Representation::Binary
        } else {
            Representation::Text
        }
    }

    /// Returns the other representation.
    pub fn opposite(self) -> Self {
        match self {
            Representation::Binary => Representation::Text,
            Representation::Text => Representation::Binary,
        }
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Representation::Binary => f.write_str("binary"),
            Representation::Text => f.write_str("text"),
        }
    }
}

/// Options for a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    pub encode: EncodeOptions,
    pub text: TextOptions,
    /// Run [`validate_model`] between decoding and encoding.
    pub validate: bool,
}

impl ConvertOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Decodes a complete input in the given representation.
pub fn decode(input: &[u8], from: Representation) -> Result<Model, ConvertError> {
    let model = match from {
        Representation::Binary => decode_model(input)?,
        Representation::Text => parse_text_bytes(input)?,
    };
    Ok(model)
}

/// Encodes a Model into the given representation.
///
/// `options.encode.version`, when set, also selects the version of text
/// output.
pub fn encode(model: &Model, to: Representation, options: &ConvertOptions) -> Result<Vec<u8>, ConvertError> {
    match to {
        Representation::Binary => Ok(encode_model_with_options(model, options.encode)?),
        Representation::Text => {
            let version = options.encode.version.unwrap_or(model.version);
            if !is_supported_version(version) {
                return Err(EncodeError::UnsupportedVersion { version }.into());
            }
            let text = if version == model.version {
                write_text(model, &options.text)
            } else {
                let model = Model {
                    version,
                    ..model.clone()
                };
                write_text(&model, &options.text)
            };
            Ok(text.into_bytes())
        }
    }
}

/// Converts a complete input into the opposite representation.
pub fn convert(input: &[u8], from: Representation, options: &ConvertOptions) -> Result<Vec<u8>, ConvertError> {
    let model = decode(input, from)?;
    if options.validate {
        validate_model(&model)?;
    }
    let to = from.opposite();
    let output = encode(&model, to, options)?;
    info!(
        from = %from,
        to = %to,
        input_bytes = input.len(),
        output_bytes = output.len(),
        somas = model.somas.len(),
        synapses = model.synapses.len(),
        "converted model"
    );
    Ok(output)
}

/// Converts a binary model to text with default options.
pub fn binary_to_text(input: &[u8]) -> Result<String, ConvertError> {
    let model = decode_model(input)?;
    Ok(write_text(&model, &TextOptions::default()))
}

/// Converts a text model to binary with default options.
pub fn text_to_binary(input: &str) -> Result<Vec<u8>, ConvertError> {
    let model = parse_text(input)?;
    Ok(encode_model_with_options(&model, EncodeOptions::new())?)
}

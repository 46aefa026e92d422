//! Compact, order-dependent text encoding of raw trait totals for shareable
//! links. Values are written in canonical trait order with no trait names, so
//! a code is only meaningful against the trait set that produced it.

use crate::config::{CodecKind, CodecParams};
use crate::error::{TfResult, TraitForgeError};
use crate::traits::{TraitSet, TraitVector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreCodec {
    /// Values separated by `delimiter`. Handles any finite value, negatives
    /// and decimals included.
    Delimited { delimiter: char },
    /// Each value zero-padded to `width` digits with no separator. Only
    /// non-negative integers that fit the width can be encoded.
    FixedWidth { width: usize },
}

impl Default for ScoreCodec {
    fn default() -> Self {
        Self::Delimited {
            delimiter: crate::consts::DEFAULT_DELIMITER,
        }
    }
}

impl From<&CodecParams> for ScoreCodec {
    fn from(params: &CodecParams) -> Self {
        match params.codec {
            CodecKind::Delimited => Self::Delimited {
                delimiter: params.delimiter,
            },
            CodecKind::FixedWidth => Self::FixedWidth {
                width: params.pad_width,
            },
        }
    }
}

impl ScoreCodec {
    pub fn encode(&self, raw: &TraitVector, traits: &TraitSet) -> TfResult<String> {
        self.check()?;
        if raw.len() != traits.len() {
            return Err(TraitForgeError::FieldCount {
                expected: traits.len(),
                found: raw.len(),
            });
        }

        match *self {
            Self::Delimited { delimiter } => {
                let parts: Vec<String> = raw
                    .values()
                    .iter()
                    .zip(traits.iter())
                    .map(|(v, t)| {
                        if v.is_finite() {
                            Ok(v.to_string())
                        } else {
                            Err(TraitForgeError::Unencodable {
                                trait_name: t.to_string(),
                                value: *v,
                            })
                        }
                    })
                    .collect::<TfResult<_>>()?;
                Ok(parts.join(&delimiter.to_string()))
            }
            Self::FixedWidth { width } => {
                // Widths past 19 digits are bounded by u64, not by the padding.
                let limit = 10f64.powi(width as i32).min(u64::MAX as f64);
                let mut out = String::with_capacity(width * raw.len());
                for (v, t) in raw.values().iter().zip(traits.iter()) {
                    if *v < 0.0 || v.fract() != 0.0 || *v >= limit || !v.is_finite() {
                        return Err(TraitForgeError::Unencodable {
                            trait_name: t.to_string(),
                            value: *v,
                        });
                    }
                    out.push_str(&format!("{:0width$}", *v as u64, width = width));
                }
                Ok(out)
            }
        }
    }

    /// Parses a code back into raw totals. The number of fields must equal
    /// the trait count exactly.
    pub fn decode(&self, code: &str, traits: &TraitSet) -> TfResult<TraitVector> {
        self.check()?;
        let expected = traits.len();
        let code = code.trim();

        let fields: Vec<&str> = match *self {
            Self::Delimited { delimiter } => {
                if code.is_empty() {
                    Vec::new()
                } else {
                    code.split(delimiter).collect()
                }
            }
            Self::FixedWidth { width } => {
                if !code.is_ascii() || code.len() % width != 0 {
                    return Err(TraitForgeError::FieldCount {
                        expected,
                        found: code.chars().count() / width,
                    });
                }
                (0..code.len() / width)
                    .map(|i| &code[i * width..(i + 1) * width])
                    .collect()
            }
        };

        if fields.len() != expected {
            return Err(TraitForgeError::FieldCount {
                expected,
                found: fields.len(),
            });
        }

        let values = fields
            .iter()
            .enumerate()
            .map(|(index, field)| parse_field(index, field, *self))
            .collect::<TfResult<Vec<f64>>>()?;
        Ok(TraitVector::from_values(values))
    }
}

impl ScoreCodec {
    fn check(&self) -> TfResult<()> {
        match *self {
            Self::FixedWidth { width: 0 } => Err(TraitForgeError::Config(
                "fixed-width codec needs a width of at least 1".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

fn parse_field(index: usize, field: &str, codec: ScoreCodec) -> TfResult<f64> {
    let invalid = || TraitForgeError::InvalidField {
        index,
        value: field.to_string(),
    };
    match codec {
        ScoreCodec::FixedWidth { .. } => {
            if !field.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            field.parse::<u64>().map(|v| v as f64).map_err(|_| invalid())
        }
        ScoreCodec::Delimited { .. } => {
            let v: f64 = field.parse().map_err(|_| invalid())?;
            if v.is_finite() {
                Ok(v)
            } else {
                Err(invalid())
            }
        }
    }
}

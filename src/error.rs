use thiserror::Error;

#[derive(Error, Debug)]
pub enum TraitForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    /// The encoded string was produced under a different trait set.
    #[error("Decode Error: expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },

    #[error("Decode Error: field {index} ('{value}') is not a finite number")]
    InvalidField { index: usize, value: String },

    #[error("Encode Error: value {value} for trait '{trait_name}' does not fit the codec")]
    Unencodable { trait_name: String, value: f64 },
}

pub type TfResult<T> = Result<T, TraitForgeError>;

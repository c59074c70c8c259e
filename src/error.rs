use serde::Serialize;

use crate::models::field::FieldType;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Duplicate field id: {0}")]
    DuplicateId(String),

    #[error("Field not found: {0}")]
    NotFound(String),

    #[error("Mandatory field '{0}' cannot change its type")]
    ImmutableType(String),

    #[error("Mandatory field '{0}' cannot be removed")]
    ForbiddenRemoval(String),

    #[error("Custom field '{0}' cannot be enabled or disabled")]
    NotToggleable(String),

    #[error("Custom field limit of {0} reached")]
    TooManyFields(usize),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a serialized form definition cannot be loaded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed form definition: {0}")]
    Malformed(String),

    #[error("field '{field_id}' is missing required key '{key}'")]
    MissingKey { field_id: String, key: &'static str },

    #[error("field id '{0}' appears more than once")]
    DuplicateId(String),

    #[error("'{0}' is not a mandatory field")]
    UnknownMandatoryField(String),

    #[error("mandatory field '{0}' is missing")]
    MissingMandatoryField(String),

    #[error("mandatory field '{field_id}' must be of type {expected}")]
    MandatoryTypeMismatch { field_id: String, expected: FieldType },
}

/// Authoring-time problem with a single field's configuration.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("field '{field_id}': {kind}")]
pub struct ConfigError {
    pub field_id: String,
    #[serde(flatten)]
    pub kind: ConfigErrorKind,
}

impl ConfigError {
    pub fn new(field_id: impl Into<String>, kind: ConfigErrorKind) -> Self {
        Self {
            field_id: field_id.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ConfigErrorKind {
    #[error("at least one option is required")]
    MissingOptions,

    #[error("option {index} is blank")]
    BlankOption { index: usize },

    #[error("option '{option}' is listed more than once")]
    DuplicateOption { option: String },

    #[error("min ({min}) is greater than max ({max})")]
    InvertedRange { min: f64, max: f64 },

    #[error("minLength ({min_length}) is greater than maxLength ({max_length})")]
    InvertedLength { min_length: u32, max_length: u32 },

    #[error("maxSizeMb must be positive, got {max_size_mb}")]
    NonPositiveMaxSize { max_size_mb: f64 },

    #[error("label is blank")]
    BlankLabel,

    #[error("allowed extension {index} is blank")]
    BlankExtension { index: usize },
}

/// Problem with the value submitted for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("field '{field_id}': {kind}")]
pub struct FieldError {
    pub field_id: String,
    #[serde(flatten)]
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub fn new(field_id: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field_id: field_id.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum FieldErrorKind {
    #[error("a value is required")]
    MissingRequired,

    #[error("length {actual} is outside the allowed bounds")]
    Length {
        min_length: Option<u32>,
        max_length: Option<u32>,
        actual: usize,
    },

    #[error("{actual} is outside the allowed range")]
    Range {
        min: Option<f64>,
        max: Option<f64>,
        actual: f64,
    },

    #[error("expected {expected}")]
    Format { expected: &'static str },

    #[error("'{value}' is not one of the allowed options")]
    InvalidOption { value: String },

    #[error("file type is not allowed")]
    ExtensionNotAllowed { extension: Option<String> },
}

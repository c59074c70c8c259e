pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
pub mod utils;

pub use crate::dto::form_dto::{ConfigPatch, FieldPatch, FormDefinitionDocument};
pub use crate::error::{
    ConfigError, ConfigErrorKind, Error, FieldError, FieldErrorKind, Result, SchemaError,
};
pub use crate::models::field::{FieldConfig, FieldDefinition, FieldType, MandatoryField};
pub use crate::models::form::FormDefinition;
pub use crate::models::response::{ResponseValue, SubmittedResponse};
pub use crate::services::{
    field_service::FieldService, form_builder_service::FormBuilderService,
    form_processor_service::FormProcessorService,
};

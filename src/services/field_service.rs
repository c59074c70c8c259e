use std::collections::HashSet;

use crate::config::get_config;
use crate::error::{ConfigError, ConfigErrorKind};
use crate::models::field::{FieldConfig, FieldDefinition, FieldType};
use crate::utils::token::generate_token;

pub struct FieldService;

impl FieldService {
    /// New field with a generated id, the type's default label and the
    /// minimal config for its type.
    pub fn create_field(field_type: FieldType) -> FieldDefinition {
        let id = format!(
            "{}_{}",
            field_type.id_prefix(),
            generate_token(get_config().field_id_length)
        );
        tracing::debug!(field_id = %id, field_type = %field_type, "field created");

        FieldDefinition {
            id,
            field_type,
            label: field_type.default_label().to_string(),
            required: false,
            config: FieldConfig::default_for(field_type),
        }
    }

    /// Structural problems of a field's own configuration. Submitted values
    /// are not involved.
    pub fn validate_field_config(field: &FieldDefinition) -> Vec<ConfigError> {
        let config = &field.config;
        let mut kinds = Vec::new();

        if field.label.trim().is_empty() {
            kinds.push(ConfigErrorKind::BlankLabel);
        }

        if field.field_type.requires_options() && config.options().is_empty() {
            kinds.push(ConfigErrorKind::MissingOptions);
        }

        let mut seen = HashSet::new();
        for (index, option) in config.options().iter().enumerate() {
            if option.trim().is_empty() {
                kinds.push(ConfigErrorKind::BlankOption { index });
            } else if !seen.insert(option.as_str()) {
                kinds.push(ConfigErrorKind::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        match field.field_type {
            FieldType::Number => {
                if let (Some(min), Some(max)) = (config.min, config.max) {
                    if min > max {
                        kinds.push(ConfigErrorKind::InvertedRange { min, max });
                    }
                }
            }
            FieldType::ShortText | FieldType::LongText => {
                if let (Some(min_length), Some(max_length)) = (config.min_length, config.max_length)
                {
                    if min_length > max_length {
                        kinds.push(ConfigErrorKind::InvertedLength {
                            min_length,
                            max_length,
                        });
                    }
                }
            }
            FieldType::File => {
                if let Some(max_size_mb) = config.max_size_mb {
                    if max_size_mb.is_nan() || max_size_mb <= 0.0 {
                        kinds.push(ConfigErrorKind::NonPositiveMaxSize { max_size_mb });
                    }
                }
                for (index, extension) in config
                    .allowed_extensions
                    .iter()
                    .flatten()
                    .enumerate()
                {
                    if extension.trim().trim_start_matches('.').is_empty() {
                        kinds.push(ConfigErrorKind::BlankExtension { index });
                    }
                }
            }
            _ => {}
        }

        kinds
            .into_iter()
            .map(|kind| ConfigError::new(field.id.clone(), kind))
            .collect()
    }
}

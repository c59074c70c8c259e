use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::SchemaError;
use crate::models::field::{FieldConfig, FieldDefinition, FieldType, MandatoryField};
use crate::models::form::{mandatory_field_type, FormDefinition, MANDATORY_FIELD_IDS};

/// Persisted shape of a form definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDefinitionDocument {
    pub mandatory_fields: Vec<MandatoryField>,
    pub custom_fields: Vec<FieldDefinition>,
}

impl From<&FormDefinition> for FormDefinitionDocument {
    fn from(value: &FormDefinition) -> Self {
        Self {
            mandatory_fields: value.mandatory_fields.clone(),
            custom_fields: value.custom_fields.clone(),
        }
    }
}

impl TryFrom<FormDefinitionDocument> for FormDefinition {
    type Error = SchemaError;

    fn try_from(value: FormDefinitionDocument) -> Result<Self, Self::Error> {
        let mut seen: HashSet<&str> = HashSet::new();
        let fields = value
            .mandatory_fields
            .iter()
            .map(|entry| &entry.field)
            .chain(value.custom_fields.iter());

        for field in fields {
            if field.id.trim().is_empty() {
                return Err(SchemaError::MissingKey {
                    field_id: field.id.clone(),
                    key: "id",
                });
            }
            if !seen.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateId(field.id.clone()));
            }
            if field.field_type.requires_options() && field.config.options.is_none() {
                return Err(SchemaError::MissingKey {
                    field_id: field.id.clone(),
                    key: "options",
                });
            }
        }

        for entry in &value.mandatory_fields {
            let expected = mandatory_field_type(entry.id())
                .ok_or_else(|| SchemaError::UnknownMandatoryField(entry.id().to_string()))?;
            if entry.field.field_type != expected {
                return Err(SchemaError::MandatoryTypeMismatch {
                    field_id: entry.id().to_string(),
                    expected,
                });
            }
        }

        if let Some(missing) = MANDATORY_FIELD_IDS
            .iter()
            .find(|id| !value.mandatory_fields.iter().any(|entry| entry.id() == **id))
        {
            return Err(SchemaError::MissingMandatoryField(missing.to_string()));
        }

        Ok(FormDefinition {
            mandatory_fields: value.mandatory_fields,
            custom_fields: value.custom_fields,
        })
    }
}

/// Partial update of a field. Absent members leave the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FieldPatch {
    #[validate(length(min = 1))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Only meaningful for mandatory fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub field_type: Option<FieldType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ConfigPatch>,
}

impl FieldPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Self::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Self::default()
        }
    }

    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Self::default()
        }
    }

    pub fn field_type(field_type: FieldType) -> Self {
        Self {
            field_type: Some(field_type),
            ..Self::default()
        }
    }

    pub fn config(config: ConfigPatch) -> Self {
        Self {
            config: Some(config),
            ..Self::default()
        }
    }

    /// Derived checks plus a label that is blank once trimmed.
    pub(crate) fn check(&self) -> Result<(), ValidationErrors> {
        self.validate()?;
        if self
            .label
            .as_deref()
            .is_some_and(|label| label.trim().is_empty())
        {
            let mut errors = ValidationErrors::new();
            errors.add("label", ValidationError::new("blank"));
            return Err(errors);
        }
        Ok(())
    }

    /// Applies label, required and config. Type and enabled are handled by the
    /// builder because their rules depend on which list the field lives in.
    pub(crate) fn apply(self, field: &mut FieldDefinition) {
        if let Some(label) = self.label {
            field.label = label.trim().to_string();
        }
        if let Some(required) = self.required {
            field.required = required;
        }
        if let Some(config) = self.config {
            config.apply(&mut field.config);
        }
        field.config.normalize_for(field.field_type);
    }
}

/// Key-by-key merge into a [`FieldConfig`]. `Some(None)` (JSON `null`)
/// clears a key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub options: Option<Option<Vec<String>>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<Option<u32>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub min: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub max: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Option<Vec<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ConfigPatch {
    pub fn apply(self, config: &mut FieldConfig) {
        merge(&mut config.placeholder, self.placeholder);
        merge(&mut config.options, self.options);
        merge(&mut config.min_length, self.min_length);
        merge(&mut config.max_length, self.max_length);
        merge(&mut config.min, self.min);
        merge(&mut config.max, self.max);
        merge(&mut config.max_size_mb, self.max_size_mb);
        merge(&mut config.allowed_extensions, self.allowed_extensions);
        for (key, value) in self.extra {
            if value.is_null() {
                config.extra.remove(&key);
            } else {
                config.extra.insert(key, value);
            }
        }
    }
}

fn merge<T>(slot: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *slot = value;
    }
}

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

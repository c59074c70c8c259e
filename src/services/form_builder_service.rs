use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::config::get_config;
use crate::dto::form_dto::{FieldPatch, FormDefinitionDocument};
use crate::error::{ConfigError, Error, Result, SchemaError};
use crate::models::field::FieldDefinition;
use crate::models::form::FormDefinition;
use crate::services::field_service::FieldService;
use crate::utils::validation::validate;

/// Mutations and (de)serialization of form definitions. Every mutation either
/// succeeds completely or leaves the definition untouched.
pub struct FormBuilderService;

impl FormBuilderService {
    pub fn add_custom_field(def: &mut FormDefinition, field: FieldDefinition) -> Result<()> {
        let index = def.custom_fields.len();
        Self::insert_custom_field(def, field, index)
    }

    /// Inserts at `index`, clamped to the end of the custom list.
    pub fn insert_custom_field(
        def: &mut FormDefinition,
        mut field: FieldDefinition,
        index: usize,
    ) -> Result<()> {
        validate(&field)?;
        if def.contains(&field.id) {
            return Err(Error::DuplicateId(field.id));
        }
        let limit = get_config().max_custom_fields;
        if def.custom_fields.len() >= limit {
            return Err(Error::TooManyFields(limit));
        }

        field.config.normalize_for(field.field_type);
        let index = index.min(def.custom_fields.len());
        debug!(field_id = %field.id, index, "custom field added");
        def.custom_fields.insert(index, field);
        Ok(())
    }

    /// Moves a field within its own list. Indexes past the end move the field
    /// to the last position.
    pub fn reorder(def: &mut FormDefinition, field_id: &str, new_index: usize) -> Result<()> {
        let moved = if let Some(from) = def
            .mandatory_fields
            .iter()
            .position(|entry| entry.id() == field_id)
        {
            move_item(&mut def.mandatory_fields, from, new_index)
        } else if let Some(from) = def
            .custom_fields
            .iter()
            .position(|field| field.id == field_id)
        {
            move_item(&mut def.custom_fields, from, new_index)
        } else {
            return Err(Error::NotFound(field_id.to_string()));
        };

        if moved {
            debug!(field_id, new_index, "field reordered");
        }
        Ok(())
    }

    pub fn update_field(def: &mut FormDefinition, field_id: &str, patch: FieldPatch) -> Result<()> {
        patch.check()?;

        if let Some(entry) = def
            .mandatory_fields
            .iter_mut()
            .find(|entry| entry.field.id == field_id)
        {
            if let Some(field_type) = patch.field_type {
                if field_type != entry.field.field_type {
                    return Err(Error::ImmutableType(field_id.to_string()));
                }
            }
            if let Some(enabled) = patch.enabled {
                entry.enabled = enabled;
            }
            patch.apply(&mut entry.field);
            debug!(field_id, "mandatory field updated");
            return Ok(());
        }

        let field = def
            .custom_fields
            .iter_mut()
            .find(|field| field.id == field_id)
            .ok_or_else(|| Error::NotFound(field_id.to_string()))?;
        if patch.enabled.is_some() {
            return Err(Error::NotToggleable(field_id.to_string()));
        }
        if let Some(field_type) = patch.field_type {
            field.field_type = field_type;
        }
        patch.apply(field);
        debug!(field_id, "custom field updated");
        Ok(())
    }

    pub fn remove_custom_field(def: &mut FormDefinition, field_id: &str) -> Result<FieldDefinition> {
        if def.is_mandatory(field_id) {
            return Err(Error::ForbiddenRemoval(field_id.to_string()));
        }
        let index = def
            .custom_fields
            .iter()
            .position(|field| field.id == field_id)
            .ok_or_else(|| Error::NotFound(field_id.to_string()))?;

        debug!(field_id, "custom field removed");
        Ok(def.custom_fields.remove(index))
    }

    pub fn serialize(def: &FormDefinition) -> Result<JsonValue> {
        Ok(serde_json::to_value(FormDefinitionDocument::from(def))?)
    }

    pub fn to_json_string(def: &FormDefinition) -> Result<String> {
        Ok(serde_json::to_string_pretty(&FormDefinitionDocument::from(def))?)
    }

    pub fn deserialize(value: JsonValue) -> Result<FormDefinition> {
        let document: FormDefinitionDocument = serde_json::from_value(value)
            .map_err(|e| SchemaError::Malformed(e.to_string()))?;
        Ok(FormDefinition::try_from(document)?)
    }

    pub fn from_json_str(raw: &str) -> Result<FormDefinition> {
        let document: FormDefinitionDocument =
            serde_json::from_str(raw).map_err(|e| SchemaError::Malformed(e.to_string()))?;
        Ok(FormDefinition::try_from(document)?)
    }

    /// Validates every field's configuration, disabled mandatory fields
    /// included. Succeeds only when no field reports a problem.
    pub fn publish(def: &FormDefinition) -> std::result::Result<(), Vec<ConfigError>> {
        let errors: Vec<ConfigError> = def
            .all_fields()
            .flat_map(FieldService::validate_field_config)
            .collect();

        if errors.is_empty() {
            info!(
                fields = def.mandatory_fields.len() + def.custom_fields.len(),
                "form definition published"
            );
            Ok(())
        } else {
            warn!(errors = errors.len(), "form definition rejected");
            Err(errors)
        }
    }
}

fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    let to = to.min(items.len().saturating_sub(1));
    if from == to {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

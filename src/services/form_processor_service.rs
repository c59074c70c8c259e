use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info};

use crate::error::{FieldError, FieldErrorKind};
use crate::models::field::{FieldDefinition, FieldType};
use crate::models::form::FormDefinition;
use crate::models::response::{ResponseValue, SubmittedResponse};
use crate::utils::time::parse_date;
use crate::utils::validation::{file_extension, is_valid_email, is_valid_phone, normalize_extension};

type FieldValidator = fn(&FieldDefinition, &JsonValue) -> Result<ResponseValue, FieldErrorKind>;

fn validator_for(field_type: FieldType) -> FieldValidator {
    match field_type {
        FieldType::ShortText | FieldType::LongText => validate_text,
        FieldType::Number => validate_number,
        FieldType::Email => validate_email,
        FieldType::Phone => validate_phone,
        FieldType::Dropdown | FieldType::Radio => validate_single_choice,
        FieldType::MultiSelect => validate_multi_choice,
        FieldType::Checkbox => validate_checkbox,
        FieldType::Date => validate_date,
        FieldType::File => validate_file,
    }
}

pub struct FormProcessorService;

impl FormProcessorService {
    /// Validates raw applicant input against a published form.
    ///
    /// Every active field is checked and every failure is reported, at most
    /// one error per field. Nothing is returned unless all fields pass.
    pub fn process(
        def: &FormDefinition,
        raw: &Map<String, JsonValue>,
    ) -> Result<SubmittedResponse, Vec<FieldError>> {
        let mut values = Vec::new();
        let mut errors = Vec::new();

        for field in def.active_fields() {
            let value = raw.get(&field.id).filter(|value| !is_blank(field, value));
            match value {
                None if field.required => {
                    errors.push(FieldError::new(&field.id, FieldErrorKind::MissingRequired));
                }
                None => {}
                Some(value) => match validator_for(field.field_type)(field, value) {
                    Ok(normalized) => {
                        values.push((field.id.clone(), normalized));
                    }
                    Err(kind) => errors.push(FieldError::new(&field.id, kind)),
                },
            }
        }

        for key in raw.keys() {
            if !def.active_fields().any(|field| &field.id == key) {
                debug!(key = %key, "ignoring value for unknown or disabled field");
            }
        }

        if errors.is_empty() {
            info!(fields = values.len(), "form response accepted");
            Ok(SubmittedResponse::new(values))
        } else {
            info!(errors = errors.len(), "form response rejected");
            Err(errors)
        }
    }

    /// Same as [`process`](Self::process) for an arbitrary JSON value. Anything
    /// other than an object counts as an empty submission.
    pub fn process_value(
        def: &FormDefinition,
        raw: &JsonValue,
    ) -> Result<SubmittedResponse, Vec<FieldError>> {
        match raw.as_object() {
            Some(map) => Self::process(def, map),
            None => Self::process(def, &Map::new()),
        }
    }
}

/// Absent for the purposes of `required`.
fn is_blank(field: &FieldDefinition, value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::String(s) => s.trim().is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Bool(false) => is_consent_checkbox(field),
        JsonValue::Object(map) if field.field_type == FieldType::File => map
            .get("url")
            .and_then(JsonValue::as_str)
            .map_or(true, |url| url.trim().is_empty()),
        _ => false,
    }
}

/// A checkbox without options is a single yes/no box.
fn is_consent_checkbox(field: &FieldDefinition) -> bool {
    field.field_type == FieldType::Checkbox && field.config.options().is_empty()
}

fn expect_str<'a>(value: &'a JsonValue, expected: &'static str) -> Result<&'a str, FieldErrorKind> {
    value
        .as_str()
        .map(str::trim)
        .ok_or(FieldErrorKind::Format { expected })
}

fn validate_text(field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    let text = expect_str(value, "text")?;
    let length = text.chars().count();
    let min_length = field.config.min_length;
    let max_length = field.config.max_length;

    let too_short = min_length.is_some_and(|min| length < min as usize);
    let too_long = max_length.is_some_and(|max| length > max as usize);
    if too_short || too_long {
        return Err(FieldErrorKind::Length {
            min_length,
            max_length,
            actual: length,
        });
    }
    Ok(ResponseValue::Text(text.to_string()))
}

fn validate_number(field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    let number = match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|n| n.is_finite())
    .ok_or(FieldErrorKind::Format { expected: "number" })?;

    let min = field.config.min;
    let max = field.config.max;
    let below = min.is_some_and(|min| number < min);
    let above = max.is_some_and(|max| number > max);
    if below || above {
        return Err(FieldErrorKind::Range {
            min,
            max,
            actual: number,
        });
    }
    Ok(ResponseValue::Number(number))
}

fn validate_email(_field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    let email = expect_str(value, "email address")?;
    if !is_valid_email(email) {
        return Err(FieldErrorKind::Format {
            expected: "email address",
        });
    }
    Ok(ResponseValue::Text(email.to_string()))
}

fn validate_phone(_field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    let phone = expect_str(value, "phone number")?;
    if !is_valid_phone(phone) {
        return Err(FieldErrorKind::Format {
            expected: "phone number",
        });
    }
    Ok(ResponseValue::Text(phone.to_string()))
}

fn validate_single_choice(
    field: &FieldDefinition,
    value: &JsonValue,
) -> Result<ResponseValue, FieldErrorKind> {
    let choice = expect_str(value, "option text")?;
    if !field.config.has_option(choice) {
        return Err(FieldErrorKind::InvalidOption {
            value: choice.to_string(),
        });
    }
    Ok(ResponseValue::Text(choice.to_string()))
}

fn validate_multi_choice(
    field: &FieldDefinition,
    value: &JsonValue,
) -> Result<ResponseValue, FieldErrorKind> {
    let items = value.as_array().ok_or(FieldErrorKind::Format {
        expected: "list of options",
    })?;

    let mut choices: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let choice = expect_str(item, "list of options")?;
        if !field.config.has_option(choice) {
            return Err(FieldErrorKind::InvalidOption {
                value: choice.to_string(),
            });
        }
        if !choices.iter().any(|existing| existing == choice) {
            choices.push(choice.to_string());
        }
    }
    Ok(ResponseValue::Choices(choices))
}

fn validate_checkbox(field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    if !is_consent_checkbox(field) {
        return validate_multi_choice(field, value);
    }
    value
        .as_bool()
        .map(ResponseValue::Flag)
        .ok_or(FieldErrorKind::Format { expected: "boolean" })
}

fn validate_date(_field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    let raw = expect_str(value, "date (YYYY-MM-DD)")?;
    parse_date(raw)
        .map(ResponseValue::Date)
        .map_err(|_| FieldErrorKind::Format {
            expected: "date (YYYY-MM-DD)",
        })
}

/// Upload happens elsewhere; only the reference and its extension are checked.
fn validate_file(field: &FieldDefinition, value: &JsonValue) -> Result<ResponseValue, FieldErrorKind> {
    let reference = match value {
        JsonValue::String(s) => s.trim(),
        JsonValue::Object(map) => map
            .get("url")
            .and_then(JsonValue::as_str)
            .map(str::trim)
            .unwrap_or_default(),
        _ => "",
    };
    if reference.is_empty() {
        return Err(FieldErrorKind::Format {
            expected: "file reference",
        });
    }

    if let Some(allowed) = field
        .config
        .allowed_extensions
        .as_ref()
        .filter(|allowed| !allowed.is_empty())
    {
        let extension = file_extension(reference);
        let permitted = extension.as_deref().is_some_and(|ext| {
            allowed
                .iter()
                .any(|candidate| normalize_extension(candidate) == ext)
        });
        if !permitted {
            return Err(FieldErrorKind::ExtensionNotAllowed { extension });
        }
    }
    Ok(ResponseValue::File(reference.to_string()))
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    ShortText,
    LongText,
    Number,
    Email,
    Phone,
    Dropdown,
    MultiSelect,
    Radio,
    Checkbox,
    Date,
    File,
}

impl FieldType {
    pub const ALL: [FieldType; 11] = [
        FieldType::ShortText,
        FieldType::LongText,
        FieldType::Number,
        FieldType::Email,
        FieldType::Phone,
        FieldType::Dropdown,
        FieldType::MultiSelect,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::File,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::ShortText => "short_text",
            FieldType::LongText => "long_text",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Dropdown => "dropdown",
            FieldType::MultiSelect => "multi_select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::File => "file",
        }
    }

    /// Prefix of ids generated for new fields of this type.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            FieldType::ShortText => "text",
            FieldType::LongText => "textarea",
            FieldType::Number => "number",
            FieldType::Email => "email",
            FieldType::Phone => "phone",
            FieldType::Dropdown => "dropdown",
            FieldType::MultiSelect => "multiselect",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::File => "file",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            FieldType::ShortText => "Short answer",
            FieldType::LongText => "Long answer",
            FieldType::Number => "Number",
            FieldType::Email => "Email address",
            FieldType::Phone => "Phone number",
            FieldType::Dropdown => "Select an option",
            FieldType::MultiSelect => "Select all that apply",
            FieldType::Radio => "Choose one",
            FieldType::Checkbox => "Checkbox",
            FieldType::Date => "Date",
            FieldType::File => "File upload",
        }
    }

    /// Dropdown, MultiSelect and Radio cannot be published without options.
    pub fn requires_options(&self) -> bool {
        matches!(
            self,
            FieldType::Dropdown | FieldType::MultiSelect | FieldType::Radio
        )
    }

    pub fn is_text(&self) -> bool {
        matches!(self, FieldType::ShortText | FieldType::LongText)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-dependent settings of a field. Keys that are not meaningful for the
/// field's type are kept as-is; unknown keys land in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size_mb: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl FieldConfig {
    /// Minimal config for a freshly created field. Option-bearing types start
    /// with an empty list, which is invalid until populated.
    pub fn default_for(field_type: FieldType) -> Self {
        let mut config = Self::default();
        config.normalize_for(field_type);
        config
    }

    /// Guarantees that option-bearing types always carry an `options` key.
    pub fn normalize_for(&mut self, field_type: FieldType) {
        if field_type.requires_options() && self.options.is_none() {
            self.options = Some(Vec::new());
        }
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options().iter().any(|option| option == value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FieldDefinition {
    #[validate(length(min = 1))]
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub config: FieldConfig,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            field_type,
            label: label.into(),
            required: false,
            config: FieldConfig::default_for(field_type),
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_config(mut self, mut config: FieldConfig) -> Self {
        config.normalize_for(self.field_type);
        self.config = config;
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.options = Some(options.into_iter().map(Into::into).collect());
        self
    }
}

/// A built-in applicant field. Disabled entries are neither rendered nor
/// validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandatoryField {
    #[serde(flatten)]
    pub field: FieldDefinition,
    pub enabled: bool,
}

impl MandatoryField {
    pub fn id(&self) -> &str {
        &self.field.id
    }
}

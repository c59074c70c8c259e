use crate::models::field::{FieldConfig, FieldDefinition, FieldType, MandatoryField};

pub const NAME_FIELD_ID: &str = "name";
pub const EMAIL_FIELD_ID: &str = "email";
pub const PHONE_FIELD_ID: &str = "phone";
pub const RESUME_FIELD_ID: &str = "resume";

pub const MANDATORY_FIELD_IDS: [&str; 4] =
    [NAME_FIELD_ID, EMAIL_FIELD_ID, PHONE_FIELD_ID, RESUME_FIELD_ID];

/// Type a built-in field must keep for its whole life.
pub fn mandatory_field_type(id: &str) -> Option<FieldType> {
    match id {
        NAME_FIELD_ID => Some(FieldType::ShortText),
        EMAIL_FIELD_ID => Some(FieldType::Email),
        PHONE_FIELD_ID => Some(FieldType::Phone),
        RESUME_FIELD_ID => Some(FieldType::File),
        _ => None,
    }
}

pub fn default_mandatory_fields() -> Vec<MandatoryField> {
    let resume_config = FieldConfig {
        max_size_mb: Some(10.0),
        allowed_extensions: Some(vec!["pdf".into(), "doc".into(), "docx".into()]),
        ..FieldConfig::default()
    };

    vec![
        MandatoryField {
            field: FieldDefinition::new(NAME_FIELD_ID, FieldType::ShortText, "Full name")
                .required(true),
            enabled: true,
        },
        MandatoryField {
            field: FieldDefinition::new(EMAIL_FIELD_ID, FieldType::Email, "Email").required(true),
            enabled: true,
        },
        MandatoryField {
            field: FieldDefinition::new(PHONE_FIELD_ID, FieldType::Phone, "Phone number"),
            enabled: true,
        },
        MandatoryField {
            field: FieldDefinition::new(RESUME_FIELD_ID, FieldType::File, "Resume / CV")
                .required(true)
                .with_config(resume_config),
            enabled: true,
        },
    ]
}

/// Application form attached to a single job posting.
///
/// The lists are only reachable through the builder service so that the
/// mandatory set stays complete and ids stay unique.
#[derive(Debug, Clone, PartialEq)]
pub struct FormDefinition {
    pub(crate) mandatory_fields: Vec<MandatoryField>,
    pub(crate) custom_fields: Vec<FieldDefinition>,
}

impl Default for FormDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl FormDefinition {
    pub fn new() -> Self {
        Self {
            mandatory_fields: default_mandatory_fields(),
            custom_fields: Vec::new(),
        }
    }

    pub fn mandatory_fields(&self) -> &[MandatoryField] {
        &self.mandatory_fields
    }

    pub fn custom_fields(&self) -> &[FieldDefinition] {
        &self.custom_fields
    }

    pub fn mandatory_field(&self, id: &str) -> Option<&MandatoryField> {
        self.mandatory_fields.iter().find(|entry| entry.id() == id)
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.mandatory_field(id)
            .map(|entry| &entry.field)
            .or_else(|| self.custom_fields.iter().find(|field| field.id == id))
    }

    pub fn is_mandatory(&self, id: &str) -> bool {
        self.mandatory_field(id).is_some()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    /// Every field, mandatory first, regardless of `enabled`.
    pub fn all_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.mandatory_fields
            .iter()
            .map(|entry| &entry.field)
            .chain(self.custom_fields.iter())
    }

    /// Fields an applicant fills in: enabled mandatory fields, then custom
    /// fields, each in list order.
    pub fn active_fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.mandatory_fields
            .iter()
            .filter(|entry| entry.enabled)
            .map(|entry| &entry.field)
            .chain(self.custom_fields.iter())
    }
}

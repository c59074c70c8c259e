use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Validated, normalized value of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Choices(Vec<String>),
    Date(NaiveDate),
    /// Reference to an already uploaded file.
    File(String),
}

impl ResponseValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResponseValue::Text(s) | ResponseValue::File(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ResponseValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// Applicant answers keyed by field id, in form order (enabled mandatory
/// fields, then custom fields). Built only by the form processor and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SubmittedResponse {
    values: Vec<(String, ResponseValue)>,
}

impl SubmittedResponse {
    pub(crate) fn new(values: Vec<(String, ResponseValue)>) -> Self {
        Self { values }
    }

    pub fn get(&self, field_id: &str) -> Option<&ResponseValue> {
        self.values
            .iter()
            .find(|(id, _)| id == field_id)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, field_id: &str) -> bool {
        self.get(field_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ResponseValue)> {
        self.values.iter().map(|(id, value)| (id.as_str(), value))
    }
}

impl Serialize for SubmittedResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

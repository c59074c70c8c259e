use url::Url;
use validator::{Validate, ValidateEmail};

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

pub fn is_valid_email(value: &str) -> bool {
    value.validate_email()
}

/// Optional leading `+`, then digits with the usual separators. The digit
/// count must fall within the E.164 range.
pub fn is_valid_phone(value: &str) -> bool {
    let body = value.strip_prefix('+').unwrap_or(value);
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '0'..='9' => digits += 1,
            ' ' | '-' | '.' | '(' | ')' => {}
            _ => return false,
        }
    }
    (7..=15).contains(&digits)
}

/// Lowercased extension of a file reference, which may be a URL or an
/// opaque storage handle. Query strings and fragments are ignored.
pub fn file_extension(reference: &str) -> Option<String> {
    let path = match Url::parse(reference) {
        Ok(url) => url.path().to_string(),
        Err(_) => reference
            .split(['?', '#'])
            .next()
            .unwrap_or(reference)
            .to_string(),
    };
    let file_name = path.rsplit('/').next().unwrap_or(&path);
    let (stem, extension) = file_name.rsplit_once('.')?;
    if stem.is_empty() || extension.is_empty() {
        return None;
    }
    Some(extension.to_ascii_lowercase())
}

/// Canonical form of a configured extension: no leading dot, lowercase.
pub fn normalize_extension(extension: &str) -> String {
    extension.trim().trim_start_matches('.').to_ascii_lowercase()
}

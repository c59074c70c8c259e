use chrono::NaiveDate;
use recruitment_forms::{
    FieldConfig, FieldDefinition, FieldError, FieldErrorKind, FieldPatch, FieldType,
    FormBuilderService, FormDefinition, FormProcessorService, ResponseValue, SubmittedResponse,
};
use serde_json::{json, Map, Value as JsonValue};

fn answers(value: JsonValue) -> Map<String, JsonValue> {
    match value {
        JsonValue::Object(map) => map,
        other => panic!("answers must be an object, got {}", other),
    }
}

fn base_answers() -> JsonValue {
    json!({
        "name": "Alice Doe",
        "email": "alice@example.com",
        "resume": "https://files.example.com/uploads/alice-cv.pdf"
    })
}

fn with_answers(extra: JsonValue) -> Map<String, JsonValue> {
    let mut map = answers(base_answers());
    map.extend(answers(extra));
    map
}

fn form_with(fields: Vec<FieldDefinition>) -> FormDefinition {
    let mut def = FormDefinition::new();
    for field in fields {
        FormBuilderService::add_custom_field(&mut def, field).expect("add field");
    }
    def
}

fn single_error(def: &FormDefinition, raw: Map<String, JsonValue>) -> FieldError {
    let errors = FormProcessorService::process(def, &raw).unwrap_err();
    assert_eq!(errors.len(), 1, "errors: {:?}", errors);
    errors.into_iter().next().expect("one error")
}

fn accepted(def: &FormDefinition, raw: Map<String, JsonValue>) -> SubmittedResponse {
    FormProcessorService::process(def, &raw).expect("accepted")
}

fn years_exp() -> FieldDefinition {
    FieldDefinition::new("years_exp", FieldType::Number, "Years of experience")
        .required(true)
        .with_config(FieldConfig {
            min: Some(0.0),
            max: Some(40.0),
            ..FieldConfig::default()
        })
}

#[test]
fn accepts_a_complete_application() {
    let def = FormDefinition::new();
    let response = accepted(&def, with_answers(json!({ "phone": "+1 (555) 010-9999" })));

    assert_eq!(response.len(), 4);
    assert_eq!(response.get("name"), Some(&ResponseValue::Text("Alice Doe".into())));
    assert_eq!(
        response.get("resume").and_then(ResponseValue::as_str),
        Some("https://files.example.com/uploads/alice-cv.pdf")
    );
}

#[test]
fn number_range_scenario() {
    let def = form_with(vec![years_exp()]);

    let error = single_error(&def, with_answers(json!({ "years_exp": 45 })));
    assert_eq!(error.field_id, "years_exp");
    assert_eq!(
        error.kind,
        FieldErrorKind::Range {
            min: Some(0.0),
            max: Some(40.0),
            actual: 45.0
        }
    );

    let response = accepted(&def, with_answers(json!({ "years_exp": 5 })));
    assert_eq!(response.get("years_exp").and_then(ResponseValue::as_f64), Some(5.0));
}

#[test]
fn numbers_may_arrive_as_strings() {
    let def = form_with(vec![years_exp()]);
    let response = accepted(&def, with_answers(json!({ "years_exp": " 12.5 " })));
    assert_eq!(response.get("years_exp"), Some(&ResponseValue::Number(12.5)));

    let error = single_error(&def, with_answers(json!({ "years_exp": "twelve" })));
    assert_eq!(error.kind, FieldErrorKind::Format { expected: "number" });
}

#[test]
fn missing_required_field_is_always_reported() {
    let def = form_with(vec![
        years_exp(),
        FieldDefinition::new("city", FieldType::ShortText, "City"),
    ]);
    let mut raw = with_answers(json!({ "years_exp": 3, "city": "Berlin" }));
    raw.remove("email");

    let error = single_error(&def, raw);
    assert_eq!(error, FieldError::new("email", FieldErrorKind::MissingRequired));
}

#[test]
fn blank_values_count_as_missing() {
    let def = form_with(vec![
        FieldDefinition::new("skills", FieldType::MultiSelect, "Skills")
            .required(true)
            .with_options(["Rust", "Go"]),
        FieldDefinition::new("motivation", FieldType::LongText, "Motivation").required(true),
        FieldDefinition::new("start", FieldType::Date, "Start date").required(true),
    ]);
    let raw = with_answers(json!({ "skills": [], "motivation": "   ", "start": null }));

    let errors = FormProcessorService::process(&def, &raw).unwrap_err();
    let ids: Vec<&str> = errors.iter().map(|e| e.field_id.as_str()).collect();
    assert_eq!(ids, vec!["skills", "motivation", "start"]);
    assert!(errors
        .iter()
        .all(|e| e.kind == FieldErrorKind::MissingRequired));
}

#[test]
fn optional_fields_may_be_omitted() {
    let def = form_with(vec![FieldDefinition::new("city", FieldType::ShortText, "City")]);
    let response = accepted(&def, with_answers(json!({ "city": "" })));
    assert!(!response.contains("city"));
    assert!(!response.contains("phone"));
}

#[test]
fn disabled_mandatory_fields_are_never_required() {
    let mut def = FormDefinition::new();
    FormBuilderService::update_field(
        &mut def,
        "phone",
        FieldPatch {
            enabled: Some(false),
            required: Some(true),
            ..FieldPatch::default()
        },
    )
    .expect("update");

    let response = accepted(&def, answers(base_answers()));
    assert!(!response.contains("phone"));

    let response = accepted(&def, with_answers(json!({ "phone": "not a phone" })));
    assert!(!response.contains("phone"));
}

#[test]
fn dropdown_option_containment() {
    let def = form_with(vec![FieldDefinition::new(
        "seniority",
        FieldType::Dropdown,
        "Seniority",
    )
    .with_options(["Junior", "Mid"])]);

    let error = single_error(&def, with_answers(json!({ "seniority": "Senior" })));
    assert_eq!(
        error.kind,
        FieldErrorKind::InvalidOption {
            value: "Senior".into()
        }
    );

    let response = accepted(&def, with_answers(json!({ "seniority": "Mid" })));
    assert_eq!(response.get("seniority"), Some(&ResponseValue::Text("Mid".into())));
}

#[test]
fn multi_select_members_must_be_options() {
    let def = form_with(vec![FieldDefinition::new("skills", FieldType::MultiSelect, "Skills")
        .with_options(["Rust", "Go", "SQL"])]);

    let response = accepted(&def, with_answers(json!({ "skills": ["SQL", "Rust", "SQL"] })));
    assert_eq!(
        response.get("skills"),
        Some(&ResponseValue::Choices(vec!["SQL".into(), "Rust".into()]))
    );

    let error = single_error(&def, with_answers(json!({ "skills": ["Rust", "COBOL"] })));
    assert_eq!(
        error.kind,
        FieldErrorKind::InvalidOption {
            value: "COBOL".into()
        }
    );

    let error = single_error(&def, with_answers(json!({ "skills": "Rust" })));
    assert!(matches!(error.kind, FieldErrorKind::Format { .. }));
}

#[test]
fn checkbox_with_options_and_consent_checkbox() {
    let def = form_with(vec![
        FieldDefinition::new("perks", FieldType::Checkbox, "Perks").with_options(["Remote", "Gym"]),
        FieldDefinition::new("consent", FieldType::Checkbox, "I agree").required(true),
    ]);

    let response = accepted(
        &def,
        with_answers(json!({ "perks": ["Gym"], "consent": true })),
    );
    assert_eq!(response.get("perks"), Some(&ResponseValue::Choices(vec!["Gym".into()])));
    assert_eq!(response.get("consent"), Some(&ResponseValue::Flag(true)));

    let error = single_error(&def, with_answers(json!({ "consent": false })));
    assert_eq!(error, FieldError::new("consent", FieldErrorKind::MissingRequired));

    let error = single_error(&def, with_answers(json!({ "consent": "yes" })));
    assert_eq!(error.kind, FieldErrorKind::Format { expected: "boolean" });
}

#[test]
fn text_length_bounds_are_inclusive() {
    let def = form_with(vec![FieldDefinition::new("summary", FieldType::ShortText, "Summary")
        .with_config(FieldConfig {
            min_length: Some(3),
            max_length: Some(5),
            ..FieldConfig::default()
        })]);

    accepted(&def, with_answers(json!({ "summary": "abc" })));
    accepted(&def, with_answers(json!({ "summary": " ñandú " })));

    let error = single_error(&def, with_answers(json!({ "summary": "ab" })));
    assert_eq!(
        error.kind,
        FieldErrorKind::Length {
            min_length: Some(3),
            max_length: Some(5),
            actual: 2
        }
    );
    let error = single_error(&def, with_answers(json!({ "summary": "abcdef" })));
    assert!(matches!(error.kind, FieldErrorKind::Length { actual: 6, .. }));

    let error = single_error(&def, with_answers(json!({ "summary": 42 })));
    assert_eq!(error.kind, FieldErrorKind::Format { expected: "text" });
}

#[test]
fn email_and_phone_formats() {
    let def = FormDefinition::new();

    let error = single_error(&def, with_answers(json!({ "email": "alice@" })));
    assert_eq!(
        error,
        FieldError::new(
            "email",
            FieldErrorKind::Format {
                expected: "email address"
            }
        )
    );

    let error = single_error(&def, with_answers(json!({ "phone": "call me" })));
    assert_eq!(error.field_id, "phone");

    let error = single_error(&def, with_answers(json!({ "phone": "12345" })));
    assert_eq!(error.field_id, "phone");

    let response = accepted(&def, with_answers(json!({ "email": "  bob@example.org " })));
    assert_eq!(response.get("email"), Some(&ResponseValue::Text("bob@example.org".into())));
}

#[test]
fn dates_are_parsed() {
    let def = form_with(vec![FieldDefinition::new("start", FieldType::Date, "Start date")]);

    let response = accepted(&def, with_answers(json!({ "start": "2026-11-02" })));
    assert_eq!(
        response.get("start"),
        Some(&ResponseValue::Date(
            NaiveDate::from_ymd_opt(2026, 11, 2).expect("date")
        ))
    );

    let response = accepted(&def, with_answers(json!({ "start": "2026-11-02T09:30:00+02:00" })));
    assert!(matches!(response.get("start"), Some(ResponseValue::Date(_))));

    let error = single_error(&def, with_answers(json!({ "start": "2026-02-30" })));
    assert!(matches!(error.kind, FieldErrorKind::Format { .. }));
}

#[test]
fn file_extension_must_be_allowed() {
    let def = FormDefinition::new();

    let response = accepted(
        &def,
        with_answers(json!({ "resume": "https://cdn.example.com/cv/ALICE.PDF?token=abc" })),
    );
    assert!(response.contains("resume"));

    let response = accepted(&def, with_answers(json!({ "resume": { "url": "uploads/alice.docx" } })));
    assert_eq!(
        response.get("resume"),
        Some(&ResponseValue::File("uploads/alice.docx".into()))
    );

    let error = single_error(&def, with_answers(json!({ "resume": "uploads/alice.exe" })));
    assert_eq!(
        error.kind,
        FieldErrorKind::ExtensionNotAllowed {
            extension: Some("exe".into())
        }
    );

    let error = single_error(&def, with_answers(json!({ "resume": "upload-handle-1234" })));
    assert_eq!(error.kind, FieldErrorKind::ExtensionNotAllowed { extension: None });
}

#[test]
fn empty_file_reference_counts_as_missing() {
    let def = FormDefinition::new();
    for resume in [json!({ "url": "" }), json!({ "url": "  " }), json!({})] {
        let error = single_error(&def, with_answers(json!({ "resume": resume })));
        assert_eq!(error, FieldError::new("resume", FieldErrorKind::MissingRequired));
    }
}

#[test]
fn file_without_extension_rules_accepts_any_reference() {
    let def = form_with(vec![FieldDefinition::new("portfolio", FieldType::File, "Portfolio")]);
    let response = accepted(&def, with_answers(json!({ "portfolio": "blob:7f3a" })));
    assert_eq!(response.get("portfolio"), Some(&ResponseValue::File("blob:7f3a".into())));
}

#[test]
fn collects_every_error_at_once() {
    let def = form_with(vec![
        years_exp(),
        FieldDefinition::new("seniority", FieldType::Dropdown, "Seniority")
            .with_options(["Junior", "Mid"]),
    ]);
    let raw = answers(json!({
        "name": "Alice",
        "email": "not-an-email",
        "resume": "cv.pdf",
        "years_exp": 99,
        "seniority": "Principal"
    }));

    let errors = FormProcessorService::process(&def, &raw).unwrap_err();
    assert_eq!(errors.len(), 3);
    let ids: Vec<&str> = errors.iter().map(|e| e.field_id.as_str()).collect();
    assert_eq!(ids, vec!["email", "years_exp", "seniority"]);
}

#[test]
fn unknown_keys_are_ignored() {
    let def = FormDefinition::new();
    let response = accepted(&def, with_answers(json!({ "favourite_colour": "green" })));
    assert!(!response.contains("favourite_colour"));
}

#[test]
fn non_object_input_is_an_empty_submission() {
    let def = FormDefinition::new();
    let errors = FormProcessorService::process_value(&def, &json!(["Alice"])).unwrap_err();
    let ids: Vec<&str> = errors.iter().map(|e| e.field_id.as_str()).collect();
    assert_eq!(ids, vec!["name", "email", "resume"]);
}

#[test]
fn response_serializes_to_a_plain_object() {
    let def = form_with(vec![years_exp()]);
    let response = accepted(&def, with_answers(json!({ "years_exp": 5 })));
    let value = serde_json::to_value(&response).expect("serialize");

    assert_eq!(value["name"], "Alice Doe");
    assert_eq!(value["years_exp"], 5.0);
}

#[test]
fn response_keeps_form_order() {
    let mut def = form_with(vec![
        years_exp(),
        FieldDefinition::new("city", FieldType::ShortText, "City"),
    ]);
    FormBuilderService::reorder(&mut def, "resume", 0).expect("reorder");

    let response = accepted(
        &def,
        with_answers(json!({ "city": "Berlin", "years_exp": 2, "phone": "+49 30 1234567" })),
    );
    let ids: Vec<&str> = response.iter().map(|(id, _)| id).collect();
    assert_eq!(ids, vec!["resume", "name", "email", "phone", "years_exp", "city"]);

    let text = serde_json::to_string(&response).expect("serialize");
    assert!(text.starts_with("{\"resume\":"));
    assert!(!response.is_empty());
}

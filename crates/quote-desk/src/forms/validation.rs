//! Per-form validation. Every form declares its own policy; nothing here is
//! shared between forms beyond the individual checks.

use chrono::NaiveDate;
use serde::Serialize;

use super::schema::{FieldKind, FieldSchema, FormSchema, ListSchema, StepSchema};
use super::state::QuoteFormState;

/// How strictly a form enforces its own markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationPolicy {
    /// Required markers are display-only.
    Cosmetic,
    /// Required inputs must be non-blank.
    RequiredFields,
    /// Required inputs plus format checks on anything filled in.
    Schema,
}

/// A single problem attached to a field path such as `email` or `vehicles[1].vin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Issues for the fields and collections shown on one step (numbered from 1).
pub fn validate_step(schema: &FormSchema, state: &QuoteFormState, step: usize) -> Vec<FieldIssue> {
    match schema.step_at(step) {
        Some(step) => check_step(schema, state, step),
        None => Vec::new(),
    }
}

/// Issues across every step of the form.
pub fn validate_form(schema: &FormSchema, state: &QuoteFormState) -> Vec<FieldIssue> {
    schema
        .steps
        .iter()
        .flat_map(|step| check_step(schema, state, step))
        .collect()
}

fn check_step(schema: &FormSchema, state: &QuoteFormState, step: &StepSchema) -> Vec<FieldIssue> {
    let policy = schema.validation;
    if policy == ValidationPolicy::Cosmetic {
        return Vec::new();
    }

    let mut issues = Vec::new();
    for field in &step.fields {
        let value = state.field(&field.name).unwrap_or_default();
        if let Some(message) = check_value(policy, field, value) {
            issues.push(FieldIssue::new(field.name.clone(), message));
        }
    }

    for list_name in &step.lists {
        if let Some(list) = schema.list_schema(list_name) {
            check_list(policy, list, state, &mut issues);
        }
    }

    issues
}

fn check_list(
    policy: ValidationPolicy,
    list: &ListSchema,
    state: &QuoteFormState,
    issues: &mut Vec<FieldIssue>,
) {
    let Some(records) = state.list(&list.name) else {
        return;
    };

    for (index, record) in records.items().iter().enumerate() {
        for attribute in &list.attributes {
            let value = record.get(&attribute.name).unwrap_or_default();
            if let Some(message) = check_value(policy, attribute, value) {
                issues.push(FieldIssue::new(
                    format!("{}[{}].{}", list.name, index, attribute.name),
                    message,
                ));
            }
        }
    }
}

fn check_value(policy: ValidationPolicy, field: &FieldSchema, value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return field
            .required
            .then(|| format!("{} is required", field.label));
    }

    if policy != ValidationPolicy::Schema {
        return None;
    }

    let valid = match &field.kind {
        FieldKind::Text | FieldKind::TextArea => true,
        FieldKind::Email => is_email(trimmed),
        FieldKind::Phone => is_phone(trimmed),
        FieldKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok(),
        FieldKind::Number => trimmed
            .replace(',', "")
            .parse::<f64>()
            .map(|number| number.is_finite() && number >= 0.0)
            .unwrap_or(false),
        FieldKind::ZipCode => is_zip(trimmed),
        FieldKind::Select(options) => options.iter().any(|option| option == trimmed),
    };

    if valid {
        None
    } else {
        Some(format_hint(field))
    }
}

fn format_hint(field: &FieldSchema) -> String {
    match &field.kind {
        FieldKind::Email => format!("{} must be a valid email address", field.label),
        FieldKind::Phone => format!("{} must be a 10-digit phone number", field.label),
        FieldKind::Date => format!("{} must be a date (YYYY-MM-DD)", field.label),
        FieldKind::Number => format!("{} must be a non-negative number", field.label),
        FieldKind::ZipCode => format!("{} must be a 5-digit ZIP code", field.label),
        FieldKind::Select(options) => {
            format!("{} must be one of: {}", field.label, options.join(", "))
        }
        FieldKind::Text | FieldKind::TextArea => format!("{} is invalid", field.label),
    }
}

fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

fn is_phone(value: &str) -> bool {
    if value
        .chars()
        .any(|ch| !(ch.is_ascii_digit() || " ()-.+".contains(ch)))
    {
        return false;
    }
    let digits: String = value.chars().filter(char::is_ascii_digit).collect();
    digits.len() == 10 || (digits.len() == 11 && digits.starts_with('1'))
}

fn is_zip(value: &str) -> bool {
    let (base, plus_four) = match value.split_once('-') {
        Some((base, extension)) => (base, Some(extension)),
        None => (value, None),
    };
    let all_digits = |raw: &str, len: usize| raw.len() == len && raw.chars().all(|ch| ch.is_ascii_digit());
    all_digits(base, 5) && plus_four.map_or(true, |extension| all_digits(extension, 4))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::{FormKey, QuoteEndpoint};

    fn schema(policy: ValidationPolicy) -> FormSchema {
        FormSchema::new(FormKey::QuickQuote, QuoteEndpoint::QuickQuotes)
            .validation(policy)
            .step(
                StepSchema::new("Contact")
                    .field(FieldSchema::text("full_name", "Full Name").required())
                    .field(FieldSchema::new("email", "Email", FieldKind::Email).required())
                    .field(FieldSchema::new("zip_code", "ZIP Code", FieldKind::ZipCode)),
            )
            .step(
                StepSchema::new("Drivers")
                    .field(FieldSchema::select("coverage", "Coverage", &["Liability", "Full"]))
                    .list("drivers"),
            )
            .list(ListSchema::new(
                "drivers",
                "Driver",
                vec![
                    FieldSchema::text("first_name", "First Name").required(),
                    FieldSchema::new("date_of_birth", "Date of Birth", FieldKind::Date),
                ],
            ))
    }

    #[test]
    fn cosmetic_forms_never_report_issues() {
        let schema = schema(ValidationPolicy::Cosmetic);
        let state = QuoteFormState::for_schema(&schema);
        assert!(validate_form(&schema, &state).is_empty());
    }

    #[test]
    fn required_policy_checks_blanks_only() {
        let schema = schema(ValidationPolicy::RequiredFields);
        let mut state = QuoteFormState::for_schema(&schema);
        state.update_field("email", "not-an-email");
        state.update_field("zip_code", "abc");

        let issues = validate_form(&schema, &state);
        let fields: Vec<&str> = issues.iter().map(|issue| issue.field.as_str()).collect();
        assert_eq!(fields, vec!["full_name", "drivers[0].first_name"]);
    }

    #[test]
    fn schema_policy_checks_formats() {
        let schema = schema(ValidationPolicy::Schema);
        let mut state = QuoteFormState::for_schema(&schema);
        state.update_field("full_name", "Dana Ortiz");
        state.update_field("email", "dana@example");
        state.update_field("zip_code", "7870");
        state.update_field("coverage", "Gold");
        state
            .update_list_field("drivers", 0, "first_name", "Dana")
            .expect("valid attribute");
        state
            .update_list_field("drivers", 0, "date_of_birth", "04/12/1988")
            .expect("valid attribute");

        let issues = validate_form(&schema, &state);
        let fields: Vec<&str> = issues.iter().map(|issue| issue.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["email", "zip_code", "coverage", "drivers[0].date_of_birth"]
        );
    }

    #[test]
    fn step_validation_is_scoped_to_the_step() {
        let schema = schema(ValidationPolicy::RequiredFields);
        let state = QuoteFormState::for_schema(&schema);
        assert_eq!(validate_step(&schema, &state, 1).len(), 2);
        assert_eq!(validate_step(&schema, &state, 2).len(), 1);
        assert!(validate_step(&schema, &state, 9).is_empty());
    }

    #[test]
    fn format_helpers_accept_common_inputs() {
        assert!(is_email("agent@harbor-insurance.com"));
        assert!(!is_email("agent@@example.com"));
        assert!(is_phone("(512) 555-0142"));
        assert!(is_phone("+1 512 555 0142"));
        assert!(!is_phone("555-0142"));
        assert!(is_zip("78701"));
        assert!(is_zip("78701-1234"));
        assert!(!is_zip("78701-12"));
    }
}

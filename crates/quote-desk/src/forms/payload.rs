use serde_json::{Map, Value};

use super::schema::{FormKey, FormSchema, KeyStyle};
use super::state::QuoteFormState;

const FORM_TYPE_KEY: &str = "form_type";
const SOURCE_PAGE_KEY: &str = "source_page";

/// JSON body posted for one quote request.
///
/// A flat object: every scalar field, every collection as an array of
/// objects, `form_type`, and `source_page` when the form was embedded in a
/// landing page. Keys follow the form's own [`KeyStyle`].
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteSubmission {
    form: FormKey,
    key_style: KeyStyle,
    body: Map<String, Value>,
}

impl QuoteSubmission {
    pub fn from_state(
        schema: &FormSchema,
        state: &QuoteFormState,
        source_page: Option<&str>,
    ) -> Self {
        let style = schema.key_style;
        let mut body = Map::new();
        for (name, value) in state.fields() {
            body.insert(style.render(name), Value::String(value.clone()));
        }

        for (name, records) in state.lists() {
            let items = records
                .items()
                .iter()
                .map(|record| {
                    let object: Map<String, Value> = record
                        .values()
                        .iter()
                        .map(|(attr, value)| (style.render(attr), Value::String(value.clone())))
                        .collect();
                    Value::Object(object)
                })
                .collect();
            body.insert(style.render(name), Value::Array(items));
        }

        // Envelope keys win over same-named form fields.
        body.insert(
            style.render(FORM_TYPE_KEY),
            Value::String(schema.key.slug().to_string()),
        );
        match source_page {
            Some(page) => {
                body.insert(style.render(SOURCE_PAGE_KEY), Value::String(page.to_string()));
            }
            None => {
                body.remove(&style.render(SOURCE_PAGE_KEY));
            }
        }

        Self {
            form: schema.key,
            key_style: style,
            body,
        }
    }

    pub fn form(&self) -> FormKey {
        self.form
    }

    pub fn body(&self) -> &Map<String, Value> {
        &self.body
    }

    pub fn to_json(&self) -> Value {
        Value::Object(self.body.clone())
    }

    /// Look up a value by its canonical (snake_case) name.
    pub fn get(&self, canonical: &str) -> Option<&Value> {
        self.body.get(&self.key_style.render(canonical))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("quote payload must be a JSON object")]
    NotAnObject,
    #[error("payload is for form '{found}', but this endpoint accepts '{expected}'")]
    FormMismatch { expected: FormKey, found: String },
    #[error("field '{0}' must be a string, number, or boolean")]
    InvalidField(String),
    #[error("'{0}' must be an array of objects")]
    InvalidList(String),
}

/// A payload read back into form state on the receiving side.
#[derive(Debug, Clone)]
pub struct ReceivedPayload {
    pub state: QuoteFormState,
    pub source_page: Option<String>,
}

/// Rebuild form state from a body written in the schema's key style.
pub fn read_payload(schema: &FormSchema, payload: &Value) -> Result<ReceivedPayload, PayloadError> {
    let object = payload.as_object().ok_or(PayloadError::NotAnObject)?;
    let style = schema.key_style;
    let mut state = QuoteFormState::for_schema(schema);
    let mut source_page = None;

    for (key, value) in object {
        let canonical = style.canonical(key);

        if canonical == FORM_TYPE_KEY {
            let found = scalar_text(value).unwrap_or_default();
            if found != schema.key.slug() {
                return Err(PayloadError::FormMismatch {
                    expected: schema.key,
                    found,
                });
            }
            continue;
        }

        if canonical == SOURCE_PAGE_KEY {
            source_page = scalar_text(value).filter(|page| !page.trim().is_empty());
            continue;
        }

        if let Some(list) = schema.list_schema(&canonical) {
            let items = value
                .as_array()
                .ok_or_else(|| PayloadError::InvalidList(key.clone()))?;
            for (index, item) in items.iter().enumerate() {
                let attributes = item
                    .as_object()
                    .ok_or_else(|| PayloadError::InvalidList(key.clone()))?;
                if index > 0 {
                    state
                        .add_list_item(&list.name)
                        .map_err(|_| PayloadError::InvalidList(key.clone()))?;
                }
                for (attr_key, attr_value) in attributes {
                    let attribute = style.canonical(attr_key);
                    if list.attribute(&attribute).is_none() {
                        continue;
                    }
                    let text = scalar_text(attr_value)
                        .ok_or_else(|| PayloadError::InvalidField(format!("{key}.{attr_key}")))?;
                    state
                        .update_list_field(&list.name, index, &attribute, text)
                        .map_err(|_| PayloadError::InvalidList(key.clone()))?;
                }
            }
            continue;
        }

        let text = scalar_text(value).ok_or_else(|| PayloadError::InvalidField(key.clone()))?;
        state.update_field(canonical, text);
    }

    Ok(ReceivedPayload { state, source_page })
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::schema::{FieldSchema, ListSchema, QuoteEndpoint, StepSchema};
    use serde_json::json;

    fn schema(style: KeyStyle) -> FormSchema {
        FormSchema::new(FormKey::CommercialAuto, QuoteEndpoint::topic("commercial-auto"))
            .key_style(style)
            .step(StepSchema::new("Business").field(FieldSchema::text("business_name", "Name")))
            .step(StepSchema::new("Vehicles").list("vehicles"))
            .list(ListSchema::new(
                "vehicles",
                "Vehicle",
                vec![
                    FieldSchema::text("model_year", "Year"),
                    FieldSchema::text("make", "Make"),
                ],
            ))
    }

    #[test]
    fn camel_case_forms_render_every_key_in_camel_case() {
        let schema = schema(KeyStyle::CamelCase);
        let mut state = QuoteFormState::for_schema(&schema);
        state.update_field("business_name", "Acme Hauling");
        state
            .update_list_field("vehicles", 0, "model_year", "2021")
            .expect("valid attribute");

        let submission = QuoteSubmission::from_state(&schema, &state, Some("fleet-partners"));
        assert_eq!(
            submission.to_json(),
            json!({
                "formType": "commercial-auto",
                "sourcePage": "fleet-partners",
                "businessName": "Acme Hauling",
                "vehicles": [{ "modelYear": "2021", "make": "" }],
            })
        );
        assert!(submission.body().get("payload").is_none());
        assert_eq!(submission.get("business_name"), Some(&json!("Acme Hauling")));
    }

    #[test]
    fn form_fields_cannot_override_envelope_keys() {
        let schema = schema(KeyStyle::SnakeCase);
        let mut state = QuoteFormState::for_schema(&schema);
        state.update_field("form_type", "home");
        state.update_field("source_page", "somewhere-else");

        let embedded = QuoteSubmission::from_state(&schema, &state, Some("fleet-partners"));
        assert_eq!(embedded.get("form_type"), Some(&json!("commercial-auto")));
        assert_eq!(embedded.get("source_page"), Some(&json!("fleet-partners")));

        let direct = QuoteSubmission::from_state(&schema, &state, None);
        assert_eq!(direct.get("form_type"), Some(&json!("commercial-auto")));
        assert!(direct.get("source_page").is_none());

        let received = read_payload(&schema, &direct.to_json()).expect("payload parses");
        assert!(received.source_page.is_none());
    }

    #[test]
    fn read_payload_restores_lists_and_scalars() {
        let schema = schema(KeyStyle::CamelCase);
        let body = json!({
            "formType": "commercial-auto",
            "businessName": "Acme Hauling",
            "fleetSize": 3,
            "vehicles": [
                { "modelYear": 2021, "make": "Ford" },
                { "modelYear": "2019", "make": "Ram", "paint": "blue" }
            ]
        });

        let received = read_payload(&schema, &body).expect("payload parses");
        let state = received.state;
        assert_eq!(state.field("business_name"), Some("Acme Hauling"));
        assert_eq!(state.field("fleet_size"), Some("3"));
        let vehicles = state.list("vehicles").expect("vehicles");
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles.items()[0].get("model_year"), Some("2021"));
        assert_eq!(vehicles.items()[1].get("make"), Some("Ram"));
        assert_eq!(vehicles.items()[1].get("paint"), None);
        assert!(received.source_page.is_none());
    }

    #[test]
    fn read_payload_rejects_malformed_bodies() {
        let schema = schema(KeyStyle::SnakeCase);
        assert_eq!(
            read_payload(&schema, &json!(["not", "an", "object"])).unwrap_err(),
            PayloadError::NotAnObject
        );
        assert_eq!(
            read_payload(&schema, &json!({ "form_type": "home" })).unwrap_err(),
            PayloadError::FormMismatch {
                expected: FormKey::CommercialAuto,
                found: "home".to_string(),
            }
        );
        assert_eq!(
            read_payload(&schema, &json!({ "vehicles": { "make": "Ford" } })).unwrap_err(),
            PayloadError::InvalidList("vehicles".to_string())
        );
        assert_eq!(
            read_payload(&schema, &json!({ "business_name": { "legal": "Acme" } })).unwrap_err(),
            PayloadError::InvalidField("business_name".to_string())
        );
    }

    #[test]
    fn empty_collections_keep_one_blank_record() {
        let schema = schema(KeyStyle::SnakeCase);
        let received =
            read_payload(&schema, &json!({ "vehicles": [] })).expect("payload parses");
        assert_eq!(received.state.list("vehicles").map(|list| list.len()), Some(1));
    }
}

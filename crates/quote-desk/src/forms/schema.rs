use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::validation::ValidationPolicy;

/// Identifies one logical quote form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormKey {
    CommercialAuto,
    GeneralLiability,
    WorkersComp,
    BusinessOwners,
    Home,
    QuoteRequest,
    QuickQuote,
}

impl FormKey {
    pub const ALL: [FormKey; 7] = [
        FormKey::CommercialAuto,
        FormKey::GeneralLiability,
        FormKey::WorkersComp,
        FormKey::BusinessOwners,
        FormKey::Home,
        FormKey::QuoteRequest,
        FormKey::QuickQuote,
    ];

    pub const fn slug(self) -> &'static str {
        match self {
            FormKey::CommercialAuto => "commercial-auto",
            FormKey::GeneralLiability => "general-liability",
            FormKey::WorkersComp => "workers-comp",
            FormKey::BusinessOwners => "business-owners",
            FormKey::Home => "home",
            FormKey::QuoteRequest => "quote-request",
            FormKey::QuickQuote => "quick-quote",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            FormKey::CommercialAuto => "Commercial Auto",
            FormKey::GeneralLiability => "General Liability",
            FormKey::WorkersComp => "Workers' Compensation",
            FormKey::BusinessOwners => "Business Owner's Policy",
            FormKey::Home => "Homeowners",
            FormKey::QuoteRequest => "Quote Request",
            FormKey::QuickQuote => "Quick Quote",
        }
    }

    pub fn from_slug(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|key| key.slug() == needle)
    }
}

impl fmt::Display for FormKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Backend endpoint a form posts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteEndpoint {
    /// `POST /api/{topic}-quotes`
    Topic(String),
    /// `POST /api/quote-requests`
    QuoteRequests,
    /// `POST /api/quick-quotes`
    QuickQuotes,
}

impl QuoteEndpoint {
    pub fn topic(topic: impl Into<String>) -> Self {
        Self::Topic(topic.into())
    }

    /// The last path segment, e.g. `commercial-auto-quotes`.
    pub fn segment(&self) -> String {
        match self {
            QuoteEndpoint::Topic(topic) => format!("{topic}-quotes"),
            QuoteEndpoint::QuoteRequests => "quote-requests".to_string(),
            QuoteEndpoint::QuickQuotes => "quick-quotes".to_string(),
        }
    }

    pub fn path(&self) -> String {
        format!("/api/{}", self.segment())
    }

    /// Parse a path segment back into an endpoint.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "quote-requests" => Some(Self::QuoteRequests),
            "quick-quotes" => Some(Self::QuickQuotes),
            other => other
                .strip_suffix("-quotes")
                .filter(|topic| {
                    !topic.is_empty()
                        && topic
                            .chars()
                            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
                })
                .map(Self::topic),
        }
    }
}

impl Serialize for QuoteEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

impl fmt::Display for QuoteEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POST {}", self.path())
    }
}

/// Payload key convention of a form. Each form commits to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStyle {
    SnakeCase,
    CamelCase,
}

impl KeyStyle {
    /// Render a canonical snake_case name in this style.
    pub fn render(self, canonical: &str) -> String {
        match self {
            KeyStyle::SnakeCase => canonical.to_string(),
            KeyStyle::CamelCase => {
                let mut out = String::with_capacity(canonical.len());
                let mut upper_next = false;
                for ch in canonical.chars() {
                    if ch == '_' {
                        upper_next = !out.is_empty();
                    } else if upper_next {
                        out.push(ch.to_ascii_uppercase());
                        upper_next = false;
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }

    /// Map a key received in this style back to its canonical name.
    pub fn canonical(self, key: &str) -> String {
        match self {
            KeyStyle::SnakeCase => key.to_string(),
            KeyStyle::CamelCase => {
                let mut out = String::with_capacity(key.len() + 4);
                for ch in key.chars() {
                    if ch.is_ascii_uppercase() {
                        if !out.is_empty() {
                            out.push('_');
                        }
                        out.push(ch.to_ascii_lowercase());
                    } else {
                        out.push(ch);
                    }
                }
                out
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "options", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    Email,
    Phone,
    Date,
    Number,
    ZipCode,
    Select(Vec<String>),
}

/// One input on a step, or one attribute of a list record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn text(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, FieldKind::Text)
    }

    pub fn select(name: impl Into<String>, label: impl Into<String>, options: &[&str]) -> Self {
        Self::new(
            name,
            label,
            FieldKind::Select(options.iter().map(|option| option.to_string()).collect()),
        )
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn default_value(&self) -> String {
        self.default.clone().unwrap_or_default()
    }
}

/// A user-extensible collection of sub-records (vehicles, drivers, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSchema {
    pub name: String,
    pub item_label: String,
    pub attributes: Vec<FieldSchema>,
}

impl ListSchema {
    pub fn new(
        name: impl Into<String>,
        item_label: impl Into<String>,
        attributes: Vec<FieldSchema>,
    ) -> Self {
        Self {
            name: name.into(),
            item_label: item_label.into(),
            attributes,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&FieldSchema> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// One page of the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSchema {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldSchema>,
    /// Names of the collections edited on this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<String>,
}

impl StepSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields: Vec::new(),
            lists: Vec::new(),
        }
    }

    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn list(mut self, name: impl Into<String>) -> Self {
        self.lists.push(name.into());
        self
    }
}

/// Complete description of a quote form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSchema {
    pub key: FormKey,
    pub title: String,
    pub endpoint: QuoteEndpoint,
    pub steps: Vec<StepSchema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lists: Vec<ListSchema>,
    pub validation: ValidationPolicy,
    pub key_style: KeyStyle,
    /// Refuse `advance` while the current step has issues.
    pub gate_steps: bool,
}

impl FormSchema {
    pub fn new(key: FormKey, endpoint: QuoteEndpoint) -> Self {
        Self {
            key,
            title: key.label().to_string(),
            endpoint,
            steps: Vec::new(),
            lists: Vec::new(),
            validation: ValidationPolicy::Cosmetic,
            key_style: KeyStyle::SnakeCase,
            gate_steps: false,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn step(mut self, step: StepSchema) -> Self {
        self.steps.push(step);
        self
    }

    pub fn list(mut self, list: ListSchema) -> Self {
        self.lists.push(list);
        self
    }

    pub fn validation(mut self, policy: ValidationPolicy) -> Self {
        self.validation = policy;
        self
    }

    pub fn key_style(mut self, style: KeyStyle) -> Self {
        self.key_style = style;
        self
    }

    pub fn gated(mut self) -> Self {
        self.gate_steps = true;
        self
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Steps are numbered from 1.
    pub fn step_at(&self, number: usize) -> Option<&StepSchema> {
        number.checked_sub(1).and_then(|index| self.steps.get(index))
    }

    pub fn list_schema(&self, name: &str) -> Option<&ListSchema> {
        self.lists.iter().find(|list| list.name == name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.steps.iter().flat_map(|step| step.fields.iter())
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields().find(|field| field.name == name)
    }
}

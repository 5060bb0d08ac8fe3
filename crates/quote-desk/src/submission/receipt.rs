use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque identifier the backend hands back for a quote request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuoteReference(pub String);

impl fmt::Display for QuoteReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Acknowledgment of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// `None` when the backend accepted the request without naming it.
    pub reference: Option<QuoteReference>,
}

const REFERENCE_KEYS: [&str; 4] = ["referenceNumber", "reference_number", "reference", "id"];

/// Pull the reference out of a success body, checking the known key
/// spellings in order. Strings and integers are both accepted.
pub fn extract_reference(body: &Value) -> Option<QuoteReference> {
    let object = body.as_object()?;
    REFERENCE_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::String(text) if !text.trim().is_empty() => {
            Some(QuoteReference(text.trim().to_string()))
        }
        Value::Number(number) => Some(QuoteReference(number.to_string())),
        _ => None,
    })
}

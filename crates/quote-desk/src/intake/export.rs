use serde::Serialize;

use super::domain::QuoteRequestRecord;

pub const EXPORT_HEADERS: [&str; 9] = [
    "reference_number",
    "form",
    "status",
    "received_at",
    "name",
    "email",
    "phone",
    "business",
    "source_page",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write export row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to finish export: {0}")]
    Flush(String),
}

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    reference_number: &'a str,
    form: &'static str,
    status: &'static str,
    received_at: String,
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    business: &'a str,
    source_page: &'a str,
}

impl<'a> From<&'a QuoteRequestRecord> for ExportRow<'a> {
    fn from(record: &'a QuoteRequestRecord) -> Self {
        let contact = &record.contact;
        Self {
            reference_number: &record.reference.0,
            form: record.form.slug(),
            status: record.status.label(),
            received_at: record.received_at.to_rfc3339(),
            name: contact.name.as_deref().unwrap_or_default(),
            email: contact.email.as_deref().unwrap_or_default(),
            phone: contact.phone.as_deref().unwrap_or_default(),
            business: contact.business.as_deref().unwrap_or_default(),
            source_page: record.source_page.as_deref().unwrap_or_default(),
        }
    }
}

/// Flatten stored leads into a spreadsheet for the agent desk. A header row
/// is written even when there are no records.
pub fn export_csv(records: &[QuoteRequestRecord]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;
    for record in records {
        writer.serialize(ExportRow::from(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ExportError::Flush(err.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use super::*;
    use crate::forms::FormKey;
    use crate::intake::domain::{ContactSummary, QuoteRequestStatus};
    use crate::submission::QuoteReference;

    fn record(reference: &str, name: Option<&str>) -> QuoteRequestRecord {
        QuoteRequestRecord {
            reference: QuoteReference(reference.to_string()),
            form: FormKey::WorkersComp,
            endpoint: "/api/workers-comp-quotes".to_string(),
            received_at: Utc.with_ymd_and_hms(2026, 3, 2, 15, 4, 5).unwrap(),
            status: QuoteRequestStatus::Received,
            contact: ContactSummary {
                name: name.map(str::to_string),
                email: Some("owner@example.com".to_string()),
                phone: None,
                business: Some("Prairie Roofing, LLC".to_string()),
            },
            source_page: Some("roofers".to_string()),
            payload: json!({}),
        }
    }

    #[test]
    fn empty_export_still_has_headers() {
        let csv = export_csv(&[]).expect("export");
        assert_eq!(csv.trim_end(), EXPORT_HEADERS.join(","));
    }

    #[test]
    fn rows_quote_commas_and_blank_missing_values() {
        let csv = export_csv(&[record("QR-20260302-000001", Some("Dana Lee"))]).expect("export");
        let mut lines = csv.lines();
        lines.next();
        assert_eq!(
            lines.next(),
            Some(
                "QR-20260302-000001,workers-comp,received,2026-03-02T15:04:05+00:00,Dana Lee,\
                 owner@example.com,,\"Prairie Roofing, LLC\",roofers"
            )
        );
    }
}

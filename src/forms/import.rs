//! CSV import of leads.
//!
//! The file must have a header row. Recognized columns are `first_name`,
//! `last_name`, `email`, `phone`, `source`, `status` and `notes`, in any
//! order; other columns are ignored and blank cells become absent fields.
//! Every row passes the same validation as [`LeadForm`].

use crate::domain::lead::NewLead;
use crate::forms::FormError;
use crate::forms::lead::{LeadForm, LeadPayload};

#[derive(Default)]
struct Columns {
    first_name: Option<usize>,
    last_name: Option<usize>,
    email: Option<usize>,
    phone: Option<usize>,
    source: Option<usize>,
    status: Option<usize>,
    notes: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let mut columns = Columns::default();
        for (i, header) in headers.iter().enumerate() {
            let slot = match header.trim().to_lowercase().as_str() {
                "first_name" => &mut columns.first_name,
                "last_name" => &mut columns.last_name,
                "email" => &mut columns.email,
                "phone" => &mut columns.phone,
                "source" => &mut columns.source,
                "status" => &mut columns.status,
                "notes" => &mut columns.notes,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(i);
            }
        }
        columns
    }
}

fn cell(record: &csv::StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|i| record.get(i))
        .map(str::to_string)
}

/// Parses CSV bytes into leads ready for insertion.
pub fn parse_leads_csv(data: &[u8]) -> Result<Vec<NewLead>, FormError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data);

    let headers = reader
        .headers()
        .map_err(|e| FormError::Csv(e.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers);

    let mut leads = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.map_err(|e| FormError::Csv(e.to_string()))?;

        let form = LeadForm {
            first_name: cell(&record, columns.first_name),
            last_name: cell(&record, columns.last_name),
            email: cell(&record, columns.email),
            phone: cell(&record, columns.phone),
            source: cell(&record, columns.source),
            status: cell(&record, columns.status),
            notes: cell(&record, columns.notes),
        };
        // +2: one for the header row, one for 1-based numbering.
        let payload = LeadPayload::try_from(form)
            .map_err(|err| FormError::Csv(format!("row {}: {err}", line + 2)))?;

        leads.push(payload.into_new_lead());
    }

    Ok(leads)
}

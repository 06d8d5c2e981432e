use super::normalizer::{clean_header, header_key};
use super::RecordImportError;
use crate::scorecard::Record;
use std::io::Read;

const OWNER_COLUMNS: [&str; 2] = ["manager", "owner"];
const SUBJECT_COLUMNS: [&str; 2] = ["employee", "subject"];
const PERIOD_COLUMNS: [&str; 2] = ["week", "period"];

struct ColumnLayout {
    owner: usize,
    subject: usize,
    period: usize,
    kpis: Vec<(usize, String)>,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord) -> Result<Self, RecordImportError> {
        let keys: Vec<String> = headers.iter().map(header_key).collect();
        let find = |aliases: &[&str], canonical: &'static str| {
            keys.iter()
                .position(|key| aliases.contains(&key.as_str()))
                .ok_or(RecordImportError::MissingColumn(canonical))
        };

        let owner = find(&OWNER_COLUMNS, "Manager")?;
        let subject = find(&SUBJECT_COLUMNS, "Employee")?;
        let period = find(&PERIOD_COLUMNS, "Week")?;

        let mut kpis: Vec<(usize, String)> = Vec::new();
        for (idx, raw) in headers.iter().enumerate() {
            if [owner, subject, period].contains(&idx) {
                continue;
            }
            let name = clean_header(raw);
            if name.is_empty() {
                continue;
            }
            // Two columns cleaning to one name would overwrite each other's scores.
            if kpis.iter().any(|(_, seen)| *seen == name) {
                return Err(RecordImportError::DuplicateColumn(name));
            }
            kpis.push((idx, name));
        }

        Ok(Self {
            owner,
            subject,
            period,
            kpis,
        })
    }
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<Record>, RecordImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let layout = ColumnLayout::from_headers(csv_reader.headers()?)?;
    let mut records = Vec::new();

    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map(|pos| pos.line()).unwrap_or_default();

        let field = |idx: usize, column: &'static str| {
            let value = row.get(idx).unwrap_or_default();
            if value.is_empty() {
                Err(RecordImportError::EmptyField { line, column })
            } else {
                Ok(value)
            }
        };

        let mut record = Record::new(
            field(layout.owner, "Manager")?,
            field(layout.subject, "Employee")?,
            field(layout.period, "Week")?,
        );

        for (idx, kpi) in &layout.kpis {
            let raw = row.get(*idx).unwrap_or_default();
            if raw.is_empty() {
                continue;
            }
            let score = parse_score(raw).ok_or_else(|| RecordImportError::InvalidScore {
                line,
                column: kpi.clone(),
                value: raw.to_string(),
            })?;
            record.kpi_scores.insert(kpi.clone(), score);
        }

        records.push(record);
    }

    Ok(records)
}

fn parse_score(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

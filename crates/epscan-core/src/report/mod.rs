//! Result tables: writing extraction results, reading them back, and
//! checking them against a reference table.

mod accuracy;

pub use accuracy::{compare, AccuracyReport, Mismatch, DEFAULT_TOLERANCE};

use std::io;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::models::eps::EpsRecord;

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// Header of the file name column.
pub const FILENAME_COLUMN: &str = "filename";

/// Header of the EPS column.
pub const EPS_COLUMN: &str = "EPS";

/// Write records as a two-column table to any writer.
pub fn write_results_to<W: io::Write>(writer: W, records: &[EpsRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record([FILENAME_COLUMN, EPS_COLUMN])?;
    for record in records {
        wtr.write_record([record.filename.as_str(), format_eps(record.eps).as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write records to a CSV file.
pub fn write_results(path: &Path, records: &[EpsRecord]) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_results_to(file, records)
}

/// Read records from any reader. Columns are located by header name.
pub fn read_results_from<R: io::Read>(reader: R) -> Result<Vec<EpsRecord>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
    };
    let filename_idx = column(FILENAME_COLUMN)?;
    let eps_idx = column(EPS_COLUMN)?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        let filename = row.get(filename_idx).unwrap_or_default().to_string();
        let raw = row.get(eps_idx).unwrap_or_default();
        let eps = parse_eps(raw).ok_or_else(|| ReportError::InvalidValue {
            row: i + 1,
            value: raw.to_string(),
        })?;
        records.push(EpsRecord { filename, eps });
    }

    Ok(records)
}

/// Read records from a CSV file.
pub fn read_results(path: &Path) -> Result<Vec<EpsRecord>> {
    let file = std::fs::File::open(path)?;
    read_results_from(file)
}

/// Cell text for an EPS value; absent values are blank.
pub fn format_eps(eps: Option<Decimal>) -> String {
    eps.map(|v| v.to_string()).unwrap_or_default()
}

/// Parse an EPS cell. Blank and `nan` cells are absent; the outer `None`
/// means the cell is not a number.
fn parse_eps(raw: &str) -> Option<Option<Decimal>> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Some(None);
    }

    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
        .map(Some)
}

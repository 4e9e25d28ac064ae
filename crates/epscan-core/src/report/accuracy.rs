//! Comparison of produced EPS values against a reference table.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::models::eps::EpsRecord;

/// Default match tolerance: values closer than 0.001 agree.
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// A row whose produced value disagrees with the reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// File name from the produced table.
    pub filename: String,
    /// Produced value.
    pub output: Option<Decimal>,
    /// Reference value.
    pub expected: Option<Decimal>,
}

/// Outcome of comparing two result tables.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AccuracyReport {
    /// Number of rows in the produced table.
    pub total: usize,
    /// Paired rows whose values agree.
    pub matched: usize,
    /// Paired rows whose values disagree.
    pub mismatches: Vec<Mismatch>,
}

impl AccuracyReport {
    /// Percentage of produced rows that matched, 0 for an empty table.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.matched as f64 / self.total as f64 * 100.0
        }
    }
}

/// Compare produced records with reference records, pairing rows by
/// position. Rows past the end of the shorter table are not paired.
pub fn compare(output: &[EpsRecord], reference: &[EpsRecord], tolerance: Decimal) -> AccuracyReport {
    let mut report = AccuracyReport {
        total: output.len(),
        ..Default::default()
    };

    for (produced, expected) in output.iter().zip(reference) {
        if values_match(produced.eps, expected.eps, tolerance) {
            report.matched += 1;
        } else {
            debug!(
                "{}: produced {:?}, reference {:?}",
                produced.filename, produced.eps, expected.eps
            );
            report.mismatches.push(Mismatch {
                filename: produced.filename.clone(),
                output: produced.eps,
                expected: expected.eps,
            });
        }
    }

    if output.len() != reference.len() {
        debug!(
            "tables differ in length: {} produced, {} reference",
            output.len(),
            reference.len()
        );
    }

    report
}

/// A blank cell never matches, not even another blank.
fn values_match(output: Option<Decimal>, expected: Option<Decimal>, tolerance: Decimal) -> bool {
    match (output, expected) {
        (Some(a), Some(b)) => (a - b).abs() < tolerance,
        _ => false,
    }
}

// File: ./src/retention.rs
//! Retention planning over rows read back from the sheet.
//!
//! The newest date is taken from the *last* row as read, not from a scan of
//! every row. Sheets written by the demo generator are chronological, so the
//! two agree there. Reordered sheets get a different reference date.
use crate::model::{DATE_COLUMN, RECORD_WIDTH, Row, cell_text, parse_date};
use chrono::{Days, NaiveDate};

/// What happened to a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Kept,
    /// Dated before the threshold.
    Expired,
    /// Date cell present but not a `YYYY-MM-DD` date. Carries the raw text.
    InvalidDate(String),
    /// Fewer than five cells. Not counted anywhere.
    Short,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RetentionReport {
    pub kept: usize,
    pub expired: usize,
    pub invalid: Vec<String>,
    pub skipped_short: usize,
}

impl RetentionReport {
    pub fn dropped(&self) -> usize {
        self.expired + self.invalid.len()
    }

    fn record(&mut self, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Kept => self.kept += 1,
            RowOutcome::Expired => self.expired += 1,
            RowOutcome::InvalidDate(raw) => self.invalid.push(raw.clone()),
            RowOutcome::Short => self.skipped_short += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetentionPlan {
    pub reference: NaiveDate,
    pub threshold: NaiveDate,
    /// Surviving rows, in their original order and untouched.
    pub kept: Vec<Row>,
    pub report: RetentionReport,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Planned {
    NoRecords,
    /// The last row has no usable date; nothing may be changed.
    InvalidReference(String),
    Plan(RetentionPlan),
}

/// Classifies one row against `threshold`.
pub fn classify(row: &Row, threshold: NaiveDate) -> RowOutcome {
    if row.len() < RECORD_WIDTH {
        return RowOutcome::Short;
    }
    let raw = cell_text(&row[DATE_COLUMN]);
    match parse_date(&raw) {
        Some(date) if date >= threshold => RowOutcome::Kept,
        Some(_) => RowOutcome::Expired,
        None => RowOutcome::InvalidDate(raw),
    }
}

/// Date of the last row, or the raw text that failed to parse.
pub fn reference_date(rows: &[Row]) -> Option<Result<NaiveDate, String>> {
    let last = rows.last()?;
    let raw = last.get(DATE_COLUMN).map(cell_text).unwrap_or_default();
    Some(parse_date(&raw).ok_or(raw))
}

/// Splits `rows` into kept and dropped using a window of `retention_days`
/// ending at the reference date (inclusive on both ends).
pub fn plan(rows: &[Row], retention_days: u32) -> Planned {
    let reference = match reference_date(rows) {
        None => return Planned::NoRecords,
        Some(Err(raw)) => return Planned::InvalidReference(raw),
        Some(Ok(date)) => date,
    };
    let threshold = reference
        .checked_sub_days(Days::new(u64::from(retention_days)))
        .unwrap_or(NaiveDate::MIN);

    let mut kept = Vec::new();
    let mut report = RetentionReport::default();
    for row in rows {
        let outcome = classify(row, threshold);
        if let RowOutcome::InvalidDate(raw) = &outcome {
            log::warn!("Invalid date format: {}", raw);
        }
        if outcome == RowOutcome::Kept {
            kept.push(row.clone());
        }
        report.record(&outcome);
    }

    Planned::Plan(RetentionPlan {
        reference,
        threshold,
        kept,
        report,
    })
}

// File: src/controller.rs
//! The two public operations: fill the range with demo rows, and prune rows
//! that fall outside the retention window.
//!
//! Each operation establishes its own session. Progress is printed to stdout
//! as each remote call completes and the structured result is returned.
use crate::client::{CredentialProvider, SheetSession, ValuesApi};
use crate::config::Config;
use crate::demo::generate_records;
use crate::model::Row;
use crate::retention::{self, Planned, RetentionReport};
use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoSummary {
    pub rows: usize,
    pub updated_cells: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PruneOutcome {
    /// The range was empty; nothing was cleared or written.
    NoRecords,
    /// The last row's date did not parse; the sheet was left as it was.
    InvalidReference(String),
    Pruned {
        reference: NaiveDate,
        threshold: NaiveDate,
        report: RetentionReport,
        /// `None` when every row was dropped and nothing was written back.
        updated_cells: Option<u64>,
    },
}

/// Overwrites the range with `count` demo rows dated up to the day before `today`.
pub async fn write_demo_rows<A: ValuesApi>(
    api: &A,
    today: NaiveDate,
    count: usize,
    rng: &mut fastrand::Rng,
) -> Result<DemoSummary> {
    let rows: Vec<Row> = generate_records(today, count, rng)
        .iter()
        .map(|r| r.to_row())
        .collect();
    let row_count = rows.len();
    let updated_cells = api.update(rows).await.context("Writing demo rows")?;
    log::info!("Wrote {} demo rows ({} cells)", row_count, updated_cells);
    println!("{} cells updated.", updated_cells);
    Ok(DemoSummary {
        rows: row_count,
        updated_cells,
    })
}

/// Read, filter, clear, and rewrite the range.
pub async fn prune_rows<A: ValuesApi>(api: &A, retention_days: u32) -> Result<PruneOutcome> {
    let rows = api.read().await.context("Reading rows")?;
    log::debug!("Read {} rows", rows.len());

    let plan = match retention::plan(&rows, retention_days) {
        Planned::NoRecords => {
            println!("No records found in the specified range.");
            return Ok(PruneOutcome::NoRecords);
        }
        Planned::InvalidReference(raw) => {
            log::error!("Reference row has an invalid date: {:?}", raw);
            println!("Invalid date format: {}", raw);
            return Ok(PruneOutcome::InvalidReference(raw));
        }
        Planned::Plan(plan) => plan,
    };

    log::info!(
        "Reference date {}, keeping rows dated {} or later ({} kept, {} dropped, {} short)",
        plan.reference,
        plan.threshold,
        plan.report.kept,
        plan.report.dropped(),
        plan.report.skipped_short
    );
    for raw in &plan.report.invalid {
        println!("Invalid date format: {}", raw);
    }
    println!("{} records kept.", plan.report.kept);

    api.clear().await.context("Clearing range")?;
    println!("Cleared the original records.");

    let updated_cells = if plan.kept.is_empty() {
        println!(
            "All records were older than {} days; no records to update.",
            retention_days
        );
        None
    } else {
        let cells = api.update(plan.kept).await.context("Rewriting kept rows")?;
        println!("{} cells updated after deletion.", cells);
        Some(cells)
    };

    Ok(PruneOutcome::Pruned {
        reference: plan.reference,
        threshold: plan.threshold,
        report: plan.report,
        updated_cells,
    })
}

pub async fn generate_demo_data<P>(config: &Config, provider: &P) -> Result<DemoSummary>
where
    P: CredentialProvider + Sync,
{
    let session = SheetSession::establish(config, provider).await?;
    let mut rng = fastrand::Rng::new();
    let today = Local::now().date_naive();
    write_demo_rows(&session, today, config.demo_rows, &mut rng).await
}

pub async fn delete_old_records<P>(config: &Config, provider: &P) -> Result<PruneOutcome>
where
    P: CredentialProvider + Sync,
{
    let session = SheetSession::establish(config, provider).await?;
    prune_rows(&session, config.retention_days).await
}

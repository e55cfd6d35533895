//! PDF reports from expense-tracker CSV exports.

mod ledger;
mod pdf;

pub use ledger::{
    Column, Ledger, LedgerRow, MONTH_NAMES, MonthSummary, Totals, Transaction, format_amount,
    format_date, month_name, parse_amount, parse_date, read_transactions,
};
pub use pdf::{LineStyle, REPORT_TITLE, ReportLine, layout, render_pdf};

use std::fs::File;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

/// Errors that can occur while building a report.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("None of the expected columns (account, title, category name, note, date, currency, amount) were found")]
    NoColumns,

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What went into a written report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSummary {
    pub output: PathBuf,
    pub transactions: usize,
    pub months: usize,
    pub pages: usize,
}

/// PDF written next to `csv`, with the same stem.
pub fn pdf_path_for(csv: &Path) -> PathBuf {
    csv.with_extension("pdf")
}

/// `.csv` files in `dir` (case-insensitive), sorted by name.
pub fn csv_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Read `csv`, then write its transaction report to `output`.
pub fn write_report(csv: &Path, output: &Path) -> Result<ReportSummary, ReportError> {
    let (columns, transactions) = read_transactions(File::open(csv)?)?;
    let ledger = Ledger::new(columns, transactions);
    info!(
        "{}: {} transactions, final balance {}",
        csv.display(),
        ledger.rows.len(),
        format_amount(ledger.totals().final_balance)
    );

    let lines = layout(&ledger);
    let pages = render_pdf(&lines, REPORT_TITLE, output)?;

    Ok(ReportSummary {
        output: output.to_path_buf(),
        transactions: ledger.rows.len(),
        months: ledger.monthly().len(),
        pages,
    })
}

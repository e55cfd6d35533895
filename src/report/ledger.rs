//! Transaction rows, running balance and monthly totals.

use std::collections::BTreeMap;
use std::io::Read;

use chrono::{Datelike, NaiveDateTime};
use serde::Deserialize;

use super::ReportError;

pub const MONTH_NAMES: [&str; 12] = [
    "Enero",
    "Febrero",
    "Marzo",
    "Abril",
    "Mayo",
    "Junio",
    "Julio",
    "Agosto",
    "Septiembre",
    "Octubre",
    "Noviembre",
    "Diciembre",
];

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y  -   %I:%M%p";

/// Export columns shown in the report, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Account,
    Title,
    Category,
    Note,
    Date,
    Currency,
    Amount,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Account,
        Column::Title,
        Column::Category,
        Column::Note,
        Column::Date,
        Column::Currency,
        Column::Amount,
    ];

    /// Header name in the CSV export.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Account => "account",
            Column::Title => "title",
            Column::Category => "category name",
            Column::Note => "note",
            Column::Date => "date",
            Column::Currency => "currency",
            Column::Amount => "amount",
        }
    }

    /// Header shown in the report.
    pub fn label(&self) -> &'static str {
        match self {
            Column::Account => "Cuenta",
            Column::Title => "Título",
            Column::Category => "Categoría",
            Column::Note => "Nota",
            Column::Date => "Fecha",
            Column::Currency => "Moneda",
            Column::Amount => "Monto",
        }
    }

    /// Width in characters of the report column.
    pub fn width(&self) -> usize {
        match self {
            Column::Account => 12,
            Column::Title => 30,
            Column::Category => 22,
            Column::Note => 60,
            Column::Date => 24,
            Column::Currency => 7,
            Column::Amount => 12,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    account: String,
    title: String,
    #[serde(rename = "category name")]
    category: String,
    note: String,
    date: String,
    currency: String,
    amount: String,
}

/// One exported transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub account: String,
    pub title: String,
    pub category: String,
    pub note: String,
    /// Date as written in the export.
    pub raw_date: String,
    pub date: Option<NaiveDateTime>,
    pub currency: String,
    pub amount: f64,
}

impl Transaction {
    /// Text of `column` as shown in the report.
    pub fn cell(&self, column: Column) -> String {
        match column {
            Column::Account => self.account.clone(),
            Column::Title => self.title.clone(),
            Column::Category => self.category.clone(),
            Column::Note => self.note.clone(),
            Column::Date => format_date(self),
            Column::Currency => self.currency.clone(),
            Column::Amount => self.amount.to_string(),
        }
    }

    /// `(year, month)` of the transaction, when its date parses.
    pub fn month(&self) -> Option<(i32, u32)> {
        self.date.map(|d| (d.year(), d.month()))
    }
}

/// Parse `YYYY-MM-DD HH:MM:SS`, ignoring fractional seconds.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let head = raw.trim().split('.').next()?;
    NaiveDateTime::parse_from_str(head, DATE_FORMAT).ok()
}

/// Amount as a number; anything unparseable counts as zero.
pub fn parse_amount(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// `DD/MM/YYYY  -   HH:MMAM`, or the raw text when the date did not parse.
pub fn format_date(transaction: &Transaction) -> String {
    match transaction.date {
        Some(date) => date.format(DISPLAY_DATE_FORMAT).to_string(),
        None => transaction.raw_date.clone(),
    }
}

pub fn format_amount(value: f64) -> String {
    format!("Q{value:.2}")
}

/// Spanish month name for a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTH_NAMES.get(i as usize))
        .copied()
        .unwrap_or("?")
}

/// Read a transaction export. Returns the known columns present and the rows.
pub fn read_transactions<R: Read>(input: R) -> Result<(Vec<Column>, Vec<Transaction>), ReportError> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);

    let headers = reader.headers()?.clone();
    let columns: Vec<Column> = Column::ALL
        .into_iter()
        .filter(|c| headers.iter().any(|h| h.trim() == c.header()))
        .collect();
    if columns.is_empty() {
        return Err(ReportError::NoColumns);
    }

    let mut transactions = Vec::new();
    for row in reader.deserialize() {
        let row: CsvRow = row?;
        transactions.push(Transaction {
            date: parse_date(&row.date),
            amount: parse_amount(&row.amount),
            account: row.account,
            title: row.title,
            category: row.category,
            note: row.note,
            raw_date: row.date,
            currency: row.currency,
        });
    }

    Ok((columns, transactions))
}

/// A transaction and the balance after it.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub transaction: Transaction,
    pub balance: f64,
}

/// Income and expense of one calendar month, independent of earlier months.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub income: f64,
    pub expense: f64,
}

impl MonthSummary {
    pub fn net(&self) -> f64 {
        self.income + self.expense
    }

    pub fn title(&self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub final_balance: f64,
}

/// Transactions sorted oldest first with a running balance.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
    pub columns: Vec<Column>,
    pub rows: Vec<LedgerRow>,
}

impl Ledger {
    /// Rows without a parseable date go last, in file order.
    pub fn new(columns: Vec<Column>, mut transactions: Vec<Transaction>) -> Self {
        transactions.sort_by(|a, b| match (a.date, b.date) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });

        let mut balance = 0.0;
        let rows = transactions
            .into_iter()
            .map(|transaction| {
                balance += transaction.amount;
                LedgerRow {
                    transaction,
                    balance,
                }
            })
            .collect();

        Self { columns, rows }
    }

    pub fn monthly(&self) -> Vec<MonthSummary> {
        let mut months: BTreeMap<(i32, u32), MonthSummary> = BTreeMap::new();
        for row in &self.rows {
            let Some((year, month)) = row.transaction.month() else {
                continue;
            };
            let summary = months.entry((year, month)).or_insert(MonthSummary {
                year,
                month,
                income: 0.0,
                expense: 0.0,
            });
            let amount = row.transaction.amount;
            if amount > 0.0 {
                summary.income += amount;
            } else if amount < 0.0 {
                summary.expense += amount;
            }
        }
        months.into_values().collect()
    }

    pub fn totals(&self) -> Totals {
        let amounts = self.rows.iter().map(|r| r.transaction.amount);
        Totals {
            income: amounts.clone().filter(|a| *a > 0.0).sum(),
            expense: amounts.filter(|a| *a < 0.0).sum(),
            final_balance: self.rows.last().map_or(0.0, |r| r.balance),
        }
    }
}

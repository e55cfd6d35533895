//! Text layout of a ledger and its PDF rendering.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument};

use super::ReportError;
use super::ledger::{Ledger, format_amount, month_name};

/// Landscape US legal.
const PAGE_WIDTH_MM: f32 = 355.6;
const PAGE_HEIGHT_MM: f32 = 215.9;
const MARGIN_MM: f32 = 12.0;

const ROW_NUMBER_WIDTH: usize = 4;
const BALANCE_WIDTH: usize = 14;

pub const REPORT_TITLE: &str = "Reporte de Transacciones";
pub const MONTHLY_TITLE: &str = "Resumen por Meses";
pub const TOTALS_TITLE: &str = "Resumen General";

const MONTHLY_NOTE: &str = "Ingresos, egresos y balance de cada mes por separado, sin saldos de meses anteriores.";
const TOTALS_NOTE: &str = "Totales de todas las transacciones, desde la primera hasta la última.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Title,
    Heading,
    Body,
    Table,
    Blank,
}

impl LineStyle {
    fn font_size(&self) -> f32 {
        match self {
            LineStyle::Title => 18.0,
            LineStyle::Heading => 10.0,
            LineStyle::Body => 8.0,
            LineStyle::Table | LineStyle::Blank => 7.0,
        }
    }

    fn leading_mm(&self) -> f32 {
        match self {
            LineStyle::Title => 10.0,
            LineStyle::Heading => 6.5,
            LineStyle::Body => 4.5,
            LineStyle::Table | LineStyle::Blank => 4.0,
        }
    }
}

/// One line of the rendered report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub style: LineStyle,
    pub text: String,
}

impl ReportLine {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
        }
    }

    fn blank() -> Self {
        Self::new(LineStyle::Blank, "")
    }
}

/// Fit `text` on one line of `width` characters, left aligned.
fn cell(text: &str, width: usize) -> String {
    let flat = text.replace(['\n', '\r'], " ");
    let fitted: String = flat.chars().take(width.saturating_sub(1)).collect();
    format!("{fitted:<width$}")
}

fn table_header(ledger: &Ledger) -> String {
    let mut line = cell("#", ROW_NUMBER_WIDTH);
    for column in &ledger.columns {
        line.push_str(&cell(column.label(), column.width()));
    }
    line.push_str(&format!("{:>BALANCE_WIDTH$}", "Balance"));
    line
}

/// Lay out the transaction table, the monthly summaries and the totals.
pub fn layout(ledger: &Ledger) -> Vec<ReportLine> {
    let mut lines = vec![
        ReportLine::new(LineStyle::Title, REPORT_TITLE),
        ReportLine::new(LineStyle::Table, table_header(ledger)),
    ];

    let mut current_month = None;
    for (i, row) in ledger.rows.iter().enumerate() {
        if let Some(month) = row.transaction.month()
            && current_month != Some(month)
        {
            current_month = Some(month);
            let (year, number) = month;
            lines.push(ReportLine::new(
                LineStyle::Heading,
                format!("{} {}", month_name(number), year),
            ));
        }

        let mut text = cell(&(i + 1).to_string(), ROW_NUMBER_WIDTH);
        for column in &ledger.columns {
            text.push_str(&cell(&row.transaction.cell(*column), column.width()));
        }
        text.push_str(&format!("{:>BALANCE_WIDTH$}", format_amount(row.balance)));
        lines.push(ReportLine::new(LineStyle::Table, text));
    }

    let months = ledger.monthly();
    if !months.is_empty() {
        lines.push(ReportLine::blank());
        lines.push(ReportLine::new(LineStyle::Title, MONTHLY_TITLE));
        lines.push(ReportLine::new(LineStyle::Body, MONTHLY_NOTE));
        for month in &months {
            lines.push(ReportLine::new(
                LineStyle::Table,
                format!(
                    "{:<18}Ingresos: {:>14}   Egresos: {:>14}   Balance: {:>14}",
                    month.title(),
                    format_amount(month.income),
                    format_amount(month.expense),
                    format_amount(month.net())
                ),
            ));
        }
    }

    let totals = ledger.totals();
    lines.push(ReportLine::blank());
    lines.push(ReportLine::new(LineStyle::Title, TOTALS_TITLE));
    lines.push(ReportLine::new(LineStyle::Body, TOTALS_NOTE));
    for (label, value) in [
        ("Total Ingresos:", totals.income),
        ("Total Egresos:", totals.expense),
        ("Balance Final:", totals.final_balance),
    ] {
        lines.push(ReportLine::new(
            LineStyle::Table,
            format!("{label:<18}{:>14}", format_amount(value)),
        ));
    }

    lines
}

struct Fonts {
    bold: IndirectFontRef,
    regular: IndirectFontRef,
    mono: IndirectFontRef,
}

impl Fonts {
    fn for_style(&self, style: LineStyle) -> &IndirectFontRef {
        match style {
            LineStyle::Title | LineStyle::Heading => &self.bold,
            LineStyle::Body => &self.regular,
            LineStyle::Table | LineStyle::Blank => &self.mono,
        }
    }
}

fn pdf_error(e: impl std::fmt::Debug) -> ReportError {
    ReportError::Pdf(format!("{e:?}"))
}

/// Write `lines` to a landscape legal PDF, adding pages as needed.
pub fn render_pdf(lines: &[ReportLine], title: &str, path: &Path) -> Result<usize, ReportError> {
    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Contenido",
    );
    let fonts = Fonts {
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?,
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?,
        mono: doc
            .add_builtin_font(BuiltinFont::Courier)
            .map_err(pdf_error)?,
    };

    let mut pages = 1;
    let mut current = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    for line in lines {
        let leading = line.style.leading_mm();
        if y - leading < MARGIN_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Contenido");
            current = doc.get_page(page).get_layer(layer);
            y = PAGE_HEIGHT_MM - MARGIN_MM;
            pages += 1;
        }
        y -= leading;

        if line.style != LineStyle::Blank {
            current.use_text(
                line.text.as_str(),
                line.style.font_size(),
                Mm(MARGIN_MM),
                Mm(y),
                fonts.for_style(line.style),
            );
        }
    }

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file)).map_err(pdf_error)?;
    Ok(pages)
}

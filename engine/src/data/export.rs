// Tabular export of the session history. Numeric columns stay raw numbers.
use crate::error::EngineError;
use chrono::{DateTime, Utc};
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use rust_xlsxwriter::Workbook;
use serde::{Deserialize, Serialize};
use shared::models::HistoryEntry;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
    Xlsx,
}

impl ExportFormat {
    /// Format implied by the file extension, if it names one.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            "xlsx" => Some(ExportFormat::Xlsx),
            _ => None,
        }
    }
}

pub const XLSX_SHEET_NAME: &str = "Simulações";

/// Flat, one-row view of a history entry.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    pub position: usize,
    pub saved_at: DateTime<Utc>,
    pub unit_price: f64,
    pub quantity_sold: u64,
    pub shipping_pct: f64,
    pub fees_pct: f64,
    pub tax_pct: f64,
    pub supplies_mode: String,
    pub supplies_pct: f64,
    pub revenue: f64,
    pub shipping_cost: f64,
    pub fees_cost: f64,
    pub tax_cost: f64,
    pub supplies_cost: f64,
    pub total_variable_cost: f64,
    pub contribution_margin: f64,
    pub fixed_costs: f64,
    pub net_profit: f64,
    pub net_profit_pct: f64,
}

impl HistoryRecord {
    /// `position` is 1-based.
    pub fn from_entry(position: usize, entry: &HistoryEntry) -> Self {
        let (input, result) = (&entry.input, &entry.result);
        HistoryRecord {
            position,
            saved_at: entry.saved_at,
            unit_price: input.unit_price,
            quantity_sold: input.quantity_sold,
            shipping_pct: input.shipping_pct,
            fees_pct: input.fees_pct,
            tax_pct: input.tax_pct,
            supplies_mode: input.supplies.mode_name().to_string(),
            supplies_pct: result.supplies_pct(),
            revenue: result.revenue,
            shipping_cost: result.shipping_cost,
            fees_cost: result.fees_cost,
            tax_cost: result.tax_cost,
            supplies_cost: result.supplies_cost,
            total_variable_cost: result.total_variable_cost,
            contribution_margin: result.contribution_margin,
            fixed_costs: result.fixed_costs,
            net_profit: result.net_profit,
            net_profit_pct: result.net_profit_pct,
        }
    }
}

pub fn records(entries: &[HistoryEntry]) -> Vec<HistoryRecord> {
    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| HistoryRecord::from_entry(idx + 1, entry))
        .collect()
}

/// Column names, taken from the serde field names of `HistoryRecord`.
pub fn csv_headers() -> Result<StringRecord, EngineError> {
    let mut scratch = csv::Writer::from_writer(Vec::new());
    scratch.serialize(HistoryRecord::default())?;
    let bytes = scratch
        .into_inner()
        .map_err(|e| EngineError::ExportError(format!("Failed to build CSV header: {}", e)))?;
    let mut rdr = ReaderBuilder::new().from_reader(bytes.as_slice());
    Ok(rdr.headers()?.clone())
}

/// Writes a header row followed by one row per entry, even when empty.
pub fn write_csv<W: Write>(entries: &[HistoryEntry], writer: W) -> Result<(), EngineError> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    if entries.is_empty() {
        wtr.write_record(&csv_headers()?)?;
    }
    for record in records(entries) {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(entries: &[HistoryEntry], writer: W) -> Result<(), EngineError> {
    serde_json::to_writer_pretty(writer, &records(entries))?;
    Ok(())
}

/// Single-sheet workbook with the same columns as the CSV. Numeric cells are
/// written as numbers.
pub fn write_xlsx<W: Write>(entries: &[HistoryEntry], mut writer: W) -> Result<(), EngineError> {
    let mut csv_buf = Vec::new();
    write_csv(entries, &mut csv_buf)?;
    let mut rdr = ReaderBuilder::new().has_headers(false).from_reader(csv_buf.as_slice());

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET_NAME)?;
    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        for (col, field) in record.iter().enumerate() {
            let (row, col) = (row as u32, col as u16);
            // header row and text columns stay strings
            match field.parse::<f64>() {
                Ok(number) if row > 0 => sheet.write_number(row, col, number)?,
                _ => sheet.write_string(row, col, field)?,
            };
        }
    }
    writer.write_all(&workbook.save_to_buffer()?)?;
    Ok(())
}

pub fn write<W: Write>(entries: &[HistoryEntry], format: ExportFormat, writer: W) -> Result<(), EngineError> {
    match format {
        ExportFormat::Csv => write_csv(entries, writer),
        ExportFormat::Json => write_json(entries, writer),
        ExportFormat::Xlsx => write_xlsx(entries, writer),
    }
}

/// Creates (or truncates) `path` and writes the export. Returns the number of data rows.
pub fn export_to_path(entries: &[HistoryEntry], path: &Path, format: ExportFormat) -> Result<usize, EngineError> {
    let file = File::create(path).map_err(|e| {
        EngineError::ExportError(format!("Failed to create export file '{}': {}", path.display(), e))
    })?;
    let mut out = BufWriter::new(file);
    write(entries, format, &mut out)?;
    out.flush()?;
    tracing::info!(path = %path.display(), rows = entries.len(), ?format, "Exported simulation history");
    Ok(entries.len())
}

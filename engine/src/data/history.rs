// Append-only history of saved simulations for one session
use super::export::{self, ExportFormat};
use crate::error::EngineError;
use shared::models::HistoryEntry;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Default, Clone)]
pub struct SessionHistory {
    entries: Vec<HistoryEntry>,
}

impl SessionHistory {
    pub fn new() -> Self {
        SessionHistory { entries: Vec::new() }
    }

    /// Adds `entry` at the end. Identical entries are kept.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push(entry);
        tracing::debug!(entries = self.entries.len(), "Appended simulation to history");
    }

    /// Entries in insertion order.
    pub fn all(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn export_csv<W: Write>(&self, writer: W) -> Result<(), EngineError> {
        export::write_csv(&self.entries, writer)
    }

    pub fn export_json<W: Write>(&self, writer: W) -> Result<(), EngineError> {
        export::write_json(&self.entries, writer)
    }

    pub fn export_to_path(&self, path: &Path, format: ExportFormat) -> Result<usize, EngineError> {
        export::export_to_path(&self.entries, path, format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::compute;
    use shared::models::{SimulationInput, SuppliesCost};

    fn entry(unit_price: f64) -> HistoryEntry {
        let input = SimulationInput {
            unit_price,
            quantity_sold: 10,
            shipping_pct: 5.0,
            fees_pct: 5.0,
            tax_pct: 5.0,
            supplies: SuppliesCost::Percent(5.0),
            fixed_costs: 0.0,
        };
        HistoryEntry::new(input, compute(&input))
    }

    #[test]
    fn test_starts_empty() {
        let history = SessionHistory::new();
        assert!(history.is_empty());
        assert!(history.all().is_empty());
    }

    #[test]
    fn test_append_preserves_order() {
        let mut history = SessionHistory::new();
        for price in [10.0, 30.0, 20.0] {
            history.append(entry(price));
        }
        assert_eq!(history.len(), 3);
        let prices: Vec<f64> = history.all().iter().map(|e| e.input.unit_price).collect();
        assert_eq!(prices, [10.0, 30.0, 20.0]);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut history = SessionHistory::new();
        let e = entry(10.0);
        history.append(e.clone());
        history.append(e.clone());
        assert_eq!(history.len(), 2);
        assert_eq!(history.all()[0], history.all()[1]);
    }

    #[test]
    fn test_export_csv_has_n_rows_plus_header() {
        let mut history = SessionHistory::new();
        for n in 0..5 {
            history.append(entry(n as f64));
        }
        let mut buf = Vec::new();
        history.export_csv(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 6);
    }

    #[test]
    fn test_export_json_keeps_insertion_order() {
        let mut history = SessionHistory::new();
        history.append(entry(30.0));
        history.append(entry(10.0));
        let mut buf = Vec::new();
        history.export_json(&mut buf).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["unitPrice"], 30.0);
        assert_eq!(value[1]["unitPrice"], 10.0);
        assert_eq!(value[1]["position"], 2);
    }

    #[test]
    fn test_histories_are_independent() {
        let mut first = SessionHistory::new();
        let second = SessionHistory::new();
        first.append(entry(1.0));
        assert_eq!(first.len(), 1);
        assert!(second.is_empty());
    }
}

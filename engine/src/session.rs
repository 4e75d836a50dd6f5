// One user session: current simulation, its result and the saved history.
// Each session owns its history; nothing is shared between sessions.
use crate::calculator;
use crate::config::SimulatorSettings;
use crate::data::{ExportFormat, SessionHistory};
use crate::error::EngineError;
use shared::models::{HistoryEntry, SimulationInput, SimulationResult};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub struct Session {
    id: Uuid,
    settings: SimulatorSettings,
    input: SimulationInput,
    result: SimulationResult,
    history: SessionHistory,
}

impl Session {
    pub fn new(settings: SimulatorSettings) -> Self {
        let input = settings.defaults.to_input();
        let result = calculator::compute(&input);
        let id = Uuid::new_v4();
        tracing::info!(session_id = %id, "Started simulation session");
        Session {
            id,
            settings,
            input,
            result,
            history: SessionHistory::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn input(&self) -> &SimulationInput {
        &self.input
    }

    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    pub fn history(&self) -> &SessionHistory {
        &self.history
    }

    /// Replaces the current input and recomputes. The previous input is kept
    /// when `input` is out of range.
    pub fn set_input(&mut self, input: SimulationInput) -> Result<&SimulationResult, EngineError> {
        calculator::validate(&input)?;
        self.input = input;
        Ok(self.calculate())
    }

    pub fn calculate(&mut self) -> &SimulationResult {
        self.result = calculator::compute(&self.input);
        tracing::debug!(session_id = %self.id, net_profit = self.result.net_profit, "Recalculated");
        &self.result
    }

    /// Appends the current simulation to the history and returns the new length.
    pub fn save(&mut self) -> usize {
        self.history.append(HistoryEntry::new(self.input, self.result));
        tracing::info!(session_id = %self.id, entries = self.history.len(), "Saved simulation");
        self.history.len()
    }

    /// Exports the history. Without an explicit format, the extension of an
    /// explicit path decides; otherwise the configured file name and format apply.
    pub fn export(&self, path: Option<&Path>, format: Option<ExportFormat>) -> Result<(PathBuf, usize), EngineError> {
        let format = format
            .or_else(|| path.and_then(ExportFormat::from_path))
            .unwrap_or(self.settings.export.format);
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(&self.settings.export.file_name));
        let rows = self.history.export_to_path(&path, format)?;
        Ok((path, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::SuppliesCost;
    use tempfile::tempdir;

    #[test]
    fn test_new_session_uses_defaults() {
        let session = Session::new(SimulatorSettings::default());
        assert!(session.history().is_empty());
        assert_eq!(session.input().unit_price, 500.0);
        assert_eq!(session.result().net_profit, 120_000.0);
    }

    #[test]
    fn test_set_input_recomputes() {
        let mut session = Session::new(SimulatorSettings::default());
        let input = SimulationInput { quantity_sold: 0, ..*session.input() };
        let result = session.set_input(input).unwrap();
        assert_eq!(result.revenue, 0.0);
        assert_eq!(result.net_profit, -100_000.0);
    }

    #[test]
    fn test_invalid_input_keeps_previous() {
        let mut session = Session::new(SimulatorSettings::default());
        let before = *session.input();
        let bad = SimulationInput { supplies: SuppliesCost::Percent(120.0), ..before };
        assert!(session.set_input(bad).is_err());
        assert_eq!(*session.input(), before);
        assert_eq!(session.result().net_profit, 120_000.0);
    }

    #[test]
    fn test_save_appends_current_simulation() {
        let mut session = Session::new(SimulatorSettings::default());
        assert_eq!(session.save(), 1);
        let input = SimulationInput { unit_price: 250.0, ..*session.input() };
        session.set_input(input).unwrap();
        assert_eq!(session.save(), 2);

        let saved = session.history().all();
        assert_eq!(saved[0].input.unit_price, 500.0);
        assert_eq!(saved[1].input.unit_price, 250.0);
        assert_eq!(saved[1].result.revenue, 250_000.0);
    }

    #[test]
    fn test_sessions_do_not_share_history() {
        let mut first = Session::new(SimulatorSettings::default());
        let second = Session::new(SimulatorSettings::default());
        first.save();
        assert_ne!(first.id(), second.id());
        assert!(second.history().is_empty());
    }

    #[test]
    fn test_export_to_explicit_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hist.json");
        let mut session = Session::new(SimulatorSettings::default());
        session.save();
        let (written, rows) = session.export(Some(&path), Some(ExportFormat::Json)).unwrap();
        assert_eq!(written, path);
        assert_eq!(rows, 1);
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_export_format_follows_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut session = Session::new(SimulatorSettings::default());
        session.save();
        session.save();
        session.export(Some(&path), None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_explicit_format_wins_over_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut session = Session::new(SimulatorSettings::default());
        session.save();
        session.export(Some(&path), Some(ExportFormat::Csv)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("position,savedAt"));
        assert_eq!(written.lines().count(), 2);
    }

    #[test]
    fn test_export_xlsx_by_extension() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("simulacoes.xlsx");
        let mut session = Session::new(SimulatorSettings::default());
        session.save();
        let (_, rows) = session.export(Some(&path), None).unwrap();
        assert_eq!(rows, 1);
        assert!(std::fs::read(&path).unwrap().starts_with(b"PK"));
    }
}

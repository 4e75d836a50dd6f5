// Simulator settings, loaded from the embedded default.json or a user file
use crate::calculator;
use crate::data::export::ExportFormat;
use crate::error::EngineError;
use serde::Deserialize;
use shared::models::{SimulationInput, SuppliesCost};
use std::path::Path;

const DEFAULT_CONFIG: &str = include_str!("../../assets/config/default.json");

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimulatorSettings {
    pub version: String,
    pub defaults: InputDefaults,
    pub export: ExportSettings,
}

/// Values used for any input the user leaves out.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct InputDefaults {
    pub unit_price: f64,
    pub quantity_sold: u64,
    pub shipping_pct: f64,
    pub fees_pct: f64,
    pub tax_pct: f64,
    pub supplies: SuppliesCost,
    pub fixed_costs: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ExportSettings {
    pub file_name: String,
    pub format: ExportFormat,
}

impl Default for SimulatorSettings {
    fn default() -> Self {
        SimulatorSettings {
            version: env!("CARGO_PKG_VERSION").to_string(),
            defaults: InputDefaults::default(),
            export: ExportSettings::default(),
        }
    }
}

impl Default for InputDefaults {
    fn default() -> Self {
        InputDefaults {
            unit_price: 500.0,
            quantity_sold: 1000,
            shipping_pct: 20.0,
            fees_pct: 10.0,
            tax_pct: 20.0,
            supplies: SuppliesCost::Percent(6.0),
            fixed_costs: 100_000.0,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            file_name: "simulacoes_lucrometro.csv".to_string(),
            format: ExportFormat::Csv,
        }
    }
}

impl InputDefaults {
    pub fn to_input(&self) -> SimulationInput {
        SimulationInput {
            unit_price: self.unit_price,
            quantity_sold: self.quantity_sold,
            shipping_pct: self.shipping_pct,
            fees_pct: self.fees_pct,
            tax_pct: self.tax_pct,
            supplies: self.supplies,
            fixed_costs: self.fixed_costs,
        }
    }
}

impl SimulatorSettings {
    pub fn load_default() -> Result<Self, EngineError> {
        Self::from_json(DEFAULT_CONFIG)
    }

    pub fn from_file(path: &Path) -> Result<Self, EngineError> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            EngineError::ConfigError(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }

    /// Uses the user file when given, the embedded defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, EngineError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::load_default(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        let settings: SimulatorSettings = serde_json::from_str(raw)
            .map_err(|e| EngineError::ConfigError(format!("Invalid settings JSON: {}", e)))?;
        calculator::validate(&settings.defaults.to_input())
            .map_err(|e| EngineError::ConfigError(format!("Invalid default input: {}", e)))?;
        Ok(settings)
    }
}

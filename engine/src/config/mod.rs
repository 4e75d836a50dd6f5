// Simulator configuration: default inputs and export options.
pub mod settings;

pub use settings::{ExportSettings, InputDefaults, SimulatorSettings};

// Lucrometro engine: formulas, session history and export.

pub mod calculator;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod report;
pub mod session;

pub use calculator::{composition, compute, validate};
pub use error::EngineError;
pub use session::Session;

// Session data: saved simulations and their export
pub mod export;
pub mod history;

pub use export::ExportFormat;
pub use history::SessionHistory;

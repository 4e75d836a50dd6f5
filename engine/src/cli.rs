// Command line arguments and the interactive line-command loop
use crate::calculator::composition;
use crate::data::ExportFormat;
use crate::error::EngineError;
use crate::report;
use crate::session::Session;
use clap::Parser;
use shared::brazilian_format::parse_decimal;
use shared::models::{SimulationInput, SuppliesCost};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// Profit simulator for e-commerce sellers.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lucrometro", version, long_about = None)]
pub struct Cli {
    /// JSON settings file; the embedded defaults are used otherwise.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Unit price of the product (R$).
    #[arg(long)]
    pub price: Option<f64>,

    /// Quantity of products sold.
    #[arg(long)]
    pub quantity: Option<u64>,

    /// Shipping cost as % of revenue.
    #[arg(long)]
    pub shipping_pct: Option<f64>,

    /// Fees and charges as % of revenue.
    #[arg(long)]
    pub fees_pct: Option<f64>,

    /// Taxes as % of revenue.
    #[arg(long)]
    pub tax_pct: Option<f64>,

    /// Supplies as % of revenue.
    #[arg(long, conflicts_with = "supplies_amount")]
    pub supplies_pct: Option<f64>,

    /// Supplies as an absolute amount (R$).
    #[arg(long)]
    pub supplies_amount: Option<f64>,

    /// Total fixed costs (R$).
    #[arg(long)]
    pub fixed_costs: Option<f64>,

    /// Save the computed simulation to the session history.
    #[arg(long, default_value_t = false)]
    pub save: bool,

    /// Export the session history to this file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export format. Taken from the export file extension when omitted.
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Read commands from stdin after the first calculation.
    #[arg(short, long, default_value_t = false)]
    pub interactive: bool,
}

impl Cli {
    /// Overlays the flags the user passed on top of `base`.
    pub fn apply_to(&self, base: SimulationInput) -> SimulationInput {
        let supplies = match (self.supplies_pct, self.supplies_amount) {
            (Some(pct), _) => SuppliesCost::Percent(pct),
            (None, Some(amount)) => SuppliesCost::Amount(amount),
            (None, None) => base.supplies,
        };
        SimulationInput {
            unit_price: self.price.unwrap_or(base.unit_price),
            quantity_sold: self.quantity.unwrap_or(base.quantity_sold),
            shipping_pct: self.shipping_pct.unwrap_or(base.shipping_pct),
            fees_pct: self.fees_pct.unwrap_or(base.fees_pct),
            tax_pct: self.tax_pct.unwrap_or(base.tax_pct),
            supplies,
            fixed_costs: self.fixed_costs.unwrap_or(base.fixed_costs),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Set(Field, f64),
    Supplies(SuppliesCost),
    Calc,
    Save,
    History,
    Export(Option<PathBuf>),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Price,
    Quantity,
    ShippingPct,
    FeesPct,
    TaxPct,
    FixedCosts,
}

impl Field {
    fn parse(name: &str) -> Result<Self, EngineError> {
        match name.to_lowercase().as_str() {
            "price" | "preco" => Ok(Field::Price),
            "quantity" | "qtd" => Ok(Field::Quantity),
            "shipping" | "envio" => Ok(Field::ShippingPct),
            "fees" | "taxas" => Ok(Field::FeesPct),
            "tax" | "impostos" => Ok(Field::TaxPct),
            "fixed" | "fixos" => Ok(Field::FixedCosts),
            other => Err(EngineError::InvalidInput(format!("Unknown field '{}'", other))),
        }
    }

    fn apply(self, input: SimulationInput, value: f64) -> Result<SimulationInput, EngineError> {
        let mut next = input;
        match self {
            Field::Price => next.unit_price = value,
            Field::Quantity => {
                if value < 0.0 || value.fract() != 0.0 || !value.is_finite() {
                    return Err(EngineError::InvalidInput(format!(
                        "quantity must be a non-negative whole number, got {}",
                        value
                    )));
                }
                next.quantity_sold = value as u64;
            }
            Field::ShippingPct => next.shipping_pct = value,
            Field::FeesPct => next.fees_pct = value,
            Field::TaxPct => next.tax_pct = value,
            Field::FixedCosts => next.fixed_costs = value,
        }
        Ok(next)
    }
}

pub const HELP: &str = "\
Commands:
  set <price|quantity|shipping|fees|tax|fixed> <value>   change one input (values like 1.234,56)
  supplies <pct|amount> <value>                         supplies as % of revenue or absolute R$
  calc                                                  show the current result
  save                                                  save the current simulation
  history                                               list saved simulations
  export [path]                                         export the history
  help                                                  show this text
  quit                                                  end the session
";

impl Command {
    pub fn parse(line: &str) -> Result<Self, EngineError> {
        let mut parts = line.split_whitespace();
        let verb = parts.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = parts.collect();
        match (verb.as_str(), args.as_slice()) {
            ("set", [field, value]) => Ok(Command::Set(Field::parse(field)?, parse_value(value)?)),
            ("supplies", [mode, value]) => {
                let value = parse_value(value)?;
                match mode.to_lowercase().as_str() {
                    "pct" | "percent" => Ok(Command::Supplies(SuppliesCost::Percent(value))),
                    "amount" | "valor" => Ok(Command::Supplies(SuppliesCost::Amount(value))),
                    other => Err(EngineError::InvalidInput(format!("Unknown supplies mode '{}'", other))),
                }
            }
            ("calc", []) => Ok(Command::Calc),
            ("save", []) => Ok(Command::Save),
            ("history", []) => Ok(Command::History),
            ("export", []) => Ok(Command::Export(None)),
            ("export", [path]) => Ok(Command::Export(Some(PathBuf::from(*path)))),
            ("help", _) => Ok(Command::Help),
            ("quit" | "exit", _) => Ok(Command::Quit),
            _ => Err(EngineError::InvalidInput(format!(
                "Unrecognized command '{}'. Type 'help'.",
                line.trim()
            ))),
        }
    }
}

fn parse_value(raw: &str) -> Result<f64, EngineError> {
    Ok(parse_decimal(raw)?)
}

pub fn print_simulation<W: Write>(session: &Session, out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{}", report::render_metrics(session.result()))?;
    writeln!(out, "{}", report::render_composition(&composition(session.result())))
}

/// Runs commands from `reader` until `quit` or end of input. Bad commands and
/// failed exports are reported on `out` and the loop continues.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut Session,
    reader: R,
    out: &mut W,
    format: Option<ExportFormat>,
) -> Result<(), EngineError> {
    writeln!(out, "{}", HELP)?;
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };
        match command {
            Command::Set(field, value) => {
                let next = field.apply(*session.input(), value);
                match next.and_then(|input| session.set_input(input).map(|_| ())) {
                    Ok(()) => print_simulation(session, out)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Command::Supplies(supplies) => {
                let next = SimulationInput { supplies, ..*session.input() };
                match session.set_input(next) {
                    Ok(_) => print_simulation(session, out)?,
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            Command::Calc => {
                session.calculate();
                print_simulation(session, out)?;
            }
            Command::Save => {
                let count = session.save();
                writeln!(out, "Simulação salva ({} no histórico).", count)?;
            }
            Command::History => write!(out, "{}", report::render_history(session.history().all()))?,
            Command::Export(path) => export_notice(session, path, format, out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }
    Ok(())
}

/// Exports the history and prints the outcome. Export failures are reported
/// and the session goes on; any other error is returned.
pub fn export_notice<W: Write>(
    session: &Session,
    path: Option<PathBuf>,
    format: Option<ExportFormat>,
    out: &mut W,
) -> Result<(), EngineError> {
    match session.export(path.as_deref(), format) {
        Ok((path, rows)) => writeln!(out, "{} simulações exportadas para {}", rows, path.display())?,
        Err(e) if e.is_export_failure() => {
            tracing::warn!(session_id = %session.id(), error = %e, "Export failed");
            writeln!(out, "Não foi possível exportar: {}", e)?;
        }
        Err(e) => return Err(e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimulatorSettings;
    use tempfile::tempdir;

    fn run(script: &str) -> (Session, String) {
        colored::control::set_override(false);
        let mut session = Session::new(SimulatorSettings::default());
        let mut out = Vec::new();
        run_interactive(&mut session, script.as_bytes(), &mut out, None).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("set price 1.234,50").unwrap(), Command::Set(Field::Price, 1234.5));
        assert_eq!(Command::parse("SET qtd 10").unwrap(), Command::Set(Field::Quantity, 10.0));
        assert_eq!(
            Command::parse("supplies amount 50.000").unwrap(),
            Command::Supplies(SuppliesCost::Amount(50000.0))
        );
        assert_eq!(Command::parse("export out.csv").unwrap(), Command::Export(Some(PathBuf::from("out.csv"))));
        assert_eq!(Command::parse("export").unwrap(), Command::Export(None));
        assert_eq!(Command::parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Command::parse("set colour 3").is_err());
        assert!(Command::parse("frobnicate").is_err());
        assert!(Command::parse("set price abc").is_err());
        assert!(Command::parse("supplies weird 3").is_err());
    }

    #[test]
    fn test_cli_overlays_defaults() {
        let defaults = SimulatorSettings::default().defaults.to_input();
        let cli = Cli { price: Some(10.0), supplies_amount: Some(300.0), ..Cli::default() };
        let input = cli.apply_to(defaults);
        assert_eq!(input.unit_price, 10.0);
        assert_eq!(input.quantity_sold, 1000);
        assert_eq!(input.supplies, SuppliesCost::Amount(300.0));
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "lucrometro", "--price", "19.9", "--quantity", "3", "--supplies-pct", "4", "--save", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.price, Some(19.9));
        assert_eq!(cli.quantity, Some(3));
        assert_eq!(cli.supplies_pct, Some(4.0));
        assert!(cli.save);
        assert_eq!(cli.format, Some(ExportFormat::Json));
    }

    #[test]
    fn test_cli_supplies_modes_conflict() {
        let parsed = Cli::try_parse_from(["lucrometro", "--supplies-pct", "4", "--supplies-amount", "10"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_interactive_save_and_history() {
        let (session, out) = run("save\nset quantity 0\nsave\nhistory\nquit\nsave\n");
        assert_eq!(session.history().len(), 2);
        assert!(out.contains("Simulação salva (2 no histórico)."));
        assert!(out.contains("R$ -100.000,00"));
    }

    #[test]
    fn test_interactive_rejects_out_of_range_value() {
        let (session, out) = run("set tax 150\nset quantity 2,5\n");
        assert_eq!(session.input().tax_pct, 20.0);
        assert_eq!(session.input().quantity_sold, 1000);
        assert!(out.contains("tax_pct must be between 0 and 100"));
        assert!(out.contains("quantity must be a non-negative whole number"));
    }

    #[test]
    fn test_interactive_export_failure_is_not_fatal() {
        let dir = tempdir().unwrap();
        let bad = dir.path().join("missing").join("x.csv");
        let good = dir.path().join("ok.csv");
        let script = format!("save\nexport {}\nexport {}\n", bad.display(), good.display());
        let (_, out) = run(&script);
        assert!(out.contains("Não foi possível exportar"));
        assert!(out.contains("1 simulações exportadas"));
        assert_eq!(std::fs::read_to_string(good).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_export_notice_reports_failure_and_returns_ok() {
        let dir = tempdir().unwrap();
        let mut session = Session::new(SimulatorSettings::default());
        session.save();
        let mut out = Vec::new();
        let bad = dir.path().join("missing").join("x.json");
        export_notice(&session, Some(bad), None, &mut out).unwrap();
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.starts_with("Não foi possível exportar: Export error"));
    }
}

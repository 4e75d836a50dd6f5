use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the supplies (insumos) cost is entered.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum SuppliesCost {
    /// Percentage of revenue, in [0, 100].
    Percent(f64),
    /// Absolute currency amount.
    Amount(f64),
}

impl SuppliesCost {
    pub fn mode_name(&self) -> &'static str {
        match self {
            SuppliesCost::Percent(_) => "percent",
            SuppliesCost::Amount(_) => "amount",
        }
    }
}

impl Default for SuppliesCost {
    fn default() -> Self {
        SuppliesCost::Percent(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationInput {
    pub unit_price: f64,
    pub quantity_sold: u64,
    pub shipping_pct: f64,
    pub fees_pct: f64,
    pub tax_pct: f64,
    pub supplies: SuppliesCost,
    pub fixed_costs: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResult {
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

impl SimulationResult {
    /// Supplies cost as a share of revenue; 0 when there is no revenue.
    pub fn supplies_pct(&self) -> f64 {
        pct_of(self.supplies_cost, self.revenue)
    }

    pub fn is_profitable(&self) -> bool {
        self.net_profit >= 0.0
    }
}

/// `part / whole * 100`, defined as 0 when `whole` is not positive.
pub fn pct_of(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        part / whole * 100.0
    } else {
        0.0
    }
}

/// A saved simulation. Its position in the history is implicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub input: SimulationInput,
    pub result: SimulationResult,
    pub saved_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(input: SimulationInput, result: SimulationResult) -> Self {
        Self {
            input,
            result,
            saved_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineKind {
    Revenue,
    Expense,
    Profit,
}

impl LineKind {
    /// Label shown in the "Tipo" column.
    pub fn label(&self) -> &'static str {
        match self {
            LineKind::Revenue => "Receita",
            LineKind::Expense => "Despesa",
            LineKind::Profit => "Lucro",
        }
    }
}

/// One line of the operation breakdown table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionRow {
    pub item: &'static str,
    pub kind: LineKind,
    pub amount: f64,
    pub pct_of_revenue: f64,
}

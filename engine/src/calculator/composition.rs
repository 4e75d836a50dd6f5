// Breakdown of one simulation by line item, as shown in the summary table
use shared::models::{pct_of, CompositionRow, LineKind, SimulationResult};

pub fn composition(result: &SimulationResult) -> Vec<CompositionRow> {
    let lines = [
        ("Faturamento", LineKind::Revenue, result.revenue),
        ("Insumos", LineKind::Expense, result.supplies_cost),
        ("Envio", LineKind::Expense, result.shipping_cost),
        ("Taxas", LineKind::Expense, result.fees_cost),
        ("Impostos", LineKind::Expense, result.tax_cost),
        ("Custos Fixos", LineKind::Expense, result.fixed_costs),
        ("Lucro Final", LineKind::Profit, result.net_profit),
    ];

    lines
        .into_iter()
        .map(|(item, kind, amount)| CompositionRow {
            item,
            kind,
            amount,
            pct_of_revenue: pct_of(amount, result.revenue),
        })
        .collect()
}

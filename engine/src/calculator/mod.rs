// Formula engine: revenue, variable costs, margin and profit
pub mod composition;

pub use composition::composition;

use crate::error::EngineError;
use shared::models::{pct_of, SimulationInput, SimulationResult, SuppliesCost};

/// Computes the full result for one simulation. Never fails; inputs are
/// checked with [`validate`] by whoever collects them.
pub fn compute(input: &SimulationInput) -> SimulationResult {
    let revenue = input.unit_price * input.quantity_sold as f64;

    let shipping_cost = share_of(revenue, input.shipping_pct);
    let fees_cost = share_of(revenue, input.fees_pct);
    let tax_cost = share_of(revenue, input.tax_pct);
    let supplies_cost = match input.supplies {
        SuppliesCost::Percent(pct) => share_of(revenue, pct),
        SuppliesCost::Amount(amount) => amount,
    };

    let total_variable_cost = shipping_cost + fees_cost + tax_cost + supplies_cost;
    let contribution_margin = revenue - total_variable_cost;
    let net_profit = contribution_margin - input.fixed_costs;

    let result = SimulationResult {
        revenue,
        shipping_cost,
        fees_cost,
        tax_cost,
        supplies_cost,
        total_variable_cost,
        contribution_margin,
        fixed_costs: input.fixed_costs,
        net_profit,
        net_profit_pct: pct_of(net_profit, revenue),
    };
    tracing::debug!(
        revenue = result.revenue,
        total_variable_cost = result.total_variable_cost,
        net_profit = result.net_profit,
        "Computed simulation"
    );
    result
}

fn share_of(revenue: f64, pct: f64) -> f64 {
    revenue * pct / 100.0
}

/// Range checks applied by the input layer before calling [`compute`].
pub fn validate(input: &SimulationInput) -> Result<(), EngineError> {
    check_amount("unit_price", input.unit_price)?;
    check_amount("fixed_costs", input.fixed_costs)?;
    check_pct("shipping_pct", input.shipping_pct)?;
    check_pct("fees_pct", input.fees_pct)?;
    check_pct("tax_pct", input.tax_pct)?;
    match input.supplies {
        SuppliesCost::Percent(pct) => check_pct("supplies_pct", pct)?,
        SuppliesCost::Amount(amount) => check_amount("supplies_amount", amount)?,
    }
    check_finite_totals(input)
}

// Each field can be in range while the products and sums leave f64.
fn check_finite_totals(input: &SimulationInput) -> Result<(), EngineError> {
    let revenue = input.unit_price * input.quantity_sold as f64;
    let supplies = match input.supplies {
        SuppliesCost::Percent(pct) => share_of(revenue, pct),
        SuppliesCost::Amount(amount) => amount,
    };
    let variable = share_of(revenue, input.shipping_pct)
        + share_of(revenue, input.fees_pct)
        + share_of(revenue, input.tax_pct)
        + supplies;
    let net_profit = revenue - variable - input.fixed_costs;
    if !(revenue.is_finite() && variable.is_finite() && net_profit.is_finite()) {
        return Err(EngineError::InvalidInput(format!(
            "amounts overflow: unit_price {} x quantity_sold {} is too large",
            input.unit_price, input.quantity_sold
        )));
    }
    Ok(())
}

fn check_amount(field: &str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

fn check_pct(field: &str, value: f64) -> Result<(), EngineError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(EngineError::InvalidInput(format!(
            "{} must be between 0 and 100, got {}",
            field, value
        )));
    }
    Ok(())
}

// Text tables for the terminal front end. Every amount goes through
// brazilian_format::format_currency.
use colored::{ColoredString, Colorize};
use shared::brazilian_format::{format_currency, format_percent};
use shared::models::{CompositionRow, HistoryEntry, LineKind, SimulationResult};

const LABEL_WIDTH: usize = 24;
const AMOUNT_WIDTH: usize = 20;

fn paint_kind(text: &str, kind: LineKind) -> ColoredString {
    match kind {
        LineKind::Revenue => text.blue(),
        LineKind::Expense => text.red(),
        LineKind::Profit => text.green(),
    }
}

fn paint_amount(text: &str, amount: f64) -> ColoredString {
    if amount < 0.0 {
        text.red()
    } else {
        text.normal()
    }
}

fn amount_cell(amount: f64) -> ColoredString {
    paint_amount(&format!("{:>width$}", format_currency(amount), width = AMOUNT_WIDTH), amount)
}

pub fn render_metrics(result: &SimulationResult) -> String {
    let mut out = String::new();
    let lines = [
        ("Faturamento", result.revenue),
        ("Custos Variáveis", result.total_variable_cost),
        ("Custos Fixos", result.fixed_costs),
        ("Margem de Contribuição", result.contribution_margin),
    ];
    for (label, amount) in lines {
        out.push_str(&format!("{:<LABEL_WIDTH$}{}\n", label, amount_cell(amount)));
    }
    out.push_str(&format!(
        "{:<LABEL_WIDTH$}{} ({})\n",
        "Lucro Final",
        amount_cell(result.net_profit),
        format_percent(result.net_profit_pct)
    ));
    let status = if result.is_profitable() {
        "Lucro".green()
    } else {
        "Prejuízo".red()
    };
    out.push_str(&format!("{:<LABEL_WIDTH$}{}\n", "Situação", status));
    out
}

pub fn render_composition(rows: &[CompositionRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<16}{:<10}{:>AMOUNT_WIDTH$}{:>22}\n",
        "Item", "Tipo", "Valor (R$)", "% sobre faturamento"
    ));
    for row in rows {
        out.push_str(&format!(
            "{:<16}{}{}{:>22}\n",
            row.item,
            paint_kind(&format!("{:<10}", row.kind.label()), row.kind),
            amount_cell(row.amount),
            format_percent(row.pct_of_revenue)
        ));
    }
    out
}

pub fn render_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "Nenhuma simulação salva nesta sessão.\n".to_string();
    }
    let mut out = String::new();
    out.push_str(&format!(
        "{:>3} {:>AMOUNT_WIDTH$} {:>8} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {:>AMOUNT_WIDTH$} {:>8}\n",
        "#", "Preço Produto", "Qtd", "Faturamento", "Custos Variáveis", "Custos Fixos", "Lucro Final", "% Lucro"
    ));
    for (idx, entry) in entries.iter().enumerate() {
        let (input, result) = (&entry.input, &entry.result);
        out.push_str(&format!(
            "{:>3} {} {:>8} {} {} {} {} {:>8}\n",
            idx + 1,
            amount_cell(input.unit_price),
            input.quantity_sold,
            amount_cell(result.revenue),
            amount_cell(result.total_variable_cost),
            amount_cell(result.fixed_costs),
            amount_cell(result.net_profit),
            format_percent(result.net_profit_pct)
        ));
    }
    out
}

// pt-BR number handling shared by the engine and its front end.
pub mod brazilian_format {
    use anyhow::{anyhow, Result};
    use std::str::FromStr;

    pub const CURRENCY_MARKER: &str = "R$";

    /// Renders an amount as `R$ 1.234,50`. Negative values keep their sign
    /// after the marker (`R$ -50,00`).
    pub fn format_currency(amount: f64) -> String {
        format!("{} {}", CURRENCY_MARKER, format_decimal(amount, 2))
    }

    /// Fixed-precision decimal with `.` grouping and `,` as decimal separator.
    pub fn format_decimal(value: f64, decimals: usize) -> String {
        let rendered = format!("{:.*}", decimals, value.abs());
        let (int_part, frac_part) = match rendered.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (rendered.as_str(), None),
        };

        // "-0,00" is never shown
        let sign = if value < 0.0 && !rounds_to_zero(&rendered) { "-" } else { "" };

        let grouped = group_thousands(int_part);
        match frac_part {
            Some(frac) => format!("{}{},{}", sign, grouped, frac),
            None => format!("{}{}", sign, grouped),
        }
    }

    /// One-decimal percentage, e.g. `24.0%`.
    pub fn format_percent(pct: f64) -> String {
        let rendered = format!("{:.1}", pct.abs());
        let sign = if pct < 0.0 && !rounds_to_zero(&rendered) { "-" } else { "" };
        format!("{}{}%", sign, rendered)
    }

    // Parses decimals like "1.234,56", "123,45" or "R$ 1.000" into f64
    pub fn parse_decimal(s: &str) -> Result<f64> {
        let normalized = s
            .trim()
            .trim_start_matches(CURRENCY_MARKER)
            .trim()
            .replace('.', "") // Remove thousand separators
            .replace(',', "."); // Replace decimal separator

        f64::from_str(&normalized).map_err(|e| anyhow!("Failed to parse decimal '{}': {}", s, e))
    }

    fn rounds_to_zero(rendered: &str) -> bool {
        rendered.bytes().all(|b| b == b'0' || b == b'.')
    }

    fn group_thousands(digits: &str) -> String {
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        grouped
    }

}

use super::ui;
use crate::core::{ConversionResult, ConversionSession, ConversionState, CurrencyRateProvider};
use anyhow::Result;

/// Formats the headline, e.g. `10 CAD = 13.5000 USD`.
pub fn format_conversion(result: &ConversionResult) -> String {
    format!(
        "{} {} = {:.4} {}",
        result.request.amount_text,
        result.request.base,
        result.converted_amount,
        result.request.target
    )
}

/// Formats the rate line, e.g. `Exchange rate used: 1 CAD = 1.35 USD`.
pub fn format_rate(result: &ConversionResult) -> String {
    format!(
        "Exchange rate used: 1 {} = {} {}",
        result.request.base, result.rate, result.request.target
    )
}

impl ConversionResult {
    pub fn display_as_table(&self) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell(&format!("Amount ({})", self.request.base)),
            ui::header_cell("Rate"),
            ui::header_cell(&format!("Converted ({})", self.request.target)),
        ]);
        table.add_row(vec![
            ui::number_cell(self.request.amount_text.clone()),
            ui::number_cell(format!("{}", self.rate)),
            ui::highlight_cell(format!("{:.4}", self.converted_amount)),
        ]);

        let mut output = format!(
            "{}\n{}\n\n",
            ui::style_text(&format_conversion(self), ui::StyleType::Value),
            ui::style_text(&format_rate(self), ui::StyleType::Subtle)
        );
        output.push_str(&table.to_string());
        output
    }
}

/// Prints a conversion failure to stderr.
pub fn report_error(err: &dyn std::fmt::Display) {
    eprintln!("{}", ui::style_text(&err.to_string(), ui::StyleType::Error));
}

/// Runs a single conversion and prints its outcome.
///
/// Returns `Ok(false)` when the conversion failed; the message has already
/// been printed to stderr by then.
pub async fn run(
    base: &str,
    target: &str,
    amount: &str,
    provider: &dyn CurrencyRateProvider,
) -> Result<bool> {
    let mut session = ConversionSession::new();

    let spinner = ui::new_spinner("Converting...");
    let state = session.submit(base, target, amount, provider).await;
    spinner.finish_and_clear();

    match state {
        ConversionState::Converted(result) => {
            println!("{}", result.display_as_table());
            Ok(true)
        }
        ConversionState::Failed(e) => {
            report_error(e);
            Ok(false)
        }
        ConversionState::Idle => {
            anyhow::bail!("Conversion finished without an outcome")
        }
    }
}

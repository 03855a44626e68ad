use super::ui;

const DESCRIPTION: &str = "\
Converts an amount from a base currency into a destination currency. It uses
the FreeCurrencyAPI service to fetch the latest exchange rates, validates the
input, and reports clear error messages when something goes wrong, such as
network issues or invalid currency codes.";

pub fn about_text() -> String {
    format!(
        "{} {}\n\n{}\n\n{}",
        ui::style_text("fxconv", ui::StyleType::Title),
        ui::style_text(env!("CARGO_PKG_VERSION"), ui::StyleType::Subtle),
        DESCRIPTION,
        ui::style_text(
            "Rates provided by https://freecurrencyapi.com",
            ui::StyleType::Subtle
        )
    )
}

pub fn run() {
    println!("{}", about_text());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_about_mentions_provider() {
        console::set_colors_enabled(false);
        let text = about_text();
        assert!(text.starts_with("fxconv "));
        assert!(text.contains("FreeCurrencyAPI"));
    }
}

use crate::error::{ErrorContext, IsoListError};

const BOLD_RED: &str = "1;31";
const BOLD_YELLOW: &str = "1;33";
const CYAN: &str = "36";

pub fn format_error_chain(error: &IsoListError) -> String {
    ErrorContext::new(error).to_string()
}

/// Terminal rendering: headline, details, then one bullet per suggestion line.
pub fn format_error_with_color(error: &IsoListError, use_color: bool) -> String {
    let paint = |code: &str, text: &str| {
        if use_color {
            format!("\x1b[{code}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    };

    let context = ErrorContext::new(error);
    let mut lines = vec![format!("{} {error}", paint(BOLD_RED, "Error:"))];

    if let Some(details) = &context.details {
        lines.push(String::new());
        lines.push(details.clone());
    }

    if let Some(suggestion) = &context.suggestion {
        lines.push(String::new());
        lines.push(paint(BOLD_YELLOW, "Suggestions:"));
        lines.extend(
            suggestion
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(|line| paint(CYAN, &format!("• {line}"))),
        );
    }

    lines.join("\n")
}

use super::eval::ERROR_SENTINEL;

/// Format a number for display and for substitution back into formulas.
///
/// Integral values print without a fractional part, others use the shortest
/// representation that round-trips. Non-finite values become `#ERROR`.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return ERROR_SENTINEL.to_string();
    }
    if n == 0.0 {
        // Avoid "-0".
        return "0".to_string();
    }
    n.to_string()
}

/// Read a cell value in numeric context. Surrounding whitespace is ignored;
/// anything that is not a finite decimal number yields None.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

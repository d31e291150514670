/// Format a number as the shortest text that parses back to the same `f64`.
///
/// Magnitudes outside `[1e-5, 1e15)` switch to exponent form (`1E20`,
/// `1.5E-7`) so very large or very small literals stay compact.
pub fn format_number(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 {
        "0".to_string()
    } else if n.is_finite() && !(1e-5..1e15).contains(&magnitude) {
        format!("{:E}", n)
    } else {
        n.to_string()
    }
}

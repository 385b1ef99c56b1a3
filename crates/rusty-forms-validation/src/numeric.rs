//! Numeric predicates over field text

/// Parse field text as a number, ignoring surrounding whitespace
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn is_number(s: &str) -> bool {
    parse_number(s).is_some()
}

/// Inclusive range check; either bound may be open
pub fn in_range(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}

/// Field text parses as a number inside the range
pub fn is_number_in_range(s: &str, min: Option<f64>, max: Option<f64>) -> bool {
    parse_number(s).is_some_and(|n| in_range(n, min, max))
}

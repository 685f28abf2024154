//! Percentage rendering for reports.

use std::fmt;

/// A probability rendered as a percentage, e.g. `41.67 %`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percent {
    value: f64,
    decimals: usize,
}

impl Percent {
    /// Wraps a probability to render with `decimals` places.
    #[must_use]
    pub const fn new(value: f64, decimals: usize) -> Self {
        Self { value, decimals }
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.*} %", self.decimals, self.value * 100.0)
    }
}

/// Renders `value` as a percentage with two decimals.
#[must_use]
pub fn percent(value: f64) -> String {
    Percent::new(value, 2).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_two_decimals() {
        assert_eq!(percent(50.0 / 120.0), "41.67 %");
        assert_eq!(percent(0.25), "25.00 %");
    }

    #[test]
    fn test_percent_custom_decimals() {
        assert_eq!(Percent::new(1.0 / 3.0, 0).to_string(), "33 %");
        assert_eq!(Percent::new(1.0 / 3.0, 4).to_string(), "33.3333 %");
    }
}

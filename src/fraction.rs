//! Exact rational probabilities for equiprobable sample spaces.

use std::fmt;

use serde::Serialize;

/// A non-negative rational number kept in lowest terms.
///
/// # Examples
///
/// ```
/// use probdist::Fraction;
///
/// let half = Fraction::new(2, 4).unwrap();
/// assert_eq!(half, Fraction::new(1, 2).unwrap());
/// assert_eq!(half.to_string(), "1/2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Fraction {
    numer: u64,
    denom: u64,
}

impl Fraction {
    /// Zero.
    pub const ZERO: Self = Self { numer: 0, denom: 1 };

    /// One.
    pub const ONE: Self = Self { numer: 1, denom: 1 };

    /// Creates a reduced fraction. Returns `None` when `denom` is zero.
    #[must_use]
    pub fn new(numer: u64, denom: u64) -> Option<Self> {
        if denom == 0 {
            return None;
        }
        let g = gcd(numer, denom);
        Some(Self {
            numer: numer / g,
            denom: denom / g,
        })
    }

    /// Creates the ratio `count / total` of two collection sizes.
    #[must_use]
    pub fn ratio(count: usize, total: usize) -> Option<Self> {
        Self::new(count as u64, total as u64)
    }

    /// Numerator, in lowest terms.
    pub const fn numer(&self) -> u64 {
        self.numer
    }

    /// Denominator, always positive.
    pub const fn denom(&self) -> u64 {
        self.denom
    }

    /// Lossy conversion to floating point.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }

    /// Exact quotient. Returns `None` when dividing by zero.
    #[must_use]
    pub fn checked_div(&self, other: &Self) -> Option<Self> {
        if other.numer == 0 {
            return None;
        }
        let g1 = gcd(self.numer, other.numer);
        let g2 = gcd(other.denom, self.denom);
        let numer = (self.numer / g1).checked_mul(other.denom / g2)?;
        let denom = (self.denom / g2).checked_mul(other.numer / g1)?;
        Self::new(numer, denom)
    }

    /// Exact product. Returns `None` on overflow.
    #[must_use]
    pub fn checked_mul(&self, other: &Self) -> Option<Self> {
        let g1 = gcd(self.numer, other.denom);
        let g2 = gcd(other.numer, self.denom);
        let numer = (self.numer / g1).checked_mul(other.numer / g2)?;
        let denom = (self.denom / g2).checked_mul(other.denom / g1)?;
        Self::new(numer, denom)
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom == 1 {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_reduces() {
        let f = Fraction::new(6, 8).unwrap();
        assert_eq!(f.numer(), 3);
        assert_eq!(f.denom(), 4);
    }

    #[test]
    fn test_fraction_zero_denominator() {
        assert!(Fraction::new(1, 0).is_none());
        assert!(Fraction::ratio(0, 0).is_none());
    }

    #[test]
    fn test_fraction_zero_numerator() {
        let f = Fraction::new(0, 5).unwrap();
        assert_eq!(f, Fraction::ZERO);
        assert_eq!(f.to_string(), "0");
    }

    #[test]
    fn test_fraction_display() {
        assert_eq!(Fraction::new(1, 2).unwrap().to_string(), "1/2");
        assert_eq!(Fraction::new(4, 4).unwrap().to_string(), "1");
    }

    #[test]
    fn test_fraction_div_and_mul() {
        let a = Fraction::new(1, 4).unwrap();
        let b = Fraction::new(1, 2).unwrap();
        assert_eq!(a.checked_div(&b), Fraction::new(1, 2));
        assert_eq!(a.checked_mul(&b), Fraction::new(1, 8));
        assert!(a.checked_div(&Fraction::ZERO).is_none());
    }

    #[test]
    fn test_fraction_to_f64() {
        let f = Fraction::new(3, 4).unwrap();
        assert!((f.to_f64() - 0.75).abs() < f64::EPSILON);
    }
}

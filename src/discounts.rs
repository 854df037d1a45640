//! Discounts

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors specific to discount input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DiscountError {
    /// Discount text was not a number between 0 and 100.
    #[error("invalid discount {0:?}; enter a percentage between 0 and 100")]
    InvalidDiscount(String),
}

/// Fraction of the subtotal taken off the bill, always within `0..=1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DiscountRate(Percentage);

impl DiscountRate {
    /// No discount.
    pub fn zero() -> Self {
        Self(Percentage::from(Decimal::ZERO))
    }

    /// Build a rate from percentage points, e.g. `50` for half off.
    ///
    /// # Errors
    ///
    /// Returns [`DiscountError::InvalidDiscount`] if `points` is outside `0..=100`.
    pub fn from_points(points: Decimal) -> Result<Self, DiscountError> {
        let hundred = Decimal::new(100, 0);

        if points < Decimal::ZERO || points > hundred {
            return Err(DiscountError::InvalidDiscount(points.to_string()));
        }

        Ok(Self(Percentage::from(points / hundred)))
    }

    /// The rate as a fraction, e.g. `0.1` for 10%.
    pub fn fraction(&self) -> Decimal {
        self.0 * Decimal::ONE // decimal_percentage does not expose the inner Decimal
    }

    /// The rate in percentage points, e.g. `10` for 10%.
    pub fn points(&self) -> Decimal {
        (self.fraction() * Decimal::new(100, 0)).normalize()
    }

    /// Check if no discount applies.
    pub fn is_zero(&self) -> bool {
        self.fraction().is_zero()
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        Self::zero()
    }
}

impl FromStr for DiscountRate {
    type Err = DiscountError;

    /// Parse percentage text typed by the user (e.g. `"10"`, `" 12.5 "` or `"1e1"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let points = text
            .parse::<Decimal>()
            .or_else(|_err| Decimal::from_scientific(text))
            .map_err(|_err| DiscountError::InvalidDiscount(s.to_string()))?;

        Self::from_points(points).map_err(|_err| DiscountError::InvalidDiscount(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn zero_is_default() {
        let rate = DiscountRate::default();

        assert!(rate.is_zero());
        assert_eq!(rate, DiscountRate::zero());
    }

    #[test]
    fn parses_percentage_points_into_a_fraction() -> TestResult {
        let rate: DiscountRate = "50".parse()?;

        assert_eq!(rate.fraction(), Decimal::new(5, 1));
        assert_eq!(rate.points(), Decimal::new(50, 0));

        Ok(())
    }

    #[test]
    fn accepts_bounds_and_fractional_points() -> TestResult {
        assert!("0".parse::<DiscountRate>()?.is_zero());
        assert_eq!("100".parse::<DiscountRate>()?.fraction(), Decimal::ONE);
        assert_eq!(
            " 12.5 ".parse::<DiscountRate>()?.fraction(),
            Decimal::new(125, 3)
        );

        Ok(())
    }

    #[test]
    fn accepts_exponent_notation() -> TestResult {
        assert_eq!("1e1".parse::<DiscountRate>()?.fraction(), Decimal::new(1, 1));
        assert_eq!("2.5e1".parse::<DiscountRate>()?.points(), Decimal::new(25, 0));
        assert_eq!(
            "1e3".parse::<DiscountRate>(),
            Err(DiscountError::InvalidDiscount("1e3".to_string()))
        );

        Ok(())
    }

    #[test]
    fn rejects_out_of_range_values() {
        for text in ["-1", "101", "100.01"] {
            assert_eq!(
                text.parse::<DiscountRate>(),
                Err(DiscountError::InvalidDiscount(text.to_string())),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_non_numeric_values() {
        for text in ["abc", "", "10%", "NaN"] {
            assert!(text.parse::<DiscountRate>().is_err(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn from_points_reports_the_value() {
        assert_eq!(
            DiscountRate::from_points(Decimal::new(150, 0)),
            Err(DiscountError::InvalidDiscount("150".to_string()))
        );
    }
}

use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Mul, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

use crate::op;

pub const INR_CURRENCY_CODE: &str = "INR";
pub const INR_CURRENCY_CODE_LOWER: &str = "inr";

pub const PAISA_PER_RUPEE: i64 = 100;

//--------------------------------------      Rupee       ------------------------------------------------------------
/// An amount of Indian Rupees, stored in paisa (the gateway's minor currency unit).
///
/// All prices in the marketplace are held in paisa so that the amount handed to the payment
/// gateway is exact. Decimal rupee values coming in over the API are converted once, at the
/// boundary, via [`Rupee::from_rupees`].
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Rupee(i64);

op!(binary Rupee, Add, add);
op!(binary Rupee, Sub, sub);
op!(inplace Rupee, SubAssign, sub_assign);
op!(unary Rupee, Neg, neg);

impl Mul<i64> for Rupee {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Rupee {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in paisa: {0}")]
pub struct RupeeConversionError(String);

impl From<i64> for Rupee {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl PartialEq for Rupee {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Rupee {}

impl TryFrom<u64> for Rupee {
    type Error = RupeeConversionError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > i64::MAX as u64 {
            Err(RupeeConversionError(format!("Value {} is too large to convert to Rupee", value)))
        } else {
            #[allow(clippy::cast_possible_wrap)]
            Ok(Self(value as i64))
        }
    }
}

impl Display for Rupee {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rupees = self.0 as f64 / PAISA_PER_RUPEE as f64;
        write!(f, "₹{rupees:0.2}")
    }
}

impl Rupee {
    /// The amount in paisa.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Converts a decimal rupee amount to paisa, rounding half-away-from-zero.
    pub fn from_rupees(rupees: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        Self((rupees * PAISA_PER_RUPEE as f64).round() as i64)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rupee_conversion_rounds_to_paisa() {
        assert_eq!(Rupee::from_rupees(500.0).value(), 50_000);
        assert_eq!(Rupee::from_rupees(199.99).value(), 19_999);
        assert_eq!(Rupee::from_rupees(0.005).value(), 1);
        assert_eq!(Rupee::from_rupees(0.004).value(), 0);
    }

    #[test]
    fn display_formats_rupees() {
        assert_eq!(Rupee::from(50_000).to_string(), "₹500.00");
        assert_eq!(Rupee::from(1).to_string(), "₹0.01");
    }

    #[test]
    fn positivity() {
        assert!(Rupee::from(1).is_positive());
        assert!(!Rupee::from(0).is_positive());
        assert!(!Rupee::from(-100).is_positive());
    }
}

//! Stock arithmetic.
//!
//! [`StockAdjustment::apply`] is the conditional update at the heart of the engine: it either
//! yields the new stock level or rejects the change, and it never produces a negative or
//! wrapped value. The actor runs it against the stored record and commits only on `Ok`.

use super::error::ProductError;
use serde::Serialize;

/// Non-negative number of units to add or remove.
///
/// Defaults to one. Zero is allowed and leaves stock unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(units: u32) -> Self {
        Self(units)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

impl From<u32> for Quantity {
    fn from(units: u32) -> Self {
        Self(units)
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ProductError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map(Quantity)
            .map_err(|_| ProductError::validation("Invalid quantity"))
    }
}

/// A signed change to a product's stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockAdjustment {
    Increase(Quantity),
    Decrease(Quantity),
}

impl StockAdjustment {
    pub fn quantity(&self) -> Quantity {
        match self {
            StockAdjustment::Increase(q) | StockAdjustment::Decrease(q) => *q,
        }
    }

    /// The change as a signed delta.
    pub fn delta(&self) -> i64 {
        match self {
            StockAdjustment::Increase(q) => i64::from(q.get()),
            StockAdjustment::Decrease(q) => -i64::from(q.get()),
        }
    }

    /// Computes the stock level after this adjustment.
    ///
    /// # Errors
    /// - `InsufficientStock` when a decrease exceeds `current`.
    /// - `Validation` when an increase would overflow the stock counter.
    pub fn apply(&self, current: u32) -> Result<u32, ProductError> {
        match *self {
            StockAdjustment::Increase(q) => current
                .checked_add(q.get())
                .ok_or_else(|| ProductError::validation("Quantity would overflow stock")),
            StockAdjustment::Decrease(q) => {
                current
                    .checked_sub(q.get())
                    .ok_or(ProductError::InsufficientStock {
                        requested: q.get(),
                        available: current,
                    })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scenarios() {
        assert_eq!(StockAdjustment::Increase(Quantity::new(5)).apply(10), Ok(15));
        assert_eq!(StockAdjustment::Decrease(Quantity::new(3)).apply(10), Ok(7));
        assert_eq!(
            StockAdjustment::Decrease(Quantity::new(15)).apply(10),
            Err(ProductError::InsufficientStock {
                requested: 15,
                available: 10
            })
        );
        assert_eq!(StockAdjustment::Decrease(Quantity::default()).apply(10), Ok(9));
    }

    #[test]
    fn test_exact_decrease_reaches_zero() {
        assert_eq!(StockAdjustment::Decrease(Quantity::new(10)).apply(10), Ok(0));
        assert!(StockAdjustment::Decrease(Quantity::new(1)).apply(0).is_err());
    }

    #[test]
    fn test_zero_is_a_no_op() {
        assert_eq!(StockAdjustment::Increase(Quantity::new(0)).apply(4), Ok(4));
        assert_eq!(StockAdjustment::Decrease(Quantity::new(0)).apply(0), Ok(0));
    }

    #[test]
    fn test_increase_overflow_is_rejected() {
        let err = StockAdjustment::Increase(Quantity::new(1)).apply(u32::MAX).unwrap_err();
        assert!(matches!(err, ProductError::Validation(_)));
    }

    #[test]
    fn test_quantity_from_signed() {
        assert_eq!(Quantity::try_from(0i64).unwrap().get(), 0);
        assert!(Quantity::try_from(-5i64).is_err());
        assert!(Quantity::try_from(i64::from(u32::MAX) + 1).is_err());
    }

    proptest! {
        #[test]
        fn decrease_never_goes_negative(current in any::<u32>(), q in any::<u32>()) {
            match StockAdjustment::Decrease(q.into()).apply(current) {
                Ok(next) => {
                    prop_assert!(q <= current);
                    prop_assert_eq!(next, current - q);
                }
                Err(ProductError::InsufficientStock { requested, available }) => {
                    prop_assert!(q > current);
                    prop_assert_eq!((requested, available), (q, current));
                }
                Err(other) => prop_assert!(false, "unexpected error {other:?}"),
            }
        }

        #[test]
        fn increase_then_decrease_round_trips(current in 0u32..1_000_000, q in 0u32..1_000_000) {
            let up = StockAdjustment::Increase(q.into()).apply(current).unwrap();
            let down = StockAdjustment::Decrease(q.into()).apply(up).unwrap();
            prop_assert_eq!(down, current);
        }

        #[test]
        fn delta_matches_applied_change(current in 0u32..1_000_000, q in 0u32..1_000_000) {
            for adj in [StockAdjustment::Increase(q.into()), StockAdjustment::Decrease(q.into())] {
                if let Ok(next) = adj.apply(current) {
                    prop_assert_eq!(i64::from(next) - i64::from(current), adj.delta());
                }
            }
        }
    }
}

//! Cart line quantity with the storefront's per-line limit built in.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is zero or above [`Quantity::MAX`].
    #[error("quantity must be between 1 and 99, got {0}")]
    OutOfRange(i64),
}

/// How many units of one product a cart line holds.
///
/// A quantity is always in `1..=99`. Zero is not representable: a line whose
/// quantity would reach zero is removed from the cart instead. The cap is
/// enforced here rather than by callers, so every path into the cart shares
/// one limit.
///
/// ## Examples
///
/// ```
/// use marketplace_core::Quantity;
///
/// assert_eq!(Quantity::new(5).unwrap().get(), 5);
/// assert!(Quantity::new(0).is_err());
/// assert!(Quantity::new(100).is_err());
///
/// // Clamping, as used by set-quantity operations:
/// assert_eq!(Quantity::clamped(150).unwrap().get(), 99);
/// assert!(Quantity::clamped(0).is_none());
/// assert!(Quantity::clamped(-5).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The largest quantity a single cart line may hold.
    pub const MAX: u32 = 99;

    /// A quantity of one, the value new cart lines start at.
    pub const ONE: Self = Self(1);

    /// Create a quantity, rejecting values outside `1..=MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] for zero or values above the cap.
    pub fn new(value: u32) -> Result<Self, QuantityError> {
        if value == 0 || value > Self::MAX {
            return Err(QuantityError::OutOfRange(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Clamp an arbitrary requested quantity into range.
    ///
    /// Returns `None` for zero and negative requests (the caller removes the
    /// line in that case) and caps anything above [`Self::MAX`].
    #[must_use]
    pub fn clamped(value: i64) -> Option<Self> {
        if value <= 0 {
            return None;
        }
        let capped = u32::try_from(value).map_or(Self::MAX, |v| v.min(Self::MAX));
        Some(Self(capped))
    }

    /// Add to the quantity, saturating at [`Self::MAX`].
    #[must_use]
    pub const fn saturating_add(self, n: u32) -> Self {
        let sum = self.0.saturating_add(n);
        if sum > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(sum)
        }
    }

    /// Get the underlying count.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u32> for Quantity {
    type Error = QuantityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

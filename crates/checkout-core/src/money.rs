//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    Rule files carry prices as integers (50 = 0.50)                      │
//! │    Bundle math is integer division, so totals are exact                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::money::Money;
//!
//! let price = Money::from_minor(50);
//! let three = price.checked_mul(3).unwrap();
//! assert_eq!(three.minor(), 150);
//!
//! // Prices near the i64 bounds never wrap
//! assert!(Money::from_minor(i64::MAX).checked_mul(2).is_none());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction never wraps, even if a misconfigured rule
///   carries a negative price
/// - **Checked arithmetic only**: a rule file may carry any `i64` price, so
///   products and sums return `None` instead of wrapping
/// - **`#[serde(transparent)]`**: the rule file writes plain integers
///   (`unit_price: 50`), not `{ "0": 50 }`
///
/// ## Where Money is Used
/// ```text
/// PricingRule.unit_price ──┬──► line_total(rule, qty) ──► total(rules, cart)
///                          │
/// BundleOffer.price ───────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let price = Money::from_minor(130);
    /// assert_eq!(price.minor(), 130);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i64 {
        self.0
    }

    /// Returns the whole major units (truncated toward zero).
    #[inline]
    pub const fn major_part(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor remainder (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a scanned quantity or bundle count.
    ///
    /// Returns `None` if the product leaves the `i64` range.
    ///
    /// ## Example
    /// ```rust
    /// use checkout_core::money::Money;
    ///
    /// let unit_price = Money::from_minor(15);
    /// assert_eq!(unit_price.checked_mul(4), Some(Money::from_minor(60)));
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }

    /// Adds two amounts. Returns `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(minor) => Some(Money(minor)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders `major.minor`, e.g. `290` as `2.90`.
///
/// ## Note
/// There is no currency symbol: the rule file does not name a currency.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major_part().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

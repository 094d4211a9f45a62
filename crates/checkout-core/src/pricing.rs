//! # Pricing Module
//!
//! Greedy bundle pricing for a single SKU, and basket totals.
//!
//! ## Per-SKU Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GREEDY BUNDLING                                                        │
//! │                                                                         │
//! │  q = scanned quantity, rule = { unit, bundle? = (count, price) }        │
//! │                                                                         │
//! │  no bundle, or q < count:                                               │
//! │      line = q × unit                                                    │
//! │                                                                         │
//! │  otherwise:                                                             │
//! │      bundles   = q div count                                            │
//! │      remainder = q - bundles × count                                    │
//! │      line      = bundles × price + remainder × unit                     │
//! │                                                                         │
//! │  A: unit 50, 3 for 130                                                  │
//! │    q=2 → 100   q=3 → 130   q=4 → 180   q=6 → 260   q=7 → 310          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! At most one bundle tier exists per SKU, so there is no choice to make
//! between competing bundle sizes.
//!
//! All arithmetic is checked. A price that would leave the `i64` range is
//! reported as [`CoreError::PriceOverflow`] rather than wrapped.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{PricingRule, RuleSet};

/// How one receipt line was priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBreakdown {
    pub sku: String,
    pub quantity: u32,
    /// Complete bundles formed.
    pub bundles: u32,
    /// Units priced at the unit price.
    pub remainder: u32,
    pub unit_price: Money,
    pub bundle_price: Option<Money>,
    pub total: Money,
}

/// Prices `quantity` units of one SKU.
pub fn line_total(rule: &PricingRule, quantity: u32) -> CoreResult<Money> {
    let (bundles, remainder) = split(rule, quantity);
    let bundle_part = match rule.special_price {
        Some(offer) => offer.price.checked_mul(bundles),
        None => Some(Money::zero()),
    };
    bundle_part
        .zip(rule.unit_price.checked_mul(remainder))
        .and_then(|(bundled, single)| bundled.checked_add(single))
        .ok_or_else(|| overflow(&rule.sku))
}

/// Prices one line and records how it was split.
pub fn price_line(rule: &PricingRule, quantity: u32) -> CoreResult<LineBreakdown> {
    let (bundles, remainder) = split(rule, quantity);
    Ok(LineBreakdown {
        sku: rule.sku.clone(),
        quantity,
        bundles,
        remainder,
        unit_price: rule.unit_price,
        bundle_price: rule.special_price.map(|offer| offer.price),
        total: line_total(rule, quantity)?,
    })
}

/// Sums the lines of a basket.
///
/// SKUs with quantity 0 are skipped. A SKU with no rule in `rules` (its rule
/// was dropped by a reload after it was scanned) contributes nothing.
pub fn total<'a, I>(rules: &RuleSet, quantities: I) -> CoreResult<Money>
where
    I: IntoIterator<Item = (&'a str, u32)>,
{
    quantities
        .into_iter()
        .filter(|&(_, qty)| qty > 0)
        .filter_map(|(sku, qty)| rules.get(sku).map(|rule| (rule, qty)))
        .try_fold(Money::zero(), |acc, (rule, qty)| {
            acc.checked_add(line_total(rule, qty)?)
                .ok_or_else(|| overflow(&rule.sku))
        })
}

fn overflow(sku: &str) -> CoreError {
    CoreError::PriceOverflow { sku: sku.to_string() }
}

/// Splits a quantity into (complete bundles, units at unit price).
fn split(rule: &PricingRule, quantity: u32) -> (u32, u32) {
    match rule.special_price {
        Some(offer) if quantity >= offer.count.get() => {
            let count = offer.count.get();
            let bundles = quantity / count;
            (bundles, quantity - bundles * count)
        }
        _ => (0, quantity),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_a() -> PricingRule {
        PricingRule::with_bundle("A", Money::from_minor(50), 3, Money::from_minor(130))
    }

    fn rule_b() -> PricingRule {
        PricingRule::with_bundle("B", Money::from_minor(30), 2, Money::from_minor(45))
    }

    fn rules() -> RuleSet {
        RuleSet::from_rules([
            rule_a(),
            rule_b(),
            PricingRule::unit("C", Money::from_minor(20)),
            PricingRule::unit("D", Money::from_minor(15)),
        ])
    }

    #[test]
    fn test_bundle_boundaries() {
        let rule = rule_a();
        let cases = [(0, 0), (1, 50), (2, 100), (3, 130), (4, 180), (6, 260), (7, 310)];

        for (qty, want) in cases {
            assert_eq!(
                line_total(&rule, qty).unwrap(),
                Money::from_minor(want),
                "quantity {}",
                qty
            );
        }
    }

    #[test]
    fn test_no_bundle_is_linear() {
        let rule = PricingRule::unit("C", Money::from_minor(20));
        assert_eq!(line_total(&rule, 5).unwrap(), Money::from_minor(100));
    }

    #[test]
    fn test_free_item_always_zero() {
        let rule = PricingRule::unit("FREE", Money::zero());
        assert!(line_total(&rule, 1_000).unwrap().is_zero());
    }

    #[test]
    fn test_bundle_of_one_overrides_unit_price() {
        let rule = PricingRule::with_bundle("X", Money::from_minor(50), 1, Money::from_minor(40));
        assert_eq!(line_total(&rule, 3).unwrap(), Money::from_minor(120));
    }

    #[test]
    fn test_price_line_breakdown() {
        let line = price_line(&rule_a(), 7).unwrap();
        assert_eq!(line.bundles, 2);
        assert_eq!(line.remainder, 1);
        assert_eq!(line.bundle_price, Some(Money::from_minor(130)));
        assert_eq!(line.total, Money::from_minor(310));

        let exact = price_line(&rule_a(), 3).unwrap();
        assert_eq!((exact.bundles, exact.remainder), (1, 0));
        assert_eq!(exact.total, Money::from_minor(130));
    }

    #[test]
    fn test_mixed_basket_total() {
        // A×4, B×3, C×1, D×1 → (130+50) + (45+30) + 20 + 15
        let basket = [("A", 4), ("B", 3), ("C", 1), ("D", 1)];
        assert_eq!(total(&rules(), basket).unwrap(), Money::from_minor(290));
    }

    #[test]
    fn test_multiple_specials() {
        assert_eq!(total(&rules(), [("A", 3), ("B", 2)]).unwrap(), Money::from_minor(175));
        assert_eq!(total(&rules(), [("A", 6), ("B", 4)]).unwrap(), Money::from_minor(350));
        assert_eq!(total(&rules(), [("A", 7), ("B", 5)]).unwrap(), Money::from_minor(430));
    }

    #[test]
    fn test_total_skips_zero_and_unknown_lines() {
        let basket = [("A", 0), ("C", 2), ("GONE", 5)];
        assert_eq!(total(&rules(), basket).unwrap(), Money::from_minor(40));
        assert!(total(&rules(), Vec::<(&str, u32)>::new()).unwrap().is_zero());
    }

    #[test]
    fn test_huge_unit_price_overflows_instead_of_wrapping() {
        let rule = PricingRule::unit("A", Money::from_minor(5_000_000_000_000_000_000));

        assert_eq!(line_total(&rule, 1).unwrap().minor(), 5_000_000_000_000_000_000);
        let err = line_total(&rule, 2).unwrap_err();
        assert!(matches!(err, CoreError::PriceOverflow { ref sku } if sku == "A"));
        assert!(price_line(&rule, 2).is_err());
    }

    #[test]
    fn test_huge_bundle_price_overflows() {
        let rule = PricingRule::with_bundle("B", Money::from_minor(1), 2, Money::from_minor(i64::MAX));
        assert!(line_total(&rule, 3).is_err());
        assert!(line_total(&rule, 4).is_err());
    }

    #[test]
    fn test_basket_sum_overflow_is_reported() {
        let big = Money::from_minor(i64::MAX - 10);
        let rules = RuleSet::from_rules([PricingRule::unit("X", big), PricingRule::unit("Y", big)]);

        assert_eq!(total(&rules, [("X", 1)]).unwrap(), big);
        assert!(matches!(
            total(&rules, [("X", 1), ("Y", 1)]),
            Err(CoreError::PriceOverflow { .. })
        ));
    }
}

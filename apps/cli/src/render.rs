//! Plain-text rendering for the till. Amounts print in minor units, as
//! they appear in the rules file.
//!
//! ```text
//! SKU              UNIT   SPECIAL
//! A                  50   3 for 130
//! C                  20   -
//! ```

use std::fmt::Write as _;

use checkout_core::RuleSet;
use checkout_engine::Receipt;

pub fn rules_table(rules: &RuleSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<12} {:>8}   SPECIAL", "SKU", "UNIT");
    for rule in rules.iter() {
        let special = match rule.special_price {
            Some(offer) => format!("{} for {}", offer.count, offer.price.minor()),
            None => "-".to_string(),
        };
        let _ = writeln!(out, "{:<12} {:>8}   {}", rule.sku, rule.unit_price.minor(), special);
    }
    out
}

pub fn receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    for line in &receipt.lines {
        let _ = write!(out, "{:<12} x{:<4}", line.sku, line.quantity);
        if line.bundles > 0 {
            let _ = write!(out, " ({} bundle(s) + {})", line.bundles, line.remainder);
        }
        let _ = writeln!(out, " {:>10}", line.total.minor());
    }
    let _ = writeln!(out, "Final total: {}", receipt.total.minor());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Money, PricingRule};
    use checkout_engine::{Cart, InlineSource, RefreshMode, RuleOptions};

    fn rule_a() -> PricingRule {
        PricingRule::with_bundle("A", Money::from_minor(50), 3, Money::from_minor(130))
    }

    #[test]
    fn test_rules_table() {
        let rules = RuleSet::from_rules([rule_a(), PricingRule::unit("C", Money::from_minor(20))]);
        let table = rules_table(&rules);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("A "));
        assert!(lines[1].ends_with("3 for 130"));
        assert!(lines[2].ends_with("-"));
    }

    #[test]
    fn test_receipt() {
        let rules = InlineSource::new(
            "items:\n  - sku: A\n    unit_price: 50\n    special_price: { count: 3, price: 130 }\n",
        );
        let cart = Cart::open(rules, RuleOptions::default(), RefreshMode::Off).unwrap();
        for _ in 0..4 {
            cart.scan("A").unwrap();
        }

        let text = receipt(&cart.checkout().unwrap());
        assert!(text.contains("(1 bundle(s) + 1)"));
        assert!(text.ends_with("Final total: 180\n"));
    }
}

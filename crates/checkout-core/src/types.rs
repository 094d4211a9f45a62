//! # Domain Types
//!
//! The pricing rule model.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Rule Types                                      │
//! │                                                                         │
//! │  ┌─────────────────┐      ┌─────────────────┐      ┌─────────────────┐ │
//! │  │  RuleDocument   │ 1──n │  PricingRule    │ 1──? │  BundleOffer    │ │
//! │  │  ─────────────  │      │  ─────────────  │      │  ─────────────  │ │
//! │  │  items          │      │  sku            │      │  count (≥1)     │ │
//! │  └────────┬────────┘      │  unit_price     │      │  price          │ │
//! │           │               │  special_price  │      └─────────────────┘ │
//! │           │ from_document └─────────────────┘                          │
//! │           ▼                                                             │
//! │  ┌─────────────────┐                                                   │
//! │  │    RuleSet      │   immutable SKU → PricingRule snapshot            │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rule File Shape
//! ```yaml
//! items:
//!   - sku: "A"
//!     unit_price: 50
//!     special_price:
//!       count: 3
//!       price: 130
//!   - sku: "C"
//!     unit_price: 20
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::num::NonZeroU32;

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;

// =============================================================================
// Bundle Offer
// =============================================================================

/// "N units for price P".
///
/// `count` is a `NonZeroU32` so that a `count: 0` in the rule file fails
/// parsing instead of reaching the bundle division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleOffer {
    /// Units per bundle.
    pub count: NonZeroU32,

    /// Price of one complete bundle.
    pub price: Money,
}

impl BundleOffer {
    pub const fn new(count: NonZeroU32, price: Money) -> Self {
        BundleOffer { count, price }
    }
}

// =============================================================================
// Pricing Rule
// =============================================================================

/// The price of one SKU, with at most one bundle tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Stock Keeping Unit - the lookup key.
    pub sku: String,

    /// Price of a single unit.
    pub unit_price: Money,

    /// Optional bundle discount.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_price: Option<BundleOffer>,
}

impl PricingRule {
    /// A rule without a bundle.
    pub fn unit(sku: impl Into<String>, unit_price: Money) -> Self {
        PricingRule {
            sku: sku.into(),
            unit_price,
            special_price: None,
        }
    }

    /// A rule with a bundle of `count` units for `price`.
    ///
    /// A `count` of zero cannot form a bundle and yields a plain unit rule.
    pub fn with_bundle(sku: impl Into<String>, unit_price: Money, count: u32, price: Money) -> Self {
        PricingRule {
            sku: sku.into(),
            unit_price,
            special_price: NonZeroU32::new(count).map(|count| BundleOffer::new(count, price)),
        }
    }
}

// =============================================================================
// Rule Document
// =============================================================================

/// The parsed form of a rule source, before indexing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleDocument {
    #[serde(default)]
    pub items: Vec<PricingRule>,
}

// =============================================================================
// Duplicate Policy
// =============================================================================

/// What to do when the same SKU appears twice in one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// The later entry replaces the earlier one.
    #[default]
    LastWins,

    /// The whole document is rejected.
    Reject,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicatePolicy::LastWins => write!(f, "last_wins"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for DuplicatePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "last_wins" | "last-wins" | "overwrite" => Ok(DuplicatePolicy::LastWins),
            "reject" | "strict" => Ok(DuplicatePolicy::Reject),
            other => Err(ValidationError::InvalidFormat {
                field: "duplicates".to_string(),
                reason: format!("unknown policy '{}', expected last_wins or reject", other),
            }),
        }
    }
}

// =============================================================================
// Rule Set
// =============================================================================

/// An immutable point-in-time mapping from SKU to pricing rule.
///
/// ## Lifecycle
/// ```text
/// RuleDocument ──from_document──► RuleSet ──Arc──► RuleStore snapshot
///                                                    │
///                         next successful reload ────┘ replaced wholesale
/// ```
/// A `RuleSet` is never mutated after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: HashMap<String, PricingRule>,
}

impl RuleSet {
    /// Indexes a document by SKU, applying the duplicate policy.
    pub fn from_document(document: RuleDocument, policy: DuplicatePolicy) -> CoreResult<Self> {
        let mut rules = HashMap::with_capacity(document.items.len());

        for rule in document.items {
            if policy == DuplicatePolicy::Reject && rules.contains_key(&rule.sku) {
                return Err(ValidationError::Duplicate {
                    field: "sku".to_string(),
                    value: rule.sku,
                }
                .into());
            }
            rules.insert(rule.sku.clone(), rule);
        }

        Ok(RuleSet { rules })
    }

    /// Builds a set directly from rules, last one wins.
    pub fn from_rules(rules: impl IntoIterator<Item = PricingRule>) -> Self {
        RuleSet {
            rules: rules.into_iter().map(|r| (r.sku.clone(), r)).collect(),
        }
    }

    /// Looks up the rule for a SKU.
    #[inline]
    pub fn get(&self, sku: &str) -> Option<&PricingRule> {
        self.rules.get(sku)
    }

    #[inline]
    pub fn contains(&self, sku: &str) -> bool {
        self.rules.contains_key(sku)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules sorted by SKU.
    pub fn iter(&self) -> impl Iterator<Item = &PricingRule> {
        let mut rules: Vec<&PricingRule> = self.rules.values().collect();
        rules.sort_by(|a, b| a.sku.cmp(&b.sku));
        rules.into_iter()
    }

    /// Converts back into a document, sorted by SKU.
    pub fn to_document(&self) -> RuleDocument {
        RuleDocument {
            items: self.iter().cloned().collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    const PRICING: &str = r#"
items:
  - sku: "A"
    unit_price: 50
    special_price:
      count: 3
      price: 130
  - sku: "B"
    unit_price: 30
    special_price:
      count: 2
      price: 45
  - sku: "C"
    unit_price: 20
  - sku: "D"
    unit_price: 15
"#;

    #[test]
    fn test_document_parses_rule_file_shape() {
        let doc: RuleDocument = serde_yaml::from_str(PRICING).unwrap();
        assert_eq!(doc.items.len(), 4);
        assert_eq!(
            doc.items[0],
            PricingRule::with_bundle("A", Money::from_minor(50), 3, Money::from_minor(130))
        );
        assert_eq!(doc.items[2], PricingRule::unit("C", Money::from_minor(20)));
    }

    #[test]
    fn test_zero_bundle_count_is_a_parse_error() {
        let yaml = "items:\n  - sku: A\n    unit_price: 50\n    special_price:\n      count: 0\n      price: 10\n";
        assert!(serde_yaml::from_str::<RuleDocument>(yaml).is_err());
    }

    #[test]
    fn test_rule_set_indexes_by_sku() {
        let doc: RuleDocument = serde_yaml::from_str(PRICING).unwrap();
        let set = RuleSet::from_document(doc, DuplicatePolicy::LastWins).unwrap();

        assert_eq!(set.len(), 4);
        assert!(set.contains("B"));
        assert!(!set.contains("ZZZ"));
        assert_eq!(set.get("D").unwrap().unit_price, Money::from_minor(15));

        let skus: Vec<&str> = set.iter().map(|r| r.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_duplicate_sku_last_wins() {
        let doc = RuleDocument {
            items: vec![
                PricingRule::unit("A", Money::from_minor(50)),
                PricingRule::unit("A", Money::from_minor(60)),
            ],
        };
        let set = RuleSet::from_document(doc, DuplicatePolicy::LastWins).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get("A").unwrap().unit_price, Money::from_minor(60));
    }

    #[test]
    fn test_duplicate_sku_rejected() {
        let doc = RuleDocument {
            items: vec![
                PricingRule::unit("A", Money::from_minor(50)),
                PricingRule::unit("A", Money::from_minor(60)),
            ],
        };
        let err = RuleSet::from_document(doc, DuplicatePolicy::Reject).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Duplicate { ref value, .. }) if value == "A"
        ));
    }

    #[test]
    fn test_with_bundle_zero_count_is_unit_rule() {
        let rule = PricingRule::with_bundle("A", Money::from_minor(50), 0, Money::from_minor(10));
        assert!(rule.special_price.is_none());
    }

    #[test]
    fn test_duplicate_policy_parsing() {
        assert_eq!("last_wins".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::LastWins);
        assert_eq!("reject".parse::<DuplicatePolicy>().unwrap(), DuplicatePolicy::Reject);
        assert!("first_wins".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn test_to_document_round_trips_through_yaml() {
        let set = RuleSet::from_rules([
            PricingRule::unit("C", Money::from_minor(20)),
            PricingRule::with_bundle("A", Money::from_minor(50), 3, Money::from_minor(130)),
        ]);
        let yaml = serde_yaml::to_string(&set.to_document()).unwrap();
        let doc: RuleDocument = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(RuleSet::from_document(doc, DuplicatePolicy::Reject).unwrap(), set);
    }
}

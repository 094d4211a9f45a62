//! # Validation Module
//!
//! Strict rule validation, applied on top of a successful parse.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Structural parse (always on)                                 │
//! │  ├── YAML must be well-formed                                          │
//! │  ├── Field types must match (integers, strings)                        │
//! │  └── special_price.count must be non-zero                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (opt-in, strict_validation = true)               │
//! │  ├── SKU non-empty, no whitespace                                      │
//! │  └── Prices non-negative                                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Duplicate policy (RuleSet::from_document)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::validate_sku;
//!
//! assert!(validate_sku("A").is_ok());
//! assert!(validate_sku("").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{PricingRule, RuleDocument};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a SKU.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain whitespace (the till splits commands on whitespace)
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: format!("'{}' must not contain whitespace", sku),
        });
    }

    Ok(())
}

fn validate_price(field: &str, sku: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            sku: sku.to_string(),
            value: price.minor(),
        });
    }
    Ok(())
}

/// Validates one rule.
pub fn validate_rule(rule: &PricingRule) -> ValidationResult<()> {
    validate_sku(&rule.sku)?;
    validate_price("unit_price", &rule.sku, rule.unit_price)?;

    if let Some(offer) = rule.special_price {
        validate_price("special_price.price", &rule.sku, offer.price)?;
    }

    Ok(())
}

/// Validates every rule in a document, stopping at the first failure.
pub fn validate_document(document: &RuleDocument) -> ValidationResult<()> {
    document.items.iter().try_for_each(validate_rule)
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Engine Error Types
//!
//! Error types for rule loading and cart operations.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Engine Error Categories                            │
//! │                                                                         │
//! │  ┌──────────────────────┐  ┌──────────────────┐  ┌──────────────────┐  │
//! │  │  Rule source         │  │  Cart            │  │  Configuration   │  │
//! │  │                      │  │                  │  │                  │  │
//! │  │  SourceUnreadable    │  │  UnknownSku      │  │  InvalidConfig   │  │
//! │  │  MalformedRules      │  │  NothingToRemove │  │  ConfigLoadFailed│  │
//! │  │  InvalidRules        │  │  QuantityLimit   │  │                  │  │
//! │  │                      │  │  CartClosed      │  │                  │  │
//! │  └──────────────────────┘  └──────────────────┘  └──────────────────┘  │
//! │                                                                         │
//! │  Rule source errors: fatal at startup, swallowed on later refreshes    │
//! │  (unless refresh = "strict").                                          │
//! │  Cart errors: always returned, the cart is left unchanged.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use checkout_core::CoreError;
use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type covering rule loading, cart and configuration failures.
#[derive(Debug, Error)]
pub enum EngineError {
    // =========================================================================
    // Rule Source Errors
    // =========================================================================
    /// The rule source could not be read (missing file, permissions).
    #[error("Cannot read rules from {origin}: {reason}")]
    SourceUnreadable { origin: String, reason: String },

    /// The rule source was read but is not a valid rule document.
    #[error("Malformed rules in {origin}: {reason}")]
    MalformedRules { origin: String, reason: String },

    /// The document parsed but failed strict validation or the duplicate
    /// policy, or one of its prices overflowed while pricing the cart.
    #[error("Invalid rules: {0}")]
    InvalidRules(#[from] CoreError),

    // =========================================================================
    // Cart Errors
    // =========================================================================
    /// The SKU is not in the current rule set.
    #[error("unknown SKU {0:?}")]
    UnknownSku(String),

    /// `remove` called for a SKU with nothing scanned.
    #[error("no {0:?} in cart to remove")]
    NothingToRemove(String),

    /// The SKU's scanned count is already at `u32::MAX`.
    #[error("cannot scan more {0:?}, quantity limit reached")]
    QuantityLimit(String),

    /// The cart has been checked out.
    #[error("cart is closed")]
    CartClosed,

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid engine configuration.
    #[error("Invalid checkout configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Constructors
// =============================================================================

impl EngineError {
    /// Creates a SourceUnreadable error.
    pub fn unreadable(origin: impl Into<String>, reason: impl ToString) -> Self {
        EngineError::SourceUnreadable {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }

    /// Creates a MalformedRules error.
    pub fn malformed(origin: impl Into<String>, reason: impl ToString) -> Self {
        EngineError::MalformedRules {
            origin: origin.into(),
            reason: reason.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(EngineError::UnknownSku("X".into()).to_string(), "unknown SKU \"X\"");
        assert_eq!(
            EngineError::NothingToRemove("A".into()).to_string(),
            "no \"A\" in cart to remove"
        );
        assert_eq!(
            EngineError::unreadable("pricing.yaml", "No such file").to_string(),
            "Cannot read rules from pricing.yaml: No such file"
        );
    }

    #[test]
    fn test_cart_error_messages() {
        assert_eq!(EngineError::CartClosed.to_string(), "cart is closed");
        assert_eq!(
            EngineError::QuantityLimit("C".into()).to_string(),
            "cannot scan more \"C\", quantity limit reached"
        );
    }
}

//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core errors (this file)                                      │
//! │  ├── CoreError        - Rule set and price arithmetic failures         │
//! │  └── ValidationError  - Strict rule validation failures                │
//! │                                                                         │
//! │  checkout-engine errors (separate crate)                               │
//! │  └── EngineError      - Source, parse, cart and config failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → EngineError → CLI (anyhow)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core rule-model errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A rule document was rejected by strict validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A line or basket total left the representable money range.
    #[error("price of {sku:?} overflows the money range")]
    PriceOverflow { sku: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rule validation errors.
///
/// Only produced when strict validation or the `Reject` duplicate policy is
/// switched on; the default load path accepts any structurally valid
/// document.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., whitespace inside a SKU).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value must not be negative.
    #[error("{field} for {sku} must not be negative, got {value}")]
    Negative {
        field: String,
        sku: String,
        value: i64,
    },

    /// Duplicate value (e.g., duplicate SKU).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

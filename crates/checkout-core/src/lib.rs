//! # checkout-core: Pure Pricing Logic
//!
//! This crate is the **heart** of the checkout. It contains the rule model
//! and the pricing arithmetic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Checkout Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Front end (apps/cli REPL, tests)                │   │
//! │  │         scan <SKU>  ──►  remove <SKU>  ──►  total / checkout    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            checkout-engine (RuleStore + Cart, RwLock)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ checkout-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  pricing  │  │ validation│  │   │
//! │  │   │PricingRule│  │   Money   │  │ line_total│  │  strict   │  │   │
//! │  │   │  RuleSet  │  │           │  │   total   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO FILES • PURE FUNCTIONS                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Rule types (PricingRule, BundleOffer, RuleSet)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Greedy bundle pricing per SKU and basket totals
//! - [`error`] - Domain error types
//! - [`validation`] - Opt-in strict rule validation
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::{pricing, Money, PricingRule};
//!
//! let rule = PricingRule::with_bundle("A", Money::from_minor(50), 3, Money::from_minor(130));
//!
//! assert_eq!(pricing::line_total(&rule, 4).unwrap(), Money::from_minor(180));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pricing::LineBreakdown;
pub use types::*;

//! # checkout-engine: Rule Store and Cart
//!
//! Keeps a cart priced against a rule file that may change underneath it.
//!
//! ## Module Organization
//! ```text
//! checkout_engine/
//! ├── lib.rs      ◄─── You are here (exports)
//! ├── source.rs   ◄─── RuleSource trait, FileSource, InlineSource
//! ├── store.rs    ◄─── RuleStore: load / refresh / lookup
//! ├── cart.rs     ◄─── Cart: scan / remove / total / checkout
//! ├── config.rs   ◄─── CheckoutConfig (TOML + env), RefreshMode
//! └── error.rs    ◄─── EngineError
//! ```
//!
//! ## Example
//! ```rust
//! use checkout_engine::{Cart, InlineSource, RefreshMode, RuleOptions};
//!
//! let rules = InlineSource::new(
//!     "items:\n  - sku: A\n    unit_price: 50\n    special_price: { count: 3, price: 130 }\n",
//! );
//! let cart = Cart::open(rules, RuleOptions::default(), RefreshMode::BestEffort).unwrap();
//!
//! for _ in 0..4 {
//!     cart.scan("A").unwrap();
//! }
//! assert_eq!(cart.total().unwrap().minor(), 180);
//! ```

pub mod cart;
pub mod config;
pub mod error;
pub mod source;
pub mod store;

pub use cart::{Cart, CartStatus, Receipt};
pub use config::{CheckoutConfig, RefreshMode, RulesSettings};
pub use error::{EngineError, EngineResult};
pub use source::{FileSource, InlineSource, RuleSource};
pub use store::{parse_rules, RuleOptions, RuleStore};

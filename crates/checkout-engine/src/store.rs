//! # Rule Store
//!
//! Owns the authoritative SKU → rule snapshot and keeps it fresh against
//! a [`RuleSource`].
//!
//! ## Load / Refresh Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  source.fetch() ──► serde_yaml ──► validate? ──► RuleSet::from_document │
//! │       │                 │              │                 │               │
//! │  SourceUnreadable  MalformedRules   InvalidRules    InvalidRules         │
//! │                                                     (duplicates=reject) │
//! │                                                                         │
//! │  load():    the pipeline above, no state touched                        │
//! │  refresh(): load() then swap the Arc<RuleSet> on success;               │
//! │             on failure the previous snapshot stays live                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store has no lock of its own. [`crate::Cart`] keeps it behind the same
//! `RwLock` as the scanned quantities.

use std::sync::Arc;

use checkout_core::validation::validate_document;
use checkout_core::{CoreError, DuplicatePolicy, PricingRule, RuleDocument, RuleSet};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::source::RuleSource;

/// How a rule document is turned into a [`RuleSet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleOptions {
    pub duplicates: DuplicatePolicy,
    pub strict_validation: bool,
}

/// Parses rule text into a complete rule set.
///
/// Nothing is returned unless the whole document is accepted.
pub fn parse_rules(text: &str, origin: &str, options: RuleOptions) -> EngineResult<RuleSet> {
    let document: RuleDocument =
        serde_yaml::from_str(text).map_err(|e| EngineError::malformed(origin, e))?;

    if options.strict_validation {
        validate_document(&document).map_err(CoreError::from)?;
    }

    Ok(RuleSet::from_document(document, options.duplicates)?)
}

/// SKU → rule snapshot bound to its source.
#[derive(Debug)]
pub struct RuleStore<S> {
    source: S,
    options: RuleOptions,
    rules: Arc<RuleSet>,
}

impl<S: RuleSource> RuleStore<S> {
    /// Loads the initial rule set. Any failure here is fatal to the caller.
    pub fn open(source: S, options: RuleOptions) -> EngineResult<Self> {
        let rules = Self::load_from(&source, options)?;
        info!(source = %source.describe(), rules = rules.len(), "Pricing rules loaded");

        Ok(RuleStore {
            source,
            options,
            rules: Arc::new(rules),
        })
    }

    fn load_from(source: &S, options: RuleOptions) -> EngineResult<RuleSet> {
        let text = source.fetch()?;
        parse_rules(&text, &source.describe(), options)
    }

    /// Fetches and parses the source without touching the live snapshot.
    pub fn load(&self) -> EngineResult<RuleSet> {
        Self::load_from(&self.source, self.options)
    }

    /// Reloads from the source and swaps the snapshot on success.
    pub fn refresh(&mut self) -> EngineResult<()> {
        let rules = self.load()?;
        self.install(rules);
        Ok(())
    }

    /// Replaces the live snapshot wholesale.
    pub fn install(&mut self, rules: RuleSet) {
        debug!(source = %self.source.describe(), rules = rules.len(), "Pricing rules refreshed");
        self.rules = Arc::new(rules);
    }

    /// The live snapshot. Stays valid after later swaps.
    pub fn snapshot(&self) -> Arc<RuleSet> {
        Arc::clone(&self.rules)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn lookup(&self, sku: &str) -> EngineResult<&PricingRule> {
        self.rules
            .get(sku)
            .ok_or_else(|| EngineError::UnknownSku(sku.to_string()))
    }
}

//! # Cart
//!
//! The checkout state machine: scanned quantities priced against a live
//! rule store.
//!
//! ## Thread Safety
//! The rule store and the quantity map sit behind ONE `RwLock`:
//! 1. `total` / `lines` / `quantity` take the read lock and run concurrently
//! 2. `scan` / `remove` / `checkout` and rule reloads take the write lock
//! 3. A reload fetches, parses and swaps under one write lock, so reloads
//!    install in the order they read the source and never roll back to an
//!    older document
//! 4. A reader never sees a half-installed rule set: the new set is built
//!    in full before the `Arc` is swapped
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation        Refresh (per RefreshMode)     Then                    │
//! │  ─────────        ─────────────────────────     ────                    │
//! │                                                                         │
//! │  scan(sku) ─────► reload rules ──► [write] known? ──► qty += 1          │
//! │                                                                         │
//! │  remove(sku) ───► reload rules ──► [write] known? qty > 0? ──► qty -= 1 │
//! │                                                                         │
//! │  total() ───────► reload rules ──► [read]  Σ line_total(rule, qty)      │
//! │                                                                         │
//! │  checkout() ────► reload rules ──► [write] price lines, status=Closed   │
//! │                                                                         │
//! │  Reload: [write] fetch + parse + swap (old rules kept on failure)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Status
//! `Open` until `checkout()`. A closed cart rejects `scan`, `remove` and a
//! second `checkout` with `CartClosed`; totals stay readable.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use checkout_core::pricing::{self, LineBreakdown};
use checkout_core::{CoreResult, Money, RuleSet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{CheckoutConfig, RefreshMode};
use crate::error::{EngineError, EngineResult};
use crate::source::{FileSource, RuleSource};
use crate::store::{RuleOptions, RuleStore};

// =============================================================================
// Status and Receipt
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartStatus {
    /// Scanning, removal and totals permitted.
    Open,
    /// Checked out; only reads permitted.
    Closed,
}

/// The result of a checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub cart_id: Uuid,
    pub opened_at: DateTime<Utc>,
    pub closed_at: DateTime<Utc>,
    /// Priced lines, sorted by SKU.
    pub lines: Vec<LineBreakdown>,
    pub total: Money,
}

// =============================================================================
// Ledger (lock-guarded state)
// =============================================================================

#[derive(Debug)]
struct Ledger<S> {
    store: RuleStore<S>,
    quantities: HashMap<String, u32>,
    status: CartStatus,
}

impl<S: RuleSource> Ledger<S> {
    fn quantity(&self, sku: &str) -> u32 {
        self.quantities.get(sku).copied().unwrap_or(0)
    }

    fn total(&self) -> EngineResult<Money> {
        let total = pricing::total(
            self.store.rules(),
            self.quantities.iter().map(|(sku, qty)| (sku.as_str(), *qty)),
        )?;
        Ok(total)
    }

    fn lines(&self) -> EngineResult<Vec<LineBreakdown>> {
        let rules = self.store.rules();
        let mut lines = self
            .quantities
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .filter_map(|(sku, qty)| rules.get(sku).map(|rule| pricing::price_line(rule, *qty)))
            .collect::<CoreResult<Vec<_>>>()?;
        lines.sort_by(|a, b| a.sku.cmp(&b.sku));
        Ok(lines)
    }

    fn ensure_open(&self) -> EngineResult<()> {
        match self.status {
            CartStatus::Open => Ok(()),
            CartStatus::Closed => Err(EngineError::CartClosed),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A checkout session.
///
/// `Cart` is `Send + Sync`; share it behind an `Arc` to drive one cart
/// from several request handlers.
#[derive(Debug)]
pub struct Cart<S = FileSource> {
    id: Uuid,
    opened_at: DateTime<Utc>,
    refresh: RefreshMode,
    ledger: RwLock<Ledger<S>>,
}

impl Cart<FileSource> {
    /// Opens a cart over the rules file named in the configuration.
    ///
    /// Fails if the rules cannot be read or parsed.
    pub fn from_config(config: &CheckoutConfig) -> EngineResult<Self> {
        Self::open(
            FileSource::new(config.rules.path.clone()),
            config.rule_options(),
            config.rules.refresh,
        )
    }
}

impl<S: RuleSource> Cart<S> {
    /// Loads the rules and opens an empty cart.
    pub fn open(source: S, options: RuleOptions, refresh: RefreshMode) -> EngineResult<Self> {
        let store = RuleStore::open(source, options)?;
        Ok(Self::with_store(store, refresh))
    }

    /// Opens an empty cart over an already-loaded store.
    pub fn with_store(store: RuleStore<S>, refresh: RefreshMode) -> Self {
        let cart = Cart {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            refresh,
            ledger: RwLock::new(Ledger {
                store,
                quantities: HashMap::new(),
                status: CartStatus::Open,
            }),
        };
        info!(cart = %cart.id, refresh = %refresh, "Cart opened");
        cart
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn refresh_mode(&self) -> RefreshMode {
        self.refresh
    }

    pub fn status(&self) -> CartStatus {
        self.read().status
    }

    // =========================================================================
    // Locking
    // =========================================================================

    // Every mutation is all-or-nothing, so a poisoned lock still guards a
    // consistent ledger.
    fn read(&self) -> RwLockReadGuard<'_, Ledger<S>> {
        self.ledger.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger<S>> {
        self.ledger.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Rule Refresh
    // =========================================================================

    /// Reloads the rules now, regardless of the refresh mode.
    ///
    /// Errors are always returned; the previous rules stay live on failure.
    pub fn refresh(&self) -> EngineResult<()> {
        self.write().store.refresh()
    }

    /// The implicit refresh run at the start of every operation.
    fn refresh_for_operation(&self) -> EngineResult<()> {
        match self.refresh {
            RefreshMode::Off => Ok(()),
            RefreshMode::Strict => self.refresh(),
            RefreshMode::BestEffort => {
                if let Err(e) = self.refresh() {
                    warn!(cart = %self.id, error = %e, "Rule refresh failed, keeping last good rules");
                }
                Ok(())
            }
        }
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Adds one unit of `sku`.
    ///
    /// ## Errors
    /// - `UnknownSku` if the SKU is not in the current rules
    /// - `QuantityLimit` if the SKU's count is already `u32::MAX`
    /// - `CartClosed` after checkout
    /// - a rule source error, in strict refresh mode
    pub fn scan(&self, sku: &str) -> EngineResult<()> {
        self.refresh_for_operation()?;

        let mut ledger = self.write();
        ledger.ensure_open()?;
        ledger.store.lookup(sku)?;

        let qty = ledger
            .quantity(sku)
            .checked_add(1)
            .ok_or_else(|| EngineError::QuantityLimit(sku.to_string()))?;
        ledger.quantities.insert(sku.to_string(), qty);
        debug!(cart = %self.id, sku, quantity = qty, "Scanned");
        Ok(())
    }

    /// Takes back one unit of `sku`.
    ///
    /// ## Errors
    /// - `UnknownSku` if the SKU is not in the current rules
    /// - `NothingToRemove` if none of it is in the cart
    /// - `CartClosed` after checkout
    /// - a rule source error, in strict refresh mode
    pub fn remove(&self, sku: &str) -> EngineResult<()> {
        self.refresh_for_operation()?;

        let mut ledger = self.write();
        ledger.ensure_open()?;
        ledger.store.lookup(sku)?;

        let remaining = match ledger.quantity(sku) {
            0 => return Err(EngineError::NothingToRemove(sku.to_string())),
            qty => qty - 1,
        };
        if remaining == 0 {
            ledger.quantities.remove(sku);
        } else {
            ledger.quantities.insert(sku.to_string(), remaining);
        }
        debug!(cart = %self.id, sku, quantity = remaining, "Removed");
        Ok(())
    }

    /// The running total against the freshest rules.
    ///
    /// Fails in strict refresh mode when the rules cannot be reloaded, and
    /// when a price leaves the money range.
    pub fn total(&self) -> EngineResult<Money> {
        self.refresh_for_operation()?;
        self.read().total()
    }

    /// Priced lines against the freshest rules, sorted by SKU.
    pub fn lines(&self) -> EngineResult<Vec<LineBreakdown>> {
        self.refresh_for_operation()?;
        self.read().lines()
    }

    /// Scanned quantity of one SKU. Does not refresh.
    pub fn quantity(&self, sku: &str) -> u32 {
        self.read().quantity(sku)
    }

    /// The rule snapshot currently in use. Does not refresh.
    pub fn rules(&self) -> Arc<RuleSet> {
        self.read().store.snapshot()
    }

    /// Prices the cart one last time and closes it.
    ///
    /// The cart stays open if pricing fails.
    pub fn checkout(&self) -> EngineResult<Receipt> {
        self.refresh_for_operation()?;

        let mut ledger = self.write();
        ledger.ensure_open()?;

        let receipt = Receipt {
            cart_id: self.id,
            opened_at: self.opened_at,
            closed_at: Utc::now(),
            lines: ledger.lines()?,
            total: ledger.total()?,
        };
        ledger.status = CartStatus::Closed;

        info!(cart = %self.id, total = %receipt.total, lines = receipt.lines.len(), "Checked out");
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

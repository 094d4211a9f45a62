//! # checkout: Interactive Till
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          STARTUP SEQUENCE                               │
//! │                                                                         │
//! │  1. init_tracing()         RUST_LOG, default "info", to stderr          │
//! │  2. CommandLine::parse     --config / --rules / --refresh               │
//! │  3. CheckoutConfig::load   defaults ◄ checkout.toml ◄ CHECKOUT_* env    │
//! │  4. apply_to               flags win                                    │
//! │  5. dispatch               repl (default) | rules [--json]              │
//! │                                                                         │
//! │  A missing or malformed rules file at startup is fatal (exit code 1).   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod render;
mod repl;

use std::io;

use anyhow::Context;
use checkout_engine::{Cart, CheckoutConfig, FileSource, RuleStore};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{CommandLine, Commands};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let args = CommandLine::parse_args();
    let mut config = CheckoutConfig::load(args.config.clone()).context("loading configuration")?;
    args.apply_to(&mut config);

    match args.command.unwrap_or(Commands::Repl) {
        Commands::Repl => run_till(&config),
        Commands::Rules { json } => print_rules(&config, json),
    }
}

/// Initializes the tracing subscriber.
///
/// Logs go to stderr so they never interleave with till output.
/// `RUST_LOG=checkout_engine=debug` shows every rule reload.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_till(config: &CheckoutConfig) -> anyhow::Result<()> {
    let cart = Cart::from_config(config)
        .with_context(|| format!("opening cart with rules {}", config.rules.path.display()))?;
    info!(cart_id = %cart.id(), refresh = %cart.refresh_mode(), "Till ready");

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Some(receipt) = repl::run(&cart, stdin.lock(), stdout.lock())? {
        info!(cart_id = %receipt.cart_id, total = %receipt.total, "Checked out");
    }
    Ok(())
}

fn print_rules(config: &CheckoutConfig, json: bool) -> anyhow::Result<()> {
    let store = RuleStore::open(FileSource::new(config.rules.path.clone()), config.rule_options())
        .with_context(|| format!("loading rules from {}", config.rules.path.display()))?;

    if json {
        let document = store.rules().to_document();
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", render::rules_table(store.rules()));
    }
    Ok(())
}

//! # Interactive Checkout Loop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  > scan A          ──► cart.scan("A")        (errors printed, loop on)  │
//! │  > remove A        ──► cart.remove("A")                                 │
//! │  > total           ──► "Total: 130"                                     │
//! │  > checkout        ──► receipt + "Final total: 130", loop ends          │
//! │  > exit            ──► loop ends, nothing charged                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so the loop runs against in-memory buffers
//! in tests.

use std::io::{self, BufRead, Write};

use checkout_engine::{Cart, Receipt, RuleSource};
use tracing::debug;

use crate::render;

pub const MENU: &str = "\
commands:
  1. scan <SKU>     - add an item
  2. remove <SKU>   - remove an item
  3. total          - show current total
  4. checkout       - show total and exit
  5. exit           - exit without checking out

Enter a command to get started";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
pub enum Command<'a> {
    Scan(&'a str),
    Remove(&'a str),
    Total,
    Checkout,
    Help,
    Exit,
    /// Known command, wrong number of arguments.
    Usage(&'static str),
    Unknown(&'a str),
}

/// Parses a line; `None` for blank lines.
pub fn parse_line(line: &str) -> Option<Command<'_>> {
    let mut parts = line.split_whitespace();
    let cmd = parts.next()?;
    let args: Vec<&str> = parts.collect();

    let command = match (cmd, args.as_slice()) {
        ("scan", [sku]) => Command::Scan(sku),
        ("scan", _) => Command::Usage("Command use: scan <SKU>"),
        ("remove", [sku]) => Command::Remove(sku),
        ("remove", _) => Command::Usage("Command use: remove <SKU>"),
        ("total", _) => Command::Total,
        ("checkout", _) => Command::Checkout,
        ("help", _) => Command::Help,
        ("exit" | "quit", _) => Command::Exit,
        (other, _) => Command::Unknown(other),
    };
    Some(command)
}

/// Runs the loop until `checkout`, `exit` or end of input.
///
/// Returns the receipt if the session was checked out.
pub fn run<S, R, W>(cart: &Cart<S>, input: R, mut out: W) -> io::Result<Option<Receipt>>
where
    S: RuleSource,
    R: BufRead,
    W: Write,
{
    writeln!(out, "Type 'help' for commands")?;
    writeln!(out, "{}", MENU)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(None);
        };
        let Some(command) = parse_line(&line) else {
            continue;
        };
        debug!(?command, "Till command");

        match command {
            Command::Scan(sku) => {
                if let Err(e) = cart.scan(sku) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Command::Remove(sku) => {
                if let Err(e) = cart.remove(sku) {
                    writeln!(out, "error: {}", e)?;
                }
            }
            Command::Total => match cart.total() {
                Ok(total) => writeln!(out, "Total: {}", total.minor())?,
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::Checkout => match cart.checkout() {
                Ok(receipt) => {
                    write!(out, "{}", render::receipt(&receipt))?;
                    return Ok(Some(receipt));
                }
                Err(e) => writeln!(out, "error: {}", e)?,
            },
            Command::Help => writeln!(out, "{}", MENU)?,
            Command::Exit => return Ok(None),
            Command::Usage(usage) => writeln!(out, "{}", usage)?,
            Command::Unknown(_) => writeln!(out, "unknown command; type 'help'")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_engine::{InlineSource, RefreshMode, RuleOptions};
    use std::io::Cursor;

    const PRICING: &str = r#"
items:
  - sku: "A"
    unit_price: 50
    special_price:
      count: 3
      price: 130
  - sku: "B"
    unit_price: 30
"#;

    fn session(script: &str) -> (Option<Receipt>, String) {
        let cart = Cart::open(
            InlineSource::new(PRICING),
            RuleOptions::default(),
            RefreshMode::BestEffort,
        )
        .unwrap();
        let mut out = Vec::new();
        let receipt = run(&cart, Cursor::new(script), &mut out).unwrap();
        (receipt, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("scan A"), Some(Command::Scan("A")));
        assert_eq!(parse_line("  remove   B "), Some(Command::Remove("B")));
        assert_eq!(parse_line("scan"), Some(Command::Usage("Command use: scan <SKU>")));
        assert_eq!(parse_line("scan A B"), Some(Command::Usage("Command use: scan <SKU>")));
        assert_eq!(parse_line("total"), Some(Command::Total));
        assert_eq!(parse_line("dance"), Some(Command::Unknown("dance")));
    }

    #[test]
    fn test_scan_total_checkout() {
        let (receipt, out) = session("scan A\nscan A\nscan A\nscan B\ntotal\ncheckout\nscan A\n");
        let receipt = receipt.unwrap();

        assert_eq!(receipt.total.minor(), 160);
        assert!(out.contains("Total: 160"));
        assert!(out.contains("Final total: 160"));
        // Input after checkout is never read.
        assert!(!out.contains("cart is closed"));
    }

    #[test]
    fn test_errors_are_printed_and_loop_continues() {
        let (receipt, out) = session("scan ZZZ\nremove A\nfoo\nremove\nscan B\ntotal\nexit\n");

        assert!(receipt.is_none());
        assert!(out.contains("error: unknown SKU \"ZZZ\""));
        assert!(out.contains("error: no \"A\" in cart to remove"));
        assert!(out.contains("unknown command; type 'help'"));
        assert!(out.contains("Command use: remove <SKU>"));
        assert!(out.contains("Total: 30"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let (receipt, out) = session("scan A\n");
        assert!(receipt.is_none());
        assert!(out.ends_with("> \n"));
    }
}

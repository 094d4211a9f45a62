//! Command-line flags.

use std::path::PathBuf;

use checkout_engine::{CheckoutConfig, RefreshMode};
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "checkout")]
#[command(about = "A supermarket checkout with live pricing rules.")]
pub struct CommandLine {
    /// Path to checkout.toml (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the pricing rules YAML, overrides the config file
    #[arg(long, global = true)]
    pub rules: Option<PathBuf>,

    /// Rule refresh mode: best_effort, strict or off
    #[arg(long, global = true)]
    pub refresh: Option<RefreshMode>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start an interactive checkout (default)
    #[command(alias = "r")]
    Repl,
    /// Print the loaded pricing rules and exit
    Rules {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Flags win over the config file and the environment.
    pub fn apply_to(&self, config: &mut CheckoutConfig) {
        if let Some(rules) = &self.rules {
            config.rules.path = rules.clone();
        }
        if let Some(refresh) = self.refresh {
            config.rules.refresh = refresh;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_repl() {
        let cmd = CommandLine::try_parse_from(["checkout"]).unwrap();
        assert!(cmd.command.is_none());
        assert!(cmd.rules.is_none());
    }

    #[test]
    fn test_flags_override_config() {
        let cmd = CommandLine::try_parse_from([
            "checkout",
            "rules",
            "--json",
            "--rules",
            "/tmp/p.yaml",
            "--refresh",
            "strict",
        ])
        .unwrap();
        assert!(matches!(cmd.command, Some(Commands::Rules { json: true })));

        let mut config = CheckoutConfig::default();
        cmd.apply_to(&mut config);
        assert_eq!(config.rules.path, PathBuf::from("/tmp/p.yaml"));
        assert_eq!(config.rules.refresh, RefreshMode::Strict);
    }

    #[test]
    fn test_bad_refresh_mode_rejected() {
        assert!(CommandLine::try_parse_from(["checkout", "--refresh", "sometimes"]).is_err());
    }
}

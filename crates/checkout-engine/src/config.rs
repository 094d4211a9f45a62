//! # Checkout Configuration
//!
//! Where the rules live and how the cart keeps them fresh.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (applied by the front end)                      │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     CHECKOUT_RULES_PATH=/etc/till/pricing.yaml                         │
//! │     CHECKOUT_REFRESH_MODE=strict                                       │
//! │     CHECKOUT_DUPLICATES=reject                                         │
//! │     CHECKOUT_STRICT_VALIDATION=true                                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/checkout/checkout.toml (Linux)                           │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     pricing.yaml, best_effort, last_wins, no strict validation         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [rules]
//! path = "pricing.yaml"
//! refresh = "best_effort"   # best_effort | strict | off
//! duplicates = "last_wins"  # last_wins | reject
//! strict_validation = false
//! ```

use checkout_core::DuplicatePolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::store::RuleOptions;

// =============================================================================
// Refresh Mode
// =============================================================================

/// What a cart operation does about reloading rules first.
///
/// ## Mode Comparison
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  BEST_EFFORT (Default)                                                 │
/// │  • Reload before every scan / remove / total                           │
/// │  • Reload failure is logged and the last good rules are used           │
/// │  • A half-written rules file never interrupts a customer               │
/// │                                                                         │
/// │  STRICT                                                                │
/// │  • Reload before every operation                                       │
/// │  • Reload failure fails the operation (nothing is mutated)             │
/// │                                                                         │
/// │  OFF                                                                   │
/// │  • Rules loaded once at startup, never reloaded implicitly             │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefreshMode {
    #[default]
    BestEffort,
    Strict,
    Off,
}

impl std::fmt::Display for RefreshMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefreshMode::BestEffort => write!(f, "best_effort"),
            RefreshMode::Strict => write!(f, "strict"),
            RefreshMode::Off => write!(f, "off"),
        }
    }
}

impl std::str::FromStr for RefreshMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best_effort" | "best-effort" | "swallow" => Ok(RefreshMode::BestEffort),
            "strict" | "propagate" => Ok(RefreshMode::Strict),
            "off" | "never" | "disabled" => Ok(RefreshMode::Off),
            other => Err(EngineError::InvalidConfig(format!(
                "Unknown refresh mode: '{}'. Valid options: best_effort, strict, off",
                other
            ))),
        }
    }
}

// =============================================================================
// Rules Settings
// =============================================================================

/// The `[rules]` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesSettings {
    /// Path of the YAML rules file.
    #[serde(default = "default_rules_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub refresh: RefreshMode,

    #[serde(default)]
    pub duplicates: DuplicatePolicy,

    /// Reject empty SKUs and negative prices on load.
    #[serde(default)]
    pub strict_validation: bool,
}

fn default_rules_path() -> PathBuf {
    PathBuf::from("pricing.yaml")
}

impl Default for RulesSettings {
    fn default() -> Self {
        RulesSettings {
            path: default_rules_path(),
            refresh: RefreshMode::default(),
            duplicates: DuplicatePolicy::default(),
            strict_validation: false,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete checkout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckoutConfig {
    #[serde(default)]
    pub rules: RulesSettings,
}

impl CheckoutConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> EngineResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| EngineError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> EngineResult<()> {
        if self.rules.path.as_os_str().is_empty() {
            return Err(EngineError::InvalidConfig(
                "rules.path must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Applies `CHECKOUT_*` overrides read through `lookup`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("CHECKOUT_RULES_PATH") {
            debug!(path = %path, "Overriding rules path from environment");
            self.rules.path = PathBuf::from(path);
        }

        if let Some(mode) = lookup("CHECKOUT_REFRESH_MODE") {
            match mode.parse() {
                Ok(parsed) => self.rules.refresh = parsed,
                Err(_) => warn!(mode = %mode, "Unknown refresh mode in environment"),
            }
        }

        if let Some(policy) = lookup("CHECKOUT_DUPLICATES") {
            match policy.parse() {
                Ok(parsed) => self.rules.duplicates = parsed,
                Err(_) => warn!(policy = %policy, "Unknown duplicate policy in environment"),
            }
        }

        if let Some(strict) = lookup("CHECKOUT_STRICT_VALIDATION") {
            match strict.parse::<bool>() {
                Ok(parsed) => self.rules.strict_validation = parsed,
                Err(_) => warn!(value = %strict, "CHECKOUT_STRICT_VALIDATION is not a bool"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "till")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    /// The parse options for the rule store.
    pub fn rule_options(&self) -> RuleOptions {
        RuleOptions {
            duplicates: self.rules.duplicates,
            strict_validation: self.rules.strict_validation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_refresh_mode_parsing() {
        assert_eq!("best_effort".parse::<RefreshMode>().unwrap(), RefreshMode::BestEffort);
        assert_eq!("STRICT".parse::<RefreshMode>().unwrap(), RefreshMode::Strict);
        assert_eq!("off".parse::<RefreshMode>().unwrap(), RefreshMode::Off);
        assert!("sometimes".parse::<RefreshMode>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = CheckoutConfig::default();
        assert_eq!(config.rules.path, PathBuf::from("pricing.yaml"));
        assert_eq!(config.rules.refresh, RefreshMode::BestEffort);
        assert_eq!(config.rules.duplicates, DuplicatePolicy::LastWins);
        assert!(!config.rules.strict_validation);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
[rules]
path = "/srv/till/pricing.yaml"
refresh = "strict"
duplicates = "reject"
"#;
        let config: CheckoutConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.rules.path, PathBuf::from("/srv/till/pricing.yaml"));
        assert_eq!(config.rules.refresh, RefreshMode::Strict);
        assert_eq!(config.rules.duplicates, DuplicatePolicy::Reject);
        assert!(!config.rules.strict_validation);

        let empty: CheckoutConfig = toml::from_str("").unwrap();
        assert_eq!(empty.rules.refresh, RefreshMode::BestEffort);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("checkout.toml");
        std::fs::write(&path, "[rules]\nrefresh = \"off\"\n").unwrap();

        let config = CheckoutConfig::load(Some(path)).unwrap();
        assert_eq!(config.rules.refresh, RefreshMode::Off);

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[rules\n").unwrap();
        assert!(matches!(
            CheckoutConfig::load(Some(bad)),
            Err(EngineError::ConfigLoadFailed(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("CHECKOUT_RULES_PATH", "other.yaml"),
            ("CHECKOUT_REFRESH_MODE", "strict"),
            ("CHECKOUT_DUPLICATES", "nonsense"),
            ("CHECKOUT_STRICT_VALIDATION", "true"),
        ]
        .into_iter()
        .collect();

        let mut config = CheckoutConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.rules.path, PathBuf::from("other.yaml"));
        assert_eq!(config.rules.refresh, RefreshMode::Strict);
        // Bad values are ignored.
        assert_eq!(config.rules.duplicates, DuplicatePolicy::LastWins);
        assert!(config.rule_options().strict_validation);
    }

    #[test]
    fn test_validation() {
        let mut config = CheckoutConfig::default();
        config.rules.path = PathBuf::new();
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }
}

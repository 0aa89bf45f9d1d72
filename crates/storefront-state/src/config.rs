//! # Storefront Configuration
//!
//! Application settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     STOREFRONT_APP_NAME=flipkart                                       │
//! │     STOREFRONT_DATA_DIR=/tmp/storefront                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/storefront/storefront.toml (Linux)                       │
//! │     ~/Library/Application Support/com.storefront.storefront/ (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! app_name = "flipkart"          # persisted session key: "flipkart-auth"
//! data_dir = "/var/lib/shop"     # optional; platform data dir otherwise
//! currency_symbol = "₹"
//! currency_decimals = 0
//! digit_grouping = "indian"      # none | western | indian
//! login_delay_ms = 1500
//! top_deals_count = 4
//! trending_count = 4
//! ```
//!
//! Read-only after load; nothing mutates it at runtime.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use storefront_core::money::{Money, MINOR_PER_MAJOR};
use tracing::{debug, info, warn};

use crate::error::{StateError, StateResult};

const CONFIG_FILE_NAME: &str = "storefront.toml";

/// How the integer part of a price is grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitGrouping {
    /// `149900`
    None,
    /// `149,900`
    Western,
    /// `1,49,900` (lakh/crore grouping)
    #[default]
    Indian,
}

impl std::str::FromStr for DigitGrouping {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "off" => Ok(DigitGrouping::None),
            "western" | "international" => Ok(DigitGrouping::Western),
            "indian" | "en-in" => Ok(DigitGrouping::Indian),
            other => Err(StateError::InvalidConfig(format!(
                "Unknown digit grouping: '{}'. Valid options: none, western, indian",
                other
            ))),
        }
    }
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Application name; prefixes the persisted session key.
    #[serde(default = "default_app_name")]
    pub app_name: String,

    /// Directory for snapshot files. Platform data dir when unset.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Fraction digits shown in prices (0 shows whole rupees).
    #[serde(default)]
    pub currency_decimals: u8,

    #[serde(default)]
    pub digit_grouping: DigitGrouping,

    /// Simulated network latency for the login flow.
    #[serde(default = "default_login_delay_ms")]
    pub login_delay_ms: u64,

    #[serde(default = "default_section_size")]
    pub top_deals_count: usize,

    #[serde(default = "default_section_size")]
    pub trending_count: usize,
}

fn default_app_name() -> String {
    "storefront".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_login_delay_ms() -> u64 {
    1500
}

fn default_section_size() -> usize {
    4
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            app_name: default_app_name(),
            data_dir: None,
            currency_symbol: default_currency_symbol(),
            currency_decimals: 0,
            digit_grouping: DigitGrouping::default(),
            login_delay_ms: default_login_delay_ms(),
            top_deals_count: default_section_size(),
            trending_count: default_section_size(),
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`storefront.toml`)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StateResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    StateError::ConfigLoadFailed(format!("{}: {}", path.display(), e))
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StateResult<()> {
        if self.app_name.is_empty() {
            return Err(StateError::InvalidConfig(
                "app_name must not be empty".into(),
            ));
        }

        // app_name becomes part of a file name
        if !self
            .app_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StateError::InvalidConfig(format!(
                "app_name may only contain letters, digits, '-' and '_', got: {}",
                self.app_name
            )));
        }

        if self.currency_decimals > 4 {
            return Err(StateError::InvalidConfig(
                "currency_decimals must be between 0 and 4".into(),
            ));
        }

        Ok(())
    }

    /// Applies `STOREFRONT_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("STOREFRONT_APP_NAME") {
            debug!(app_name = %name, "Overriding app name from environment");
            self.app_name = name;
        }

        if let Ok(dir) = std::env::var("STOREFRONT_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(symbol) = std::env::var("STOREFRONT_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Ok(delay) = std::env::var("STOREFRONT_LOGIN_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.login_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring non-numeric STOREFRONT_LOGIN_DELAY_MS"),
            }
        }

        if let Ok(grouping) = std::env::var("STOREFRONT_DIGIT_GROUPING") {
            match grouping.parse() {
                Ok(parsed) => self.digit_grouping = parsed,
                Err(e) => warn!(error = %e, "Ignoring STOREFRONT_DIGIT_GROUPING"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Storage key of the persisted session: `"<app_name>-auth"`.
    pub fn auth_key(&self) -> String {
        format!("{}-auth", self.app_name)
    }

    /// Directory for snapshot files.
    pub fn snapshot_dir(&self) -> StateResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(StateError::NoDataDir)
    }

    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }

    /// Formats a price with the configured symbol, fraction digits and
    /// grouping. Dropped fraction digits round half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use storefront_core::Money;
    /// use storefront_state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_price(Money::from_major(149_900)), "₹1,49,900");
    /// ```
    pub fn format_price(&self, amount: Money) -> String {
        let decimals = u32::from(self.currency_decimals);
        let minor = amount.minor().unsigned_abs();
        // Money carries two fraction digits
        let (whole, frac) = if decimals >= 2 {
            let scale = 10_u64.pow(decimals - 2);
            (
                minor / MINOR_PER_MAJOR as u64,
                (minor % MINOR_PER_MAJOR as u64) * scale,
            )
        } else {
            let divisor = 10_u64.pow(2 - decimals);
            let rounded = (minor + divisor / 2) / divisor;
            let scale = 10_u64.pow(decimals);
            (rounded / scale, rounded % scale)
        };

        let mut out = String::new();
        if amount.is_negative() && (whole > 0 || frac > 0) {
            out.push('-');
        }
        out.push_str(&self.currency_symbol);
        out.push_str(&group_digits(whole, self.digit_grouping));
        if decimals > 0 {
            out.push_str(&format!(".{:0width$}", frac, width = decimals as usize));
        }
        out
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com", "storefront", "storefront")
}

fn group_digits(value: u64, grouping: DigitGrouping) -> String {
    let digits = value.to_string();
    if grouping == DigitGrouping::None || digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let group = match grouping {
        DigitGrouping::Indian => 2,
        _ => 3,
    };

    // Split the head into groups counted from the right
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(group);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

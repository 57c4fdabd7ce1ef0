//! Calculator configuration with TOML file support.
//!
//! Every field has a serde default, so an empty file (or no file at all)
//! yields the built-in distributions of the Accumulated liquid-staking
//! reward pool.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use splitcalc_allocation::{AllocationError, Arithmetic, RatioRounding, ShareEntry, ShareTable};
use splitcalc_types::{Bps, Destination, BPS_DENOMINATOR};
use splitcalc_utils::LogFormat;

use crate::error::ConfigError;

/// What to do with a balance string that is not an unsigned integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceParse {
    /// Abort the run.
    #[default]
    Strict,
    /// Treat the balance as zero and log a warning.
    Lenient,
}

/// A remote API endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointConfig {
    pub url: String,
}

/// Top-level configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CalcConfig {
    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Per-request timeout for both remote APIs, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub balance_parse: BalanceParse,

    #[serde(default)]
    pub arithmetic: Arithmetic,

    /// Unit suffix for human-readable amounts.
    #[serde(default = "default_symbol")]
    pub symbol: String,

    /// Ledger JSON-RPC endpoint (balance source).
    #[serde(default = "default_ledger")]
    pub ledger: EndpointConfig,

    /// Token supply REST endpoint (supply ratio source).
    #[serde(default = "default_supply")]
    pub supply: EndpointConfig,

    #[serde(default = "default_distributions")]
    pub distributions: Vec<DistributionConfig>,
}

/// One distribution: a source account and the table its balance is split by.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionConfig {
    pub name: String,

    /// Account whose balance is distributed.
    pub source: Destination,

    /// Disabled distributions only run when selected by name.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Fixed shares, in output order.
    #[serde(default)]
    pub shares: Vec<ShareEntry>,

    /// Two shares appended after the fixed ones, split by token supply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supply_split: Option<SupplySplitConfig>,
}

/// Budget split between two destinations in proportion to a token's supply
/// on two chains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplySplitConfig {
    pub budget_bps: Bps,
    #[serde(default)]
    pub rounding: RatioRounding,
    pub first: SupplyLeg,
    pub second: SupplyLeg,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyLeg {
    pub destination: Destination,
    pub chain_id: u64,
    /// Token contract address on `chain_id`.
    pub token: String,
}

/// Values given on the command line or through `SPLITCALC_*` env vars.
/// Each `Some` replaces the corresponding file value.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
    pub timeout_secs: Option<u64>,
    pub ledger_url: Option<String>,
    pub supply_url: Option<String>,
}

// ── Serde default helpers ──────────────────────────────────────────────

const TREASURY: &str = "acc://accumulated.acme/treasury";
const PEG_PROTECTION: &str = "acc://accumulated.acme/peg-protection";
const LIQUID_STAKING: &str = "acc://accumulated.acme/staking";
const INCENTIVES: &str = "acc://accumulated.acme/incentives";
const STACME: &str = "0x7AC168c81F4F3820Fa3F22603ce5864D6aB3C547";

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_symbol() -> String {
    "ACME".to_string()
}

fn default_true() -> bool {
    true
}

fn default_ledger() -> EndpointConfig {
    EndpointConfig {
        url: "https://mainnet.accumulatenetwork.io/v2".to_string(),
    }
}

fn default_supply() -> EndpointConfig {
    EndpointConfig {
        url: "https://api.accumulated.finance/v1".to_string(),
    }
}

fn known(url: &str) -> Destination {
    Destination::new(url).expect("built-in destination is non-empty")
}

fn share(url: &str, bps: u32) -> ShareEntry {
    let bps = Bps::new(bps).expect("built-in share is in range");
    ShareEntry::new(known(url), bps)
}

fn default_distributions() -> Vec<DistributionConfig> {
    vec![
        DistributionConfig {
            name: "liquid-staking".to_string(),
            source: known("acc://accumulated.acme/staking-rewards"),
            enabled: true,
            shares: vec![share(TREASURY, 1200), share(PEG_PROTECTION, 800)],
            supply_split: Some(SupplySplitConfig {
                budget_bps: Bps::new(8000).expect("built-in budget is in range"),
                rounding: RatioRounding::Nearest,
                first: SupplyLeg {
                    destination: known(LIQUID_STAKING),
                    chain_id: 1,
                    token: STACME.to_string(),
                },
                second: SupplyLeg {
                    destination: known(LIQUID_STAKING),
                    chain_id: 42161,
                    token: STACME.to_string(),
                },
            }),
        },
        DistributionConfig {
            name: "wacme-lp-incentives".to_string(),
            source: known("acc://accumulated.acme/wacme-lp-incentives"),
            enabled: false,
            shares: vec![share(TREASURY, 800), share(INCENTIVES, 9200)],
            supply_split: None,
        },
    ]
}

// ── Impl ───────────────────────────────────────────────────────────────

impl CalcConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file at `path` (built-in defaults without one), apply
    /// `overrides` and validate the result.
    pub fn load(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        config.apply(overrides)?;
        Ok(config)
    }

    /// Apply `overrides`, then re-validate.
    pub fn apply(&mut self, overrides: &ConfigOverrides) -> Result<(), ConfigError> {
        if let Some(level) = &overrides.log_level {
            self.log_level = level.clone();
        }
        if let Some(format) = overrides.log_format {
            self.log_format = format;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.timeout_secs = secs;
        }
        if let Some(url) = &overrides.ledger_url {
            self.ledger.url = url.clone();
        }
        if let Some(url) = &overrides.supply_url {
            self.supply.url = url.clone();
        }
        self.validate()
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the timeout, then names and share budgets of every distribution.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        let mut seen = HashSet::new();
        for dist in &self.distributions {
            if dist.name.trim().is_empty() {
                return Err(ConfigError::UnnamedDistribution);
            }
            if !seen.insert(dist.name.as_str()) {
                return Err(ConfigError::DuplicateDistribution(dist.name.clone()));
            }
            dist.precheck().map_err(|source| ConfigError::Distribution {
                name: dist.name.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn distribution(&self, name: &str) -> Result<&DistributionConfig, ConfigError> {
        self.distributions
            .iter()
            .find(|d| d.name == name)
            .ok_or_else(|| ConfigError::UnknownDistribution(name.to_string()))
    }

    /// Distributions named in `names`, or every enabled one when `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<&DistributionConfig>, ConfigError> {
        let selected: Vec<&DistributionConfig> = if names.is_empty() {
            self.distributions.iter().filter(|d| d.enabled).collect()
        } else {
            names
                .iter()
                .map(|n| self.distribution(n))
                .collect::<Result<_, _>>()?
        };
        if selected.is_empty() {
            return Err(ConfigError::NoDistributions);
        }
        Ok(selected)
    }
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            timeout_secs: default_timeout_secs(),
            balance_parse: BalanceParse::default(),
            arithmetic: Arithmetic::default(),
            symbol: default_symbol(),
            ledger: default_ledger(),
            supply: default_supply(),
            distributions: default_distributions(),
        }
    }
}

impl DistributionConfig {
    /// Sum of the fixed shares plus the supply-split budget.
    pub fn planned_total_bps(&self) -> u32 {
        let fixed: u32 = self.shares.iter().map(|e| e.share.get()).sum();
        fixed + self.supply_split.as_ref().map_or(0, |s| s.budget_bps.get())
    }

    /// Check the share budget without any supply data.
    ///
    /// The supply-split pair always sums to its budget, so a distribution
    /// that passes here cannot fail table validation later.
    pub fn precheck(&self) -> Result<(), AllocationError> {
        let actual = self.planned_total_bps();
        if actual != BPS_DENOMINATOR {
            return Err(AllocationError::InvalidShareTotal {
                expected: BPS_DENOMINATOR,
                actual,
            });
        }
        Ok(())
    }

    /// Full share table, with the supply-split pair (if any) appended.
    pub fn share_table(&self, pair: Option<(Bps, Bps)>) -> ShareTable {
        let mut table: ShareTable = self.shares.iter().cloned().collect();
        if let (Some(split), Some((first, second))) = (&self.supply_split, pair) {
            table.push(split.first.destination.clone(), first);
            table.push(split.second.destination.clone(), second);
        }
        table
    }
}

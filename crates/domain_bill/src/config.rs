//! Ledger configuration
//!
//! # Environment Variables
//!
//! * `BILL_LEDGER_ADMINISTRATOR` - Administrator account id (required)
//! * `BILL_LEDGER_ISSUANCE_RATE` - Value per receipt credit (default: 1)
//! * `BILL_LEDGER_REWARD_POLICY` - `administrator` or `pro_rata` (default: administrator)

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::AccountId;
use domain_receipt::IssuanceRate;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum LedgerConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Who receives a bill's reward pool when it is distributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// The whole pool goes to the administrator
    #[default]
    Administrator,
    /// Contributors share the pool in proportion to their records; the
    /// rounding remainder goes to the administrator
    ProRata,
}

/// Bill ledger configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Holder of administrative authority
    pub administrator: AccountId,
    /// Value per receipt credit
    #[serde(default)]
    pub issuance_rate: IssuanceRate,
    #[serde(default)]
    pub reward_policy: RewardPolicy,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            administrator: AccountId::nil(),
            issuance_rate: IssuanceRate::ONE,
            reward_policy: RewardPolicy::Administrator,
        }
    }
}

impl LedgerConfig {
    /// Creates a configuration with defaults for everything but the administrator
    pub fn new(administrator: AccountId) -> Self {
        Self {
            administrator,
            ..Self::default()
        }
    }

    pub fn with_issuance_rate(mut self, rate: IssuanceRate) -> Self {
        self.issuance_rate = rate;
        self
    }

    pub fn with_reward_policy(mut self, policy: RewardPolicy) -> Self {
        self.reward_policy = policy;
        self
    }

    /// Loads configuration from the environment (and a `.env` file if present)
    pub fn from_env() -> Result<Self, LedgerConfigError> {
        dotenvy::dotenv().ok();

        let config: LedgerConfig = config::Config::builder()
            .add_source(config::Environment::with_prefix("BILL_LEDGER").try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    /// Checks values that serde cannot
    pub fn validate(&self) -> Result<(), LedgerConfigError> {
        if self.administrator.is_nil() {
            return Err(LedgerConfigError::Invalid(
                "administrator must be a non-nil account".to_string(),
            ));
        }
        Ok(())
    }
}

//! Pricing configuration (rank multipliers, VAT rate).
//!
//! Read from the environment with warn-and-default semantics: a bad value is
//! logged and the built-in default is used instead.

use serde::{Deserialize, Serialize};

use gala_core::{BPS_SCALE, DomainError, DomainResult};

use crate::rank::RankTable;

pub const RANK_MULTIPLIERS_ENV: &str = "GALA_RANK_MULTIPLIERS";
pub const VAT_BPS_ENV: &str = "GALA_VAT_BPS";

/// 10% VAT, as applied to quotation subtotals.
pub const DEFAULT_VAT_BPS: u32 = 1_000;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    pub rank_table: RankTable,
    pub vat_rate_bps: u32,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            rank_table: RankTable::default(),
            vat_rate_bps: DEFAULT_VAT_BPS,
        }
    }
}

impl PricingConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, a test map, ...).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(RANK_MULTIPLIERS_ENV) {
            match raw.parse::<RankTable>() {
                Ok(table) => config.rank_table = table,
                Err(err) => tracing::warn!(
                    %err,
                    value = %raw,
                    "{RANK_MULTIPLIERS_ENV} invalid; using default rank table"
                ),
            }
        }

        if let Some(raw) = lookup(VAT_BPS_ENV) {
            match raw.trim().parse::<u32>() {
                Ok(bps) if bps <= BPS_SCALE => config.vat_rate_bps = bps,
                _ => tracing::warn!(
                    value = %raw,
                    "{VAT_BPS_ENV} invalid; using default VAT of {DEFAULT_VAT_BPS} bps"
                ),
            }
        }

        config
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("pricing config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.rank_table.validate()?;
        if self.vat_rate_bps > BPS_SCALE {
            return Err(DomainError::validation(format!(
                "VAT rate must be at most {BPS_SCALE} bps, got {}",
                self.vat_rate_bps
            )));
        }
        Ok(())
    }
}

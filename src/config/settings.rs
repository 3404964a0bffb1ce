use crate::utils::error::{GuardError, Result};
use crate::utils::validation::{validate_aws_region, validate_range, validate_url, Validate};
use serde::Deserialize;
use std::time::Duration;

pub const WEBHOOK_URL_VAR: &str = "N8N_WEBHOOK_URL";
pub const REGION_VAR: &str = "GUARD_AWS_REGION";
pub const S3_ENDPOINT_VAR: &str = "GUARD_S3_ENDPOINT";
pub const WEBHOOK_TIMEOUT_VAR: &str = "WEBHOOK_TIMEOUT_SECS";

pub const DEFAULT_WEBHOOK_TIMEOUT_SECS: u64 = 10;
const MAX_WEBHOOK_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuardConfig {
    pub webhook_url: String,
    /// Overrides the region resolved by the default AWS provider chain.
    #[serde(default)]
    pub region: Option<String>,
    /// Custom S3 endpoint, e.g. LocalStack. Forces path-style addressing.
    #[serde(default)]
    pub s3_endpoint: Option<String>,
    #[serde(default = "default_webhook_timeout_secs")]
    pub webhook_timeout_secs: u64,
}

fn default_webhook_timeout_secs() -> u64 {
    DEFAULT_WEBHOOK_TIMEOUT_SECS
}

impl GuardConfig {
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
            region: None,
            s3_endpoint: None,
            webhook_timeout_secs: DEFAULT_WEBHOOK_TIMEOUT_SECS,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let webhook_url = get(WEBHOOK_URL_VAR).ok_or_else(|| GuardError::MissingConfigError {
            field: WEBHOOK_URL_VAR.to_string(),
        })?;

        let webhook_timeout_secs = match get(WEBHOOK_TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| GuardError::InvalidConfigValueError {
                    field: WEBHOOK_TIMEOUT_VAR.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
            None => DEFAULT_WEBHOOK_TIMEOUT_SECS,
        };

        let config = Self {
            webhook_url: webhook_url.trim().to_string(),
            region: get(REGION_VAR),
            s3_endpoint: get(S3_ENDPOINT_VAR),
            webhook_timeout_secs,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }
}

impl Validate for GuardConfig {
    fn validate(&self) -> Result<()> {
        validate_url("webhook_url", &self.webhook_url)?;

        if let Some(region) = &self.region {
            validate_aws_region("region", region)?;
        }

        if let Some(endpoint) = &self.s3_endpoint {
            validate_url("s3_endpoint", endpoint)?;
        }

        validate_range(
            "webhook_timeout_secs",
            self.webhook_timeout_secs,
            1,
            MAX_WEBHOOK_TIMEOUT_SECS,
        )?;

        tracing::debug!("Configuration validation passed");
        Ok(())
    }
}

//! Lifecycle timing configuration
//!
//! Deadlines and poll spacing for transit gateway operations. Values are in
//! seconds so the struct can be read straight from JSON or the environment.

use crate::error::{Result, TransitError};
use serde::{Deserialize, Serialize};
use std::env::VarError;
use std::time::Duration;
use waypost::{PollSpec, StatusTable};

const ENV_CREATE_TIMEOUT: &str = "WAYPOST_CREATE_TIMEOUT";
const ENV_DELETE_TIMEOUT: &str = "WAYPOST_DELETE_TIMEOUT";
const ENV_POLL_INTERVAL: &str = "WAYPOST_POLL_INTERVAL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Deadline for create operations (seconds)
    #[serde(default = "default_create_timeout")]
    pub create_timeout_secs: u64,

    /// Deadline for delete operations (seconds)
    #[serde(default = "default_delete_timeout")]
    pub delete_timeout_secs: u64,

    /// Delay before the first check and between checks (seconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

fn default_create_timeout() -> u64 {
    600 // 10 minutes
}
fn default_delete_timeout() -> u64 {
    600
}
fn default_poll_interval() -> u64 {
    10
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            create_timeout_secs: default_create_timeout(),
            delete_timeout_secs: default_delete_timeout(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl TransitConfig {
    /// Read overrides from `WAYPOST_*` environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(secs) = env_secs(ENV_CREATE_TIMEOUT)? {
            config.create_timeout_secs = secs;
        }
        if let Some(secs) = env_secs(ENV_DELETE_TIMEOUT)? {
            config.delete_timeout_secs = secs;
        }
        if let Some(secs) = env_secs(ENV_POLL_INTERVAL)? {
            config.poll_interval_secs = secs;
        }

        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn create_timeout(&self) -> Duration {
        Duration::from_secs(self.create_timeout_secs)
    }

    pub fn delete_timeout(&self) -> Duration {
        Duration::from_secs(self.delete_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Build a fresh spec for one operation.
    pub fn poll_spec(&self, table: &StatusTable, timeout: Duration) -> Result<PollSpec> {
        Ok(PollSpec::builder()
            .table(table)
            .timeout(timeout)
            .interval(self.poll_interval())
            .build()?)
    }
}

fn env_secs(name: &str) -> Result<Option<u64>> {
    let value = match std::env::var(name) {
        Ok(value) => value,
        Err(VarError::NotPresent) => return Ok(None),
        Err(VarError::NotUnicode(_)) => {
            return Err(TransitError::InvalidConfig(format!("{name} is not valid unicode")));
        }
    };

    value
        .trim()
        .parse::<u64>()
        .map(Some)
        .map_err(|_| {
            TransitError::InvalidConfig(format!("{name}={value} is not a number of seconds"))
        })
}

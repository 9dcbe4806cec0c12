// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Picker configuration.
//!
//! Values start from built-in defaults, are overridden by `ROSTER_*` environment variables and
//! finally by CLI flags (applied by the binary).

use std::env;
use std::time::Duration;

use crate::directory::{MockDirectory, DEFAULT_LOOKUP_LATENCY};
use crate::model::DEMO_POOL_SIZE;
use crate::search::{SessionOptions, DEFAULT_QUIET_PERIOD};

pub const ENV_QUIET_MS: &str = "ROSTER_QUIET_MS";
pub const ENV_LATENCY_MS: &str = "ROSTER_LATENCY_MS";
pub const ENV_TIMEOUT_MS: &str = "ROSTER_TIMEOUT_MS";
pub const ENV_POOL_SIZE: &str = "ROSTER_POOL_SIZE";
pub const ENV_FORCE_FAILURE: &str = "ROSTER_FORCE_FAILURE";

pub const MAX_POOL_SIZE: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickerConfig {
    pub quiet_period: Duration,
    pub lookup_latency: Duration,
    /// `None` disables the timeout.
    pub lookup_timeout: Option<Duration>,
    pub pool_size: usize,
    pub force_failure: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            quiet_period: DEFAULT_QUIET_PERIOD,
            lookup_latency: DEFAULT_LOOKUP_LATENCY,
            lookup_timeout: None,
            pool_size: DEMO_POOL_SIZE,
            force_failure: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid env {name}={value} ({reason})")]
    InvalidEnv { name: String, value: String, reason: String },
    #[error("invalid pool size {0} (expected 1..=10000)")]
    PoolSize(usize),
}

impl PickerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env(|name| env::var(name))
    }

    /// Applies environment overrides read through `var`.
    pub fn with_env(
        mut self,
        var: impl Fn(&str) -> Result<String, env::VarError>,
    ) -> Result<Self, ConfigError> {
        if let Some(ms) = read_u64(&var, ENV_QUIET_MS)? {
            self.quiet_period = Duration::from_millis(ms);
        }
        if let Some(ms) = read_u64(&var, ENV_LATENCY_MS)? {
            self.lookup_latency = Duration::from_millis(ms);
        }
        if let Some(ms) = read_u64(&var, ENV_TIMEOUT_MS)? {
            self.lookup_timeout = timeout_from_millis(ms);
        }
        if let Some(size) = read_u64(&var, ENV_POOL_SIZE)? {
            self.pool_size = usize::try_from(size).unwrap_or(usize::MAX);
        }
        if let Some(raw) = read_var(&var, ENV_FORCE_FAILURE)? {
            self.force_failure = parse_bool(&raw).ok_or_else(|| ConfigError::InvalidEnv {
                name: ENV_FORCE_FAILURE.to_owned(),
                value: raw.clone(),
                reason: "expected 1/0/true/false".to_owned(),
            })?;
        }
        self.validate()
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.pool_size == 0 || self.pool_size > MAX_POOL_SIZE {
            return Err(ConfigError::PoolSize(self.pool_size));
        }
        Ok(self)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions { quiet_period: self.quiet_period, lookup_timeout: self.lookup_timeout }
    }

    pub fn directory(&self) -> MockDirectory {
        MockDirectory::demo(self.pool_size).with_latency(self.lookup_latency)
    }
}

/// `0` means "no timeout".
pub fn timeout_from_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

fn read_var(
    var: &impl Fn(&str) -> Result<String, env::VarError>,
    name: &str,
) -> Result<Option<String>, ConfigError> {
    match var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_owned())),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ConfigError::InvalidEnv {
            name: name.to_owned(),
            value: "<non-unicode>".to_owned(),
            reason: "not valid unicode".to_owned(),
        }),
    }
}

fn read_u64(
    var: &impl Fn(&str) -> Result<String, env::VarError>,
    name: &str,
) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = read_var(var, name)? else {
        return Ok(None);
    };
    raw.parse::<u64>().map(Some).map_err(|err| ConfigError::InvalidEnv {
        name: name.to_owned(),
        value: raw.clone(),
        reason: err.to_string(),
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

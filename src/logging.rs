// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tracing subscriber setup for the `roster` binary.
//!
//! Directives come from `ROSTER_LOG`, then `RUST_LOG`, then default to `warn`. The TUI owns the
//! terminal, so in TUI mode events only go to a file (`ROSTER_LOG_FILE`) and nothing is installed
//! when that is unset.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::EnvFilter;

pub const ENV_LOG: &str = "ROSTER_LOG";
pub const ENV_LOG_FILE: &str = "ROSTER_LOG_FILE";

const DEFAULT_DIRECTIVES: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
    Disabled,
}

impl LogTarget {
    /// Target for the TUI: a file when `ROSTER_LOG_FILE` is set, otherwise nothing.
    pub fn for_tui() -> Self {
        match std::env::var_os(ENV_LOG_FILE) {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Disabled,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Init(#[from] TryInitError),
}

pub fn init(target: LogTarget) -> Result<(), LoggingError> {
    let filter = env_filter();
    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => {
            let layer = fmt::layer().with_writer(std::io::stderr).with_target(true).compact();
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
            Ok(())
        }
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            let layer = fmt::layer().with_writer(Mutex::new(file)).with_ansi(false);
            tracing_subscriber::registry().with(filter).with(layer).try_init()?;
            Ok(())
        }
    }
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open { path: path.to_path_buf(), source })
}

fn env_filter() -> EnvFilter {
    directives_from(std::env::var(ENV_LOG).ok(), std::env::var("RUST_LOG").ok())
}

fn directives_from(roster_log: Option<String>, rust_log: Option<String>) -> EnvFilter {
    [roster_log, rust_log]
        .into_iter()
        .flatten()
        .filter(|directives| !directives.trim().is_empty())
        .find_map(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

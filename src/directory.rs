// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Directory lookup service.
//!
//! A [`Directory`] answers name queries asynchronously. [`MockDirectory`] serves a fixed
//! in-memory pool after a simulated latency and can be told to fail, which is all the picker
//! needs to exercise its loading/error paths.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use memchr::memmem;
use smol_str::SmolStr;

use crate::model::{demo_records, Record, DEMO_POOL_SIZE};

pub const DEFAULT_LOOKUP_LATENCY: Duration = Duration::from_millis(600);
pub const SIMULATED_FAILURE_MESSAGE: &str = "Simulated Network Error";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("{0}")]
    Simulated(SmolStr),
    #[error("lookup timed out after {}ms", .after.as_millis())]
    TimedOut { after: Duration },
}

pub type LookupFuture = Pin<Box<dyn Future<Output = Result<Vec<Record>, LookupError>> + Send>>;

/// Asynchronous name lookup.
///
/// The returned future must own everything it needs: the search session spawns it on the
/// runtime and may abort it at any point.
pub trait Directory: Send + Sync + 'static {
    fn lookup(&self, query: SmolStr, force_failure: bool) -> LookupFuture;
}

#[derive(Debug, Clone)]
pub struct MockDirectory {
    records: Arc<[Record]>,
    latency: Duration,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::demo(DEMO_POOL_SIZE)
    }
}

impl MockDirectory {
    pub fn new(records: impl Into<Arc<[Record]>>, latency: Duration) -> Self {
        Self { records: records.into(), latency }
    }

    pub fn demo(pool_size: usize) -> Self {
        Self::new(demo_records(pool_size), DEFAULT_LOOKUP_LATENCY)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }
}

impl Directory for MockDirectory {
    fn lookup(&self, query: SmolStr, force_failure: bool) -> LookupFuture {
        let records = Arc::clone(&self.records);
        let latency = self.latency;
        Box::pin(async move {
            tokio::time::sleep(latency).await;
            if force_failure {
                tracing::debug!(query = %query, "directory lookup failing on request");
                return Err(LookupError::Simulated(SmolStr::new_static(SIMULATED_FAILURE_MESSAGE)));
            }
            let matches = filter_by_name(&records, &query);
            tracing::debug!(query = %query, matches = matches.len(), "directory lookup resolved");
            Ok(matches)
        })
    }
}

/// Returns every record whose display name contains `query`, ignoring case, in pool order.
pub fn filter_by_name(records: &[Record], query: &str) -> Vec<Record> {
    let mut needle = String::new();
    fold_case_into(query, &mut needle);
    let finder = memmem::Finder::new(needle.as_bytes());
    let mut haystack = String::new();
    records
        .iter()
        .filter(|record| {
            haystack.clear();
            fold_case_into(record.name(), &mut haystack);
            finder.find(haystack.as_bytes()).is_some()
        })
        .cloned()
        .collect()
}

/// Per-char lowercase, applied identically to needle and haystack. Final sigma folds to `σ` so
/// the fold does not depend on where a word ends.
fn fold_case_into(text: &str, out: &mut String) {
    out.extend(
        text.chars()
            .flat_map(char::to_lowercase)
            .map(|ch| if ch == 'ς' { 'σ' } else { ch }),
    );
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use smol_str::SmolStr;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;

use super::debounce::Debouncer;
use crate::directory::{Directory, LookupError};
use crate::model::Record;

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(350);

/// Search state as observed by the presentation layer.
///
/// `query` is always the settled query the variant belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        query: SmolStr,
    },
    Success {
        query: SmolStr,
        results: Vec<Record>,
    },
    Failed {
        query: SmolStr,
        message: SmolStr,
    },
}

impl SearchState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading { .. } => "loading",
            Self::Success { .. } => "success",
            Self::Failed { .. } => "failed",
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Loading { query } | Self::Success { query, .. } | Self::Failed { query, .. } => {
                Some(query)
            }
        }
    }

    /// Current results; empty unless the state is `Success`.
    pub fn results(&self) -> &[Record] {
        match self {
            Self::Success { results, .. } => results,
            _ => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

/// Identity of one issued lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    generation: u64,
    query: SmolStr,
}

impl RequestTag {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug)]
pub(crate) struct Completion {
    tag: RequestTag,
    outcome: Result<Vec<Record>, LookupError>,
}

#[derive(Debug)]
struct InFlight {
    tag: RequestTag,
    abort: AbortHandle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub quiet_period: Duration,
    pub lookup_timeout: Option<Duration>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self { quiet_period: DEFAULT_QUIET_PERIOD, lookup_timeout: None }
    }
}

/// Debounced, staleness-safe search over a [`Directory`].
///
/// Raw input goes through a [`Debouncer`]; once it settles, a lookup is spawned on the runtime
/// and tagged with a fresh generation plus the query. Completions come back over a channel and
/// are applied only when their tag still matches the latest issued lookup *and* the live settled
/// query. Superseded tasks are aborted as well, but that only releases resources.
///
/// The session never blocks: owners call [`pump`](Self::pump) from their event loop (or await
/// [`wait_for_completion`](Self::wait_for_completion)) to advance it.
pub struct SearchSession<D: Directory> {
    directory: D,
    runtime: Handle,
    options: SessionOptions,
    debouncer: Debouncer<SmolStr>,
    raw_query: String,
    settled_query: SmolStr,
    state: SearchState,
    force_failure: bool,
    next_generation: u64,
    in_flight: Option<InFlight>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
    epoch: u64,
    closed: bool,
}

impl<D: Directory> SearchSession<D> {
    pub fn new(directory: D, options: SessionOptions, runtime: Handle) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            directory,
            runtime,
            options,
            debouncer: Debouncer::new(options.quiet_period),
            raw_query: String::new(),
            settled_query: SmolStr::default(),
            state: SearchState::Idle,
            force_failure: false,
            next_generation: 0,
            in_flight: None,
            completions_tx,
            completions_rx,
            epoch: 0,
            closed: false,
        }
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn settled_query(&self) -> &str {
        &self.settled_query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn force_failure(&self) -> bool {
        self.force_failure
    }

    /// Bumped every time `state` is replaced; the result sequence changes identity with it.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn in_flight(&self) -> Option<&RequestTag> {
        self.in_flight.as_ref().map(|in_flight| &in_flight.tag)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// When the owner should call [`pump`](Self::pump) next, if a settle is pending.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Updates the raw query. Returns whether anything observable changed.
    ///
    /// A blank query settles immediately: there is nothing to look up, so the state drops to
    /// `Idle` without waiting for the quiet period.
    pub fn set_raw_query(&mut self, raw: impl Into<String>, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        let raw = raw.into();
        if raw == self.raw_query {
            return false;
        }
        self.raw_query = raw;

        if self.raw_query.trim().is_empty() {
            self.debouncer.cancel();
            self.settle(SmolStr::default());
        } else {
            self.debouncer.push(SmolStr::new(&self.raw_query), now);
        }
        true
    }

    pub fn clear_query(&mut self) -> bool {
        self.set_raw_query(String::new(), Instant::now())
    }

    pub fn set_force_failure(&mut self, force_failure: bool) -> bool {
        if self.force_failure == force_failure {
            return false;
        }
        self.force_failure = force_failure;
        tracing::debug!(force_failure, "search force-failure toggled");
        true
    }

    /// Advances timers and applies any completions that arrived. Returns whether the search state
    /// changed.
    pub fn pump(&mut self, now: Instant) -> bool {
        if self.closed {
            return false;
        }
        let before = self.epoch;
        if let Some(query) = self.debouncer.poll(now) {
            self.settle(query);
        }
        self.drain_completions();
        self.epoch != before
    }

    /// Re-issues the lookup for the current settled query after a failure.
    pub fn retry(&mut self) -> bool {
        if self.closed {
            return false;
        }
        let SearchState::Failed { query, .. } = &self.state else {
            return false;
        };
        if query.as_str() != self.settled_query.as_str() {
            return false;
        }
        let query = query.clone();
        tracing::debug!(query = %query, "retrying failed lookup");
        self.issue(query);
        true
    }

    /// Waits until the in-flight lookup reports back and applies it.
    ///
    /// Returns `false` immediately when nothing is in flight. Stale completions that arrive in
    /// the meantime are discarded and the wait continues.
    pub async fn wait_for_completion(&mut self) -> bool {
        loop {
            if self.closed || self.in_flight.is_none() {
                return self.drain_completions();
            }
            let Some(completion) = self.completions_rx.recv().await else {
                return false;
            };
            if self.apply_completion(completion) {
                return true;
            }
        }
    }

    /// Tears the session down: the pending lookup is aborted and no further state writes happen.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        self.debouncer.cancel();
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.abort.abort();
        }
        self.completions_rx.close();
        tracing::debug!("search session shut down");
    }

    fn settle(&mut self, query: SmolStr) {
        let unchanged = query == self.settled_query;
        self.settled_query = query;

        if self.settled_query.trim().is_empty() {
            self.abandon_in_flight();
            if self.state != SearchState::Idle {
                self.transition(SearchState::Idle);
            }
            return;
        }

        let already_requested = self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.tag.query == self.settled_query);
        if unchanged || already_requested {
            return;
        }
        self.issue(self.settled_query.clone());
    }

    fn issue(&mut self, query: SmolStr) {
        self.abandon_in_flight();
        self.next_generation = self.next_generation.wrapping_add(1);
        let tag = RequestTag { generation: self.next_generation, query: query.clone() };

        let lookup = self.directory.lookup(query.clone(), self.force_failure);
        let timeout = self.options.lookup_timeout;
        let sender = self.completions_tx.clone();
        let task_tag = tag.clone();
        let task = self.runtime.spawn(async move {
            let outcome = match timeout {
                Some(after) => match tokio::time::timeout(after, lookup).await {
                    Ok(outcome) => outcome,
                    Err(_) => Err(LookupError::TimedOut { after }),
                },
                None => lookup.await,
            };
            let _ = sender.send(Completion { tag: task_tag, outcome });
        });

        tracing::debug!(query = %query, generation = tag.generation, "lookup issued");
        self.in_flight = Some(InFlight { tag, abort: task.abort_handle() });
        self.transition(SearchState::Loading { query });
    }

    fn abandon_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            tracing::trace!(
                query = %in_flight.tag.query,
                generation = in_flight.tag.generation,
                "abandoning in-flight lookup"
            );
            in_flight.abort.abort();
        }
    }

    fn drain_completions(&mut self) -> bool {
        let mut applied = false;
        while let Ok(completion) = self.completions_rx.try_recv() {
            applied |= self.apply_completion(completion);
        }
        applied
    }

    fn apply_completion(&mut self, completion: Completion) -> bool {
        if self.closed {
            return false;
        }
        let Completion { tag, outcome } = completion;
        let current = self.in_flight.as_ref().is_some_and(|in_flight| in_flight.tag == tag);
        if !current || tag.query != self.settled_query {
            tracing::trace!(
                query = %tag.query,
                generation = tag.generation,
                settled = %self.settled_query,
                "discarding stale lookup result"
            );
            return false;
        }

        self.in_flight = None;
        let next = match outcome {
            Ok(results) => SearchState::Success { query: tag.query, results },
            Err(err) => {
                tracing::warn!(query = %tag.query, error = %err, "lookup failed");
                SearchState::Failed { query: tag.query, message: SmolStr::new(err.to_string()) }
            }
        };
        self.transition(next);
        true
    }

    fn transition(&mut self, next: SearchState) {
        tracing::debug!(from = self.state.label(), to = next.label(), "search state transition");
        self.state = next;
        self.epoch = self.epoch.wrapping_add(1);
    }

    #[cfg(test)]
    pub(crate) fn inject_completion(
        &self,
        tag: RequestTag,
        outcome: Result<Vec<Record>, LookupError>,
    ) {
        let _ = self.completions_tx.send(Completion { tag, outcome });
    }
}

impl<D: Directory> Drop for SearchSession<D> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.abort.abort();
        }
    }
}

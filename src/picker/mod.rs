// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! People picker.
//!
//! Composes the debounced search session, the selection set and the highlight cursor into the
//! single object the TUI and MCP surfaces drive. Every observable change bumps [`PeoplePicker::rev`].

use tokio::runtime::Handle;
use tokio::time::Instant;

use crate::config::PickerConfig;
use crate::directory::{Directory, MockDirectory};
use crate::model::{Record, RecordId};
use crate::search::{SearchSession, SearchState};

pub mod navigation;
pub mod selection;

pub use navigation::{HighlightCursor, Intent, ParseIntentError};
pub use selection::SelectionSet;

/// What a navigation intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Moved(Option<usize>),
    Selected(Record),
    Dismissed,
    Ignored,
}

/// Owned copy of everything a surface needs to render the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSnapshot {
    pub rev: u64,
    pub raw_query: String,
    pub settled_query: String,
    pub state: SearchState,
    pub cursor: Option<usize>,
    pub selection: Vec<Record>,
    pub active_detail: Option<Record>,
    pub focused: bool,
    pub dropdown_open: bool,
    pub force_failure: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PickerError {
    #[error("record {0} is not in the current results")]
    NotInResults(RecordId),
}

pub struct PeoplePicker<D: Directory = MockDirectory> {
    search: SearchSession<D>,
    selection: SelectionSet,
    cursor: HighlightCursor,
    seen_epoch: u64,
    focused: bool,
    dropdown_open: bool,
    rev: u64,
}

impl PeoplePicker<MockDirectory> {
    pub fn from_config(config: &PickerConfig, runtime: Handle) -> Self {
        let mut picker = Self::new(config.directory(), config, runtime);
        picker.set_force_failure(config.force_failure);
        picker
    }
}

impl<D: Directory> PeoplePicker<D> {
    pub fn new(directory: D, config: &PickerConfig, runtime: Handle) -> Self {
        let search = SearchSession::new(directory, config.session_options(), runtime);
        let seen_epoch = search.epoch();
        Self {
            search,
            selection: SelectionSet::new(),
            cursor: HighlightCursor::default(),
            seen_epoch,
            focused: true,
            dropdown_open: false,
            rev: 0,
        }
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn search(&self) -> &SearchSession<D> {
        &self.search
    }

    pub fn raw_query(&self) -> &str {
        self.search.raw_query()
    }

    pub fn settled_query(&self) -> &str {
        self.search.settled_query()
    }

    pub fn state(&self) -> &SearchState {
        self.search.state()
    }

    pub fn results(&self) -> &[Record] {
        self.search.state().results()
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor.index()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_dropdown_open(&self) -> bool {
        self.dropdown_open
    }

    pub fn force_failure(&self) -> bool {
        self.search.force_failure()
    }

    /// Earliest instant at which [`pump`](Self::pump) has timer work to do.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.search.next_deadline()
    }

    /// Whether `id` is already chosen; such rows render dimmed and cannot be committed.
    pub fn is_dimmed(&self, id: RecordId) -> bool {
        self.selection.contains(id)
    }

    /// Record shown in the detail panel: the highlighted result, else the newest selection.
    pub fn active_detail(&self) -> Option<&Record> {
        self.cursor
            .index()
            .and_then(|idx| self.results().get(idx))
            .or_else(|| self.selection.last())
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            rev: self.rev,
            raw_query: self.raw_query().to_owned(),
            settled_query: self.settled_query().to_owned(),
            state: self.state().clone(),
            cursor: self.cursor(),
            selection: self.selection.as_slice().to_vec(),
            active_detail: self.active_detail().cloned(),
            focused: self.focused,
            dropdown_open: self.dropdown_open,
            force_failure: self.force_failure(),
        }
    }

    pub fn set_raw_query(&mut self, raw: impl Into<String>, now: Instant) -> bool {
        let changed = self.search.set_raw_query(raw, now);
        let focus_changed = self.open();
        let cursor_changed = self.sync_cursor();
        self.touch(changed || focus_changed || cursor_changed)
    }

    pub fn push_char(&mut self, ch: char, now: Instant) -> bool {
        let mut raw = self.raw_query().to_owned();
        raw.push(ch);
        self.set_raw_query(raw, now)
    }

    pub fn pop_char(&mut self, now: Instant) -> bool {
        let mut raw = self.raw_query().to_owned();
        if raw.pop().is_none() {
            return false;
        }
        self.set_raw_query(raw, now)
    }

    /// Advances the debouncer and applies finished lookups.
    pub fn pump(&mut self, now: Instant) -> bool {
        let changed = self.search.pump(now);
        let cursor_changed = self.sync_cursor();
        self.touch(changed || cursor_changed)
    }

    /// Awaits the in-flight lookup, if any, and applies it.
    pub async fn wait_for_completion(&mut self) -> bool {
        let changed = self.search.wait_for_completion().await;
        let cursor_changed = self.sync_cursor();
        self.touch(changed || cursor_changed)
    }

    /// Adds `record` to the selection and clears the query for the next search.
    pub fn select(&mut self, record: Record) -> bool {
        let id = record.id();
        if !self.selection.select(record) {
            return false;
        }
        tracing::debug!(record = %id, selected = self.selection.len(), "record selected");
        self.search.clear_query();
        self.sync_cursor();
        self.touch(true)
    }

    /// Selects a record from the current results by id.
    pub fn select_by_id(&mut self, id: RecordId) -> Result<bool, PickerError> {
        let record = self
            .results()
            .iter()
            .find(|record| record.id() == id)
            .cloned()
            .ok_or(PickerError::NotInResults(id))?;
        Ok(self.select(record))
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        let removed = self.selection.remove(id);
        if removed.is_some() {
            tracing::debug!(record = %id, selected = self.selection.len(), "record removed");
            self.touch(true);
        }
        removed
    }

    pub fn remove_last(&mut self) -> Option<Record> {
        let id = self.selection.last()?.id();
        self.remove(id)
    }

    pub fn apply(&mut self, intent: Intent) -> IntentOutcome {
        let outcome = match intent {
            Intent::MoveNext => {
                let reopened = self.open();
                let moved = self.cursor.move_next(self.results().len());
                self.touch(reopened || moved);
                if moved {
                    IntentOutcome::Moved(self.cursor.index())
                } else {
                    IntentOutcome::Ignored
                }
            }
            Intent::MovePrevious => {
                let reopened = self.open();
                let moved = self.cursor.move_previous();
                self.touch(reopened || moved);
                if moved {
                    IntentOutcome::Moved(self.cursor.index())
                } else {
                    IntentOutcome::Ignored
                }
            }
            Intent::Commit => self.commit_highlighted(),
            Intent::Dismiss => {
                let changed = self.focused || self.dropdown_open;
                self.focused = false;
                self.dropdown_open = false;
                self.touch(changed);
                if changed {
                    IntentOutcome::Dismissed
                } else {
                    IntentOutcome::Ignored
                }
            }
        };
        tracing::trace!(intent = %intent, outcome = ?outcome, "navigation intent");
        outcome
    }

    pub fn retry(&mut self) -> bool {
        let changed = self.search.retry();
        let cursor_changed = self.sync_cursor();
        self.touch(changed || cursor_changed)
    }

    pub fn set_force_failure(&mut self, force_failure: bool) -> bool {
        let changed = self.search.set_force_failure(force_failure);
        self.touch(changed)
    }

    pub fn shutdown(&mut self) {
        self.search.shutdown();
    }

    fn commit_highlighted(&mut self) -> IntentOutcome {
        let Some(record) = self.cursor.index().and_then(|idx| self.results().get(idx)) else {
            return IntentOutcome::Ignored;
        };
        if self.selection.contains(record.id()) {
            return IntentOutcome::Ignored;
        }
        let record = record.clone();
        self.select(record.clone());
        IntentOutcome::Selected(record)
    }

    fn open(&mut self) -> bool {
        let changed = !self.focused || !self.dropdown_open;
        self.focused = true;
        self.dropdown_open = true;
        changed
    }

    fn sync_cursor(&mut self) -> bool {
        let epoch = self.search.epoch();
        if epoch == self.seen_epoch {
            return false;
        }
        self.seen_epoch = epoch;
        self.cursor.reset()
    }

    fn touch(&mut self, changed: bool) -> bool {
        if changed {
            self.rev = self.rev.wrapping_add(1);
        }
        changed
    }
}

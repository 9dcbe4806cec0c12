// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use crate::model::{Record, RecordId};

/// Chosen records, in the order they were added, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    records: Vec<Record>,
    ids: HashSet<RecordId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `record` unless its id is already present. Returns whether it was added.
    pub fn select(&mut self, record: Record) -> bool {
        if !self.ids.insert(record.id()) {
            return false;
        }
        self.records.push(record);
        true
    }

    pub fn remove(&mut self, id: RecordId) -> Option<Record> {
        if !self.ids.remove(&id) {
            return None;
        }
        let idx = self.records.iter().position(|record| record.id() == id)?;
        Some(self.records.remove(idx))
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Most recently added record.
    pub fn last(&self) -> Option<&Record> {
        self.records.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

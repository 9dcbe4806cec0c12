// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpRecord {
    /// Canonical record id (`u:<n>`).
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    /// `Active` or `Offline`.
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct McpSearch {
    /// One of `idle`, `loading`, `success`, `failed`.
    pub status: String,
    /// Settled query the status belongs to; absent while idle.
    pub query: Option<String>,
    pub results: Vec<McpRecord>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PickerReadResponse {
    pub rev: u64,
    pub raw_query: String,
    pub settled_query: String,
    /// `true` while a debounced query is still waiting for its quiet period.
    pub settle_pending: bool,
    pub search: McpSearch,
    /// Highlighted row in `search.results`, if any.
    pub cursor: Option<u64>,
    pub selection: Vec<McpRecord>,
    pub active_detail: Option<McpRecord>,
    pub focused: bool,
    pub dropdown_open: bool,
    pub force_failure: bool,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QuerySetParams {
    /// New raw query text; an empty or blank query returns the search to idle immediately.
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct QuerySetResponse {
    pub rev: u64,
    pub changed: bool,
    pub raw_query: String,
    /// Milliseconds until the query settles and a lookup is issued.
    pub settles_in_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct SearchWaitParams {
    /// Upper bound for the wait (default 5000, max 60000).
    pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchWaitResponse {
    /// `false` when the timeout elapsed before the search went quiet.
    pub quiescent: bool,
    pub waited_ms: u64,
    pub picker: PickerReadResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SearchRetryResponse {
    /// `false` when the search was not in the failed state.
    pub retried: bool,
    pub search: McpSearch,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ForceFailureSetParams {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ForceFailureSetResponse {
    pub enabled: bool,
    pub changed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionReadResponse {
    pub records: Vec<McpRecord>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectionAddParams {
    /// Record id (`u:<n>` or `<n>`) from the current search results.
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionAddResponse {
    /// `false` when the record was already selected.
    pub added: bool,
    pub records: Vec<McpRecord>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SelectionRemoveParams {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SelectionRemoveResponse {
    /// The removed record; absent when it was not selected.
    pub removed: Option<McpRecord>,
    pub records: Vec<McpRecord>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct NavIntentParams {
    /// `next`, `previous`, `commit` or `dismiss`.
    pub intent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NavIntentResponse {
    /// `moved`, `selected`, `dismissed` or `ignored`.
    pub outcome: String,
    pub cursor: Option<u64>,
    pub selected: Option<McpRecord>,
    pub dropdown_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailReadResponse {
    /// `highlight`, `selection` or `none`.
    pub source: String,
    pub record: Option<McpRecord>,
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::{Json, Parameters};
use rmcp::model::{ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData, ServerHandler, ServiceExt};
use tokio::sync::MutexGuard;
use tokio::time::Instant;

use crate::model::{Record, RecordId};
use crate::picker::{Intent, IntentOutcome, PeoplePicker, PickerError};
use crate::search::SearchState;
use crate::tui::SharedPicker;

use super::types::*;

const DEFAULT_WAIT: Duration = Duration::from_millis(5_000);
const MAX_WAIT: Duration = Duration::from_millis(60_000);
const WAIT_POLL: Duration = Duration::from_millis(25);

#[derive(Clone)]
pub struct RosterMcp {
    picker: SharedPicker,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl RosterMcp {
    pub fn new(picker: SharedPicker) -> Self {
        Self { picker, tool_router: Self::tool_router() }
    }

    pub fn picker(&self) -> SharedPicker {
        self.picker.clone()
    }

    pub async fn serve_stdio(self) -> Result<(), rmcp::RmcpError> {
        let service = self.serve((tokio::io::stdin(), tokio::io::stdout())).await?;
        service.waiting().await?;
        Ok(())
    }

    /// Locks the picker and applies any timer or lookup progress first, so every tool observes
    /// the same state the TUI would render.
    async fn lock_pumped(&self) -> MutexGuard<'_, PeoplePicker> {
        let mut picker = self.picker.lock().await;
        picker.pump(Instant::now());
        picker
    }

    /// Read the whole picker: raw/settled query, search status and results, highlight,
    /// selection chips and the detail record. Start here.
    #[tool(name = "picker.read")]
    async fn picker_read(&self) -> Result<Json<PickerReadResponse>, ErrorData> {
        let picker = self.lock_pumped().await;
        Ok(Json(picker_response(&picker)))
    }

    /// Replace the raw query as if typed; the lookup starts once the query has been stable for
    /// the quiet period. Follow with `search.wait` to observe the result.
    #[tool(name = "query.set")]
    async fn query_set(
        &self,
        params: Parameters<QuerySetParams>,
    ) -> Result<Json<QuerySetResponse>, ErrorData> {
        let QuerySetParams { query } = params.0;
        let mut picker = self.lock_pumped().await;
        let now = Instant::now();
        let changed = picker.set_raw_query(query, now);
        tracing::debug!(changed, raw_query = picker.raw_query(), "mcp query.set");

        Ok(Json(QuerySetResponse {
            rev: picker.rev(),
            changed,
            raw_query: picker.raw_query().to_owned(),
            settles_in_ms: picker
                .next_wakeup()
                .map(|deadline| duration_ms(deadline.saturating_duration_since(now))),
        }))
    }

    /// Wait until no settle is pending and no lookup is in flight (or the timeout elapses), then
    /// return the picker state.
    #[tool(name = "search.wait")]
    async fn search_wait(
        &self,
        params: Parameters<SearchWaitParams>,
    ) -> Result<Json<SearchWaitResponse>, ErrorData> {
        let SearchWaitParams { timeout_ms } = params.0;
        let timeout = timeout_ms.map(Duration::from_millis).unwrap_or(DEFAULT_WAIT).min(MAX_WAIT);
        let started = Instant::now();
        let deadline = started + timeout;

        loop {
            let picker = self.lock_pumped().await;
            let now = Instant::now();
            let busy = picker.state().is_loading() || picker.next_wakeup().is_some();
            if !busy || now >= deadline {
                return Ok(Json(SearchWaitResponse {
                    quiescent: !busy,
                    waited_ms: duration_ms(now.saturating_duration_since(started)),
                    picker: picker_response(&picker),
                }));
            }

            let mut nap = WAIT_POLL.min(deadline.saturating_duration_since(now));
            if let Some(wakeup) = picker.next_wakeup() {
                nap = nap.min(wakeup.saturating_duration_since(now));
            }
            drop(picker);
            tokio::time::sleep(nap).await;
        }
    }

    /// Re-issue the lookup for the current settled query after a failure.
    #[tool(name = "search.retry")]
    async fn search_retry(&self) -> Result<Json<SearchRetryResponse>, ErrorData> {
        let mut picker = self.lock_pumped().await;
        let retried = picker.retry();
        Ok(Json(SearchRetryResponse { retried, search: mcp_search(picker.state()) }))
    }

    /// Make subsequent lookups fail with a simulated network error (`true`) or succeed again.
    #[tool(name = "lookup.force_failure.set")]
    async fn lookup_force_failure_set(
        &self,
        params: Parameters<ForceFailureSetParams>,
    ) -> Result<Json<ForceFailureSetResponse>, ErrorData> {
        let ForceFailureSetParams { enabled } = params.0;
        let mut picker = self.lock_pumped().await;
        let changed = picker.set_force_failure(enabled);
        Ok(Json(ForceFailureSetResponse { enabled: picker.force_failure(), changed }))
    }

    /// Read the selected records (chips) in insertion order.
    #[tool(name = "selection.read")]
    async fn selection_read(&self) -> Result<Json<SelectionReadResponse>, ErrorData> {
        let picker = self.lock_pumped().await;
        Ok(Json(SelectionReadResponse { records: selection_records(&picker) }))
    }

    /// Add a record from the current search results to the selection; clears the query.
    #[tool(name = "selection.add")]
    async fn selection_add(
        &self,
        params: Parameters<SelectionAddParams>,
    ) -> Result<Json<SelectionAddResponse>, ErrorData> {
        let SelectionAddParams { id } = params.0;
        let record_id = parse_record_id(&id)?;

        let mut picker = self.lock_pumped().await;
        ensure_known_record(&picker, record_id)?;
        let added = picker.select_by_id(record_id).map_err(|err| match err {
            PickerError::NotInResults(_) => ErrorData::resource_not_found(
                err.to_string(),
                Some(serde_json::json!({ "id": record_id.to_string() })),
            ),
        })?;

        Ok(Json(SelectionAddResponse { added, records: selection_records(&picker) }))
    }

    /// Remove a record from the selection; a known record that is not selected is a no-op.
    #[tool(name = "selection.remove")]
    async fn selection_remove(
        &self,
        params: Parameters<SelectionRemoveParams>,
    ) -> Result<Json<SelectionRemoveResponse>, ErrorData> {
        let SelectionRemoveParams { id } = params.0;
        let record_id = parse_record_id(&id)?;

        let mut picker = self.lock_pumped().await;
        ensure_known_record(&picker, record_id)?;
        let removed = picker.remove(record_id).as_ref().map(mcp_record);

        Ok(Json(SelectionRemoveResponse { removed, records: selection_records(&picker) }))
    }

    /// Apply a keyboard intent (`next`, `previous`, `commit`, `dismiss`) to the result list.
    #[tool(name = "nav.intent")]
    async fn nav_intent(
        &self,
        params: Parameters<NavIntentParams>,
    ) -> Result<Json<NavIntentResponse>, ErrorData> {
        let NavIntentParams { intent } = params.0;
        let intent = intent.parse::<Intent>().map_err(|err| {
            ErrorData::invalid_params(err.to_string(), Some(serde_json::json!({ "intent": intent })))
        })?;

        let mut picker = self.lock_pumped().await;
        let outcome = picker.apply(intent);
        let selected = match &outcome {
            IntentOutcome::Selected(record) => Some(mcp_record(record)),
            _ => None,
        };

        Ok(Json(NavIntentResponse {
            outcome: intent_outcome_label(&outcome).to_owned(),
            cursor: picker.cursor().map(|idx| idx as u64),
            selected,
            dropdown_open: picker.is_dropdown_open(),
        }))
    }

    /// Read the record shown in the detail panel: the highlighted result, else the most recent
    /// selection.
    #[tool(name = "detail.read")]
    async fn detail_read(&self) -> Result<Json<DetailReadResponse>, ErrorData> {
        let picker = self.lock_pumped().await;
        let highlighted = picker.cursor().and_then(|idx| picker.results().get(idx));
        let source = match (highlighted, picker.selection().last()) {
            (Some(_), _) => "highlight",
            (None, Some(_)) => "selection",
            (None, None) => "none",
        };

        Ok(Json(DetailReadResponse {
            source: source.to_owned(),
            record: picker.active_detail().map(mcp_record),
        }))
    }
}

#[tool_handler]
impl ServerHandler for RosterMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Roster people picker (tools: picker.read, query.set, search.wait, search.retry, lookup.force_failure.set, selection.read, selection.add, selection.remove, nav.intent, detail.read)"
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

// Extracted mapping/parsing helpers for MCP tool handlers.
include!("server/helpers.rs");

#[cfg(test)]
mod e2e;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// MCP server helper functions:
/// record/search mapping and id parsing.
fn mcp_record(record: &Record) -> McpRecord {
    McpRecord {
        id: record.id().to_string(),
        name: record.name().to_owned(),
        role: record.role().as_str().to_owned(),
        email: record.email().to_owned(),
        status: record.presence().as_str().to_owned(),
    }
}

fn mcp_search(state: &SearchState) -> McpSearch {
    McpSearch {
        status: state.label().to_owned(),
        query: state.query().map(ToOwned::to_owned),
        results: state.results().iter().map(mcp_record).collect(),
        error: state.error_message().map(ToOwned::to_owned),
    }
}

fn selection_records(picker: &PeoplePicker) -> Vec<McpRecord> {
    picker.selection().iter().map(mcp_record).collect()
}

fn picker_response(picker: &PeoplePicker) -> PickerReadResponse {
    PickerReadResponse {
        rev: picker.rev(),
        raw_query: picker.raw_query().to_owned(),
        settled_query: picker.settled_query().to_owned(),
        settle_pending: picker.next_wakeup().is_some(),
        search: mcp_search(picker.state()),
        cursor: picker.cursor().map(|idx| idx as u64),
        selection: selection_records(picker),
        active_detail: picker.active_detail().map(mcp_record),
        focused: picker.is_focused(),
        dropdown_open: picker.is_dropdown_open(),
        force_failure: picker.force_failure(),
    }
}

fn intent_outcome_label(outcome: &IntentOutcome) -> &'static str {
    match outcome {
        IntentOutcome::Moved(_) => "moved",
        IntentOutcome::Selected(_) => "selected",
        IntentOutcome::Dismissed => "dismissed",
        IntentOutcome::Ignored => "ignored",
    }
}

fn parse_record_id(raw: &str) -> Result<RecordId, ErrorData> {
    raw.parse::<RecordId>().map_err(|err| {
        ErrorData::invalid_params(
            format!("invalid record id: {err}"),
            Some(serde_json::json!({ "id": raw })),
        )
    })
}

fn ensure_known_record(picker: &PeoplePicker, id: RecordId) -> Result<(), ErrorData> {
    let known = picker.search().directory().records().iter().any(|record| record.id() == id);
    if known {
        return Ok(());
    }
    Err(ErrorData::resource_not_found(
        "record not found",
        Some(serde_json::json!({ "id": id.to_string() })),
    ))
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

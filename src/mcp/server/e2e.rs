// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::*;

use crate::config::PickerConfig;
use crate::tui::testing::HeadlessTui;
use crossterm::event::KeyCode;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::Mutex;

fn new_runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .start_paused(true)
        .build()
        .expect("tokio runtime")
}

/// One picker shared by an agent (MCP) and a human (headless TUI).
struct CollabHarness {
    runtime: Runtime,
    server: RosterMcp,
    tui: HeadlessTui,
}

impl CollabHarness {
    fn new() -> Self {
        let runtime = new_runtime();
        let picker =
            PeoplePicker::from_config(&PickerConfig::default(), runtime.handle().clone());
        let shared: SharedPicker = Arc::new(Mutex::new(picker));
        let server = RosterMcp::new(Arc::clone(&shared));
        let tui = {
            let _guard = runtime.enter();
            HeadlessTui::new(shared)
        };
        Self { runtime, server, tui }
    }

    fn agent_query(&self, query: &str) -> QuerySetResponse {
        let Json(resp) = self
            .runtime
            .block_on(self.server.query_set(Parameters(QuerySetParams { query: query.to_owned() })))
            .expect("query.set");
        resp
    }

    fn agent_wait(&self) -> SearchWaitResponse {
        let Json(resp) = self
            .runtime
            .block_on(self.server.search_wait(Parameters(SearchWaitParams::default())))
            .expect("search.wait");
        resp
    }

    fn agent_read(&self) -> PickerReadResponse {
        let Json(resp) = self.runtime.block_on(self.server.picker_read()).expect("picker.read");
        resp
    }

    fn human_tick(&mut self) {
        let _guard = self.runtime.enter();
        self.tui.tick();
    }
}

#[test]
fn agent_search_and_selection_show_up_in_the_tui() {
    let mut harness = CollabHarness::new();

    harness.agent_query("User 3");
    harness.human_tick();
    assert_eq!(harness.tui.view().raw_query, "User 3");
    assert!(harness.tui.view().dropdown_open);

    let waited = harness.agent_wait();
    assert_eq!(waited.picker.search.results.len(), 2);
    harness.human_tick();
    assert_eq!(harness.tui.view().state.results().len(), 2);

    let Json(added) = harness
        .runtime
        .block_on(harness.server.selection_add(Parameters(SelectionAddParams {
            id: "u:30".to_owned(),
        })))
        .expect("selection.add");
    assert!(added.added);

    harness.human_tick();
    let view = harness.tui.view();
    assert_eq!(view.raw_query, "");
    assert_eq!(view.selection.len(), 1);
    assert_eq!(view.selection[0].name(), "User 30");
}

#[test]
fn human_typing_and_commit_are_visible_to_the_agent() {
    let mut harness = CollabHarness::new();

    {
        let _guard = harness.runtime.enter();
        harness.tui.type_text("User 2");
    }
    let read = harness.agent_read();
    assert_eq!(read.raw_query, "User 2");
    assert!(read.settle_pending);

    let waited = harness.agent_wait();
    assert_eq!(waited.picker.search.status, "success");

    {
        let _guard = harness.runtime.enter();
        harness.tui.tick();
        harness.tui.press(KeyCode::Down);
        harness.tui.press(KeyCode::Enter);
    }
    assert_eq!(harness.tui.toast(), Some("Added User 2"));

    let Json(selection) =
        harness.runtime.block_on(harness.server.selection_read()).expect("selection.read");
    assert_eq!(selection.records.len(), 1);
    assert_eq!(selection.records[0].id, "u:2");

    let Json(detail) =
        harness.runtime.block_on(harness.server.detail_read()).expect("detail.read");
    assert_eq!(detail.source, "selection");
    assert_eq!(detail.record.map(|record| record.name), Some("User 2".to_owned()));
}

#[test]
fn agent_forced_failure_is_retried_from_the_keyboard() {
    let mut harness = CollabHarness::new();

    let Json(forced) = harness
        .runtime
        .block_on(
            harness
                .server
                .lookup_force_failure_set(Parameters(ForceFailureSetParams { enabled: true })),
        )
        .expect("lookup.force_failure.set");
    assert!(forced.changed);

    harness.agent_query("User 1");
    let failed = harness.agent_wait();
    assert_eq!(failed.picker.search.status, "failed");

    harness.human_tick();
    assert!(harness.tui.view().force_failure);
    assert_eq!(harness.tui.view().state.error_message(), Some("Simulated Network Error"));

    {
        let _guard = harness.runtime.enter();
        harness.tui.press_ctrl('f');
        harness.tui.press_ctrl('r');
    }
    assert_eq!(harness.tui.toast(), Some("Retrying lookup"));

    let recovered = harness.agent_wait();
    assert_eq!(recovered.picker.search.status, "success");
    assert!(!recovered.picker.force_failure);
    assert_eq!(recovered.picker.search.results.len(), 11);
}

#[test]
fn agent_navigation_moves_the_tui_highlight() {
    let mut harness = CollabHarness::new();
    harness.agent_query("User 1");
    harness.agent_wait();

    for _ in 0..3 {
        harness
            .runtime
            .block_on(
                harness.server.nav_intent(Parameters(NavIntentParams { intent: "next".to_owned() })),
            )
            .expect("nav.intent");
    }
    harness.human_tick();
    assert_eq!(harness.tui.view().cursor, Some(2));
    assert_eq!(
        harness.tui.view().active_detail.as_ref().map(|record| record.name()),
        Some("User 11")
    );

    {
        let _guard = harness.runtime.enter();
        harness.tui.press(KeyCode::Esc);
    }
    let read = harness.agent_read();
    assert!(!read.dropdown_open);
    assert!(!read.focused);
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Duration;

use roster::config::PickerConfig;
use roster::directory::MockDirectory;
use roster::model::{demo_records, RecordId};
use roster::picker::{Intent, IntentOutcome, PeoplePicker};
use roster::search::SearchState;
use tokio::runtime::Handle;
use tokio::time::{sleep, Instant};

const QUIET: Duration = Duration::from_millis(350);

fn id(raw: &str) -> RecordId {
    raw.parse().expect("record id")
}

async fn type_query(picker: &mut PeoplePicker, query: &str) {
    for ch in query.chars() {
        picker.push_char(ch, Instant::now());
        sleep(Duration::from_millis(60)).await;
        picker.pump(Instant::now());
    }
}

async fn settle(picker: &mut PeoplePicker) {
    sleep(QUIET).await;
    picker.pump(Instant::now());
    picker.wait_for_completion().await;
}

#[tokio::test(start_paused = true)]
async fn typing_a_name_issues_one_lookup_for_the_settled_query() {
    let mut picker = PeoplePicker::from_config(&PickerConfig::default(), Handle::current());

    type_query(&mut picker, "User 2").await;
    assert_eq!(picker.state(), &SearchState::Idle, "no lookup while typing");

    sleep(QUIET).await;
    picker.pump(Instant::now());
    assert!(picker.state().is_loading());
    assert_eq!(picker.search().in_flight().map(|tag| tag.generation()), Some(1));

    picker.wait_for_completion().await;
    let names: Vec<&str> = picker.results().iter().map(|record| record.name()).collect();
    assert_eq!(names.first(), Some(&"User 2"));
    assert_eq!(names.len(), 11);
}

#[tokio::test(start_paused = true)]
async fn editing_mid_flight_discards_the_stale_answer() {
    let mut picker = PeoplePicker::from_config(&PickerConfig::default(), Handle::current());

    picker.set_raw_query("User 1", Instant::now());
    sleep(QUIET).await;
    picker.pump(Instant::now());
    assert!(picker.state().is_loading());

    picker.set_raw_query("User 3", Instant::now());
    sleep(Duration::from_millis(300)).await;
    picker.pump(Instant::now());
    assert_eq!(picker.state().query(), Some("User 1"), "old query still loading");

    settle(&mut picker).await;
    assert_eq!(picker.state().query(), Some("User 3"));
    assert_eq!(picker.results().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn pick_two_people_then_remove_one() {
    let mut picker = PeoplePicker::from_config(&PickerConfig::default(), Handle::current());

    type_query(&mut picker, "User 1").await;
    settle(&mut picker).await;
    picker.apply(Intent::MoveNext);
    picker.apply(Intent::MoveNext);
    let IntentOutcome::Selected(first) = picker.apply(Intent::Commit) else {
        panic!("expected a selection");
    };
    assert_eq!(first.name(), "User 10");
    assert_eq!(picker.raw_query(), "");

    type_query(&mut picker, "User 2").await;
    settle(&mut picker).await;
    assert!(picker.select_by_id(id("u:25")).expect("in results"));

    let chips: Vec<&str> = picker.selection().iter().map(|record| record.name()).collect();
    assert_eq!(chips, vec!["User 10", "User 25"]);

    assert_eq!(picker.remove(id("10")).map(|record| record.id()), Some(id("u:10")));
    assert_eq!(picker.selection().len(), 1);
    assert_eq!(picker.active_detail().map(|record| record.name()), Some("User 25"));
}

#[tokio::test(start_paused = true)]
async fn custom_directory_with_zero_latency() {
    let directory = MockDirectory::new(demo_records(5), Duration::ZERO);
    let mut picker = PeoplePicker::new(directory, &PickerConfig::default(), Handle::current());

    picker.set_raw_query("user", Instant::now());
    settle(&mut picker).await;
    assert_eq!(picker.results().len(), 5);
}

#[tokio::test(start_paused = true)]
async fn failure_then_retry_recovers() {
    let config = PickerConfig { force_failure: true, ..PickerConfig::default() };
    let mut picker = PeoplePicker::from_config(&config, Handle::current());

    picker.set_raw_query("User 4", Instant::now());
    settle(&mut picker).await;
    assert_eq!(picker.state().error_message(), Some("Simulated Network Error"));

    picker.set_force_failure(false);
    assert!(picker.retry());
    picker.wait_for_completion().await;
    assert_eq!(picker.results().len(), 1);
}

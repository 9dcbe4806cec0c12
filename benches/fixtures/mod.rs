// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use roster::model::{demo_records, Record};

pub const POOL_SIZES: [usize; 3] = [30, 1_000, 10_000];

pub fn pool(size: usize) -> Vec<Record> {
    demo_records(size)
}

/// Queries with very different selectivity over the demo pools: one exact-ish hit, a broad
/// prefix, a lowercase substring and a miss.
pub fn queries() -> [(&'static str, &'static str); 4] {
    [("narrow", "User 42"), ("broad", "User"), ("lowercase", "ser 1"), ("miss", "zed")]
}

/// Keystroke prefixes of `text`, as typed one character at a time.
pub fn keystrokes(text: &str) -> Vec<String> {
    text.char_indices().map(|(idx, ch)| text[..idx + ch.len_utf8()].to_owned()).collect()
}

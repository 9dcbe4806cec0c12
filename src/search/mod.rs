// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced directory search.
//!
//! The debouncer turns raw keystrokes into settled queries; the session turns settled queries
//! into lookups and applies only the newest result.

pub mod debounce;
pub mod session;

pub use debounce::Debouncer;
pub use session::{RequestTag, SearchSession, SearchState, SessionOptions, DEFAULT_QUIET_PERIOD};

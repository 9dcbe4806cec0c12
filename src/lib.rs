// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Roster: a debounced, cancellable people picker (TUI + MCP).
//!
//! Typing feeds a [`search::Debouncer`]; once the query is quiet a [`search::SearchSession`]
//! issues a lookup against a [`directory::Directory`] and discards any answer that no longer
//! belongs to the settled query. [`picker::PeoplePicker`] adds the selection chips and keyboard
//! navigation on top, and both front ends ([`tui`], [`mcp`]) drive one shared picker.

pub mod config;
pub mod directory;
pub mod logging;
pub mod mcp;
pub mod model;
pub mod picker;
pub mod search;
pub mod tui;

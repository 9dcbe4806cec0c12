// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Model Context Protocol (MCP) server surface.
//!
//! The MCP layer lets an agent drive the same picker the TUI renders: set the query, wait for
//! the debounced lookup, navigate results and edit the selection.

mod server;
mod types;

pub use server::RosterMcp;
pub use types::*;

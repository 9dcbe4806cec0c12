// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Directory records and their ids.

pub mod ids;
pub mod record;

pub use ids::{IdError, RecordId};
pub use record::{demo_records, Presence, Record, Role, DEMO_POOL_SIZE};

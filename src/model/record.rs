// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smol_str::{format_smolstr, SmolStr};

use super::ids::RecordId;

pub const DEMO_POOL_SIZE: usize = 30;
const DEMO_EMAIL_DOMAIN: &str = "glamer.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Developer,
    Designer,
    Manager,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::Designer => "Designer",
            Self::Manager => "Manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    Active,
    Offline,
}

impl Presence {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Offline => "Offline",
        }
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable person in the directory.
///
/// Records are immutable once built; the picker only ever clones them into results and the
/// selection set. `SmolStr` keeps those clones allocation-free for the short strings involved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    id: RecordId,
    name: SmolStr,
    role: Role,
    email: SmolStr,
    presence: Presence,
}

impl Record {
    pub fn new(
        id: RecordId,
        name: impl Into<SmolStr>,
        role: Role,
        email: impl Into<SmolStr>,
        presence: Presence,
    ) -> Self {
        Self { id, name: name.into(), role, email: email.into(), presence }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Two-letter avatar initials derived from the display name.
    pub fn initials(&self) -> SmolStr {
        let mut words = self.name.split_whitespace();
        let first = words.next().and_then(|word| word.chars().next());
        let second = words.next().and_then(|word| word.chars().next());
        match (first, second) {
            (Some(a), Some(b)) => format_smolstr!("{}{}", a.to_uppercase(), b.to_uppercase()),
            (Some(a), None) => format_smolstr!("{}", a.to_uppercase()),
            _ => SmolStr::new_static("?"),
        }
    }
}

/// Builds the demo directory pool.
///
/// Record `i` (zero-based) is `User {i+1}`; roles cycle Developer/Designer/Manager and every
/// fourth record starting with the first is offline.
pub fn demo_records(count: usize) -> Vec<Record> {
    (0..count)
        .filter_map(|idx| {
            let number = u32::try_from(idx + 1).ok()?;
            let id = RecordId::new(number).ok()?;
            let role = match idx % 3 {
                0 => Role::Developer,
                1 => Role::Designer,
                _ => Role::Manager,
            };
            let presence = if idx % 4 == 0 { Presence::Offline } else { Presence::Active };
            Some(Record::new(
                id,
                format_smolstr!("User {number}"),
                role,
                format_smolstr!("user{number}@{DEMO_EMAIL_DOMAIN}"),
                presence,
            ))
        })
        .collect()
}

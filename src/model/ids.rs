// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

/// Stable identifier of a directory record.
///
/// Ids are positive integers; they are the equality key for selection and never change for the
/// lifetime of a pool. Displayed as `u:<n>`; parsing accepts the prefixed form or the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(NonZeroU32);

impl RecordId {
    pub fn new(value: u32) -> Result<Self, IdError> {
        NonZeroU32::new(value).map(Self).ok_or(IdError::Zero)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "u:{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim();
        let digits = digits.strip_prefix("u:").unwrap_or(digits);
        if digits.is_empty() {
            return Err(IdError::Empty);
        }
        let value: u32 = digits.parse().map_err(|_| IdError::NotNumeric(digits.to_owned()))?;
        Self::new(value)
    }
}

impl TryFrom<u32> for RecordId {
    type Error = IdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("record id must not be empty")]
    Empty,
    #[error("record id must be a positive integer, got {0:?}")]
    NotNumeric(String),
    #[error("record id must not be zero")]
    Zero,
}

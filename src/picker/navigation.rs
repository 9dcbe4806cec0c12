// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Roster-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Roster and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

/// Keyboard intents understood by the picker while the input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    MoveNext,
    MovePrevious,
    Commit,
    Dismiss,
}

impl Intent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MoveNext => "next",
            Self::MovePrevious => "previous",
            Self::Commit => "commit",
            Self::Dismiss => "dismiss",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown intent {0:?} (expected next, previous, commit or dismiss)")]
pub struct ParseIntentError(String);

impl FromStr for Intent {
    type Err = ParseIntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "next" | "down" => Ok(Self::MoveNext),
            "previous" | "prev" | "up" => Ok(Self::MovePrevious),
            "commit" | "enter" => Ok(Self::Commit),
            "dismiss" | "escape" | "esc" => Ok(Self::Dismiss),
            _ => Err(ParseIntentError(s.to_owned())),
        }
    }
}

/// Highlighted position in the current result list; `None` means nothing is highlighted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighlightCursor {
    index: Option<usize>,
}

impl HighlightCursor {
    pub fn index(self) -> Option<usize> {
        self.index
    }

    /// Moves down one row without wrapping. Returns whether the cursor moved.
    pub fn move_next(&mut self, len: usize) -> bool {
        let Some(last) = len.checked_sub(1) else {
            return false;
        };
        let next = match self.index {
            None => 0,
            Some(idx) if idx >= last => return false,
            Some(idx) => idx + 1,
        };
        self.index = Some(next);
        true
    }

    /// Moves up one row; stepping up from the first row clears the highlight.
    pub fn move_previous(&mut self) -> bool {
        match self.index {
            None => false,
            Some(0) => {
                self.index = None;
                true
            }
            Some(idx) => {
                self.index = Some(idx - 1);
                true
            }
        }
    }

    pub fn reset(&mut self) -> bool {
        self.index.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{HighlightCursor, Intent};

    fn cursor_at(index: Option<usize>) -> HighlightCursor {
        let mut cursor = HighlightCursor::default();
        if let Some(index) = index {
            for _ in 0..=index {
                cursor.move_next(usize::MAX);
            }
        }
        cursor
    }

    #[rstest]
    #[case(None, 3, Some(0), true)]
    #[case(Some(0), 3, Some(1), true)]
    #[case(Some(2), 3, Some(2), false)]
    #[case(None, 0, None, false)]
    fn move_next_is_bounded(
        #[case] start: Option<usize>,
        #[case] len: usize,
        #[case] expected: Option<usize>,
        #[case] moved: bool,
    ) {
        let mut cursor = cursor_at(start);
        assert_eq!(cursor.move_next(len), moved);
        assert_eq!(cursor.index(), expected);
    }

    #[rstest]
    #[case(Some(2), Some(1), true)]
    #[case(Some(0), None, true)]
    #[case(None, None, false)]
    fn move_previous_clears_past_the_top(
        #[case] start: Option<usize>,
        #[case] expected: Option<usize>,
        #[case] moved: bool,
    ) {
        let mut cursor = cursor_at(start);
        assert_eq!(cursor.move_previous(), moved);
        assert_eq!(cursor.index(), expected);
    }

    #[test]
    fn cursor_stays_in_range_under_any_walk() {
        let len = 4;
        let mut cursor = HighlightCursor::default();
        let walk = [true, true, true, true, true, true, false, false, false, false, false, true];
        for down in walk {
            if down {
                cursor.move_next(len);
            } else {
                cursor.move_previous();
            }
            assert!(cursor.index().map_or(true, |idx| idx < len));
        }
        assert_eq!(cursor.index(), Some(0));
    }

    #[rstest]
    #[case("next", Intent::MoveNext)]
    #[case("Up", Intent::MovePrevious)]
    #[case(" commit ", Intent::Commit)]
    #[case("esc", Intent::Dismiss)]
    fn intents_parse_from_names(#[case] raw: &str, #[case] intent: Intent) {
        assert_eq!(raw.parse::<Intent>(), Ok(intent));
    }

    #[test]
    fn unknown_intent_is_rejected() {
        let err = "sideways".parse::<Intent>().unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }
}

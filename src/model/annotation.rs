// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::ids::{LocationId, TokenId};

/// An indexed range resolved against one snippet's text.
///
/// `start..end` are char offsets into the snippet (`end` exclusive). The line/column fields are
/// derived from the clamped offsets, so for a location that only partially overlaps the snippet
/// they describe the visible part, not the indexer's original range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub start: usize,
    pub end: usize,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub token_id: TokenId,
    pub location_id: LocationId,
    pub is_scope: bool,
    pub is_error: bool,
    pub is_active: bool,
    pub is_focused: bool,
}

impl Annotation {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn covers(&self, position: usize) -> bool {
        self.start <= position && position < self.end
    }

    /// Whether `self` fully contains `other` (equal ranges contain each other).
    pub fn contains(&self, other: &Annotation) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Lines holding at least one covered char. A multi-line span whose exclusive end sits at
    /// column 1 stops on the line before `end_line`.
    pub fn lines(&self) -> std::ops::RangeInclusive<u32> {
        let last = if self.end_line > self.start_line && self.end_col == 1 {
            self.end_line - 1
        } else {
            self.end_line
        };
        self.start_line..=last
    }
}

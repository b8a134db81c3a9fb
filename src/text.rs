// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Line/column ↔ offset conversion for one snippet.
//!
//! Offsets and columns count chars (Unicode scalar values), which is the unit indexers report
//! columns in. Lines are file-absolute: the table knows which file line its first line is.

use std::ops::Range;

/// Start offsets of every line of one text, in chars and bytes.
///
/// A trailing `\n` opens a final empty line, so `"a\n"` has two lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineOffsetTable {
    first_line: u32,
    starts: Vec<usize>,
    byte_starts: Vec<usize>,
    len: usize,
    ascii: bool,
}

impl LineOffsetTable {
    pub fn build(text: &str, first_line: u32) -> Self {
        let ascii = text.is_ascii();
        let mut starts = vec![0];
        let mut byte_starts = vec![0];

        let mut line_byte_start = 0;
        let mut chars = 0;
        for newline in memchr::memchr_iter(b'\n', text.as_bytes()) {
            chars += char_count(&text[line_byte_start..newline], ascii) + 1;
            line_byte_start = newline + 1;
            starts.push(chars);
            byte_starts.push(line_byte_start);
        }
        let len = chars + char_count(&text[line_byte_start..], ascii);

        Self {
            first_line,
            starts,
            byte_starts,
            len,
            ascii,
        }
    }

    pub fn first_line(&self) -> u32 {
        self.first_line
    }

    pub fn last_line(&self) -> u32 {
        let extra = u32::try_from(self.starts.len() - 1).unwrap_or(u32::MAX);
        self.first_line.saturating_add(extra)
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Length of the text in chars.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains_line(&self, line: u32) -> bool {
        self.line_index(line).is_some()
    }

    /// Converts a file-absolute line and 1-based column to a char offset.
    ///
    /// Never fails: lines before the snippet clamp to `0`, lines after it clamp to `len()`, and
    /// the result is capped at `len()`. Columns past the end of a line run on into the next
    /// line, the same way a flat offset would. Column `0` is read as column `1`.
    pub fn to_offset(&self, line: u32, col: u32) -> usize {
        if line < self.first_line {
            return 0;
        }
        let Some(idx) = self.line_index(line) else {
            return self.len;
        };

        let col = col.saturating_sub(1) as usize;
        self.starts[idx].saturating_add(col).min(self.len)
    }

    /// Converts a char offset to a file-absolute line and 1-based column.
    ///
    /// Offsets past the end clamp to `len()`.
    pub fn to_line_column(&self, offset: usize) -> (u32, u32) {
        let offset = offset.min(self.len);
        // starts[0] == 0 <= offset, so the partition point is at least 1.
        let idx = self.starts.partition_point(|&start| start <= offset) - 1;
        let col = offset - self.starts[idx] + 1;
        (
            self.first_line.saturating_add(idx as u32),
            u32::try_from(col).unwrap_or(u32::MAX),
        )
    }

    /// Number of chars on `line`, excluding its newline.
    pub fn line_len(&self, line: u32) -> Option<usize> {
        self.line_range(line).map(|range| range.len())
    }

    /// Char range of `line`, excluding its newline.
    pub fn line_range(&self, line: u32) -> Option<Range<usize>> {
        let idx = self.line_index(line)?;
        let start = self.starts[idx];
        let end = match self.starts.get(idx + 1) {
            Some(next) => next - 1,
            None => self.len,
        };
        Some(start..end)
    }

    /// Converts a char offset into a byte offset into `text`, which must be the text this table
    /// was built from.
    pub fn byte_offset(&self, text: &str, offset: usize) -> usize {
        let offset = offset.min(self.len);
        if self.ascii {
            return offset;
        }

        let idx = self.starts.partition_point(|&start| start <= offset) - 1;
        let line_byte_start = self.byte_starts[idx];
        let rest = &text[line_byte_start..];
        let byte_in_line = rest
            .char_indices()
            .nth(offset - self.starts[idx])
            .map(|(byte, _)| byte)
            .unwrap_or(rest.len());
        line_byte_start + byte_in_line
    }

    fn line_index(&self, line: u32) -> Option<usize> {
        let idx = line.checked_sub(self.first_line)? as usize;
        (idx < self.starts.len()).then_some(idx)
    }
}

fn char_count(text: &str, ascii: bool) -> usize {
    if ascii {
        text.len()
    } else {
        text.chars().count()
    }
}

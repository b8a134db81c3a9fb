// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;
use std::fmt;

use crate::model::{Annotation, LocationId, RawLocation};
use crate::text::LineOffsetTable;

/// Why a location was left out of a snippet's annotation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The resolved end lies before the resolved start.
    Inverted,
    /// No char of the location overlaps the snippet.
    OutsideSnippet,
    /// An earlier location with the same id was already kept.
    DuplicateLocation,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted => f.write_str("end precedes start"),
            Self::OutsideSnippet => f.write_str("outside snippet"),
            Self::DuplicateLocation => f.write_str("duplicate location id"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RejectedLocation {
    pub location_id: LocationId,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "location {}: {}", self.location_id, self.reason)
    }
}

/// Annotations resolved for one snippet plus the locations that were skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildOutput {
    pub annotations: Vec<Annotation>,
    pub rejected: Vec<RejectedLocation>,
}

/// Resolves raw indexer locations against one snippet's [`LineOffsetTable`].
#[derive(Debug, Clone, Copy)]
pub struct AnnotationBuilder<'a> {
    table: &'a LineOffsetTable,
}

impl<'a> AnnotationBuilder<'a> {
    pub fn new(table: &'a LineOffsetTable) -> Self {
        Self { table }
    }

    /// Resolves `locations` in input order. Malformed and out-of-snippet records are skipped,
    /// never reported as failures.
    pub fn build<'l>(&self, locations: impl IntoIterator<Item = &'l RawLocation>) -> BuildOutput {
        let mut out = BuildOutput::default();
        let mut seen = HashSet::<LocationId>::new();

        for location in locations {
            let resolved = self.resolve(location).and_then(|annotation| {
                if seen.insert(annotation.location_id) {
                    Ok(annotation)
                } else {
                    Err(RejectReason::DuplicateLocation)
                }
            });

            match resolved {
                Ok(annotation) => out.annotations.push(annotation),
                Err(reason) => {
                    tracing::debug!(
                        location_id = %location.location_id,
                        start_line = location.start_line,
                        end_line = location.end_line,
                        %reason,
                        "skipping location"
                    );
                    out.rejected.push(RejectedLocation {
                        location_id: location.location_id,
                        reason,
                    });
                }
            }
        }

        out
    }

    /// Resolves a single location, or says why it does not belong to this snippet.
    pub fn resolve(&self, location: &RawLocation) -> Result<Annotation, RejectReason> {
        let table = self.table;
        if location.end_line < table.first_line() || location.start_line > table.last_line() {
            return Err(RejectReason::OutsideSnippet);
        }

        let start = table.to_offset(location.start_line, location.start_col);
        let end = table.to_offset(location.end_line, location.end_col);
        if end < start {
            return Err(RejectReason::Inverted);
        }
        // A range clamped down to one snippet edge shares no char with the snippet.
        if start == end && (end == 0 || end == table.len()) && !is_zero_width(location) {
            return Err(RejectReason::OutsideSnippet);
        }

        let (start_line, start_col) = table.to_line_column(start);
        let (end_line, end_col) = table.to_line_column(end);

        Ok(Annotation {
            start,
            end,
            start_line,
            start_col,
            end_line,
            end_col,
            token_id: location.token_id,
            location_id: location.location_id,
            is_scope: location.is_scope,
            is_error: location.is_error,
            is_active: false,
            is_focused: false,
        })
    }
}

fn is_zero_width(location: &RawLocation) -> bool {
    location.start_line == location.end_line
        && location.start_col.max(1) == location.end_col.max(1)
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! One displayed snippet: text, offsets, annotations and hover state.

use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::annotate::{
    AnnotationBuilder, AnnotationIndex, Hits, RejectedLocation, Selection, TextRect,
};
use crate::color::{AnnotationColor, ColorAssigner};
use crate::interact::{HoverDelta, InteractionTracker};
use crate::model::{Annotation, LocationId, RawLocation};
use crate::text::LineOffsetTable;

#[derive(Debug, Clone)]
pub struct SnippetView {
    start_line: u32,
    code: String,
    table: LineOffsetTable,
    index: AnnotationIndex,
    rejected: Vec<RejectedLocation>,
    tracker: InteractionTracker,
    is_active_file: bool,
}

impl SnippetView {
    pub fn new<'l>(
        start_line: u32,
        code: impl Into<String>,
        locations: impl IntoIterator<Item = &'l RawLocation>,
    ) -> Self {
        let code = code.into();
        let table = LineOffsetTable::build(&code, start_line);
        let built = AnnotationBuilder::new(&table).build(locations);
        let index = AnnotationIndex::build(built.annotations, &table);

        Self {
            start_line,
            code,
            table,
            index,
            rejected: built.rejected,
            tracker: InteractionTracker::new(),
            is_active_file: false,
        }
    }

    /// Replaces text and annotations. The previous hovered set is reported as left; display
    /// flags start cleared on the new annotations.
    pub fn rebuild<'l>(
        &mut self,
        code: impl Into<String>,
        locations: impl IntoIterator<Item = &'l RawLocation>,
    ) -> HoverDelta {
        let delta = self.tracker.on_pointer_leave();
        let is_active_file = self.is_active_file;
        *self = Self::new(self.start_line, code, locations);
        self.is_active_file = is_active_file;
        delta
    }

    pub fn start_line(&self) -> u32 {
        self.start_line
    }

    pub fn end_line(&self) -> u32 {
        self.table.last_line()
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn table(&self) -> &LineOffsetTable {
        &self.table
    }

    pub fn annotations(&self) -> &AnnotationIndex {
        &self.index
    }

    /// Locations the indexer supplied that did not resolve inside this snippet.
    pub fn rejected(&self) -> &[RejectedLocation] {
        &self.rejected
    }

    pub fn set_is_active_file(&mut self, is_active_file: bool) {
        self.is_active_file = is_active_file;
    }

    /// Whether the snippet belongs to the active file or shows an active annotation.
    pub fn is_active(&self) -> bool {
        self.is_active_file || self.index.has_active()
    }

    pub fn to_offset(&self, line: u32, col: u32) -> usize {
        self.table.to_offset(line, col)
    }

    pub fn to_line_column(&self, offset: usize) -> (u32, u32) {
        self.table.to_line_column(offset)
    }

    pub fn annotations_at(&self, position: usize) -> Hits<'_> {
        self.index.query(position)
    }

    /// The text an annotation covers.
    pub fn text_of(&self, annotation: &Annotation) -> &str {
        let start = self.table.byte_offset(&self.code, annotation.start);
        let end = self.table.byte_offset(&self.code, annotation.end);
        &self.code[start..end]
    }

    pub fn cursor_rects(&self, annotation: &Annotation) -> SmallVec<[TextRect; 2]> {
        self.index.cursor_rects(annotation)
    }

    /// Rects to repaint for a hover delta. Locations no longer in the index are skipped.
    pub fn dirty_rects(&self, delta: &HoverDelta) -> Vec<TextRect> {
        delta
            .changed()
            .filter_map(|location_id| self.index.find(location_id))
            .flat_map(|annotation| self.index.cursor_rects(annotation))
            .collect()
    }

    pub fn active_line_numbers(&self) -> BTreeSet<u32> {
        self.index.active_line_numbers()
    }

    pub fn first_active_line(&self) -> Option<u32> {
        self.index.first_active_line()
    }

    pub fn apply_selection(&mut self, selection: &Selection) -> Vec<LocationId> {
        self.index.apply_selection(selection)
    }

    pub fn on_pointer_move(&mut self, position: usize) -> HoverDelta {
        self.tracker.on_pointer_move(&self.index, position)
    }

    pub fn on_pointer_leave(&mut self) -> HoverDelta {
        self.tracker.on_pointer_leave()
    }

    pub fn hovered(&self) -> &[LocationId] {
        self.tracker.hovered()
    }

    pub fn is_hovered(&self, location_id: LocationId) -> bool {
        self.tracker.is_hovered(location_id)
    }

    /// Colors for `annotation`. Scopes avoid the color of the scope directly around them.
    pub fn annotation_color(
        &self,
        colors: &mut ColorAssigner,
        annotation: &Annotation,
    ) -> AnnotationColor {
        let enclosing = annotation
            .is_scope
            .then(|| self.index.enclosing(annotation))
            .flatten()
            .map(|outer| outer.token_id);
        colors.color_for_nested(annotation.token_id, enclosing)
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashMap};

use smallvec::SmallVec;

use crate::model::{Annotation, LocationId, TokenId};
use crate::text::LineOffsetTable;

/// Annotations covering one position, outermost first.
pub type Hits<'a> = SmallVec<[&'a Annotation; 4]>;

/// A highlighted run on a single line, in text coordinates.
///
/// `line` is file-absolute; `start_col..end_col` are 1-based columns with `end_col` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRect {
    pub line: u32,
    pub start_col: u32,
    pub end_col: u32,
}

impl TextRect {
    pub fn width(&self) -> u32 {
        self.end_col.saturating_sub(self.start_col)
    }
}

/// What the selection controller wants shown as active or focused.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub active_tokens: BTreeSet<TokenId>,
    pub active_locations: BTreeSet<LocationId>,
    pub focused_location: Option<LocationId>,
}

/// The sorted annotation set of one snippet.
///
/// Order: `start` ascending, ties broken by the longer span first, so a scope precedes the
/// tokens it contains. The index is immutable apart from the display flags; content changes
/// build a new index.
#[derive(Debug, Clone, Default)]
pub struct AnnotationIndex {
    annotations: Vec<Annotation>,
    // Implicit interval tree over the sorted slots: max_end[i] is the largest end in the
    // subtree rooted at slot i, root_level is the height of the root.
    max_end: Vec<usize>,
    root_level: u32,
    slots: HashMap<LocationId, usize>,
    first_line: u32,
    line_lens: Vec<usize>,
    zero_width_markers: bool,
}

impl AnnotationIndex {
    pub fn build(mut annotations: Vec<Annotation>, table: &LineOffsetTable) -> Self {
        annotations.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| b.len().cmp(&a.len())));

        let (max_end, root_level) = subtree_max_ends(&annotations);

        let mut slots = HashMap::with_capacity(annotations.len());
        for (slot, annotation) in annotations.iter().enumerate() {
            slots.entry(annotation.location_id).or_insert(slot);
        }

        let line_lens = (table.first_line()..=table.last_line())
            .map(|line| table.line_len(line).unwrap_or(0))
            .collect();

        Self {
            annotations,
            max_end,
            root_level,
            slots,
            first_line: table.first_line(),
            line_lens,
            zero_width_markers: false,
        }
    }

    /// Makes `query(p)` also return zero-width annotations sitting exactly at `p`.
    pub fn with_zero_width_markers(mut self, enabled: bool) -> Self {
        self.zero_width_markers = enabled;
        self
    }

    pub fn zero_width_markers(&self) -> bool {
        self.zero_width_markers
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Annotation> {
        self.annotations.iter()
    }

    pub fn as_slice(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn find(&self, location_id: LocationId) -> Option<&Annotation> {
        let slot = *self.slots.get(&location_id)?;
        self.annotations.get(slot)
    }

    /// Every annotation with `start <= position < end`, in stored order.
    pub fn query(&self, position: usize) -> Hits<'_> {
        self.slots_reaching(position, self.zero_width_markers)
            .into_iter()
            .map(|slot| &self.annotations[slot])
            .filter(|a| {
                a.covers(position) || (self.zero_width_markers && a.is_empty() && a.start == position)
            })
            .collect()
    }

    pub fn query_locations(&self, position: usize) -> SmallVec<[LocationId; 4]> {
        self.query(position).iter().map(|a| a.location_id).collect()
    }

    /// The innermost annotation at `position`, i.e. the last hit in stored order.
    pub fn innermost(&self, position: usize) -> Option<&Annotation> {
        self.query(position).last().copied()
    }

    /// The nearest annotation in stored order before `annotation` that strictly contains it.
    pub fn enclosing(&self, annotation: &Annotation) -> Option<&Annotation> {
        let slot = *self.slots.get(&annotation.location_id)?;
        self.slots_reaching(annotation.start, true)
            .into_iter()
            .rev()
            .filter(|&earlier| earlier < slot)
            .map(|earlier| &self.annotations[earlier])
            .find(|candidate| candidate.contains(annotation) && candidate.len() > annotation.len())
    }

    /// File-absolute lines touched by an active annotation.
    pub fn active_line_numbers(&self) -> BTreeSet<u32> {
        self.annotations
            .iter()
            .filter(|a| a.is_active)
            .flat_map(|a| a.lines())
            .collect()
    }

    pub fn has_active(&self) -> bool {
        self.annotations.iter().any(|a| a.is_active)
    }

    pub fn first_active_line(&self) -> Option<u32> {
        self.annotations
            .iter()
            .filter(|a| a.is_active)
            .map(|a| a.start_line)
            .min()
    }

    /// Splits `annotation` into one rect per covered line.
    ///
    /// The first line runs from `start_col` to the end of that line, interior lines are full
    /// width, the last line runs from column 1 to `end_col`. A multi-line span ending at column
    /// 1 contributes no rect for its last line.
    pub fn cursor_rects(&self, annotation: &Annotation) -> SmallVec<[TextRect; 2]> {
        let mut rects = SmallVec::new();

        if annotation.start_line == annotation.end_line {
            rects.push(TextRect {
                line: annotation.start_line,
                start_col: annotation.start_col,
                end_col: annotation.end_col,
            });
            return rects;
        }

        rects.push(TextRect {
            line: annotation.start_line,
            start_col: annotation.start_col,
            end_col: self.line_end_col(annotation.start_line),
        });

        for line in (annotation.start_line + 1)..annotation.end_line {
            rects.push(TextRect {
                line,
                start_col: 1,
                end_col: self.line_end_col(line),
            });
        }

        if annotation.end_col > 1 {
            rects.push(TextRect {
                line: annotation.end_line,
                start_col: 1,
                end_col: annotation.end_col,
            });
        }

        rects
    }

    /// Slots with `start <= position` and `end > position` (`end >= position` when
    /// `inclusive_end`), ascending. Walks the implicit tree, so a single snippet-wide scope does
    /// not turn every lookup into a scan of all earlier slots.
    fn slots_reaching(&self, position: usize, inclusive_end: bool) -> SmallVec<[usize; 8]> {
        let mut found = SmallVec::new();
        let n = self.annotations.len();
        if n == 0 {
            return found;
        }

        let reaches = |end: usize| end > position || (inclusive_end && end == position);
        // (level, node, left subtree already pushed)
        let mut stack: SmallVec<[(u32, usize, bool); 64]> = SmallVec::new();
        stack.push((self.root_level, (1usize << self.root_level) - 1, false));

        while let Some((level, node, descended)) = stack.pop() {
            if level <= LEAF_SCAN_LEVEL {
                let first = node >> level << level;
                let last = (first + (1usize << (level + 1)) - 1).min(n);
                for slot in first..last {
                    let annotation = &self.annotations[slot];
                    if annotation.start > position {
                        break;
                    }
                    if reaches(annotation.end) {
                        found.push(slot);
                    }
                }
            } else if !descended {
                let left = node - (1usize << (level - 1));
                stack.push((level, node, true));
                if left >= n || reaches(self.max_end[left]) {
                    stack.push((level - 1, left, false));
                }
            } else if node < n && self.annotations[node].start <= position {
                if reaches(self.annotations[node].end) {
                    found.push(node);
                }
                stack.push((level - 1, node + (1usize << (level - 1)), false));
            }
        }

        found
    }

    /// Applies `selection` to the display flags and returns the locations whose flags changed.
    pub fn apply_selection(&mut self, selection: &Selection) -> Vec<LocationId> {
        let mut changed = Vec::new();
        for annotation in &mut self.annotations {
            let is_active = selection.active_tokens.contains(&annotation.token_id)
                || selection.active_locations.contains(&annotation.location_id);
            let is_focused = selection.focused_location == Some(annotation.location_id);

            if annotation.is_active != is_active || annotation.is_focused != is_focused {
                annotation.is_active = is_active;
                annotation.is_focused = is_focused;
                changed.push(annotation.location_id);
            }
        }
        changed
    }

    /// Marks every occurrence of `tokens` active and everything else inactive, leaving focus
    /// untouched.
    pub fn set_active_tokens(&mut self, tokens: &BTreeSet<TokenId>) -> Vec<LocationId> {
        let mut changed = Vec::new();
        for annotation in &mut self.annotations {
            let is_active = tokens.contains(&annotation.token_id);
            if annotation.is_active != is_active {
                annotation.is_active = is_active;
                changed.push(annotation.location_id);
            }
        }
        changed
    }

    pub fn set_focused_location(&mut self, location_id: Option<LocationId>) -> Vec<LocationId> {
        let mut changed = Vec::new();
        for annotation in &mut self.annotations {
            let is_focused = location_id == Some(annotation.location_id);
            if annotation.is_focused != is_focused {
                annotation.is_focused = is_focused;
                changed.push(annotation.location_id);
            }
        }
        changed
    }

    pub fn clear_selection(&mut self) -> Vec<LocationId> {
        self.apply_selection(&Selection::default())
    }

    fn line_end_col(&self, line: u32) -> u32 {
        let len = line
            .checked_sub(self.first_line)
            .and_then(|idx| self.line_lens.get(idx as usize))
            .copied()
            .unwrap_or(0);
        u32::try_from(len + 1).unwrap_or(u32::MAX)
    }
}

impl<'a> IntoIterator for &'a AnnotationIndex {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

// Subtrees this small are scanned linearly.
const LEAF_SCAN_LEVEL: u32 = 3;

/// Lays an implicit binary tree over `annotations` (sorted by start): leaves sit at even slots,
/// a node at level `k` has its lowest `k` bits set. Returns each node's subtree maximum `end`
/// and the root level.
fn subtree_max_ends(annotations: &[Annotation]) -> (Vec<usize>, u32) {
    let n = annotations.len();
    let mut max_end: Vec<usize> = annotations.iter().map(|a| a.end).collect();
    if n == 0 {
        return (max_end, 0);
    }

    // Rightmost node of the current level and its subtree maximum, standing in for the missing
    // right children past the end of the slice.
    let mut last_slot = (n - 1) & !1;
    let mut last_max = max_end[last_slot];

    let mut level = 1u32;
    while (1usize << level) <= n {
        let half = 1usize << (level - 1);
        let mut node = (half << 1) - 1;
        while node < n {
            let left = max_end[node - half];
            let right = if node + half < n { max_end[node + half] } else { last_max };
            max_end[node] = max_end[node].max(left).max(right);
            node += half << 2;
        }

        last_slot = if (last_slot >> level) & 1 == 1 {
            last_slot - half
        } else {
            last_slot + half
        };
        if last_slot < n {
            last_max = last_max.max(max_end[last_slot]);
        }
        level += 1;
    }

    (max_end, level - 1)
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pointer hover tracking over an [`AnnotationIndex`].
//!
//! Every event is handled synchronously and reports only the annotations whose hover state
//! changed, so a renderer can repaint just their rects.

use std::collections::BTreeSet;

use smallvec::SmallVec;

use crate::annotate::AnnotationIndex;
use crate::model::LocationId;

/// Annotations that started or stopped being hovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HoverDelta {
    pub entered: BTreeSet<LocationId>,
    pub left: BTreeSet<LocationId>,
}

impl HoverDelta {
    pub fn is_empty(&self) -> bool {
        self.entered.is_empty() && self.left.is_empty()
    }

    /// Every location that needs a repaint.
    pub fn changed(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.left.iter().chain(self.entered.iter()).copied()
    }
}

/// Holds the hovered set as location ids, so a rebuilt index never leaves it dangling.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionTracker {
    hovered: SmallVec<[LocationId; 4]>,
    position: Option<usize>,
}

impl InteractionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hovered locations, outermost first.
    pub fn hovered(&self) -> &[LocationId] {
        &self.hovered
    }

    pub fn is_hovered(&self, location_id: LocationId) -> bool {
        self.hovered.contains(&location_id)
    }

    /// Last pointer position, `None` once the pointer left.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn on_pointer_move(&mut self, index: &AnnotationIndex, position: usize) -> HoverDelta {
        let next = index.query_locations(position);

        let delta = HoverDelta {
            entered: next
                .iter()
                .filter(|id| !self.hovered.contains(id))
                .copied()
                .collect(),
            left: self
                .hovered
                .iter()
                .filter(|id| !next.contains(id))
                .copied()
                .collect(),
        };

        if !delta.is_empty() {
            tracing::trace!(
                position,
                entered = delta.entered.len(),
                left = delta.left.len(),
                "hover changed"
            );
        }

        self.hovered = next;
        self.position = Some(position);
        delta
    }

    pub fn on_pointer_leave(&mut self) -> HoverDelta {
        let left = self.hovered.drain(..).collect();
        self.position = None;
        HoverDelta {
            entered: BTreeSet::new(),
            left,
        }
    }
}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snipmark — annotation overlay engine for indexed source snippets.
//!
//! Resolves indexer locations against a snippet's text, keeps them in a hit-testable index,
//! tracks pointer hover and selection state, and hands out stable per-symbol colors.

pub mod annotate;
pub mod color;
pub mod interact;
pub mod model;
pub mod render;
pub mod text;
pub mod view;

pub use annotate::{AnnotationIndex, Selection, TextRect};
pub use color::{AnnotationColor, ColorAssigner};
pub use interact::{HoverDelta, InteractionTracker};
pub use model::{Annotation, LocationId, RawLocation, TokenId};
pub use text::LineOffsetTable;
pub use view::SnippetView;

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Resolving indexer locations into a queryable annotation set.

mod builder;
mod index;

pub use builder::{AnnotationBuilder, BuildOutput, RejectReason, RejectedLocation};
pub use index::{AnnotationIndex, Hits, Selection, TextRect};

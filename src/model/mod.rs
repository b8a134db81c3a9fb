// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data types: indexer input and resolved annotations.

pub mod annotation;
pub mod ids;
pub mod location;

pub use annotation::Annotation;
pub use ids::{Id, LocationId, LocationIdTag, TokenId, TokenIdTag};
pub use location::{LoadError, LocationFile, RawLocation};

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ids::{LocationId, TokenId};

/// One indexer-supplied range, in file-absolute lines and 1-based columns.
///
/// `end_col` is exclusive: a token covering `de` on the line `def` is `start_col = 1`,
/// `end_col = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLocation {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub token_id: TokenId,
    pub location_id: LocationId,
    #[serde(default)]
    pub is_scope: bool,
    #[serde(default)]
    pub is_error: bool,
}

impl RawLocation {
    pub fn token(
        location_id: u64,
        token_id: u64,
        (start_line, start_col): (u32, u32),
        (end_line, end_col): (u32, u32),
    ) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
            token_id: TokenId::new(token_id),
            location_id: LocationId::new(location_id),
            is_scope: false,
            is_error: false,
        }
    }

    pub fn scope(
        location_id: u64,
        token_id: u64,
        start: (u32, u32),
        end: (u32, u32),
    ) -> Self {
        Self {
            is_scope: true,
            ..Self::token(location_id, token_id, start, end)
        }
    }

    pub fn error(location_id: u64, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            is_error: true,
            ..Self::token(location_id, 0, start, end)
        }
    }
}

/// The indexer's locations for one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationFile {
    #[serde(default)]
    pub path: Option<String>,
    pub locations: Vec<RawLocation>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationFileRepr {
    File(LocationFile),
    Bare(Vec<RawLocation>),
}

impl LocationFile {
    pub fn new(locations: Vec<RawLocation>) -> Self {
        Self {
            path: None,
            locations,
        }
    }

    /// Parses either `{"path": .., "locations": [..]}` or a bare array of locations.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let repr: LocationFileRepr =
            serde_json::from_str(json).map_err(|source| LoadError::Json {
                path: None,
                message: source.to_string(),
            })?;
        Ok(match repr {
            LocationFileRepr::File(file) => file,
            LocationFileRepr::Bare(locations) => Self::new(locations),
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            message: source.to_string(),
        })?;
        Self::from_json_str(&json).map_err(|err| err.with_path(path))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadError {
    Io {
        path: String,
        message: String,
    },
    Json {
        path: Option<String>,
        message: String,
    },
}

impl LoadError {
    fn with_path(self, path: &Path) -> Self {
        match self {
            Self::Json { message, .. } => Self::Json {
                path: Some(path.display().to_string()),
                message,
            },
            other => other,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Self::Json {
                path: Some(path),
                message,
            } => write!(f, "invalid location file {path}: {message}"),
            Self::Json {
                path: None,
                message,
            } => write!(f, "invalid location json: {message}"),
        }
    }
}

impl std::error::Error for LoadError {}

#[cfg(test)]
mod tests {
    use super::{LoadError, LocationFile, RawLocation};

    #[test]
    fn parses_wrapped_file_with_defaulted_flags() {
        let file = LocationFile::from_json_str(
            r#"{
  "path": "src/main.cpp",
  "locations": [
    { "start_line": 3, "start_col": 1, "end_line": 3, "end_col": 5, "token_id": 10, "location_id": 1 }
  ]
}"#,
        )
        .expect("location file");

        assert_eq!(file.path.as_deref(), Some("src/main.cpp"));
        assert_eq!(file.locations, vec![RawLocation::token(1, 10, (3, 1), (3, 5))]);
    }

    #[test]
    fn parses_bare_array() {
        let file = LocationFile::from_json_str(
            r#"[{ "start_line": 1, "start_col": 1, "end_line": 4, "end_col": 2,
                 "token_id": 2, "location_id": 9, "is_scope": true }]"#,
        )
        .expect("location file");

        assert_eq!(file.path, None);
        assert!(file.locations[0].is_scope);
        assert!(!file.locations[0].is_error);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = LocationFile::from_json_str("{\"locations\": 3}").unwrap_err();
        match err {
            LoadError::Json { path: None, .. } => {}
            other => panic!("expected Json error, got: {other:?}"),
        }
    }
}

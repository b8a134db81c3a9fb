// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Synthetic snippets shaped like indexer output: nested scopes around short tokens.

use snipmark::model::RawLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Small,
    MediumNested,
    LargeFlat,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::MediumNested => "medium_nested",
            Self::LargeFlat => "large_flat",
        }
    }

    fn shape(self) -> (usize, usize) {
        // (functions, statements per function)
        match self {
            Self::Small => (4, 8),
            Self::MediumNested => (20, 24),
            Self::LargeFlat => (200, 6),
        }
    }
}

pub struct Fixture {
    pub start_line: u32,
    pub code: String,
    pub locations: Vec<RawLocation>,
}

pub fn fixture(case: Case) -> Fixture {
    let (functions, statements) = case.shape();
    let start_line = 100;

    let mut code = String::new();
    let mut locations = Vec::new();
    let mut line = start_line;
    let mut next_id = 0u64;
    let mut id = || {
        next_id += 1;
        next_id
    };

    for function in 0..functions {
        let open_line = line;
        code.push_str(&format!("void f{function}(int a, int b) {{\n"));
        locations.push(RawLocation::token(id(), 1_000 + function as u64, (line, 6), (line, 8)));
        line += 1;

        for statement in 0..statements {
            code.push_str("    if (a < b) { a = g(a, b); }\n");
            let token = (statement % 7) as u64;
            locations.push(RawLocation::scope(id(), 10_000 + token, (line, 16), (line, 32)));
            locations.push(RawLocation::token(id(), token, (line, 9), (line, 10)));
            locations.push(RawLocation::token(id(), token, (line, 18), (line, 19)));
            locations.push(RawLocation::token(id(), 7, (line, 22), (line, 23)));
            line += 1;
        }

        code.push_str("}\n");
        let body = RawLocation::scope(id(), 20_000 + function as u64, (open_line, 25), (line, 2));
        locations.push(body);
        line += 1;
    }

    // File-level scope around every function, as a namespace or class body would be.
    locations.push(RawLocation::scope(id(), 30_000, (start_line, 1), (line, 1)));

    // Locations for neighbouring snippets that must be skipped.
    locations.push(RawLocation::token(id(), 1, (1, 1), (1, 4)));
    locations.push(RawLocation::token(id(), 1, (line + 50, 1), (line + 50, 4)));

    Fixture {
        start_line,
        code,
        locations,
    }
}

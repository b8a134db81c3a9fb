// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Stable per-symbol colors drawn from a small palette.
//!
//! The cache is an explicitly owned object: create one per application (or per window) and lend
//! it to every view that paints annotations, so the same token id gets the same colors
//! everywhere it is shown.

use std::collections::HashMap;
use std::{env, error::Error, fmt};

use ratatui::style::Color;

use crate::model::TokenId;

pub const PALETTE_ENV: &str = "SNIPMARK_ANNOTATION_PALETTE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationColor {
    pub border: Color,
    pub fill: Color,
}

impl AnnotationColor {
    pub const fn rgb(border: (u8, u8, u8), fill: (u8, u8, u8)) -> Self {
        Self {
            border: Color::Rgb(border.0, border.1, border.2),
            fill: Color::Rgb(fill.0, fill.1, fill.2),
        }
    }
}

pub const DEFAULT_PALETTE: [AnnotationColor; 8] = [
    AnnotationColor::rgb((0xc0, 0x39, 0x2b), (0x5c, 0x1e, 0x18)),
    AnnotationColor::rgb((0x29, 0x80, 0xb9), (0x17, 0x3f, 0x5c)),
    AnnotationColor::rgb((0x27, 0xae, 0x60), (0x16, 0x4f, 0x2e)),
    AnnotationColor::rgb((0xd4, 0xac, 0x0d), (0x5e, 0x4d, 0x0a)),
    AnnotationColor::rgb((0x8e, 0x44, 0xad), (0x42, 0x22, 0x52)),
    AnnotationColor::rgb((0x16, 0xa0, 0x85), (0x0e, 0x4a, 0x3e)),
    AnnotationColor::rgb((0xd3, 0x54, 0x00), (0x5e, 0x27, 0x05)),
    AnnotationColor::rgb((0x7f, 0x8c, 0x8d), (0x3a, 0x40, 0x41)),
];

/// Assigns palette slots to token ids round-robin and remembers them until [`clear`].
///
/// Slots wrap once the palette is exhausted, so unrelated tokens may end up sharing a color.
///
/// [`clear`]: ColorAssigner::clear
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    palette: Vec<AnnotationColor>,
    slots: HashMap<TokenId, usize>,
    next_slot: usize,
}

impl Default for ColorAssigner {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_vec(),
            slots: HashMap::new(),
            next_slot: 0,
        }
    }
}

impl ColorAssigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(palette: Vec<AnnotationColor>) -> Result<Self, PaletteError> {
        if palette.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self {
            palette,
            slots: HashMap::new(),
            next_slot: 0,
        })
    }

    /// Uses the palette from `SNIPMARK_ANNOTATION_PALETTE` when set and non-empty, the built-in
    /// palette otherwise.
    pub fn from_env() -> Result<Self, PaletteError> {
        match palette_override_from_env()? {
            Some(palette) => Self::with_palette(palette),
            None => Ok(Self::default()),
        }
    }

    pub fn palette(&self) -> &[AnnotationColor] {
        &self.palette
    }

    /// Number of token ids with a cached color.
    pub fn assigned(&self) -> usize {
        self.slots.len()
    }

    pub fn slot_of(&self, token_id: TokenId) -> Option<usize> {
        self.slots.get(&token_id).copied()
    }

    pub fn color_for(&mut self, token_id: TokenId) -> AnnotationColor {
        self.color_for_nested(token_id, None)
    }

    /// Like [`color_for`](Self::color_for), but a newly assigned slot avoids the one already
    /// given to `enclosing` (the token of the directly enclosing annotation) when the palette
    /// has room. Cached colors are returned unchanged.
    pub fn color_for_nested(
        &mut self,
        token_id: TokenId,
        enclosing: Option<TokenId>,
    ) -> AnnotationColor {
        if let Some(slot) = self.slot_of(token_id) {
            return self.palette[slot];
        }

        let len = self.palette.len();
        let mut next = self.next_slot;
        let avoid = enclosing.and_then(|id| self.slot_of(id));
        if len > 1 && avoid == Some(next % len) {
            next += 1;
        }
        self.next_slot = (next + 1) % len;

        let slot = next % len;
        self.slots.insert(token_id, slot);
        self.palette[slot]
    }

    /// Forgets every assignment; the next lookup starts again at slot 0.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.next_slot = 0;
    }
}

fn palette_override_from_env() -> Result<Option<Vec<AnnotationColor>>, PaletteError> {
    let value = match env::var(PALETTE_ENV) {
        Ok(value) => value,
        Err(env::VarError::NotPresent) => return Ok(None),
        Err(env::VarError::NotUnicode(_)) => {
            return Err(PaletteError::InvalidEnv {
                name: PALETTE_ENV.to_string(),
                value: "<non-unicode>".to_string(),
            });
        }
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let palette = parse_palette(trimmed).map_err(|error| PaletteError::InvalidEnv {
        name: PALETTE_ENV.to_string(),
        value: format!("{trimmed} ({error})"),
    })?;
    Ok(Some(palette))
}

/// Parses `border|fill` pairs separated by commas, e.g. `#c0392b|#5c1e18, rgb:29/80/b9|#173f5c`.
pub fn parse_palette(value: &str) -> Result<Vec<AnnotationColor>, String> {
    let mut palette = Vec::new();
    for pair in value.split(',').map(str::trim).filter(|pair| !pair.is_empty()) {
        let (border, fill) = pair
            .split_once('|')
            .ok_or_else(|| format!("expected border|fill, got {pair}"))?;
        palette.push(AnnotationColor {
            border: parse_palette_color(border)?,
            fill: parse_palette_color(fill)?,
        });
    }

    if palette.is_empty() {
        return Err("no colors".to_string());
    }
    Ok(palette)
}

/// One side of a pair: `#rrggbb`, or X11 `rgb:r/g/b` with one to four hex digits per channel.
fn parse_palette_color(value: &str) -> Result<Color, String> {
    let value = value.trim();
    let mut channels = [0u8; 3];

    if let Some(rest) = value.strip_prefix("rgb:").or_else(|| value.strip_prefix("RGB:")) {
        let mut parts = rest.split('/');
        for channel in &mut channels {
            let part = parts.next().ok_or_else(|| format!("{value}: expected r/g/b"))?;
            *channel = scale_channel(part).ok_or_else(|| format!("{value}: bad channel {part}"))?;
        }
        if parts.next().is_some() {
            return Err(format!("{value}: expected r/g/b"));
        }
    } else if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("{value}: expected #rrggbb"));
        }
        for (i, channel) in channels.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                .map_err(|_| format!("{value}: expected #rrggbb"))?;
        }
    } else {
        return Err(format!("{value}: expected #rrggbb or rgb:r/g/b"));
    }

    let [r, g, b] = channels;
    Ok(Color::Rgb(r, g, b))
}

/// Scales an `n`-digit hex channel onto `0..=255`.
fn scale_channel(part: &str) -> Option<u8> {
    if part.is_empty() || part.len() > 4 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let raw = u32::from_str_radix(part, 16).ok()?;
    let max = (1u32 << (4 * part.len())) - 1;
    u8::try_from((raw * 255 + max / 2) / max).ok()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    Empty,
    InvalidEnv { name: String, value: String },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("annotation palette must not be empty"),
            Self::InvalidEnv { name, value } => write!(f, "invalid env {name}={value}"),
        }
    }
}

impl Error for PaletteError {}

// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Turning a snippet's annotations into styled text runs.
//!
//! This is the last step before painting: each snippet line is cut at annotation boundaries and
//! every run carries the colors and states of the annotations covering it. Painting the runs is
//! left to the host (a ratatui widget, a terminal printer, ...).

use std::collections::BTreeSet;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::color::{AnnotationColor, ColorAssigner};
use crate::view::SnippetView;

/// A run of text whose covering annotations do not change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlaySegment {
    pub text: String,
    /// Colors of the innermost covering annotation.
    pub color: Option<AnnotationColor>,
    pub hovered: bool,
    pub active: bool,
    pub focused: bool,
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayLine {
    pub line: u32,
    /// The line is touched by an active annotation.
    pub active_band: bool,
    pub segments: Vec<OverlaySegment>,
}

impl OverlayLine {
    pub fn text(&self) -> String {
        self.segments.iter().map(|segment| segment.text.as_str()).collect()
    }
}

pub fn overlay_lines(view: &SnippetView, colors: &mut ColorAssigner) -> Vec<OverlayLine> {
    let table = view.table();
    let index = view.annotations();
    let active_lines = view.active_line_numbers();

    let mut lines = Vec::with_capacity(table.line_count());
    for line in table.first_line()..=table.last_line() {
        let Some(range) = table.line_range(line) else {
            continue;
        };

        // Coverage only changes at annotation edges.
        let mut cuts = BTreeSet::from([range.start, range.end]);
        for annotation in index {
            for edge in [annotation.start, annotation.end] {
                if range.contains(&edge) {
                    cuts.insert(edge);
                }
            }
        }

        let cuts: Vec<usize> = cuts.into_iter().collect();
        let mut segments = Vec::with_capacity(cuts.len());
        for pair in cuts.windows(2) {
            let (start, end) = (pair[0], pair[1]);
            let hits = view.annotations_at(start);
            let color = hits
                .last()
                .map(|innermost| view.annotation_color(colors, innermost));

            let code = view.code();
            let text = &code[table.byte_offset(code, start)..table.byte_offset(code, end)];
            segments.push(OverlaySegment {
                text: text.to_owned(),
                color,
                hovered: hits.iter().any(|a| view.is_hovered(a.location_id)),
                active: hits.iter().any(|a| a.is_active),
                focused: hits.iter().any(|a| a.is_focused),
                error: hits.iter().any(|a| a.is_error),
            });
        }

        lines.push(OverlayLine {
            line,
            active_band: active_lines.contains(&line),
            segments,
        });
    }

    lines
}

pub fn segment_style(segment: &OverlaySegment) -> Style {
    let mut style = Style::default();
    if let Some(color) = segment.color {
        style = style.bg(if segment.hovered { color.border } else { color.fill });
    }
    if segment.active {
        style = style.add_modifier(Modifier::BOLD);
    }
    if segment.focused {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if segment.error {
        style = style.fg(Color::LightRed).add_modifier(Modifier::UNDERLINED);
    }
    style
}

pub fn styled_line(line: &OverlayLine) -> Line<'static> {
    let spans: Vec<Span<'static>> = line
        .segments
        .iter()
        .map(|segment| Span::styled(segment.text.clone(), segment_style(segment)))
        .collect();

    let mut styled = Line::from(spans);
    if line.active_band {
        styled.style = Style::default().bg(Color::DarkGray);
    }
    styled
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use ratatui::style::{Color, Modifier};

    use super::{overlay_lines, segment_style, styled_line};
    use crate::annotate::Selection;
    use crate::color::{AnnotationColor, ColorAssigner};
    use crate::model::{RawLocation, TokenId};
    use crate::view::SnippetView;

    const CODE: &str = "let a = b;\nlet c = a;";

    const RED: AnnotationColor = AnnotationColor::rgb((0xff, 0, 0), (0x80, 0, 0));
    const BLUE: AnnotationColor = AnnotationColor::rgb((0, 0, 0xff), (0, 0, 0x80));

    fn view() -> SnippetView {
        SnippetView::new(
            1,
            CODE,
            &[
                RawLocation::token(1, 7, (1, 5), (1, 6)),
                RawLocation::token(2, 8, (1, 9), (1, 10)),
                RawLocation::token(3, 7, (2, 9), (2, 10)),
                RawLocation::error(4, (2, 5), (2, 6)),
            ],
        )
    }

    #[test]
    fn cuts_lines_at_annotation_edges() {
        let view = view();
        let mut colors = ColorAssigner::with_palette(vec![RED, BLUE]).expect("palette");

        let lines = overlay_lines(&view, &mut colors);

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "let a = b;");
        let texts: Vec<&str> = lines[0].segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["let ", "a", " = ", "b", ";"]);

        assert_eq!(lines[0].segments[0].color, None);
        assert_eq!(lines[0].segments[1].color, Some(RED));
        assert_eq!(lines[0].segments[3].color, Some(BLUE));
        // Same token on the next line shares the color.
        let second_a = lines[1].segments.iter().find(|s| s.text == "a").expect("a");
        assert_eq!(second_a.color, Some(RED));
        let error = lines[1].segments.iter().find(|s| s.text == "c").expect("c");
        assert!(error.error);
    }

    #[test]
    fn hover_and_selection_flow_into_segments() {
        let mut view = view();
        view.on_pointer_move(view.to_offset(1, 5));
        view.apply_selection(&Selection {
            active_tokens: BTreeSet::from([TokenId::new(8)]),
            ..Selection::default()
        });
        let mut colors = ColorAssigner::with_palette(vec![RED, BLUE]).expect("palette");

        let lines = overlay_lines(&view, &mut colors);

        let a = &lines[0].segments[1];
        assert!(a.hovered && !a.active);
        assert_eq!(segment_style(a).bg, Some(RED.border));

        let b = &lines[0].segments[3];
        assert!(b.active && !b.hovered);
        assert!(segment_style(b).add_modifier.contains(Modifier::BOLD));
        assert_eq!(segment_style(b).bg, Some(BLUE.fill));

        assert!(lines[0].active_band);
        assert!(!lines[1].active_band);
        assert_eq!(styled_line(&lines[0]).style.bg, Some(Color::DarkGray));
        assert_eq!(styled_line(&lines[1]).spans.len(), lines[1].segments.len());
    }
}

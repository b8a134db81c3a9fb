// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Snipmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Snipmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Snipmark CLI entrypoint.
//!
//! Loads a source snippet and an indexer location dump, then prints the resolved annotations,
//! what covers a given position, and optionally the snippet with its overlay colors applied.

use std::error::Error;
use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use ratatui::style::{Color, Modifier};

use snipmark::color::ColorAssigner;
use snipmark::model::{Annotation, LocationFile};
use snipmark::render::{overlay_lines, segment_style, OverlayLine};
use snipmark::view::SnippetView;

const LOG_ENV: &str = "SNIPMARK_LOG";

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <code-file> --locations <json> [--start-line <n>] [--at <line>:<col>] [--color]\n\n--start-line is the file line of the snippet's first line (default 1).\n--at lists the annotations covering a file-absolute position.\n--color prints the snippet with annotation colors.\n\nLocations are a JSON array of {{start_line, start_col, end_line, end_col, token_id, location_id, is_scope?, is_error?}}\nor an object {{\"path\": .., \"locations\": [..]}}.\nColors come from {} when set (`#rrggbb|#rrggbb, ...`).\nLog level: {LOG_ENV} (default warn).",
        snipmark::color::PALETTE_ENV
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    code_path: Option<String>,
    locations_path: Option<String>,
    start_line: Option<u32>,
    at: Option<(u32, u32)>,
    color: bool,
}

fn parse_position(raw: &str) -> Option<(u32, u32)> {
    let (line, col) = raw.split_once(':')?;
    Some((line.trim().parse().ok()?, col.trim().parse().ok()?))
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--locations" => {
                if options.locations_path.is_some() {
                    return Err(());
                }
                options.locations_path = Some(args.next().ok_or(())?);
            }
            "--start-line" => {
                if options.start_line.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.start_line = Some(raw.parse().map_err(|_| ())?);
            }
            "--at" => {
                if options.at.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.at = Some(parse_position(&raw).ok_or(())?);
            }
            "--color" => {
                if options.color {
                    return Err(());
                }
                options.color = true;
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.code_path.is_some() {
                    return Err(());
                }
                options.code_path = Some(arg);
            }
        }
    }

    if options.code_path.is_none() || options.locations_path.is_none() {
        return Err(());
    }

    Ok(options)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn describe(view: &SnippetView, annotation: &Annotation) -> String {
    let kind = match (annotation.is_scope, annotation.is_error) {
        (_, true) => "error",
        (true, false) => "scope",
        (false, false) => "token",
    };
    let text = view.text_of(annotation);
    let text = if text.contains('\n') || text.chars().count() > 32 {
        let head: String = text.chars().take_while(|ch| *ch != '\n').take(29).collect();
        format!("{head}…")
    } else {
        text.to_owned()
    };
    format!(
        "{:>6} {:>6} {kind:<5} {}:{}-{}:{} {:?}",
        annotation.location_id.get(),
        annotation.token_id.get(),
        annotation.start_line,
        annotation.start_col,
        annotation.end_line,
        annotation.end_col,
        text
    )
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Reset => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::Gray => TermColor::Grey,
        Color::DarkGray => TermColor::DarkGrey,
        Color::LightRed => TermColor::Red,
        Color::LightGreen => TermColor::Green,
        Color::LightYellow => TermColor::Yellow,
        Color::LightBlue => TermColor::Blue,
        Color::LightMagenta => TermColor::Magenta,
        Color::LightCyan => TermColor::Cyan,
        Color::White => TermColor::White,
        Color::Rgb(r, g, b) => TermColor::Rgb { r, g, b },
        Color::Indexed(idx) => TermColor::AnsiValue(idx),
    }
}

fn print_overlay(out: &mut impl Write, lines: &[OverlayLine]) -> io::Result<()> {
    for line in lines {
        let marker = if line.active_band { '>' } else { ' ' };
        queue!(out, Print(format!("{marker}{:>5} ", line.line)))?;
        for segment in &line.segments {
            let style = segment_style(segment);
            if let Some(bg) = style.bg {
                queue!(out, SetBackgroundColor(term_color(bg)))?;
            }
            if let Some(fg) = style.fg {
                queue!(out, SetForegroundColor(term_color(fg)))?;
            }
            if style.add_modifier.contains(Modifier::BOLD) {
                queue!(out, SetAttribute(Attribute::Bold))?;
            }
            if style.add_modifier.contains(Modifier::UNDERLINED) {
                queue!(out, SetAttribute(Attribute::Underlined))?;
            }
            queue!(
                out,
                Print(&segment.text),
                SetAttribute(Attribute::Reset),
                ResetColor
            )?;
        }
        queue!(out, Print("\n"))?;
    }
    out.flush()
}

fn main() {
    init_tracing();

    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "snipmark".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let code_path = options.code_path.unwrap_or_default();
        let code = std::fs::read_to_string(&code_path)
            .map_err(|err| format!("failed to read {code_path}: {err}"))?;
        let file = LocationFile::load(options.locations_path.unwrap_or_default())?;
        let mut colors = ColorAssigner::from_env()?;

        let start_line = options.start_line.unwrap_or(1);
        let mut view = SnippetView::new(start_line, code, &file.locations);
        tracing::info!(
            annotations = view.annotations().len(),
            rejected = view.rejected().len(),
            "snippet indexed"
        );

        let stdout = io::stdout();
        let mut out = stdout.lock();

        writeln!(
            out,
            "lines {}-{}: {} annotations, {} skipped",
            view.start_line(),
            view.end_line(),
            view.annotations().len(),
            view.rejected().len()
        )?;
        for annotation in view.annotations() {
            writeln!(out, "{}", describe(&view, annotation))?;
        }
        for rejected in view.rejected() {
            writeln!(out, "skipped {rejected}")?;
        }

        if let Some((line, col)) = options.at {
            let position = view.to_offset(line, col);
            view.on_pointer_move(position);
            writeln!(out, "\nat {line}:{col} (offset {position}):")?;
            for location_id in view.hovered() {
                let Some(annotation) = view.annotations().find(*location_id) else {
                    continue;
                };
                let color = view.annotation_color(&mut colors, annotation);
                writeln!(out, "{}", describe(&view, annotation))?;
                writeln!(out, "       border {:?} fill {:?}", color.border, color.fill)?;
                for rect in view.cursor_rects(annotation) {
                    writeln!(
                        out,
                        "       rect line {} cols {}..{}",
                        rect.line, rect.start_col, rect.end_col
                    )?;
                }
            }
            if view.hovered().is_empty() {
                writeln!(out, "       (nothing)")?;
            }
        }

        if options.color {
            writeln!(out)?;
            let lines = overlay_lines(&view, &mut colors);
            print_overlay(&mut out, &lines)?;
        }

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("snipmark: {err}");
        std::process::exit(1);
    }
}

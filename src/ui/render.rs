//! Plain terminal rendering of a [`GalleryView`].

use console::style;
use std::fmt::Write;

use super::view::{FrameView, GalleryView};

const RULE: &str = "────────────────────────────────────────────────────────";

pub fn render(view: &GalleryView) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", style("HERITAGE AI · Indian Art Gallery").yellow().bold());
    let _ = writeln!(out, "{}", style(RULE).dim());

    if let Some(error) = &view.error {
        let _ = writeln!(
            out,
            "{} {}  {}",
            style("⚠").red(),
            style(error).red(),
            style("(d to dismiss)").dim()
        );
        let _ = writeln!(out, "{}", style(RULE).dim());
    }

    let _ = writeln!(out, "{}", style("SELECT COLLECTION").dim().bold());
    for tile in &view.tiles {
        let marker = if tile.active { "▌" } else { " " };
        let name = if tile.active {
            style(tile.style.display_name()).yellow().bold()
        } else {
            style(tile.style.display_name())
        };
        let busy = if tile.busy { " ●" } else { "" };
        let _ = writeln!(out, "{}{}. {}{}", marker, tile.number, name, busy);
        let _ = writeln!(out, "     {}", style(&tile.description).dim());
    }

    let _ = writeln!(out, "{}", style(RULE).dim());
    match &view.frame {
        FrameView::Loading { message } => {
            let _ = writeln!(out, "  {}", style(message).yellow().italic());
        }
        FrameView::Artwork(frame) => {
            let _ = writeln!(out, "  {}", style(frame.style.display_name()).bold());
            let kind = match (&frame.mime_type, &frame.size) {
                (Some(mime), Some(size)) => format!("{}, {}", mime, size),
                (Some(mime), None) => mime.clone(),
                _ => "remote image".to_string(),
            };
            let _ = writeln!(out, "  {} · {}", kind, frame.age);
            let _ = writeln!(out, "  {}", style(&frame.preview).dim());
        }
        FrameView::Empty => {
            let _ = writeln!(out, "  {}", style("Select a collection to begin.").dim());
        }
    }

    if !view.history.is_empty() {
        let _ = writeln!(out, "{}", style(RULE).dim());
        let _ = writeln!(out, "{}", style("RECENT CURATION").dim().bold());
        for thumb in &view.history {
            let marker = if thumb.selected { "*" } else { " " };
            let _ = writeln!(
                out,
                "{} h {:<3} {:<20} {}",
                marker,
                thumb.number,
                thumb.style.display_name(),
                style(&thumb.age).dim()
            );
        }
    }

    let _ = writeln!(out, "{}", style(RULE).dim());
    if view.tour_active {
        let _ = writeln!(out, "{}", style("▶ Auto-Tour Active").yellow());
    }
    let generate = if view.controls_enabled {
        style(view.generate_label)
    } else {
        style(view.generate_label).dim()
    };
    let _ = writeln!(
        out,
        "[1-{}] style  [g] {}  [t] {}  [h N] history  [q] quit",
        view.tiles.len(),
        generate,
        view.tour_label
    );

    out
}

//! Text rendering for command output

use std::fmt::Write as _;

use huebridge_css::{
    Background, extract_colors, format_number, get_dominant_color, get_end_color,
    get_start_color, parse_linear_gradient, readable_text_color, split_gradient_layers,
};
use huebridge_flow::{BackgroundChange, HarmonyReport};
use serde::Serialize;

#[derive(Serialize)]
struct ChangeEntry<'a> {
    id: &'a str,
    background: &'a str,
}

#[derive(Serialize)]
struct ChangeSet<'a> {
    changes: Vec<ChangeEntry<'a>>,
}

/// Serialize a change list as `[[changes]]` TOML tables
pub fn changes_to_toml(changes: &[BackgroundChange<String>]) -> Result<String, toml::ser::Error> {
    let set = ChangeSet {
        changes: changes
            .iter()
            .map(|c| ChangeEntry {
                id: &c.id,
                background: &c.background,
            })
            .collect(),
    };
    toml::to_string_pretty(&set)
}

/// Human-readable harmony report; `ids` names frames by index
pub fn format_harmony(report: &HarmonyReport, ids: &[&str], threshold: f64) -> String {
    let name = |index: usize| ids.get(index).copied().unwrap_or("?");
    let mut out = String::new();

    for jump in &report.jumps {
        let _ = writeln!(
            out,
            "{} -> {}: {} -> {}  jump {:.2}",
            name(jump.from),
            name(jump.to),
            jump.exit,
            jump.entry,
            jump.distance
        );
    }

    let verdict = if report.needs_smoothing {
        "smoothing recommended"
    } else {
        "transitions look smooth"
    };
    let _ = writeln!(
        out,
        "average jump {:.2} (threshold {:.2}): {}",
        report.average, threshold, verdict
    );
    out
}

/// Everything the engine can tell about one background value
pub fn format_inspection(value: &str) -> String {
    let mut out = String::new();
    let or_none = |color: Option<String>| color.unwrap_or_else(|| "none".to_string());

    let kind = Background::parse(value)
        .map(|bg| format!("{:?}", bg.kind()).to_lowercase())
        .unwrap_or_else(|| "empty".to_string());
    let _ = writeln!(out, "kind:      {}", kind);

    let layers = split_gradient_layers(value);
    let _ = writeln!(out, "layers:    {}", layers.len());
    for (i, layer) in layers.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i, layer);
    }

    let _ = writeln!(out, "colors:    {}", extract_colors(value).join(" "));

    if let Some(gradient) = parse_linear_gradient(value) {
        let _ = writeln!(out, "angle:     {}deg", format_number(gradient.angle));
        for stop in &gradient.stops {
            let _ = writeln!(
                out,
                "  stop {} at {}% (alpha {})",
                stop.color,
                format_number(stop.position),
                format_number(stop.alpha)
            );
        }
    }

    let _ = writeln!(out, "start:     {}", or_none(get_start_color(value)));
    let _ = writeln!(out, "end:       {}", or_none(get_end_color(value)));
    let _ = writeln!(out, "dominant:  {}", or_none(get_dominant_color(value)));
    let _ = writeln!(out, "text:      {}", readable_text_color(value));
    out
}

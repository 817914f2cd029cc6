//! Gradient parsing, generation and color replacement
//!
//! These functions work on raw CSS background strings. Each regex lives
//! behind its own accessor so grammar gaps stay local to one extraction
//! function. Nothing here fails: malformed input gives `None`, an empty
//! list, or the input back unchanged.

use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

use crate::background::Background;
use crate::color::{Rgba, is_light_color, parse_css_color};
use crate::layers::function_body;

/// Angle used when a gradient names no direction (top to bottom)
pub const DEFAULT_ANGLE: f64 = 180.0;

/// Fallback emitted when asked to generate a gradient with no stops
pub const EMPTY_GRADIENT_FALLBACK: &str = "#000000";

/// A color at a position along the gradient line
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStop {
    /// Canonical `#rrggbb`
    pub color: String,
    /// Position in percent, 0-100
    pub position: f64,
    /// Opacity in [0, 1]
    pub alpha: f64,
}

impl ColorStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha.clamp(0.0, 1.0);
        self
    }

    fn to_css_color(&self) -> String {
        match parse_css_color(&self.color) {
            Some(rgba) => Rgba::with_alpha(rgba.rgb(), self.alpha).to_css_hex(),
            None => self.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    /// CSS angle in degrees (0 = to top, 90 = to right)
    pub angle: f64,
    pub stops: Vec<ColorStop>,
}

impl LinearGradient {
    pub fn to_css(&self) -> String {
        generate_linear_gradient(self.angle, &self.stops)
    }
}

fn color_token_regex() -> &'static Regex {
    static COLOR_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    COLOR_TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"(?i)#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})\b|rgba?\([^()]*\)")
            .expect("Invalid color token regex")
    })
}

fn color_stop_regex() -> &'static Regex {
    static COLOR_STOP_REGEX: OnceLock<Regex> = OnceLock::new();
    COLOR_STOP_REGEX.get_or_init(|| {
        Regex::new(
            r"(?i)(#(?:[0-9a-f]{8}|[0-9a-f]{6}|[0-9a-f]{4}|[0-9a-f]{3})\b|rgba?\([^()]*\))(?:\s+(-?\d+(?:\.\d+)?)%)?",
        )
        .expect("Invalid color stop regex")
    })
}

fn angle_regex() -> &'static Regex {
    static ANGLE_REGEX: OnceLock<Regex> = OnceLock::new();
    ANGLE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*(-?\d+(?:\.\d+)?)deg\b").expect("Invalid angle regex")
    })
}

fn direction_regex() -> &'static Regex {
    static DIRECTION_REGEX: OnceLock<Regex> = OnceLock::new();
    DIRECTION_REGEX.get_or_init(|| {
        // Only a single side keyword; `to top right` and friends fall through
        Regex::new(r"(?i)^\s*to\s+(top|bottom|left|right)\s*(?:,|$)")
            .expect("Invalid direction regex")
    })
}

fn solid_color_regex() -> &'static Regex {
    static SOLID_COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    SOLID_COLOR_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(?:#[0-9a-f]{3,8}|rgba?\([^()]*\)|[a-z]+)$")
            .expect("Invalid solid color regex")
    })
}

/// A color occurrence in a CSS string
#[derive(Debug, Clone, PartialEq)]
pub struct ColorToken {
    /// Byte range of the token in the scanned string
    pub range: Range<usize>,
    pub color: Rgba,
}

/// Scan every hex and `rgb()`/`rgba()` token, in order of appearance
pub fn color_tokens(value: &str) -> impl Iterator<Item = ColorToken> + '_ {
    color_token_regex().find_iter(value).filter_map(|m| {
        parse_css_color(m.as_str()).map(|color| ColorToken {
            range: m.range(),
            color,
        })
    })
}

pub fn is_gradient(value: &str) -> bool {
    value.to_ascii_lowercase().contains("gradient")
}

/// True for a single hex, `rgb()`/`rgba()` or bare-word color value
pub fn is_solid_color(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && !is_gradient(value) && solid_color_regex().is_match(value)
}

/// The canonical hex of a solid value, if it names a visible color
pub(crate) fn solid_hex(value: &str) -> Option<String> {
    parse_css_color(value)
        .filter(|c| !c.is_transparent())
        .map(|c| c.rgb().to_hex())
}

/// All visible colors in declaration order, as canonical hex, without duplicates
pub fn extract_colors(value: &str) -> Vec<String> {
    let mut colors: Vec<String> = Vec::new();
    for token in color_tokens(value) {
        if token.color.is_transparent() {
            continue;
        }
        let hex = token.color.rgb().to_hex();
        if !colors.contains(&hex) {
            colors.push(hex);
        }
    }
    colors
}

/// Parse the first `linear-gradient(...)` in `value`
pub fn parse_linear_gradient(value: &str) -> Option<LinearGradient> {
    let body = function_body(value, "linear-gradient")?;

    let mut colors = Vec::new();
    let mut declared = Vec::new();
    for caps in color_stop_regex().captures_iter(body) {
        let Some(color) = caps.get(1).and_then(|m| parse_css_color(m.as_str())) else {
            continue;
        };
        colors.push(color);
        declared.push(caps.get(2).and_then(|m| m.as_str().parse::<f64>().ok()));
    }

    if colors.is_empty() {
        log::debug!("linear-gradient without color stops: {}", value);
        return None;
    }

    let stops = colors
        .into_iter()
        .zip(resolve_positions(&declared))
        .map(|(color, position)| ColorStop::new(color.rgb().to_hex(), position).with_alpha(color.a))
        .collect();

    Some(LinearGradient {
        angle: parse_angle(body),
        stops,
    })
}

fn parse_angle(body: &str) -> f64 {
    if let Some(deg) = angle_regex()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
    {
        return deg;
    }

    let keyword = direction_regex()
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());

    match keyword.as_deref() {
        Some("top") => 0.0,
        Some("right") => 90.0,
        Some("bottom") => 180.0,
        Some("left") => 270.0,
        _ => DEFAULT_ANGLE,
    }
}

/// Fill in missing stop positions
///
/// The first and last stops default to 0 and 100; stops in between are
/// spaced evenly between their nearest known neighbors.
fn resolve_positions(declared: &[Option<f64>]) -> Vec<f64> {
    let mut anchors = declared.to_vec();
    let last = anchors.len().saturating_sub(1);
    if let Some(first) = anchors.first_mut() {
        if first.is_none() {
            *first = Some(0.0);
        }
    }
    if last > 0 && anchors[last].is_none() {
        anchors[last] = Some(100.0);
    }

    let mut resolved = Vec::with_capacity(anchors.len());
    let mut prev = (0usize, 0.0f64);
    for (i, anchor) in anchors.iter().enumerate() {
        match anchor {
            Some(position) => {
                resolved.push(*position);
                prev = (i, *position);
            }
            None => {
                let (next_idx, next_pos) = anchors[i + 1..]
                    .iter()
                    .enumerate()
                    .find_map(|(k, a)| a.map(|p| (i + 1 + k, p)))
                    .unwrap_or((last, 100.0));
                let span = (next_idx - prev.0) as f64;
                resolved.push(prev.1 + (next_pos - prev.1) * (i - prev.0) as f64 / span);
            }
        }
    }
    resolved
}

/// First visible color of the value
pub fn get_start_color(value: &str) -> Option<String> {
    if is_solid_color(value) {
        if let Some(hex) = solid_hex(value) {
            return Some(hex);
        }
    }
    extract_colors(value).into_iter().next()
}

/// Last visible color of the value
pub fn get_end_color(value: &str) -> Option<String> {
    if is_solid_color(value) {
        if let Some(hex) = solid_hex(value) {
            return Some(hex);
        }
    }
    extract_colors(value).pop()
}

/// The color that best represents the value: the solid itself, or the first
/// color of the base (last) layer of a stack
pub fn get_dominant_color(value: &str) -> Option<String> {
    Background::parse(value).and_then(|bg| bg.dominant_color())
}

/// Text color that stays readable over `background`
pub fn readable_text_color(background: &str) -> &'static str {
    let light = get_dominant_color(background)
        .map(|hex| is_light_color(&hex))
        .unwrap_or(false);
    if light { "#000000" } else { "#ffffff" }
}

/// Serialize stops into a `linear-gradient`
///
/// A single stop degenerates to that bare color and an empty list to
/// [`EMPTY_GRADIENT_FALLBACK`].
pub fn generate_linear_gradient(angle: f64, stops: &[ColorStop]) -> String {
    match stops {
        [] => EMPTY_GRADIENT_FALLBACK.to_string(),
        [only] => only.to_css_color(),
        _ => {
            let stops: Vec<String> = stops
                .iter()
                .map(|stop| format!("{} {}%", stop.to_css_color(), format_number(stop.position)))
                .collect();
            format!("linear-gradient({}deg, {})", format_number(angle), stops.join(", "))
        }
    }
}

/// Round to two decimals and drop a trailing `.0`
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        // avoid "-0"
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Replace the start color, leaving the rest of the value untouched
pub fn modify_start_color(value: &str, new_color: &str) -> String {
    if is_solid_color(value) {
        return new_color.to_string();
    }
    let Some(target) = get_start_color(value) else {
        return value.to_string();
    };
    let token = color_tokens(value).find(|t| matches_visible(t, &target));
    replace_token(value, token, new_color)
}

/// Replace the end color, leaving the rest of the value untouched
pub fn modify_end_color(value: &str, new_color: &str) -> String {
    if is_solid_color(value) {
        return new_color.to_string();
    }
    let Some(target) = get_end_color(value) else {
        return value.to_string();
    };
    let token = color_tokens(value)
        .filter(|t| matches_visible(t, &target))
        .last();
    replace_token(value, token, new_color)
}

fn matches_visible(token: &ColorToken, hex: &str) -> bool {
    !token.color.is_transparent() && token.color.rgb().to_hex() == hex
}

/// Translucent tokens keep their alpha; only the color channels change
fn replacement_for(token: &ColorToken, new_color: &str) -> String {
    if token.color.a >= 1.0 {
        return new_color.to_string();
    }
    match parse_css_color(new_color) {
        Some(color) => Rgba::with_alpha(color.rgb(), token.color.a).to_css_hex(),
        None => new_color.to_string(),
    }
}

fn replace_token(value: &str, token: Option<ColorToken>, new_color: &str) -> String {
    match token {
        Some(token) => {
            let replacement = replacement_for(&token, new_color);
            let mut out = String::with_capacity(value.len() + replacement.len());
            out.push_str(&value[..token.range.start]);
            out.push_str(&replacement);
            out.push_str(&value[token.range.end..]);
            out
        }
        None => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(is_gradient("linear-gradient(45deg, #fff, #000)"));
        assert!(is_gradient("radial-gradient(circle, red, blue)"));
        assert!(is_gradient("not-really-a-gradient"));
        assert!(!is_gradient("#ffffff"));

        assert!(is_solid_color("#ffffff"));
        assert!(is_solid_color("  rgba(0, 0, 0, 0.5) "));
        assert!(is_solid_color("navy"));
        assert!(!is_solid_color("linear-gradient(#fff, #000)"));
        assert!(!is_solid_color("url(bg.png)"));
        assert!(!is_solid_color(""));
    }

    #[test]
    fn test_extract_colors_drops_transparent() {
        assert_eq!(
            extract_colors("linear-gradient(45deg, rgba(255,0,0,0), #0000ff)"),
            vec!["#0000ff".to_string()]
        );
    }

    #[test]
    fn test_extract_colors_normalizes_and_dedupes() {
        let colors = extract_colors(
            "linear-gradient(to right, #FFF, rgb(255, 255, 255), #1a0a2e80), radial-gradient(#16213E, #fff)",
        );
        assert_eq!(colors, vec!["#ffffff", "#1a0a2e", "#16213e"]);
        assert!(extract_colors("").is_empty());
        assert!(extract_colors("url(bg.png)").is_empty());
    }

    #[test]
    fn test_parse_linear_gradient_with_positions() {
        let g = parse_linear_gradient(
            "linear-gradient(45deg, #ff0000 0%, #00ff00 50%, #0000ff 100%)",
        )
        .unwrap();
        assert_eq!(g.angle, 45.0);
        assert_eq!(
            g.stops,
            vec![
                ColorStop::new("#ff0000", 0.0),
                ColorStop::new("#00ff00", 50.0),
                ColorStop::new("#0000ff", 100.0),
            ]
        );
    }

    #[test]
    fn test_parse_linear_gradient_directions() {
        let angle = |s: &str| parse_linear_gradient(s).unwrap().angle;
        assert_eq!(angle("linear-gradient(to top, #fff, #000)"), 0.0);
        assert_eq!(angle("linear-gradient(to right, #fff, #000)"), 90.0);
        assert_eq!(angle("linear-gradient(to bottom, #fff, #000)"), 180.0);
        assert_eq!(angle("linear-gradient(to left, #fff, #000)"), 270.0);
        assert_eq!(angle("linear-gradient(#fff, #000)"), 180.0);
        // Combined keywords are not mapped
        assert_eq!(angle("linear-gradient(to top right, #fff, #000)"), 180.0);
        assert_eq!(angle("linear-gradient(-22.5deg, #fff, #000)"), -22.5);
    }

    #[test]
    fn test_parse_linear_gradient_backfills_positions() {
        let g = parse_linear_gradient("linear-gradient(#000, #111, #222 40%, #333, #444, #555)")
            .unwrap();
        let positions: Vec<f64> = g.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn test_parse_linear_gradient_keeps_alpha() {
        let g = parse_linear_gradient("linear-gradient(90deg, rgba(255, 0, 0, 0) 0%, #00f 100%)")
            .unwrap();
        assert_eq!(g.stops[0].color, "#ff0000");
        assert_eq!(g.stops[0].alpha, 0.0);
        assert_eq!(g.stops[1].color, "#0000ff");
    }

    #[test]
    fn test_parse_linear_gradient_rejects_other_values() {
        assert!(parse_linear_gradient("#ffffff").is_none());
        assert!(parse_linear_gradient("radial-gradient(#fff, #000)").is_none());
        assert!(parse_linear_gradient("linear-gradient(45deg, #fff").is_none());
        assert!(parse_linear_gradient("linear-gradient(45deg)").is_none());
    }

    #[test]
    fn test_start_end_colors() {
        let g = "linear-gradient(45deg, rgba(0,0,0,0), #ff0000, #00ff00 50%, #0000ff)";
        assert_eq!(get_start_color(g), Some("#ff0000".to_string()));
        assert_eq!(get_end_color(g), Some("#0000ff".to_string()));

        assert_eq!(get_start_color("#ABC"), Some("#aabbcc".to_string()));
        assert_eq!(get_end_color("crimson"), Some("#dc143c".to_string()));
        assert_eq!(get_start_color(""), None);
        assert_eq!(get_end_color("url(bg.png)"), None);
    }

    #[test]
    fn test_dominant_color_uses_base_layer() {
        assert_eq!(get_dominant_color("#1a1a1a"), Some("#1a1a1a".to_string()));
        assert_eq!(
            get_dominant_color("linear-gradient(45deg, #ff0000, #00ff00), linear-gradient(#123456, #654321)"),
            Some("#123456".to_string())
        );
        assert_eq!(
            get_dominant_color("linear-gradient(rgba(0,0,0,0.4), #000), #fafafa"),
            Some("#fafafa".to_string())
        );
        assert_eq!(get_dominant_color(""), None);
    }

    #[test]
    fn test_readable_text_color() {
        assert_eq!(readable_text_color("#fafafa"), "#000000");
        assert_eq!(readable_text_color("linear-gradient(#000, #fff), #1a1a2e"), "#ffffff");
        assert_eq!(readable_text_color("???"), "#ffffff");
    }

    #[test]
    fn test_generate_linear_gradient() {
        let stops = vec![
            ColorStop::new("#ff0000", 0.0),
            ColorStop::new("#0000ff", 100.0 / 3.0).with_alpha(0.5),
        ];
        assert_eq!(
            generate_linear_gradient(45.0, &stops),
            "linear-gradient(45deg, #ff0000 0%, #0000ff80 33.33%)"
        );
        assert_eq!(generate_linear_gradient(45.0, &[ColorStop::new("#ff0000", 0.0)]), "#ff0000");
        assert_eq!(generate_linear_gradient(45.0, &[]), "#000000");
    }

    #[test]
    fn test_generated_gradient_parses_back() {
        let original = LinearGradient {
            angle: 135.0,
            stops: vec![
                ColorStop::new("#1a0a2e", 0.0),
                ColorStop::new("#16213e", 60.0),
                ColorStop::new("#61e2fe", 100.0),
            ],
        };
        assert_eq!(parse_linear_gradient(&original.to_css()), Some(original));
    }

    #[test]
    fn test_modify_start_color() {
        let out = modify_start_color("linear-gradient(45deg, #ff0000, #0000ff)", "#00ff00");
        assert_eq!(out, "linear-gradient(45deg, #00ff00, #0000ff)");
        assert!(!out.contains("#ff0000"));

        assert_eq!(modify_start_color("#ff0000", "#00ff00"), "#00ff00");
    }

    #[test]
    fn test_modify_end_color_replaces_last_occurrence() {
        let value = "linear-gradient(90deg,  #ff0000 0%, #00ff00 50%,#00FF00 100%)";
        assert_eq!(
            modify_end_color(value, "#abcdef"),
            "linear-gradient(90deg,  #ff0000 0%, #00ff00 50%,#abcdef 100%)"
        );

        // Duplicates keep their first position, so the end color is the last distinct one
        let value = "linear-gradient(#0000ff, #ff0000, #0000ff)";
        assert_eq!(get_end_color(value), Some("#ff0000".to_string()));
        assert_eq!(
            modify_end_color(value, "#abcdef"),
            "linear-gradient(#0000ff, #abcdef, #0000ff)"
        );
    }

    #[test]
    fn test_modify_matches_other_notations() {
        let value = "linear-gradient(to right, rgba(0,0,0,0) 0%, rgb(255, 0, 0) 10%, #00f)";
        assert_eq!(
            modify_start_color(value, "#00ff00"),
            "linear-gradient(to right, rgba(0,0,0,0) 0%, #00ff00 10%, #00f)"
        );
    }

    #[test]
    fn test_modify_keeps_stop_alpha() {
        let value = "linear-gradient(90deg, rgba(0, 0, 255, 0.3) 0%, #00ff00 100%)";
        let out = modify_start_color(value, "#112233");
        assert_eq!(out, "linear-gradient(90deg, #1122334d 0%, #00ff00 100%)");

        let start = &parse_linear_gradient(&out).unwrap().stops[0];
        assert_eq!(start.color, "#112233");
        assert!((start.alpha - 0.3).abs() < 0.01);

        let value = "linear-gradient(#ffffff, #ff000080 100%)";
        assert_eq!(
            modify_end_color(value, "#00ff00"),
            "linear-gradient(#ffffff, #00ff0080 100%)"
        );

        // Opaque tokens and solids are replaced as given
        assert_eq!(
            modify_end_color("linear-gradient(#fff, rgba(0, 0, 255, 1))", "#123456"),
            "linear-gradient(#fff, #123456)"
        );
        assert_eq!(modify_start_color("rgba(0, 0, 255, 0.3)", "#123456"), "#123456");
    }

    #[test]
    fn test_modify_without_colors_is_identity() {
        let value = "radial-gradient(circle, var(--a), var(--b))";
        assert_eq!(modify_start_color(value, "#fff"), value);
        assert_eq!(modify_end_color(value, "#fff"), value);
        assert_eq!(modify_end_color("", "#fff"), "");
    }
}

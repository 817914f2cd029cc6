//! Color model
//!
//! Canonical colors are lowercase `#rrggbb` strings. `Rgb`, `Rgba` and `Hsl`
//! are the working representations; the free functions wrap them so that
//! callers holding plain CSS strings never see an error. Unparsable input
//! yields `None` or a documented default instead.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Invalid rgb color: {0}")]
    InvalidRgb(String),

    #[error("Invalid color channel: {0}")]
    InvalidChannel(String),

    #[error("Unknown color: {0}")]
    Unknown(String),
}

/// 8-bit RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unbounded channel values, rounding and clamping each to [0, 255]
    pub fn from_f64(r: f64, g: f64, b: f64) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Canonical `#rrggbb` form
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    /// Perceptual luma in [0, 255]
    pub fn brightness(self) -> f64 {
        (self.r as f64 * 299.0 + self.g as f64 * 587.0 + self.b as f64 * 114.0) / 1000.0
    }

    /// Euclidean RGB distance normalized to [0, 1]
    pub fn distance(self, other: Rgb) -> f64 {
        let dr = self.r as f64 - other.r as f64;
        let dg = self.g as f64 - other.g as f64;
        let db = self.b as f64 - other.b as f64;
        (dr * dr + dg * dg + db * db).sqrt() / (3.0 * 255.0 * 255.0_f64).sqrt()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Parse `#rgb` or `#rrggbb`, with or without the `#`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(s.to_string()));
        }

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(ColorParseError::InvalidHex(s.to_string())),
        };

        Ok(Self {
            r: hex_pair(&expanded[0..2])?,
            g: hex_pair(&expanded[2..4])?,
            b: hex_pair(&expanded[4..6])?,
        })
    }
}

/// RGB triple with an alpha channel in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Rgba {
    pub const TRANSPARENT: Self = Self { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn opaque(rgb: Rgb) -> Self {
        Self { r: rgb.r, g: rgb.g, b: rgb.b, a: 1.0 }
    }

    pub fn with_alpha(rgb: Rgb, a: f64) -> Self {
        Self { r: rgb.r, g: rgb.g, b: rgb.b, a: a.clamp(0.0, 1.0) }
    }

    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    /// A color that contributes nothing visually
    pub fn is_transparent(self) -> bool {
        self.a == 0.0
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise
    pub fn to_css_hex(self) -> String {
        if self.a >= 1.0 {
            self.rgb().to_hex()
        } else {
            format!("{}{:02x}", self.rgb().to_hex(), clamp_channel(self.a * 255.0))
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorParseError;

    /// Parse `rgb(r, g, b)` or `rgba(r, g, b, a)` with arbitrary whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = rgba_regex()
            .captures(s)
            .ok_or_else(|| ColorParseError::InvalidRgb(s.to_string()))?;

        let channel = |idx: usize| -> Result<f64, ColorParseError> {
            let raw = caps.get(idx).map(|m| m.as_str()).unwrap_or_default();
            raw.parse::<f64>()
                .map_err(|_| ColorParseError::InvalidChannel(raw.to_string()))
        };

        let r = channel(1)?;
        let g = channel(2)?;
        let b = channel(3)?;
        let a = match caps.get(4) {
            Some(_) => channel(4)?,
            None => 1.0,
        };

        Ok(Rgba::with_alpha(Rgb::from_f64(r, g, b), a))
    }
}

/// HSL with hue in [0, 360) and saturation/lightness in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }
}

fn rgba_regex() -> &'static Regex {
    static RGBA_REGEX: OnceLock<Regex> = OnceLock::new();
    RGBA_REGEX.get_or_init(|| {
        Regex::new(
            r"(?xi)
            rgba?\(\s*
            ([+-]?\d*\.?\d+)\s*,\s*     # red
            ([+-]?\d*\.?\d+)\s*,\s*     # green
            ([+-]?\d*\.?\d+)\s*         # blue
            (?:,\s*([+-]?\d*\.?\d+)\s*)? # optional alpha
            \)",
        )
        .expect("Invalid rgba regex")
    })
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

fn hex_pair(pair: &str) -> Result<u8, ColorParseError> {
    u8::from_str_radix(pair, 16).map_err(|_| ColorParseError::InvalidHex(pair.to_string()))
}

/// Parse a 3- or 6-digit hex color, with or without `#`
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    hex.parse().ok()
}

/// Encode channels as lowercase `#rrggbb`, rounding and clamping each first
pub fn rgb_to_hex(r: f64, g: f64, b: f64) -> String {
    Rgb::from_f64(r, g, b).to_hex()
}

pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h * 60.0).rem_euclid(360.0),
        s: s * 100.0,
        l: l * 100.0,
    }
}

pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    if s == 0.0 {
        let gray = l * 255.0;
        return Rgb::from_f64(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::from_f64(
        hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
        hue_to_channel(p, q, h) * 255.0,
        hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Interpolate two hex colors in HSL space, taking the shorter arc around the hue circle
///
/// `ratio` 0 yields `c1` and 1 yields `c2`. If only one input parses, that
/// input is returned; if neither does, `c1` is returned untouched.
pub fn interpolate_color(c1: &str, c2: &str, ratio: f64) -> String {
    let (from, to) = match (hex_to_rgb(c1), hex_to_rgb(c2)) {
        (Some(from), Some(to)) => (from, to),
        (None, Some(_)) => return c2.to_string(),
        _ => return c1.to_string(),
    };

    if from == to || ratio.is_nan() || ratio <= 0.0 {
        return from.to_hex();
    }
    if ratio >= 1.0 {
        return to.to_hex();
    }

    let a = from.to_hsl();
    let b = to.to_hsl();

    let mut h1 = a.h;
    let mut h2 = b.h;
    let delta = h2 - h1;
    if delta > 180.0 {
        h1 += 360.0;
    } else if delta < -180.0 {
        h2 += 360.0;
    }

    Hsl {
        h: (h1 + (h2 - h1) * ratio).rem_euclid(360.0),
        s: a.s + (b.s - a.s) * ratio,
        l: a.l + (b.l - a.l) * ratio,
    }
    .to_rgb()
    .to_hex()
}

/// Perceptual brightness in [0, 255]; 128 for unparsable input
pub fn get_color_brightness(hex: &str) -> f64 {
    hex_to_rgb(hex).map(Rgb::brightness).unwrap_or(128.0)
}

pub fn is_light_color(hex: &str) -> bool {
    get_color_brightness(hex) > 128.0
}

/// Lower HSL lightness by `amount` percentage points
pub fn darken_color(hex: &str, amount: f64) -> String {
    adjust_lightness(hex, -amount)
}

/// Raise HSL lightness by `amount` percentage points
pub fn lighten_color(hex: &str, amount: f64) -> String {
    adjust_lightness(hex, amount)
}

fn adjust_lightness(hex: &str, delta: f64) -> String {
    let Some(rgb) = hex_to_rgb(hex) else {
        return hex.to_string();
    };
    let hsl = rgb.to_hsl();
    Hsl {
        l: (hsl.l + delta).clamp(0.0, 100.0),
        ..hsl
    }
    .to_rgb()
    .to_hex()
}

/// Parse the first `rgb(...)` / `rgba(...)` in `value`; alpha defaults to 1
pub fn parse_rgba(value: &str) -> Option<Rgba> {
    value.parse().ok()
}

/// Parse any color token this engine understands
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb()`/`rgba()` and the
/// CSS named colors in [`named_color`].
pub fn parse_css_color(value: &str) -> Option<Rgba> {
    let value = value.trim();

    if let Some(digits) = value.strip_prefix('#') {
        parse_hex_rgba(digits)
    } else if value.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("rgb")) {
        parse_rgba(value)
    } else {
        named_color(value)
    }
}

fn parse_hex_rgba(digits: &str) -> Option<Rgba> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match digits.len() {
        3 | 6 => hex_to_rgb(digits).map(Rgba::opaque),
        4 => {
            let rgb = hex_to_rgb(&digits[..3])?;
            let a = u8::from_str_radix(&digits[3..4].repeat(2), 16).ok()?;
            Some(Rgba::with_alpha(rgb, a as f64 / 255.0))
        }
        8 => {
            let rgb = hex_to_rgb(&digits[..6])?;
            let a = u8::from_str_radix(&digits[6..8], 16).ok()?;
            Some(Rgba::with_alpha(rgb, a as f64 / 255.0))
        }
        _ => None,
    }
}

/// CSS named colors
pub fn named_color(name: &str) -> Option<Rgba> {
    let (r, g, b) = match name.to_ascii_lowercase().as_str() {
        // Basic colors
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        // Extended colors
        "gold" => (255, 215, 0),
        "orange" => (255, 165, 0),
        "pink" => (255, 192, 203),
        "purple" => (128, 0, 128),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "olive" => (128, 128, 0),
        "maroon" => (128, 0, 0),
        "lime" => (0, 255, 0),
        "coral" => (255, 127, 80),
        "hotpink" => (255, 105, 180),
        "deeppink" => (255, 20, 147),
        "crimson" => (220, 20, 60),
        "tomato" => (255, 99, 71),
        "orangered" => (255, 69, 0),
        "indianred" => (205, 92, 92),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "turquoise" => (64, 224, 208),
        "beige" => (245, 245, 220),
        "transparent" => return Some(Rgba::TRANSPARENT),
        _ => return None,
    };
    Some(Rgba::opaque(Rgb::new(r, g, b)))
}

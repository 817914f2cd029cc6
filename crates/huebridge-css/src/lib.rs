//! huebridge CSS - color and gradient model
//!
//! This crate provides:
//! - Hex / RGB / HSL conversions and hue-aware interpolation
//! - Color extraction from CSS background values
//! - `linear-gradient` parsing and generation
//! - Surgical start/end color replacement
//! - Depth-aware splitting of stacked backgrounds

pub mod background;
pub mod color;
pub mod gradient;
pub mod layers;

pub use background::{Background, BackgroundKind};
pub use color::{
    ColorParseError, Hsl, Rgb, Rgba, darken_color, get_color_brightness, hex_to_rgb,
    hsl_to_rgb, interpolate_color, is_light_color, lighten_color, named_color,
    parse_css_color, parse_rgba, rgb_to_hex, rgb_to_hsl,
};
pub use gradient::{
    ColorStop, ColorToken, DEFAULT_ANGLE, EMPTY_GRADIENT_FALLBACK, LinearGradient, color_tokens,
    extract_colors, format_number, generate_linear_gradient, get_dominant_color, get_end_color,
    get_start_color, is_gradient, is_solid_color, modify_end_color, modify_start_color,
    parse_linear_gradient, readable_text_color,
};
pub use layers::{function_body, split_gradient_layers};

//! Typed view of a CSS background value

use crate::gradient::{
    LinearGradient, extract_colors, is_gradient, is_solid_color, parse_linear_gradient, solid_hex,
};
use crate::layers::split_gradient_layers;

/// Coarse classification of a background value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Stack,
    Other,
}

/// A parsed background
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// Single visible color, canonical hex
    Solid(String),
    /// Structurally parsed `linear-gradient`
    Linear(LinearGradient),
    /// Several layers, back-to-front as written; the last one is the base
    Stack(Vec<Background>),
    /// A layer kept verbatim (radial/conic gradients, images, keywords)
    Unparsed(String),
}

impl Background {
    /// Classify `value` once; `None` for empty input
    pub fn parse(value: &str) -> Option<Self> {
        let mut layers = split_gradient_layers(value);
        match layers.len() {
            0 => None,
            1 => Some(Self::parse_layer(layers.remove(0))),
            _ => Some(Self::Stack(layers.into_iter().map(Self::parse_layer).collect())),
        }
    }

    fn parse_layer(layer: String) -> Self {
        if is_gradient(&layer) {
            if layer.to_ascii_lowercase().starts_with("linear-gradient(") {
                if let Some(gradient) = parse_linear_gradient(&layer) {
                    return Self::Linear(gradient);
                }
            }
            return Self::Unparsed(layer);
        }
        if is_solid_color(&layer) {
            if let Some(hex) = solid_hex(&layer) {
                return Self::Solid(hex);
            }
        }
        Self::Unparsed(layer)
    }

    pub fn kind(&self) -> BackgroundKind {
        match self {
            Self::Solid(_) => BackgroundKind::Solid,
            Self::Linear(_) => BackgroundKind::Gradient,
            Self::Stack(_) => BackgroundKind::Stack,
            Self::Unparsed(text) if is_gradient(text) => BackgroundKind::Gradient,
            Self::Unparsed(_) => BackgroundKind::Other,
        }
    }

    /// Layers back-to-front; a single layer for anything but a stack
    pub fn layers(&self) -> Vec<&Background> {
        match self {
            Self::Stack(layers) => layers.iter().collect(),
            other => vec![other],
        }
    }

    /// The solid itself, or the first visible color of the base layer
    pub fn dominant_color(&self) -> Option<String> {
        match self {
            Self::Solid(hex) => Some(hex.clone()),
            Self::Linear(gradient) => gradient
                .stops
                .iter()
                .find(|stop| stop.alpha > 0.0)
                .map(|stop| stop.color.clone()),
            Self::Stack(layers) => layers.last().and_then(Self::dominant_color),
            Self::Unparsed(text) => extract_colors(text).into_iter().next(),
        }
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Solid(hex) => hex.clone(),
            Self::Linear(gradient) => gradient.to_css(),
            Self::Stack(layers) => layers
                .iter()
                .map(Self::to_css)
                .collect::<Vec<_>>()
                .join(", "),
            Self::Unparsed(text) => text.clone(),
        }
    }
}

//! Smoothing options

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Intensity used when none is given
pub const DEFAULT_INTENSITY: f64 = 0.5;

/// Intensities at or above this stack flow overlays; below it colors are blended in place
pub const OVERLAY_THRESHOLD: f64 = 0.5;

/// Upper bound on overlay opacity so the original content stays visible
pub const MAX_OVERLAY_OPACITY: f64 = 0.9;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown flow direction: {0} (expected diagonal or diagonal-mirror)")]
pub struct UnknownDirection(pub String);

/// Direction of the flow overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FlowDirection {
    /// 135deg, top-left to bottom-right
    #[default]
    Diagonal,
    /// 225deg, top-right to bottom-left
    DiagonalMirror,
}

impl FlowDirection {
    pub const ALL: [FlowDirection; 2] = [FlowDirection::Diagonal, FlowDirection::DiagonalMirror];

    /// CSS gradient angle in degrees
    pub fn angle(self) -> f64 {
        match self {
            FlowDirection::Diagonal => 135.0,
            FlowDirection::DiagonalMirror => 225.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FlowDirection::Diagonal => "diagonal",
            FlowDirection::DiagonalMirror => "diagonal-mirror",
        }
    }
}

impl fmt::Display for FlowDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for FlowDirection {
    type Err = UnknownDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}

/// How a pair of frames is bridged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmoothingStrategy {
    /// Stack a translucent gradient over each frame
    FlowOverlay,
    /// Replace the exit/entry colors in place
    DirectBlend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingOptions {
    /// 0.0 - 1.0; selects the strategy and its strength
    pub intensity: f64,
    pub direction: FlowDirection,
    /// Also bridge the last frame back to the first
    pub wrap_around: bool,
}

impl Default for SmoothingOptions {
    fn default() -> Self {
        Self {
            intensity: DEFAULT_INTENSITY,
            direction: FlowDirection::default(),
            wrap_around: false,
        }
    }
}

impl SmoothingOptions {
    pub fn new(intensity: f64, direction: FlowDirection, wrap_around: bool) -> Self {
        Self {
            intensity,
            direction,
            wrap_around,
        }
        .normalized()
    }

    /// Clamp intensity into [0, 1]; NaN falls back to the default
    pub fn normalized(self) -> Self {
        let intensity = if self.intensity.is_nan() {
            DEFAULT_INTENSITY
        } else {
            self.intensity.clamp(0.0, 1.0)
        };
        Self { intensity, ..self }
    }

    pub fn strategy(&self) -> SmoothingStrategy {
        if self.intensity >= OVERLAY_THRESHOLD {
            SmoothingStrategy::FlowOverlay
        } else {
            SmoothingStrategy::DirectBlend
        }
    }

    pub fn overlay_opacity(&self) -> f64 {
        self.intensity.min(MAX_OVERLAY_OPACITY)
    }

    /// How far exit/entry colors move toward the bridge in a direct blend
    pub fn blend_ratio(&self) -> f64 {
        self.intensity * 2.0
    }
}

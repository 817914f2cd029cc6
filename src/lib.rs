//! huebridge - color continuity for carousel backgrounds
//!
//! The engine lives in the workspace crates:
//! - `huebridge-css` - color and gradient model
//! - `huebridge-flow` - smoothing engine and harmony analysis
//! - `huebridge-config` - config file and bundled presets
//!
//! This crate adds deck files and the pieces the `huebridge` binary is
//! built from.

pub mod deck;
pub mod report;

pub use deck::{Deck, DeckError, DeckFrame};

use huebridge_config::SmoothingConfig;
use huebridge_flow::FlowDirection;

/// Smoothing settings given on the command line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmoothingOverrides {
    pub intensity: Option<f64>,
    pub direction: Option<FlowDirection>,
    pub preset: Option<String>,
    pub wrap_around: bool,
}

impl SmoothingOverrides {
    /// Layer these settings over the configured ones
    ///
    /// An explicit intensity or direction drops a preset inherited from the
    /// config file; a preset given alongside them still wins.
    pub fn apply(&self, config: &mut SmoothingConfig) {
        if self.intensity.is_some() || self.direction.is_some() {
            config.preset.clear();
        }
        if let Some(intensity) = self.intensity {
            config.intensity = intensity;
        }
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if let Some(preset) = &self.preset {
            config.preset = preset.clone();
        }
        if self.wrap_around {
            config.wrap_around = true;
        }
    }
}

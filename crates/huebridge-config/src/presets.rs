//! Bundled smoothing presets
//!
//! Named intensity/direction pairs that can be selected from the config
//! file or the command line without spelling out the numbers.

use huebridge_flow::FlowDirection;

/// Bundled preset data
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preset {
    pub name: &'static str,
    pub description: &'static str,
    pub intensity: f64,
    pub direction: FlowDirection,
}

/// Subtle - nudges edge colors toward each other in place
pub const SUBTLE: Preset = Preset {
    name: "subtle",
    description: "blend edge colors in place, no extra layers",
    intensity: 0.3,
    direction: FlowDirection::Diagonal,
};

/// Balanced - light flow overlays
pub const BALANCED: Preset = Preset {
    name: "balanced",
    description: "half-opacity diagonal flow overlays",
    intensity: 0.5,
    direction: FlowDirection::Diagonal,
};

/// Vivid - strong mirrored overlays
pub const VIVID: Preset = Preset {
    name: "vivid",
    description: "strong mirrored flow overlays",
    intensity: 0.9,
    direction: FlowDirection::DiagonalMirror,
};

/// All bundled presets
pub const ALL_PRESETS: &[&Preset] = &[&SUBTLE, &BALANCED, &VIVID];

/// Get a bundled preset by name
pub fn get_preset(name: &str) -> Option<&'static Preset> {
    ALL_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
        .copied()
}

/// List all available preset names
pub fn preset_names() -> Vec<&'static str> {
    ALL_PRESETS.iter().map(|p| p.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_preset() {
        assert_eq!(get_preset("subtle"), Some(&SUBTLE));
        assert_eq!(get_preset(" Vivid "), Some(&VIVID));
        assert!(get_preset("nonexistent").is_none());
    }

    #[test]
    fn test_preset_names() {
        assert_eq!(preset_names(), vec!["subtle", "balanced", "vivid"]);
    }

    #[test]
    fn test_presets_span_both_strategies() {
        use huebridge_flow::{SmoothingOptions, SmoothingStrategy};

        let strategy =
            |p: &Preset| SmoothingOptions::new(p.intensity, p.direction, false).strategy();
        assert_eq!(strategy(&SUBTLE), SmoothingStrategy::DirectBlend);
        assert_eq!(strategy(&BALANCED), SmoothingStrategy::FlowOverlay);
        assert_eq!(strategy(&VIVID), SmoothingStrategy::FlowOverlay);
    }
}

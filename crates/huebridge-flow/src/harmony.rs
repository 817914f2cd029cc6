//! Color harmony analysis across a frame sequence
//!
//! Measures how abruptly color changes from one frame's exit edge to the
//! next frame's entry edge, and recommends smoothing when the average jump
//! is large.

use huebridge_css::{get_end_color, get_start_color, hex_to_rgb};

/// Average jump above which smoothing is recommended
pub const DEFAULT_JUMP_THRESHOLD: f64 = 0.3;

/// Color change between two adjacent frames
#[derive(Debug, Clone, PartialEq)]
pub struct ColorJump {
    pub from: usize,
    pub to: usize,
    pub exit: String,
    pub entry: String,
    /// Euclidean RGB distance normalized to [0, 1]
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HarmonyReport {
    pub jumps: Vec<ColorJump>,
    /// Mean of all jump distances; 0 when there are none
    pub average: f64,
    pub needs_smoothing: bool,
}

impl HarmonyReport {
    pub fn max_jump(&self) -> Option<&ColorJump> {
        self.jumps
            .iter()
            .max_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

/// Analyze adjacent pairs with the default threshold
pub fn analyze_color_harmony<S: AsRef<str>>(backgrounds: &[S]) -> HarmonyReport {
    analyze_color_harmony_with_threshold(backgrounds, DEFAULT_JUMP_THRESHOLD)
}

/// Analyze adjacent pairs; pairs where either side has no color are left out
pub fn analyze_color_harmony_with_threshold<S: AsRef<str>>(
    backgrounds: &[S],
    threshold: f64,
) -> HarmonyReport {
    let jumps: Vec<ColorJump> = backgrounds
        .windows(2)
        .enumerate()
        .filter_map(|(i, pair)| {
            let exit = get_end_color(pair[0].as_ref())?;
            let entry = get_start_color(pair[1].as_ref())?;
            let distance = hex_to_rgb(&exit)?.distance(hex_to_rgb(&entry)?);
            Some(ColorJump {
                from: i,
                to: i + 1,
                exit,
                entry,
                distance,
            })
        })
        .collect();

    let average = if jumps.is_empty() {
        0.0
    } else {
        jumps.iter().map(|j| j.distance).sum::<f64>() / jumps.len() as f64
    };

    HarmonyReport {
        needs_smoothing: average > threshold,
        average,
        jumps,
    }
}

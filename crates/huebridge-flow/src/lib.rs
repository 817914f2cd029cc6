//! huebridge flow - color continuity across frame sequences
//!
//! This crate provides:
//! - The multi-frame smoothing engine (flow overlays and direct blends)
//! - Color harmony analysis between adjacent frames
//! - A pluggable trace hook for observing engine steps

pub mod harmony;
pub mod options;
pub mod smoothing;
pub mod trace;

pub use harmony::{
    ColorJump, DEFAULT_JUMP_THRESHOLD, HarmonyReport, analyze_color_harmony,
    analyze_color_harmony_with_threshold,
};
pub use options::{
    DEFAULT_INTENSITY, FlowDirection, MAX_OVERLAY_OPACITY, OVERLAY_THRESHOLD, SmoothingOptions,
    SmoothingStrategy, UnknownDirection,
};
pub use smoothing::{BackgroundChange, Frame, Smoother, smooth_carousel_backgrounds};
pub use trace::{LogTrace, NoopTrace, TraceEvent, TraceSink};

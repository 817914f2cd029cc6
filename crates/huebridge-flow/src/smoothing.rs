//! Multi-frame background smoothing
//!
//! Walks adjacent frame pairs in order (plus last -> first when wrapping),
//! computes a bridge color halfway between one frame's exit color and the
//! next frame's entry color, and rewrites both backgrounds toward it. Each
//! pair sees the result of the pairs before it. Only frames whose final
//! background differs from the original are reported.

use huebridge_css::{
    ColorStop, generate_linear_gradient, get_end_color, get_start_color, interpolate_color,
    modify_end_color, modify_start_color,
};

use crate::options::{SmoothingOptions, SmoothingStrategy};
use crate::trace::{NoopTrace, TraceEvent, TraceSink};

/// A frame the engine can identify in its output
pub trait Frame {
    type Id: Clone;

    fn id(&self) -> Self::Id;
}

/// Replacement background for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackgroundChange<Id> {
    pub id: Id,
    pub background: String,
}

/// Which end of the shared edge a frame sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    /// The frame being left; its overlay fades into the bridge
    Exit,
    /// The frame being entered; its overlay fades out of the bridge
    Entry,
}

pub struct Smoother<'t> {
    options: SmoothingOptions,
    trace: &'t dyn TraceSink,
}

impl Smoother<'static> {
    pub fn new(options: SmoothingOptions) -> Self {
        Self {
            options: options.normalized(),
            trace: &NoopTrace,
        }
    }
}

impl<'t> Smoother<'t> {
    /// Report engine steps to `trace`
    pub fn with_trace<'s>(self, trace: &'s dyn TraceSink) -> Smoother<'s> {
        Smoother {
            options: self.options,
            trace,
        }
    }

    pub fn options(&self) -> &SmoothingOptions {
        &self.options
    }

    /// Compute replacement backgrounds for `frames`
    ///
    /// `background_of` reads a frame's current background. The frames are
    /// never modified; the returned changes are in frame order.
    pub fn smooth<F, R>(&self, frames: &[F], background_of: R) -> Vec<BackgroundChange<F::Id>>
    where
        F: Frame,
        R: Fn(&F) -> String,
    {
        if frames.len() < 2 {
            self.trace.record(&TraceEvent::TooFewFrames {
                count: frames.len(),
            });
            return Vec::new();
        }

        let original: Vec<String> = frames.iter().map(&background_of).collect();
        let backgrounds = self.smooth_backgrounds(&original);

        let changes: Vec<BackgroundChange<F::Id>> = frames
            .iter()
            .zip(original.iter().zip(backgrounds))
            .filter(|(_, (before, after))| *before != after)
            .map(|(frame, (_, background))| BackgroundChange {
                id: frame.id(),
                background,
            })
            .collect();

        self.trace.record(&TraceEvent::Finished {
            frames: frames.len(),
            changed: changes.len(),
        });
        changes
    }

    /// Run every pair over a copy of `original` and return the final backgrounds
    pub fn smooth_backgrounds(&self, original: &[String]) -> Vec<String> {
        let mut backgrounds = original.to_vec();
        let count = backgrounds.len();
        if count < 2 {
            return backgrounds;
        }

        let wrap = self.options.wrap_around.then_some((count - 1, 0));
        for (from, to) in (0..count - 1).map(|i| (i, i + 1)).chain(wrap) {
            self.bridge_pair(&mut backgrounds, from, to);
        }
        backgrounds
    }

    fn bridge_pair(&self, backgrounds: &mut [String], from: usize, to: usize) {
        let exit = get_end_color(&backgrounds[from]);
        let entry = get_start_color(&backgrounds[to]);
        let (Some(exit), Some(entry)) = (exit, entry) else {
            self.trace.record(&TraceEvent::PairSkipped { from, to });
            return;
        };

        let bridge = interpolate_color(&exit, &entry, 0.5);
        let strategy = self.options.strategy();
        self.trace.record(&TraceEvent::Bridge {
            from,
            to,
            exit: exit.clone(),
            entry: entry.clone(),
            bridge: bridge.clone(),
            strategy,
        });

        match strategy {
            SmoothingStrategy::FlowOverlay => {
                let outgoing =
                    format!("{}, {}", self.overlay(&bridge, Edge::Exit), backgrounds[from]);
                self.rewrite(backgrounds, from, outgoing);
                let incoming =
                    format!("{}, {}", self.overlay(&bridge, Edge::Entry), backgrounds[to]);
                self.rewrite(backgrounds, to, incoming);
            }
            SmoothingStrategy::DirectBlend => {
                let ratio = self.options.blend_ratio();

                let new_exit = interpolate_color(&exit, &bridge, ratio);
                if new_exit != exit {
                    let updated = modify_end_color(&backgrounds[from], &new_exit);
                    self.rewrite(backgrounds, from, updated);
                }

                let new_entry = interpolate_color(&entry, &bridge, ratio);
                if new_entry != entry {
                    let updated = modify_start_color(&backgrounds[to], &new_entry);
                    self.rewrite(backgrounds, to, updated);
                }
            }
        }
    }

    /// Translucent layer that fades between `bridge` and fully transparent
    fn overlay(&self, bridge: &str, edge: Edge) -> String {
        let visible = self.options.overlay_opacity();
        let (start, end) = match edge {
            Edge::Exit => (0.0, visible),
            Edge::Entry => (visible, 0.0),
        };
        let stops = [
            ColorStop::new(bridge, 0.0).with_alpha(start),
            ColorStop::new(bridge, 100.0).with_alpha(end),
        ];
        generate_linear_gradient(self.options.direction.angle(), &stops)
    }

    fn rewrite(&self, backgrounds: &mut [String], index: usize, background: String) {
        self.trace.record(&TraceEvent::Rewritten {
            index,
            background: background.clone(),
        });
        backgrounds[index] = background;
    }
}

/// Smooth `frames` with the given options and no tracing
pub fn smooth_carousel_backgrounds<F, R>(
    frames: &[F],
    background_of: R,
    options: &SmoothingOptions,
) -> Vec<BackgroundChange<F::Id>>
where
    F: Frame,
    R: Fn(&F) -> String,
{
    Smoother::new(*options).smooth(frames, background_of)
}

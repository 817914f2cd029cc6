//! Instrumentation hook for the smoothing engine
//!
//! The engine reports what it does through a [`TraceSink`]. The default sink
//! discards everything; [`LogTrace`] forwards events to the `log` facade and
//! any `Fn(&TraceEvent)` closure can be used to collect them.

use std::fmt;

use crate::options::SmoothingStrategy;

/// Structured record of one engine step
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// Nothing to bridge
    TooFewFrames { count: usize },
    /// One side of the pair has no extractable color
    PairSkipped { from: usize, to: usize },
    /// Bridge color computed for a pair
    Bridge {
        from: usize,
        to: usize,
        exit: String,
        entry: String,
        bridge: String,
        strategy: SmoothingStrategy,
    },
    /// A frame's working background was rewritten
    Rewritten { index: usize, background: String },
    Finished { frames: usize, changed: usize },
}

impl fmt::Display for TraceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceEvent::TooFewFrames { count } => {
                write!(f, "{} frame(s), nothing to smooth", count)
            }
            TraceEvent::PairSkipped { from, to } => {
                write!(f, "pair {} -> {} skipped: missing colors", from, to)
            }
            TraceEvent::Bridge {
                from,
                to,
                exit,
                entry,
                bridge,
                strategy,
            } => write!(
                f,
                "pair {} -> {}: {} .. {} bridged by {} ({:?})",
                from, to, exit, entry, bridge, strategy
            ),
            TraceEvent::Rewritten { index, background } => {
                write!(f, "frame {} -> {}", index, background)
            }
            TraceEvent::Finished { frames, changed } => {
                write!(f, "smoothed {} frame(s), {} changed", frames, changed)
            }
        }
    }
}

pub trait TraceSink {
    fn record(&self, event: &TraceEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTrace;

impl TraceSink for NoopTrace {
    fn record(&self, _event: &TraceEvent) {}
}

/// Forwards events to `log::debug!`
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTrace;

impl TraceSink for LogTrace {
    fn record(&self, event: &TraceEvent) {
        log::debug!("{}", event);
    }
}

impl<F> TraceSink for F
where
    F: Fn(&TraceEvent),
{
    fn record(&self, event: &TraceEvent) {
        self(event)
    }
}

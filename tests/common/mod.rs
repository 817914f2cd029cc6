//! Common test utilities and harness
//!
//! Provides reusable utilities for functional testing including:
//! - Test environment setup (temp directories, deck and config files)
//! - Smoothing helpers over in-memory decks
//! - Assertion utilities

#![allow(dead_code)]

use std::path::PathBuf;

use huebridge::{Deck, DeckFrame};
use huebridge_css::{hex_to_rgb, interpolate_color};
use huebridge_flow::{BackgroundChange, Smoother, SmoothingOptions, TraceEvent};
use std::cell::RefCell;
use tempfile::TempDir;

/// Test environment with an isolated directory for deck and config files
pub struct TestEnvironment {
    /// Temporary directory, removed on drop
    pub temp_dir: TempDir,
}

impl TestEnvironment {
    /// Create a new isolated test environment
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write a deck file from `(id, background)` pairs
    pub fn write_deck(&self, name: &str, frames: &[(&str, &str)]) -> PathBuf {
        let deck = Deck::new(
            frames
                .iter()
                .map(|(id, bg)| DeckFrame::new(*id, *bg))
                .collect(),
        );
        let path = self.path(name);
        deck.save(&path).expect("Failed to write test deck");
        path
    }

    /// Write raw text to a file in the environment
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a test config file
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_file("config.toml", content)
    }
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

/// Test harness for running the smoother over an in-memory deck
pub struct SmoothingHarness {
    deck: Deck,
}

impl SmoothingHarness {
    /// Frames get ids `f0`, `f1`, ...
    pub fn new(backgrounds: &[&str]) -> Self {
        let frames = backgrounds
            .iter()
            .enumerate()
            .map(|(i, bg)| DeckFrame::new(format!("f{}", i), *bg))
            .collect();
        Self {
            deck: Deck::new(frames),
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Changes the engine reports for `options`
    pub fn changes(&self, options: SmoothingOptions) -> Vec<BackgroundChange<String>> {
        self.deck.smooth(&Smoother::new(options))
    }

    /// Changes plus every trace event recorded along the way
    pub fn traced(
        &self,
        options: SmoothingOptions,
    ) -> (Vec<BackgroundChange<String>>, Vec<TraceEvent>) {
        let events = RefCell::new(Vec::new());
        let sink = |event: &TraceEvent| events.borrow_mut().push(event.clone());
        let changes = self.deck.smooth(&Smoother::new(options).with_trace(&sink));
        (changes, events.into_inner())
    }

    /// Final backgrounds of every frame after applying the changes
    pub fn smoothed(&self, options: SmoothingOptions) -> Vec<String> {
        let mut deck = self.deck.clone();
        deck.apply(&self.changes(options));
        deck.frames.into_iter().map(|f| f.background).collect()
    }

    /// Ids of the changed frames, in order
    pub fn changed_ids(&self, options: SmoothingOptions) -> Vec<String> {
        self.changes(options).into_iter().map(|c| c.id).collect()
    }
}

/// Halfway color between the exit of one frame and the entry of the next
pub fn bridge(exit: &str, entry: &str) -> String {
    interpolate_color(exit, entry, 0.5)
}

/// Assert a background contains the given color
pub fn assert_contains_color(background: &str, color: &str) {
    assert!(
        background.contains(color),
        "Expected '{}' in background '{}'",
        color,
        background
    );
}

/// Assert two hex colors are within `tolerance` per channel
pub fn assert_color_near(actual: &str, expected: &str, tolerance: u8) {
    let a = hex_to_rgb(actual).unwrap_or_else(|| panic!("Invalid color '{}'", actual));
    let e = hex_to_rgb(expected).unwrap_or_else(|| panic!("Invalid color '{}'", expected));
    let close = a.r.abs_diff(e.r) <= tolerance
        && a.g.abs_diff(e.g) <= tolerance
        && a.b.abs_diff(e.b) <= tolerance;
    assert!(close, "Expected {} within {} of {}", actual, tolerance, expected);
}

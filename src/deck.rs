//! Deck files
//!
//! A deck is the ordered list of frames an editor hands to the engine,
//! stored as TOML:
//!
//! ```toml
//! [[frames]]
//! id = "intro"
//! background = "linear-gradient(135deg, #1a0a2e, #16213e)"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use huebridge_flow::{BackgroundChange, Frame, Smoother};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize deck: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate frame id: {0}")]
    DuplicateId(String),
}

/// One frame of a deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckFrame {
    pub id: String,
    pub background: String,
}

impl DeckFrame {
    pub fn new(id: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            background: background.into(),
        }
    }
}

impl Frame for DeckFrame {
    type Id = String;

    fn id(&self) -> String {
        self.id.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    #[serde(default)]
    pub frames: Vec<DeckFrame>,
}

impl Deck {
    pub fn new(frames: Vec<DeckFrame>) -> Self {
        Self { frames }
    }

    /// Parse a deck from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load and validate a deck file
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let content = fs::read_to_string(path).map_err(|source| DeckError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let deck = Self::parse(&content).map_err(|source| DeckError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        deck.validate()?;

        log::info!("Loaded {} frame(s) from {:?}", deck.frames.len(), path);
        Ok(deck)
    }

    /// Changes are keyed by id, so ids must be unique
    pub fn validate(&self) -> Result<(), DeckError> {
        let mut seen = HashSet::new();
        for frame in &self.frames {
            if !seen.insert(frame.id.as_str()) {
                return Err(DeckError::DuplicateId(frame.id.clone()));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, DeckError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), DeckError> {
        fs::write(path, self.to_toml()?).map_err(|source| DeckError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Wrote {} frame(s) to {:?}", self.frames.len(), path);
        Ok(())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.id.as_str()).collect()
    }

    pub fn backgrounds(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.background.as_str()).collect()
    }

    /// Run the smoother over this deck's frames
    pub fn smooth(&self, smoother: &Smoother<'_>) -> Vec<BackgroundChange<String>> {
        smoother.smooth(&self.frames, |frame| frame.background.clone())
    }

    /// Merge a change list into the deck, returning how many frames were updated
    ///
    /// Changes naming unknown ids are ignored.
    pub fn apply(&mut self, changes: &[BackgroundChange<String>]) -> usize {
        let mut applied = 0;
        for change in changes {
            match self.frames.iter_mut().find(|f| f.id == change.id) {
                Some(frame) => {
                    frame.background = change.background.clone();
                    applied += 1;
                }
                None => log::warn!("No frame with id '{}', change ignored", change.id),
            }
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use huebridge_flow::SmoothingOptions;

    const DECK: &str = r##"
        [[frames]]
        id = "intro"
        background = "#ff0000"

        [[frames]]
        id = "outro"
        background = "linear-gradient(to right, #0000ff, #00ffff)"
    "##;

    #[test]
    fn test_parse_deck() {
        let deck = Deck::parse(DECK).unwrap();
        assert_eq!(deck.ids(), vec!["intro", "outro"]);
        assert_eq!(deck.backgrounds()[0], "#ff0000");
    }

    #[test]
    fn test_empty_deck() {
        let deck = Deck::parse("").unwrap();
        assert!(deck.frames.is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let deck = Deck::new(vec![
            DeckFrame::new("a", "#fff"),
            DeckFrame::new("a", "#000"),
        ]);
        assert!(matches!(deck.validate(), Err(DeckError::DuplicateId(id)) if id == "a"));
    }

    #[test]
    fn test_smooth_and_apply() {
        let mut deck = Deck::parse(DECK).unwrap();
        let changes = deck.smooth(&Smoother::new(SmoothingOptions::default()));
        assert_eq!(changes.len(), 2);

        assert_eq!(deck.apply(&changes), 2);
        assert!(deck.frames[0].background.ends_with(", #ff0000"));
        assert!(deck.frames[1].background.starts_with("linear-gradient(135deg"));
    }

    #[test]
    fn test_apply_ignores_unknown_ids() {
        let mut deck = Deck::parse(DECK).unwrap();
        let changes = vec![BackgroundChange {
            id: "missing".to_string(),
            background: "#000000".to_string(),
        }];
        assert_eq!(deck.apply(&changes), 0);
        assert_eq!(deck, Deck::parse(DECK).unwrap());
    }

    #[test]
    fn test_toml_round_trip() {
        let deck = Deck::parse(DECK).unwrap();
        let text = deck.to_toml().unwrap();
        assert_eq!(Deck::parse(&text).unwrap(), deck);
    }
}

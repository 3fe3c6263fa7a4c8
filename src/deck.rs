// Deck module - card content for the carousel
//
// A deck is a TOML file with a title and an array of [[card]] tables. One
// deck is compiled into the binary so the viewer works with zero setup;
// others are loaded from disk via --deck, CARDREEL_DECK or the config file.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Deck shipped with the binary
const BUNDLED: &str = include_str!("../decks/attention.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Deck {
    pub title: String,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub attribution: Option<String>,
    #[serde(default, rename = "card")]
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Card {
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub kicker: Option<String>,
    /// Illustration slot label; rendered as a hoverable placeholder
    #[serde(default)]
    pub placeholder: Option<String>,
}

#[derive(Debug)]
pub enum DeckError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { origin: String, source: toml::de::Error },
    Empty { origin: String },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::Io { path, source } => {
                write!(f, "cannot read deck {}: {}", path.display(), source)
            }
            DeckError::Parse { origin, source } => {
                write!(f, "invalid deck {}: {}", origin, source)
            }
            DeckError::Empty { origin } => write!(f, "deck {} has no cards", origin),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Io { source, .. } => Some(source),
            DeckError::Parse { source, .. } => Some(source),
            DeckError::Empty { .. } => None,
        }
    }
}

impl Deck {
    /// Parse deck TOML. `origin` names the source in error messages.
    pub fn parse(contents: &str, origin: &str) -> Result<Self, DeckError> {
        let mut deck: Deck = toml::from_str(contents).map_err(|source| DeckError::Parse {
            origin: origin.to_string(),
            source,
        })?;

        if deck.cards.is_empty() {
            return Err(DeckError::Empty {
                origin: origin.to_string(),
            });
        }

        for card in &mut deck.cards {
            let trimmed = card.body.trim();
            if trimmed.len() != card.body.len() {
                card.body = trimmed.to_string();
            }
        }
        Ok(deck)
    }

    pub fn bundled() -> Result<Self, DeckError> {
        Self::parse(BUNDLED, "(bundled)")
    }

    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let contents = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, &path.display().to_string())
    }

    /// Load `path` if given, otherwise the bundled deck
    pub fn resolve(path: Option<&Path>) -> Result<Self, DeckError> {
        match path {
            Some(path) => {
                let deck = Self::load(path)?;
                tracing::info!(path = %path.display(), cards = deck.cards.len(), "deck loaded");
                Ok(deck)
            }
            None => Self::bundled(),
        }
    }

    /// Owning card of each placeholder, in source order
    pub fn placeholder_owners(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| card.placeholder.is_some())
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_deck_parses() {
        let deck = Deck::bundled().unwrap();
        assert_eq!(deck.title, "Attention Violence Cards");
        assert_eq!(deck.cards.len(), 7);
        assert!(deck.cards.iter().all(|c| !c.body.ends_with('\n')));
        assert_eq!(deck.placeholder_owners(), vec![0, 2, 4, 6]);
    }

    #[test]
    fn minimal_deck() {
        let deck = Deck::parse(
            r#"
title = "Two"

[[card]]
title = "a"
body = "first"

[[card]]
title = "b"
body = "second"
placeholder = "box"
"#,
            "test",
        )
        .unwrap();
        assert_eq!(deck.cards.len(), 2);
        assert_eq!(deck.tagline, None);
        assert_eq!(deck.placeholder_owners(), vec![1]);
    }

    #[test]
    fn empty_deck_is_rejected() {
        let err = Deck::parse("title = \"nothing\"\n", "empty.toml").unwrap_err();
        assert!(matches!(err, DeckError::Empty { .. }));
        assert_eq!(err.to_string(), "deck empty.toml has no cards");
    }

    #[test]
    fn card_without_body_is_a_parse_error() {
        let err = Deck::parse("title = \"t\"\n[[card]]\ntitle = \"x\"\n", "bad.toml").unwrap_err();
        assert!(matches!(err, DeckError::Parse { .. }));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = Deck::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}

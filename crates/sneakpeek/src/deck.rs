use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One unit of carousel content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Slide {
    pub status: String,
    pub title: String,
    pub summary: String,
    pub insight: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    pub title: Option<String>,
    pub slides: Vec<Slide>,
}

/// The titled form of a deck file. A bare list of slides needs no wrapper.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DeckDocument {
    #[serde(default)]
    title: Option<String>,
    slides: Vec<Slide>,
}

impl Deck {
    pub fn parse(content: &str) -> Result<Self> {
        // An empty file is an empty deck, not a parse error.
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }

        let shape: serde_yaml::Value = serde_yaml::from_str(content)?;

        // Parse the text a second time into the concrete shape so errors keep
        // their field name and line.
        match shape {
            serde_yaml::Value::Null => Ok(Self::default()),
            serde_yaml::Value::Sequence(_) => Ok(Self {
                title: None,
                slides: serde_yaml::from_str(content)?,
            }),
            serde_yaml::Value::Mapping(_) => {
                let doc: DeckDocument = serde_yaml::from_str(content)?;
                Ok(Self {
                    title: doc.title,
                    slides: doc.slides,
                })
            }
            _ => bail!("Deck must be a list of slides or a mapping with `slides`"),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read deck {}", path.display()))?;
        let deck =
            Self::parse(&content).with_context(|| format!("Invalid deck {}", path.display()))?;
        tracing::debug!(path = %path.display(), slides = deck.slides.len(), "deck loaded");
        Ok(deck)
    }

    /// Window title: the deck's own title, or the file stem.
    pub fn display_title(&self, path: &Path) -> String {
        self.title.clone().unwrap_or_else(|| {
            path.file_stem()
                .unwrap_or_default()
                .to_string_lossy()
                .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_deck_parses() {
        let content = include_str!("../../../sample-decks/sneak-peek.yaml");
        let deck = Deck::parse(content).unwrap();
        assert_eq!(deck.title.as_deref(), Some("Spring release sneak peek"));
        assert_eq!(deck.slides.len(), 4);
        assert_eq!(deck.slides[0].status, "In design");
        assert_eq!(deck.slides[2].title, "Offline mode");
        assert_eq!(deck.slides[1].tags, vec!["scheduling", "notifications"]);
        assert!(deck.slides[3].tags.is_empty());
    }

    #[test]
    fn test_bare_list_of_slides() {
        let content = "\
- status: Live
  title: A
  summary: first
  insight: one
- status: Beta
  title: B
  summary: second
  insight: two
  tags: [x]
";
        let deck = Deck::parse(content).unwrap();
        assert_eq!(deck.title, None);
        assert_eq!(deck.slides.len(), 2);
        assert!(deck.slides[0].tags.is_empty());
        assert_eq!(deck.slides[1].tags, vec!["x"]);
    }

    #[test]
    fn test_empty_input_is_empty_deck() {
        assert_eq!(Deck::parse("").unwrap(), Deck::default());
        assert_eq!(Deck::parse("# nothing yet\n\n").unwrap(), Deck::default());
        let titled = Deck::parse("title: Soon\nslides: []\n").unwrap();
        assert_eq!(titled.title.as_deref(), Some("Soon"));
        assert!(titled.slides.is_empty());
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let content = "- status: Live\n  title: A\n  summary: first\n";
        let err = format!("{:#}", Deck::parse(content).unwrap_err());
        assert!(err.contains("missing field `insight`"), "{err}");
        assert!(err.contains("line 1"), "{err}");
    }

    #[test]
    fn test_misspelled_slides_key_is_rejected() {
        let content = "\
title: Launch
slide:
  - status: a
    title: b
    summary: c
    insight: d
";
        let err = format!("{:#}", Deck::parse(content).unwrap_err());
        assert!(err.contains("unknown field `slide`"), "{err}");
    }

    #[test]
    fn test_document_without_slides_is_rejected() {
        let err = format!("{:#}", Deck::parse("title: Soon\n").unwrap_err());
        assert!(err.contains("missing field `slides`"), "{err}");
    }

    #[test]
    fn test_misspelled_slide_field_is_rejected() {
        let content = "\
- status: Live
  title: A
  summary: first
  insight: one
  tag: [x]
";
        let err = format!("{:#}", Deck::parse(content).unwrap_err());
        assert!(err.contains("unknown field `tag`"), "{err}");
    }

    #[test]
    fn test_scalar_deck_is_rejected() {
        let err = Deck::parse("just some words\n").unwrap_err();
        assert!(err.to_string().contains("list of slides"));
    }

    #[test]
    fn test_load_surfaces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.yaml");
        std::fs::write(&path, "slide:\n  - status: a\n").unwrap();
        let err = format!("{:#}", Deck::load(&path).unwrap_err());
        assert!(err.contains("Invalid deck"), "{err}");
        assert!(err.contains("unknown field `slide`"), "{err}");
    }

    #[test]
    fn test_load_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.yaml");
        let err = Deck::load(&path).unwrap_err();
        assert!(err.to_string().contains("missing.yaml"));
    }

    #[test]
    fn test_display_title_falls_back_to_file_stem() {
        let deck = Deck::default();
        assert_eq!(deck.display_title(Path::new("decks/launch.yaml")), "launch");
        let titled = Deck {
            title: Some("Launch".into()),
            slides: Vec::new(),
        };
        assert_eq!(titled.display_title(Path::new("x.yaml")), "Launch");
    }
}

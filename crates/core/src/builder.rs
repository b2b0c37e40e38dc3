//! Deck derivation from generated text.
//!
//! Source text is cut into slides at blank lines: every run of two or more
//! consecutive newlines separates one slide from the next. Blocks that are
//! empty or only whitespace are dropped, so slide numbering counts surviving
//! blocks only.

use crate::types::{Presentation, Slide};
use regex::Regex;
use std::sync::LazyLock;

/// Regex matching a slide separator: two or more newlines, CRLF accepted.
static BLANK_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\r?\n){2,}").unwrap());

/// Default prefix for generated slide titles ("Slide 1", "Slide 2", ...).
pub const DEFAULT_PLACEHOLDER_PREFIX: &str = "Slide";

/// Builds presentations from raw text.
#[derive(Debug, Clone)]
pub struct DeckBuilder {
    /// Prefix of the placeholder title given to each slide.
    placeholder_prefix: String,
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self {
            placeholder_prefix: DEFAULT_PLACEHOLDER_PREFIX.to_string(),
        }
    }
}

impl DeckBuilder {
    /// Create a builder producing "Slide N" titles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different prefix for placeholder slide titles.
    pub fn with_placeholder_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.placeholder_prefix = prefix.into();
        self
    }

    /// Build a presentation from raw text.
    ///
    /// The deck title is `title` verbatim; nothing is inferred from the text.
    /// Every call yields a new id and timestamp, even for identical input.
    /// Empty or whitespace-only text gives a deck with zero slides.
    ///
    /// # Example
    /// ```
    /// use deck_core::DeckBuilder;
    ///
    /// let deck = DeckBuilder::new().build("Intro\n\nOutro", "Demo");
    /// assert_eq!(deck.slides[1].title, "Slide 2");
    /// assert_eq!(deck.slides[1].content, "Outro");
    /// ```
    pub fn build(&self, raw_text: &str, title: &str) -> Presentation {
        let slides: Vec<Slide> = split_blocks(raw_text)
            .into_iter()
            .enumerate()
            .map(|(i, block)| Slide::new(self.placeholder_title(i + 1), block))
            .collect();

        let presentation = Presentation::new(title, slides);
        log::debug!(
            "Built deck {} ({:?}) with {} slides",
            presentation.id,
            presentation.title,
            presentation.slides.len()
        );
        presentation
    }

    fn placeholder_title(&self, number: usize) -> String {
        format!("{} {}", self.placeholder_prefix, number)
    }
}

/// Build a presentation with the default builder settings.
pub fn build(raw_text: &str, title: &str) -> Presentation {
    DeckBuilder::new().build(raw_text, title)
}

/// Split raw text into the non-blank blocks that become slides.
///
/// Blocks are returned verbatim, including any single newlines inside them.
pub fn split_blocks(raw_text: &str) -> Vec<&str> {
    BLANK_LINE_REGEX
        .split(raw_text)
        .filter(|block| !block.trim().is_empty())
        .collect()
}

//! Domain types for representing a slide deck.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an entire presentation: its identity and slides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// Unique identifier, assigned once when the deck is built.
    pub id: String,

    /// When the deck was built.
    pub created_at: DateTime<Utc>,

    /// Display title.
    pub title: String,

    /// Slides in navigation order.
    pub slides: Vec<Slide>,
}

impl Presentation {
    /// Create a presentation with a fresh id and the current timestamp.
    pub fn new(title: impl Into<String>, slides: Vec<Slide>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            title: title.into(),
            slides,
        }
    }

    /// Number of slides in the deck.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// A deck with no slides is valid but has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

/// A single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Slide heading.
    pub title: String,

    /// Body text. Single newlines separate paragraphs.
    pub content: String,

    /// Image reference; empty means no image.
    #[serde(default)]
    pub image_url: String,

    /// Rendering hints, passed through untouched.
    #[serde(default)]
    pub style: SlideStyle,
}

impl Slide {
    /// Create a slide with no image and default style.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: String::new(),
            style: SlideStyle::default(),
        }
    }

    /// Whether an image is attached.
    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    /// Read one of the editable text fields.
    pub fn field(&self, field: SlideField) -> &str {
        match field {
            SlideField::Title => &self.title,
            SlideField::Content => &self.content,
        }
    }

    /// Replace one of the editable text fields.
    pub fn set_field(&mut self, field: SlideField, value: impl Into<String>) {
        match field {
            SlideField::Title => self.title = value.into(),
            SlideField::Content => self.content = value.into(),
        }
    }

    /// Content split into the paragraphs a view renders.
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.content.lines()
    }
}

/// The text fields of a slide that can be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideField {
    Title,
    Content,
}

/// Optional rendering hints for a slide.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<Background>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<FontSize>,
}

impl SlideStyle {
    /// True when no hint is set.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

/// Slide background: a solid color or a linear gradient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Background {
    Color(String),
    Gradient {
        from: String,
        to: String,
        /// Angle in degrees.
        #[serde(default)]
        angle: u16,
    },
}

/// Font size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FontSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

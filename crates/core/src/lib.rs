//! Slide deck derivation from generated text, plus the session that
//! navigates, edits and exports the deck.

pub mod actions;
pub mod builder;
pub mod error;
pub mod export;
pub mod session;
pub mod types;

pub use actions::DeckAction;
pub use builder::{build, DeckBuilder};
pub use error::{Error, Result};
pub use export::{export, export_filename, ExportedDeck};
pub use session::{DeckSession, NoopObserver, SessionObserver, SessionState};
pub use types::{Alignment, Background, FontSize, Presentation, Slide, SlideField, SlideStyle};

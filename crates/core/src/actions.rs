//! User and upstream events that drive a session.

use crate::session::{DeckSession, SessionObserver};
use crate::types::SlideField;

/// One discrete event for a [`DeckSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckAction {
    /// Source text or source identifier changed upstream.
    Rebuild { raw_text: String, title: String },
    Previous,
    Next,
    JumpTo(usize),
    SetTitle(String),
    UpdateField(SlideField, String),
    ToggleEdit,
    RequestNewDeck,
}

impl<O: SessionObserver> DeckSession<O> {
    /// Apply one action. Each action runs to completion before the next.
    pub fn dispatch(&mut self, action: DeckAction) {
        match action {
            DeckAction::Rebuild { raw_text, title } => self.rebuild(&raw_text, &title),
            DeckAction::Previous => self.go_previous(),
            DeckAction::Next => self.go_next(),
            DeckAction::JumpTo(index) => self.jump_to(index),
            DeckAction::SetTitle(title) => self.set_title(title),
            DeckAction::UpdateField(field, value) => self.update_slide_field(field, value),
            DeckAction::ToggleEdit => self.toggle_edit(),
            DeckAction::RequestNewDeck => self.request_new_deck(),
        }
    }
}

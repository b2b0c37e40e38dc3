//! Deck session: the live deck, the current slide and the edit mode.
//!
//! A session owns exactly one presentation at a time. Rebuilding replaces it
//! wholesale. Navigation is clamped to the deck and never fails; misuse from
//! a caller is absorbed rather than reported.

use crate::builder::DeckBuilder;
use crate::error::Result;
use crate::export::{export, ExportedDeck};
use crate::types::{Presentation, Slide, SlideField};

/// Receives the events a session hands to the outside world.
pub trait SessionObserver {
    /// Called once each time edit mode is left, with the finalized deck.
    fn on_commit(&mut self, presentation: &Presentation);

    /// Called when the user asks to throw the deck away and start over.
    fn on_request_new_deck(&mut self) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_commit(&mut self, _presentation: &Presentation) {}
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The deck has no slides; there is no current slide.
    Loading,
    /// Read mode.
    Viewing,
    /// Inline edit mode.
    Editing,
}

impl SessionState {
    /// Whether there is a current slide to show.
    pub fn is_ready(self) -> bool {
        !matches!(self, Self::Loading)
    }
}

/// Stateful wrapper around one built deck.
#[derive(Debug)]
pub struct DeckSession<O: SessionObserver = NoopObserver> {
    builder: DeckBuilder,
    presentation: Presentation,
    current_index: usize,
    editing: bool,
    /// Edits made since the last commit or rebuild.
    dirty: bool,
    observer: O,
}

impl<O: SessionObserver> DeckSession<O> {
    /// Start a session on a deck built from `raw_text`.
    pub fn new(raw_text: &str, title: &str, observer: O) -> Self {
        Self::with_builder(DeckBuilder::new(), raw_text, title, observer)
    }

    /// Start a session that builds decks with a custom builder.
    pub fn with_builder(builder: DeckBuilder, raw_text: &str, title: &str, observer: O) -> Self {
        let presentation = builder.build(raw_text, title);
        Self {
            builder,
            presentation,
            current_index: 0,
            editing: false,
            dirty: false,
            observer,
        }
    }

    // ============ Read access ============

    /// Current lifecycle state, derived from the deck and the edit flag.
    pub fn state(&self) -> SessionState {
        if self.presentation.is_empty() {
            SessionState::Loading
        } else if self.editing {
            SessionState::Editing
        } else {
            SessionState::Viewing
        }
    }

    /// The live deck, including any edits.
    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    /// Index of the current slide. Meaningless while loading.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The current slide, or None while loading.
    pub fn current_slide(&self) -> Option<&Slide> {
        self.presentation.slides.get(self.current_index)
    }

    /// Whether the session is in edit mode.
    pub fn is_editing(&self) -> bool {
        self.state() == SessionState::Editing
    }

    /// Whether edits exist that have not gone through a commit yet.
    pub fn has_unsaved_edits(&self) -> bool {
        self.dirty
    }

    /// Whether the current slide is the first one.
    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    /// Whether the current slide is the last one. True while loading.
    pub fn is_last(&self) -> bool {
        self.current_index + 1 >= self.presentation.len()
    }

    /// The collaborator receiving commits.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the collaborator.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consume the session, handing back the collaborator.
    pub fn into_observer(self) -> O {
        self.observer
    }

    // ============ Rebuild ============

    /// Replace the live deck with one built from new input.
    ///
    /// Resets to the first slide and leaves edit mode. Unsaved edits on the
    /// previous deck are discarded without a commit.
    pub fn rebuild(&mut self, raw_text: &str, title: &str) {
        if self.dirty {
            log::warn!(
                "Discarding unsaved edits to deck {} on rebuild",
                self.presentation.id
            );
        }

        self.presentation = self.builder.build(raw_text, title);
        self.current_index = 0;
        self.editing = false;
        self.dirty = false;
    }

    /// Ask the observer for a brand new deck. The session itself is unchanged.
    pub fn request_new_deck(&mut self) {
        log::debug!("New deck requested");
        self.observer.on_request_new_deck();
    }

    // ============ Navigation ============

    /// Move to the previous slide; no-op on the first.
    pub fn go_previous(&mut self) {
        if self.current_index > 0 {
            self.current_index -= 1;
        }
    }

    /// Move to the next slide; no-op on the last.
    pub fn go_next(&mut self) {
        if self.current_index + 1 < self.presentation.len() {
            self.current_index += 1;
        }
    }

    /// Jump directly to a slide. Out-of-range indices are ignored.
    pub fn jump_to(&mut self, index: usize) {
        if index < self.presentation.len() {
            self.current_index = index;
        } else {
            log::debug!(
                "Ignoring jump to slide {} of {}",
                index,
                self.presentation.len()
            );
        }
    }

    // ============ Editing ============

    /// Change the deck title. Allowed in any mode.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.presentation.title = title.into();
        self.dirty = true;
    }

    /// Replace one field of the current slide.
    ///
    /// Not gated by edit mode; the view decides when to offer it. Does nothing
    /// while loading.
    pub fn update_slide_field(&mut self, field: SlideField, value: impl Into<String>) {
        if let Some(slide) = self.presentation.slides.get_mut(self.current_index) {
            slide.set_field(field, value);
            self.dirty = true;
        }
    }

    /// Enter edit mode, or leave it and commit.
    ///
    /// Leaving edit mode always commits; there is no cancel. Does nothing
    /// while loading.
    pub fn toggle_edit(&mut self) {
        match self.state() {
            SessionState::Loading => {}
            SessionState::Viewing => self.editing = true,
            SessionState::Editing => {
                self.editing = false;
                self.commit();
            }
        }
    }

    fn commit(&mut self) {
        log::debug!(
            "Committing deck {} ({} slides)",
            self.presentation.id,
            self.presentation.len()
        );
        self.observer.on_commit(&self.presentation);
        self.dirty = false;
    }

    // ============ Export ============

    /// Encode the live deck for saving.
    pub fn export(&self) -> Result<ExportedDeck> {
        export(&self.presentation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEMO: &str = "Intro text\n\nSecond point\n\n\nThird point";

    #[derive(Debug, Default)]
    struct Recorder {
        commits: Vec<Presentation>,
        new_deck_requests: usize,
    }

    impl SessionObserver for Recorder {
        fn on_commit(&mut self, presentation: &Presentation) {
            self.commits.push(presentation.clone());
        }

        fn on_request_new_deck(&mut self) {
            self.new_deck_requests += 1;
        }
    }

    fn demo_session() -> DeckSession<Recorder> {
        DeckSession::new(DEMO, "Demo", Recorder::default())
    }

    #[test]
    fn test_new_session_is_viewing_first_slide() {
        let session = demo_session();

        assert_eq!(session.state(), SessionState::Viewing);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.current_slide().unwrap().content, "Intro text");
    }

    #[test]
    fn test_empty_input_is_loading() {
        let mut session = DeckSession::new("", "Empty", NoopObserver);

        assert_eq!(session.state(), SessionState::Loading);
        assert!(!session.state().is_ready());
        assert!(session.current_slide().is_none());

        session.go_next();
        session.go_previous();
        session.toggle_edit();
        assert_eq!(session.state(), SessionState::Loading);
        assert_eq!(session.current_index(), 0);
    }

    #[test]
    fn test_navigation_clamps() {
        let mut session = demo_session();

        session.go_previous();
        assert_eq!(session.current_index(), 0);

        session.go_next();
        session.go_next();
        assert_eq!(session.current_index(), 2);
        assert!(session.is_last());

        session.go_next();
        session.go_next();
        assert_eq!(session.current_index(), 2);

        session.go_previous();
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn test_jump_to_ignores_out_of_range() {
        let mut session = demo_session();

        session.jump_to(2);
        assert_eq!(session.current_index(), 2);

        session.jump_to(3);
        session.jump_to(usize::MAX);
        assert_eq!(session.current_index(), 2);
    }

    #[test]
    fn test_update_slide_field_changes_one_field() {
        let mut session = demo_session();
        session.go_next();
        let before = session.presentation().clone();

        session.update_slide_field(SlideField::Content, "Edited");

        let after = session.presentation();
        assert_eq!(after.slides[1].content, "Edited");
        assert_eq!(after.slides[1].title, before.slides[1].title);
        assert_eq!(after.slides[1].image_url, before.slides[1].image_url);
        assert_eq!(after.slides[1].style, before.slides[1].style);
        assert_eq!(after.slides[0], before.slides[0]);
        assert_eq!(after.slides[2], before.slides[2]);
        assert_eq!(after.title, before.title);
        assert_eq!(after.id, before.id);
    }

    #[test]
    fn test_update_slide_title() {
        let mut session = demo_session();
        session.update_slide_field(SlideField::Title, "Welcome");

        assert_eq!(session.current_slide().unwrap().title, "Welcome");
        assert_eq!(session.current_slide().unwrap().content, "Intro text");
    }

    #[test]
    fn test_toggle_edit_commits_once_with_edits() {
        let mut session = demo_session();

        session.toggle_edit();
        assert!(session.is_editing());
        assert!(session.observer().commits.is_empty());

        session.update_slide_field(SlideField::Title, "Welcome");
        session.toggle_edit();

        assert_eq!(session.state(), SessionState::Viewing);
        let commits = &session.observer().commits;
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].slides[0].title, "Welcome");
        assert!(!session.has_unsaved_edits());
    }

    #[test]
    fn test_each_edit_exit_commits() {
        let mut session = demo_session();
        for _ in 0..3 {
            session.toggle_edit();
            session.toggle_edit();
        }
        assert_eq!(session.observer().commits.len(), 3);
    }

    #[test]
    fn test_set_title_in_any_mode() {
        let mut session = demo_session();

        session.set_title("Renamed");
        assert_eq!(session.presentation().title, "Renamed");
        assert_eq!(session.state(), SessionState::Viewing);
        assert!(session.has_unsaved_edits());
    }

    #[test]
    fn test_rebuild_resets_and_discards_edits() {
        let mut session = demo_session();
        let old_id = session.presentation().id.clone();

        session.go_next();
        session.toggle_edit();
        session.update_slide_field(SlideField::Content, "Unsaved");
        assert!(session.has_unsaved_edits());

        session.rebuild(DEMO, "Demo");

        assert_ne!(session.presentation().id, old_id);
        assert_eq!(session.current_index(), 0);
        assert_eq!(session.state(), SessionState::Viewing);
        assert!(!session.has_unsaved_edits());
        assert_eq!(session.presentation().slides[1].content, "Second point");
        assert!(session.observer().commits.is_empty());
    }

    #[test]
    fn test_rebuild_with_identical_text_gives_fresh_identity() {
        let mut session = demo_session();
        let first = session.presentation().clone();

        session.rebuild(DEMO, "Demo");

        assert_ne!(session.presentation().id, first.id);
        assert!(session.presentation().created_at >= first.created_at);
    }

    #[test]
    fn test_rebuild_to_empty_and_back() {
        let mut session = demo_session();

        session.rebuild("  ", "Demo");
        assert_eq!(session.state(), SessionState::Loading);

        session.rebuild("Back", "Demo");
        assert_eq!(session.state(), SessionState::Viewing);
        assert_eq!(session.current_slide().unwrap().content, "Back");
    }

    #[test]
    fn test_request_new_deck_notifies_observer() {
        let mut session = demo_session();
        session.request_new_deck();

        assert_eq!(session.observer().new_deck_requests, 1);
        assert_eq!(session.presentation().len(), 3);
    }

    #[test]
    fn test_export_uses_live_title() {
        let mut session = demo_session();
        session.set_title("My  Talk");

        let exported = session.export().unwrap();
        assert_eq!(exported.filename, "My_Talk.json");
    }

    #[test]
    fn test_custom_builder_survives_rebuild() {
        let builder = DeckBuilder::new().with_placeholder_prefix("Page");
        let mut session = DeckSession::with_builder(builder, "a", "Deck", NoopObserver);
        session.rebuild("b\n\nc", "Deck");

        assert_eq!(session.presentation().slides[1].title, "Page 2");
    }

    #[test]
    fn test_boundary_queries() {
        let mut session = demo_session();
        assert!(session.is_first());
        assert!(!session.is_last());

        session.jump_to(2);
        assert!(!session.is_first());
        assert!(session.is_last());

        let recorder = session.into_observer();
        assert!(recorder.commits.is_empty());
    }
}

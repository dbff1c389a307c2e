//! Display sink port
//!
//! Defines the interface for rendering a joke while it is being told.

use jokebook_domain::Joke;

/// Output-only rendering collaborator for a display slot.
///
/// Implementations live in the presentation layer. Calls are made in order
/// from the slot's display thread, never from the countdown or a runtime
/// worker, so a slow implementation delays rendering but not the reveal. A
/// panicking call loses only its own event.
pub trait DisplaySink: Send + Sync {
    /// Called when a new joke's question is put on screen
    fn on_question_shown(&self, joke: &Joke);

    /// Called once per countdown tick with the seconds left before the reveal
    fn on_countdown_tick(&self, seconds_remaining: u32);

    /// Called when the punchline is revealed
    fn on_answer_shown(&self, text: &str, image_key: &str);

    /// Called when the user quits and the display should be released
    fn on_display_released(&self) {}
}

/// No-op display for when nothing should be rendered
pub struct NoDisplay;

impl DisplaySink for NoDisplay {
    fn on_question_shown(&self, _joke: &Joke) {}
    fn on_countdown_tick(&self, _seconds_remaining: u32) {}
    fn on_answer_shown(&self, _text: &str, _image_key: &str) {}
}

//! Console display sinks

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use jokebook_application::DisplaySink;
use jokebook_domain::Joke;
use std::fmt::Display;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// Countdown line shown while the punchline is hidden
pub fn reveal_message(seconds_remaining: u32) -> String {
    format!("joke reveal in {} secs.", seconds_remaining)
}

/// Write one line to stdout. A closed stdout (e.g. piped into `head`) is
/// logged, not fatal.
fn emit(line: impl Display) {
    if let Err(e) = writeln!(io::stdout().lock(), "{}", line) {
        debug!("Display write failed: {}", e);
    }
}

/// Renders jokes with a countdown progress bar
pub struct ConsoleDisplay {
    countdown_seconds: u32,
    bar: Mutex<Option<ProgressBar>>,
}

impl ConsoleDisplay {
    pub fn new(countdown_seconds: u32) -> Self {
        Self {
            countdown_seconds,
            bar: Mutex::new(None),
        }
    }

    fn countdown_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn take_bar(&self) -> Option<ProgressBar> {
        self.bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl DisplaySink for ConsoleDisplay {
    fn on_question_shown(&self, joke: &Joke) {
        // A superseded joke leaves its bar behind
        if let Some(previous) = self.take_bar() {
            previous.abandon();
        }

        emit("");
        emit(joke.question().bold());

        let pb = ProgressBar::new(u64::from(self.countdown_seconds) + 1);
        pb.set_style(Self::countdown_style());
        pb.set_message(reveal_message(self.countdown_seconds));
        *self.bar.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn on_countdown_tick(&self, seconds_remaining: u32) {
        if let Some(pb) = self
            .bar
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            pb.set_message(reveal_message(seconds_remaining));
            pb.inc(1);
        }
    }

    fn on_answer_shown(&self, text: &str, image_key: &str) {
        if let Some(pb) = self.take_bar() {
            pb.finish_and_clear();
        }
        emit(format_args!(
            "{} {}",
            text.green().bold(),
            format!("[{}]", image_key).dimmed()
        ));
    }

    fn on_display_released(&self) {
        if let Some(pb) = self.take_bar() {
            pb.finish_and_clear();
        }
        emit("Bye!".cyan());
    }
}

/// Simple text-based display (no progress bar)
pub struct SimpleDisplay;

impl DisplaySink for SimpleDisplay {
    fn on_question_shown(&self, joke: &Joke) {
        emit(joke.question());
    }

    fn on_countdown_tick(&self, seconds_remaining: u32) {
        emit(format_args!("  {}", reveal_message(seconds_remaining)));
    }

    fn on_answer_shown(&self, text: &str, image_key: &str) {
        emit(format_args!("{} [{}]", text, image_key));
    }

    fn on_display_released(&self) {
        emit("Bye!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jokebook_domain::Category;

    #[test]
    fn test_reveal_message() {
        assert_eq!(reveal_message(5), "joke reveal in 5 secs.");
        assert_eq!(reveal_message(0), "joke reveal in 0 secs.");
    }

    #[test]
    fn test_console_display_bar_lifecycle() {
        let display = ConsoleDisplay::new(2);
        display.on_question_shown(&Joke::new("Q1", "A1", Category::Chicken));
        display.on_countdown_tick(2);
        display.on_countdown_tick(1);
        assert_eq!(
            display.bar.lock().unwrap().as_ref().map(ProgressBar::position),
            Some(2)
        );

        display.on_answer_shown("A1", "chicken");
        assert!(display.bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_new_question_replaces_bar() {
        let display = ConsoleDisplay::new(5);
        display.on_question_shown(&Joke::new("Q1", "A1", Category::Chicken));
        display.on_countdown_tick(5);
        display.on_question_shown(&Joke::new("Q2", "A2", Category::Lawyer));

        assert_eq!(
            display.bar.lock().unwrap().as_ref().map(ProgressBar::position),
            Some(0)
        );
        display.on_display_released();
        assert!(display.bar.lock().unwrap().is_none());
    }
}

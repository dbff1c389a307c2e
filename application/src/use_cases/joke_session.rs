//! A single told joke: question, countdown, punchline, archive.
//!
//! A [`JokeSession`] owns one [`RevealTimer`] and the session state. It never
//! talks to the sinks directly; every observable effect is queued on the
//! slot's outbox as a [`SessionEvent`] and delivered by the slot dispatcher.

use crate::config::RevealConfig;
use crate::timer::{RevealTimer, TimerError};
use jokebook_domain::{
    ArchiveRecord, Category, CategoryResolver, DomainError, Joke, JokeCatalog, SessionId,
    SessionState,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

/// Errors that prevent a joke from being told
#[derive(Error, Debug)]
pub enum TellJokeError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Timer(#[from] TimerError),

    #[error("Joke slot is shut down")]
    SlotClosed,
}

/// Observable effect of a session, in emission order.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    QuestionShown {
        session_id: SessionId,
        joke: Arc<Joke>,
    },
    CountdownTick {
        session_id: SessionId,
        seconds_remaining: u32,
    },
    AnswerShown {
        session_id: SessionId,
        text: String,
        image_key: &'static str,
    },
    Archived(ArchiveRecord),
    DisplayReleased,
}

pub type Outbox = mpsc::UnboundedSender<SessionEvent>;

/// Cloneable observer of a running or finished session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: SessionId,
    joke: Arc<Joke>,
    category: Category,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn joke(&self) -> &Arc<Joke> {
        &self.joke
    }

    /// Category the session was requested with (may be `Default`).
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    /// Wait until the session is archived or superseded.
    pub async fn wait_terminal(&self) -> SessionState {
        let mut rx = self.state.clone();
        let reached = rx.wait_for(SessionState::is_terminal).await.map(|state| *state);
        reached.unwrap_or_else(|_| *rx.borrow())
    }
}

/// One "tell a joke" request (Entity)
pub struct JokeSession {
    id: SessionId,
    joke: Arc<Joke>,
    category: Category,
    state: Arc<watch::Sender<SessionState>>,
    timer: RevealTimer,
}

impl JokeSession {
    /// Resolve hints, draw a joke and start revealing it.
    ///
    /// Selection errors are returned before anything is queued or scheduled.
    pub fn start<S: AsRef<str>>(
        catalog: &JokeCatalog,
        hints: Option<&[S]>,
        config: &RevealConfig,
        outbox: Outbox,
    ) -> Result<Self, TellJokeError> {
        let category = CategoryResolver::resolve(hints);
        let joke = Self::draw(catalog, category)?;
        Self::begin(joke, category, config, outbox)
    }

    /// Draw a joke for `category`, falling back to the whole catalog when
    /// that category has no jokes.
    pub fn draw(catalog: &JokeCatalog, category: Category) -> Result<Arc<Joke>, DomainError> {
        match catalog.random_joke(Some(category)) {
            Ok(joke) => Ok(joke),
            Err(e) if e.is_empty_category() && !category.is_default() => {
                warn!("{}, falling back to {}", e, Category::Default);
                catalog.random_joke(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Show the question for an already drawn joke and start the countdown.
    pub fn begin(
        joke: Arc<Joke>,
        category: Category,
        config: &RevealConfig,
        outbox: Outbox,
    ) -> Result<Self, TellJokeError> {
        let id = SessionId::new();
        let (state, _) = watch::channel(SessionState::Selecting);
        let session = Self {
            id,
            joke,
            category,
            state: Arc::new(state),
            timer: RevealTimer::new(config.tick_interval),
        };

        info!(
            "Session {} telling {} joke, punchline in {:?}: {}",
            id,
            session.joke.category(),
            config.reveal_delay(),
            session.joke.question()
        );
        send(
            &outbox,
            SessionEvent::QuestionShown {
                session_id: id,
                joke: Arc::clone(&session.joke),
            },
        );
        session.transition(SessionState::Revealing)?;

        let tick_state = Arc::clone(&session.state);
        let tick_outbox = outbox.clone();
        let on_tick = move |seconds_remaining: u32| {
            if *tick_state.borrow() == SessionState::Revealing {
                debug!("Session {} reveal in {}s", id, seconds_remaining);
                send(
                    &tick_outbox,
                    SessionEvent::CountdownTick {
                        session_id: id,
                        seconds_remaining,
                    },
                );
            }
        };

        let reveal_state = Arc::clone(&session.state);
        let reveal_joke = Arc::clone(&session.joke);
        let on_expire = move || reveal(id, &reveal_joke, &reveal_state, &outbox);

        if let Err(e) = session
            .timer
            .start(config.countdown_seconds, on_tick, on_expire)
        {
            session.cancel();
            return Err(e.into());
        }

        Ok(session)
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn joke(&self) -> &Arc<Joke> {
        &self.joke
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn handle(&self) -> SessionHandle {
        SessionHandle {
            id: self.id,
            joke: Arc::clone(&self.joke),
            category: self.category,
            state: self.state.subscribe(),
        }
    }

    /// Supersede the session.
    ///
    /// Stops the timer first, so a reveal either completed before this call
    /// or never happens. Safe to call on a terminal session.
    pub fn cancel(&self) {
        self.timer.cancel();
        let superseded = self.state.send_if_modified(|state| {
            if state.can_transition_to(SessionState::Superseded) {
                *state = SessionState::Superseded;
                true
            } else {
                false
            }
        });
        if superseded {
            info!("Session {} superseded", self.id);
        }
    }

    fn transition(&self, to: SessionState) -> Result<(), DomainError> {
        transition(&self.state, to)
    }
}

impl Drop for JokeSession {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Expiry callback: reveal the punchline and archive, at most once.
fn reveal(id: SessionId, joke: &Joke, state: &watch::Sender<SessionState>, outbox: &Outbox) {
    if let Err(e) = transition(state, SessionState::Answered) {
        debug!("Session {} not revealed: {}", id, e);
        return;
    }

    send(
        outbox,
        SessionEvent::AnswerShown {
            session_id: id,
            text: joke.answer().to_string(),
            image_key: joke.category().image_key(),
        },
    );
    send(outbox, SessionEvent::Archived(ArchiveRecord::new(id, joke)));

    if let Err(e) = transition(state, SessionState::Archived) {
        warn!("Session {}: {}", id, e);
    }
}

fn transition(state: &watch::Sender<SessionState>, to: SessionState) -> Result<(), DomainError> {
    let mut result = Ok(());
    state.send_if_modified(|current| match current.transition(to) {
        Ok(next) => {
            debug!("Session state {} -> {}", current, next);
            *current = next;
            true
        }
        Err(e) => {
            result = Err(e);
            false
        }
    });
    result
}

fn send(outbox: &Outbox, event: SessionEvent) {
    if outbox.send(event).is_err() {
        debug!("Session outbox closed; event dropped");
    }
}

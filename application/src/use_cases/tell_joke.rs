//! Tell Joke use case
//!
//! Owns one display slot: at most one live [`JokeSession`] at a time, plus a
//! dispatcher task that forwards queued [`SessionEvent`]s to the display
//! thread and the archive task, each in order.

use super::joke_session::{JokeSession, Outbox, SessionEvent, SessionHandle, TellJokeError};
use crate::config::RevealConfig;
use crate::ports::archive::ArchiveSink;
use crate::ports::display::DisplaySink;
use jokebook_domain::{ArchiveRecord, Category, CategoryResolver, JokeCatalog};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

struct Slot {
    current: Option<JokeSession>,
    last_category: Category,
    outbox: Option<Outbox>,
}

/// Use case for telling jokes on a single display slot
pub struct TellJokeUseCase {
    catalog: Arc<JokeCatalog>,
    config: RevealConfig,
    slot: Mutex<Slot>,
    dispatcher: Mutex<Option<JoinHandle<()>>>,
}

impl TellJokeUseCase {
    /// Create the slot and spawn its dispatcher.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(
        catalog: Arc<JokeCatalog>,
        display: Arc<dyn DisplaySink>,
        archive: Arc<dyn ArchiveSink>,
        config: RevealConfig,
    ) -> Self {
        let (outbox, rx) = mpsc::unbounded_channel();
        let dispatcher = tokio::spawn(dispatch_events(rx, display, archive));
        Self {
            catalog,
            config,
            slot: Mutex::new(Slot {
                current: None,
                last_category: Category::Default,
                outbox: Some(outbox),
            }),
            dispatcher: Mutex::new(Some(dispatcher)),
        }
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<JokeCatalog> {
        &self.catalog
    }

    /// Start a new session from free-form category hints.
    ///
    /// A joke is drawn before the running session (if any) is superseded, so
    /// a failed selection leaves the current session untouched.
    pub fn request_joke<S: AsRef<str>>(&self, hints: &[S]) -> Result<SessionHandle, TellJokeError> {
        let category = CategoryResolver::resolve(Some(hints));
        self.request_category(category)
    }

    /// Start a new session for an already resolved category.
    pub fn request_category(&self, category: Category) -> Result<SessionHandle, TellJokeError> {
        let mut slot = self.lock_slot();
        let outbox = slot.outbox.clone().ok_or(TellJokeError::SlotClosed)?;

        let joke = JokeSession::draw(&self.catalog, category)?;

        if let Some(previous) = slot.current.take() {
            previous.cancel();
        }

        let session = JokeSession::begin(joke, category, &self.config, outbox)?;
        let handle = session.handle();
        slot.current = Some(session);
        slot.last_category = category;
        Ok(handle)
    }

    /// Tell another joke from the last requested category.
    pub fn tell_another(&self) -> Result<SessionHandle, TellJokeError> {
        let category = self.last_category();
        debug!("Telling another {} joke", category);
        self.request_category(category)
    }

    /// Cancel the current session and release the display.
    pub fn quit(&self) {
        let mut slot = self.lock_slot();
        if let Some(session) = slot.current.take() {
            session.cancel();
        }
        if let Some(outbox) = &slot.outbox
            && outbox.send(SessionEvent::DisplayReleased).is_err()
        {
            debug!("Dispatcher gone; display release dropped");
        }
    }

    pub fn current(&self) -> Option<SessionHandle> {
        self.lock_slot().current.as_ref().map(JokeSession::handle)
    }

    pub fn last_category(&self) -> Category {
        self.lock_slot().last_category
    }

    /// Cancel any running session, flush queued events and stop the dispatcher.
    ///
    /// Later requests fail with [`TellJokeError::SlotClosed`].
    pub async fn shutdown(&self) {
        {
            let mut slot = self.lock_slot();
            if let Some(session) = slot.current.take() {
                session.cancel();
            }
            slot.outbox = None;
        }

        let dispatcher = self
            .dispatcher
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = dispatcher
            && let Err(e) = handle.await
        {
            warn!("Dispatcher task failed: {}", e);
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fan queued session events out to the sinks.
///
/// Display events go to a dedicated display thread and archive records to an
/// archive task, each in queue order. Neither sink can hold up the other or
/// the runtime the timers run on. Runs until every outbox sender (the slot's
/// and each session timer's) is gone, then drains both sinks.
async fn dispatch_events(
    mut rx: mpsc::UnboundedReceiver<SessionEvent>,
    display: Arc<dyn DisplaySink>,
    archive: Arc<dyn ArchiveSink>,
) {
    let (display_tx, display_rx) = mpsc::unbounded_channel();
    let (display_done_tx, display_done) = oneshot::channel();
    if let Err(e) = std::thread::Builder::new()
        .name("jokebook-display".to_string())
        .spawn(move || {
            render_events(display_rx, display.as_ref());
            let _ = display_done_tx.send(());
        })
    {
        warn!("Could not start display thread, display disabled: {}", e);
    }

    let (archive_tx, archive_rx) = mpsc::unbounded_channel();
    let archiver = tokio::spawn(archive_records(archive_rx, archive));

    while let Some(event) = rx.recv().await {
        match event {
            SessionEvent::Archived(record) => {
                if archive_tx.send(record).is_err() {
                    warn!("Archive task gone; archive record dropped");
                }
            }
            event => {
                if display_tx.send(event).is_err() {
                    debug!("Display thread gone; event dropped");
                }
            }
        }
    }

    drop(archive_tx);
    drop(display_tx);
    if let Err(e) = archiver.await {
        warn!("Archive task failed: {}", e);
    }
    if display_done.await.is_err() {
        debug!("Display thread ended without draining");
    }
    debug!("Session dispatcher stopped");
}

/// Display thread body. A panicking sink loses only the event it panicked on.
fn render_events(mut rx: mpsc::UnboundedReceiver<SessionEvent>, display: &dyn DisplaySink) {
    while let Some(event) = rx.blocking_recv() {
        let rendered = panic::catch_unwind(AssertUnwindSafe(|| render(display, &event)));
        if rendered.is_err() {
            warn!("Display sink panicked; {} dropped", event_name(&event));
        }
    }
}

fn render(display: &dyn DisplaySink, event: &SessionEvent) {
    match event {
        SessionEvent::QuestionShown { joke, .. } => display.on_question_shown(joke),
        SessionEvent::CountdownTick {
            seconds_remaining, ..
        } => display.on_countdown_tick(*seconds_remaining),
        SessionEvent::AnswerShown {
            text, image_key, ..
        } => display.on_answer_shown(text, image_key),
        SessionEvent::DisplayReleased => display.on_display_released(),
        SessionEvent::Archived(_) => {}
    }
}

fn event_name(event: &SessionEvent) -> &'static str {
    match event {
        SessionEvent::QuestionShown { .. } => "question",
        SessionEvent::CountdownTick { .. } => "countdown tick",
        SessionEvent::AnswerShown { .. } => "answer",
        SessionEvent::Archived(_) => "archive record",
        SessionEvent::DisplayReleased => "display release",
    }
}

async fn archive_records(
    mut rx: mpsc::UnboundedReceiver<ArchiveRecord>,
    archive: Arc<dyn ArchiveSink>,
) {
    while let Some(record) = rx.recv().await {
        match archive.archive(&record).await {
            Ok(()) => info!("Archived joke from session {}", record.session_id),
            Err(e) => warn!(
                "Failed to archive joke from session {}: {}",
                record.session_id, e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::archive::{ArchiveError, MemoryArchive};
    use async_trait::async_trait;
    use jokebook_domain::{ArchiveRecord, DomainError, Joke, SessionState};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq)]
    enum Shown {
        Question(String),
        Tick(u32),
        Answer(String, String),
        Released,
    }

    #[derive(Default)]
    struct RecordingDisplay {
        shown: Mutex<Vec<Shown>>,
    }

    impl RecordingDisplay {
        fn shown(&self) -> Vec<Shown> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl DisplaySink for RecordingDisplay {
        fn on_question_shown(&self, joke: &Joke) {
            self.shown
                .lock()
                .unwrap()
                .push(Shown::Question(joke.question().to_string()));
        }

        fn on_countdown_tick(&self, seconds_remaining: u32) {
            self.shown.lock().unwrap().push(Shown::Tick(seconds_remaining));
        }

        fn on_answer_shown(&self, text: &str, image_key: &str) {
            self.shown
                .lock()
                .unwrap()
                .push(Shown::Answer(text.to_string(), image_key.to_string()));
        }

        fn on_display_released(&self) {
            self.shown.lock().unwrap().push(Shown::Released);
        }
    }

    struct FailingArchive;

    #[async_trait]
    impl ArchiveSink for FailingArchive {
        async fn archive(&self, _record: &ArchiveRecord) -> Result<(), ArchiveError> {
            Err(ArchiveError::Io(std::io::Error::other("disk full")))
        }
    }

    struct SlowArchive {
        inner: MemoryArchive,
    }

    #[async_trait]
    impl ArchiveSink for SlowArchive {
        async fn archive(&self, record: &ArchiveRecord) -> Result<(), ArchiveError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            self.inner.archive(record).await
        }
    }

    /// Panics on every tick but still records answers.
    #[derive(Default)]
    struct PanickingDisplay {
        answers: Mutex<Vec<String>>,
    }

    impl DisplaySink for PanickingDisplay {
        fn on_question_shown(&self, _joke: &Joke) {}

        fn on_countdown_tick(&self, _seconds_remaining: u32) {
            panic!("display went away");
        }

        fn on_answer_shown(&self, text: &str, _image_key: &str) {
            self.answers.lock().unwrap().push(text.to_string());
        }
    }

    /// Blocks its thread on every question.
    struct StallingDisplay;

    impl DisplaySink for StallingDisplay {
        fn on_question_shown(&self, _joke: &Joke) {
            std::thread::sleep(Duration::from_millis(1500));
        }

        fn on_countdown_tick(&self, _seconds_remaining: u32) {}

        fn on_answer_shown(&self, _text: &str, _image_key: &str) {}
    }

    fn scenario_catalog() -> Arc<JokeCatalog> {
        Arc::new(JokeCatalog::new([
            Joke::new("Q1", "A1", Category::Chicken),
            Joke::new("Q2", "A2", Category::Lawyer),
        ]))
    }

    fn setup(
        archive: Arc<dyn ArchiveSink>,
    ) -> (TellJokeUseCase, Arc<RecordingDisplay>) {
        let display = Arc::new(RecordingDisplay::default());
        let use_case = TellJokeUseCase::new(
            scenario_catalog(),
            display.clone(),
            archive,
            RevealConfig::default(),
        );
        (use_case, display)
    }

    fn full_reveal(question: &str, answer: &str, image_key: &str) -> Vec<Shown> {
        let mut expected = vec![Shown::Question(question.to_string())];
        expected.extend((0..=5).rev().map(Shown::Tick));
        expected.push(Shown::Answer(answer.to_string(), image_key.to_string()));
        expected
    }

    #[tokio::test(start_paused = true)]
    async fn test_chicken_scenario_end_to_end() {
        let archive = Arc::new(MemoryArchive::new());
        let (use_case, display) = setup(archive.clone());

        let handle = use_case.request_joke(&["chicken"]).unwrap();
        assert_eq!(handle.wait_terminal().await, SessionState::Archived);
        use_case.shutdown().await;

        assert_eq!(display.shown(), full_reveal("Q1", "A1", "chicken"));
        let records = archive.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].question, "Q1");
        assert_eq!(records[0].answer, "A1");
        assert_eq!(records[0].category, Category::Chicken);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_request_supersedes_running_session() {
        let archive = Arc::new(MemoryArchive::new());
        let (use_case, display) = setup(archive.clone());

        let first = use_case.request_joke(&["chicken"]).unwrap();
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let second = use_case.request_joke(&["LAWYER"]).unwrap();
        assert_eq!(first.state(), SessionState::Superseded);
        assert_eq!(second.wait_terminal().await, SessionState::Archived);
        tokio::time::sleep(Duration::from_secs(10)).await;
        use_case.shutdown().await;

        let mut expected = vec![
            Shown::Question("Q1".to_string()),
            Shown::Tick(5),
            Shown::Tick(4),
        ];
        expected.extend(full_reveal("Q2", "A2", "judge_judy"));
        assert_eq!(display.shown(), expected);

        let records = archive.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].session_id, second.id());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tell_another_reuses_last_category() {
        let archive = Arc::new(MemoryArchive::new());
        let (use_case, _display) = setup(archive.clone());

        assert_eq!(use_case.last_category(), Category::Default);
        use_case
            .request_joke(&["lawyer"])
            .unwrap()
            .wait_terminal()
            .await;

        let another = use_case.tell_another().unwrap();
        assert_eq!(another.category(), Category::Lawyer);
        assert_eq!(another.joke().question(), "Q2");
        another.wait_terminal().await;
        use_case.shutdown().await;

        assert_eq!(archive.records().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_cancels_and_releases_display() {
        let archive = Arc::new(MemoryArchive::new());
        let (use_case, display) = setup(archive.clone());

        let handle = use_case.request_joke(&["chicken"]).unwrap();
        tokio::time::sleep(Duration::from_millis(1500)).await;
        use_case.quit();

        assert_eq!(handle.state(), SessionState::Superseded);
        assert!(use_case.current().is_none());
        tokio::time::sleep(Duration::from_secs(10)).await;
        use_case.shutdown().await;

        assert_eq!(
            display.shown(),
            vec![
                Shown::Question("Q1".to_string()),
                Shown::Tick(5),
                Shown::Released,
            ]
        );
        assert!(archive.records().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_selection_keeps_current_session() {
        let display = Arc::new(RecordingDisplay::default());
        let use_case = TellJokeUseCase::new(
            Arc::new(JokeCatalog::new(Vec::new())),
            display.clone(),
            Arc::new(MemoryArchive::new()),
            RevealConfig::default(),
        );

        let err = use_case.request_joke(&["anti"]).unwrap_err();
        assert!(matches!(
            err,
            TellJokeError::Domain(DomainError::EmptyCategory(Category::Default))
        ));
        assert!(use_case.current().is_none());
        assert_eq!(use_case.last_category(), Category::Default);
        use_case.shutdown().await;
        assert!(display.shown().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_archive_failure_does_not_stall_session() {
        let (use_case, display) = setup(Arc::new(FailingArchive));

        let handle = use_case.request_joke(&["chicken"]).unwrap();
        assert_eq!(handle.wait_terminal().await, SessionState::Archived);
        use_case.shutdown().await;

        assert_eq!(display.shown(), full_reveal("Q1", "A1", "chicken"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_archive_does_not_delay_next_countdown() {
        let archive = Arc::new(SlowArchive {
            inner: MemoryArchive::new(),
        });
        let (use_case, _display) = setup(archive.clone());

        let start = tokio::time::Instant::now();
        use_case
            .request_joke(&["chicken"])
            .unwrap()
            .wait_terminal()
            .await;
        let second = use_case.request_joke(&["lawyer"]).unwrap();
        assert_eq!(second.wait_terminal().await, SessionState::Archived);
        assert!(start.elapsed() < Duration::from_secs(13));

        use_case.shutdown().await;
        assert_eq!(archive.inner.records().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_display_panic_keeps_archive_and_later_events() {
        let archive = Arc::new(MemoryArchive::new());
        let display = Arc::new(PanickingDisplay::default());
        let use_case = TellJokeUseCase::new(
            scenario_catalog(),
            display.clone(),
            archive.clone(),
            RevealConfig::default(),
        );

        let first = use_case.request_joke(&["chicken"]).unwrap();
        assert_eq!(first.wait_terminal().await, SessionState::Archived);
        let second = use_case.request_joke(&["lawyer"]).unwrap();
        assert_eq!(second.wait_terminal().await, SessionState::Archived);
        use_case.shutdown().await;

        let records = archive.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].session_id, first.id());
        assert_eq!(records[1].session_id, second.id());
        assert_eq!(*display.answers.lock().unwrap(), vec!["A1", "A2"]);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_slow_display_does_not_stall_countdown() {
        let archive = Arc::new(MemoryArchive::new());
        let config = RevealConfig::default()
            .with_countdown_seconds(2)
            .with_tick_interval(Duration::from_millis(200));
        let use_case = TellJokeUseCase::new(
            scenario_catalog(),
            Arc::new(StallingDisplay),
            archive.clone(),
            config.clone(),
        );

        let start = std::time::Instant::now();
        let handle = use_case.request_joke(&["chicken"]).unwrap();
        assert_eq!(handle.wait_terminal().await, SessionState::Archived);
        assert!(start.elapsed() < config.reveal_delay() + Duration::from_millis(600));

        use_case.shutdown().await;
        assert_eq!(archive.records().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_requests_after_shutdown_fail() {
        let (use_case, _display) = setup(Arc::new(MemoryArchive::new()));
        use_case.shutdown().await;

        assert!(matches!(
            use_case.request_joke(&["chicken"]),
            Err(TellJokeError::SlotClosed)
        ));
    }
}

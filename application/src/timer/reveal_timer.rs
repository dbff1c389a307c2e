//! Tokio-driven reveal timer.
//!
//! Runs a [`Countdown`] on a spawned task, one tick per interval. The
//! countdown and the callbacks sit behind one mutex: the tick task holds it
//! while invoking a callback, and [`RevealTimer::cancel`] takes it to flip the
//! state and drop the callbacks. Once `cancel` returns, no callback can run.

use jokebook_domain::{Countdown, TickOutcome, TimerState};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

type TickCallback = Box<dyn FnMut(u32) + Send>;
type ExpireCallback = Box<dyn FnOnce() + Send>;

/// Errors from driving a reveal timer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("Reveal timer already started (state: {0:?})")]
    AlreadyStarted(TimerState),
}

struct TimerInner {
    countdown: Countdown,
    on_tick: Option<TickCallback>,
    on_expire: Option<ExpireCallback>,
}

impl TimerInner {
    fn release_callbacks(&mut self) {
        self.on_tick = None;
        self.on_expire = None;
    }
}

/// One-shot countdown that calls back once per tick and once on expiry.
///
/// Owned by exactly one session. Dropping a running timer cancels it.
pub struct RevealTimer {
    tick_interval: Duration,
    inner: Arc<Mutex<TimerInner>>,
    cancellation: CancellationToken,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl RevealTimer {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            tick_interval,
            inner: Arc::new(Mutex::new(TimerInner {
                countdown: Countdown::new(),
                on_tick: None,
                on_expire: None,
            })),
            cancellation: CancellationToken::new(),
            task: Mutex::new(None),
        }
    }

    /// Start counting down from `initial_seconds`.
    ///
    /// `on_tick` receives `initial_seconds, ..., 1, 0`, one value per
    /// interval, and `on_expire` runs right after the tick that reported 0.
    /// Must be called from within a tokio runtime.
    pub fn start<T, E>(&self, initial_seconds: u32, on_tick: T, on_expire: E) -> Result<(), TimerError>
    where
        T: FnMut(u32) + Send + 'static,
        E: FnOnce() + Send + 'static,
    {
        {
            let mut inner = lock(&self.inner);
            if !inner.countdown.start(initial_seconds) {
                return Err(TimerError::AlreadyStarted(inner.countdown.state()));
            }
            inner.on_tick = Some(Box::new(on_tick));
            inner.on_expire = Some(Box::new(on_expire));
        }

        debug!(
            "Reveal timer started: {}s at {:?} per tick",
            initial_seconds, self.tick_interval
        );

        let handle = tokio::spawn(run_ticks(
            Arc::clone(&self.inner),
            self.cancellation.clone(),
            self.tick_interval,
        ));
        *lock(&self.task) = Some(handle);
        Ok(())
    }

    /// Stop a running timer.
    ///
    /// Returns true if this call cancelled it. A no-op once the timer has
    /// expired or was already cancelled.
    pub fn cancel(&self) -> bool {
        let cancelled = {
            let mut inner = lock(&self.inner);
            let cancelled = inner.countdown.cancel();
            if cancelled {
                inner.release_callbacks();
            }
            cancelled
        };
        self.cancellation.cancel();
        if cancelled {
            debug!("Reveal timer cancelled");
        }
        cancelled
    }

    pub fn state(&self) -> TimerState {
        lock(&self.inner).countdown.state()
    }

    /// Value the next tick will report.
    pub fn remaining(&self) -> u32 {
        lock(&self.inner).countdown.remaining()
    }

    /// Wait for the tick task to finish, by expiry or cancellation.
    pub async fn join(&self) {
        let handle = lock(&self.task).take();
        if let Some(handle) = handle
            && let Err(e) = handle.await
            && !e.is_cancelled()
        {
            warn!("Reveal timer task failed: {}", e);
        }
    }
}

impl Drop for RevealTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_ticks(
    inner: Arc<Mutex<TimerInner>>,
    cancellation: CancellationToken,
    tick_interval: Duration,
) {
    loop {
        tokio::select! {
            biased;
            _ = cancellation.cancelled() => return,
            _ = tokio::time::sleep(tick_interval) => {}
        }

        let mut guard = lock(&inner);
        match guard.countdown.tick() {
            TickOutcome::Continue(remaining) => {
                if let Some(on_tick) = guard.on_tick.as_mut() {
                    on_tick(remaining);
                }
            }
            TickOutcome::Expire(remaining) => {
                if let Some(on_tick) = guard.on_tick.as_mut() {
                    on_tick(remaining);
                }
                let on_expire = guard.on_expire.take();
                guard.release_callbacks();
                if let Some(on_expire) = on_expire {
                    on_expire();
                }
                debug!("Reveal timer expired");
                return;
            }
            TickOutcome::Inactive => return,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

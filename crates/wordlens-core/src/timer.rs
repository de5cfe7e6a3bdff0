//! Timer capability for deferred, cancellable work.
//!
//! The engine needs exactly one kind of deferred work: clearing the copy
//! acknowledgment after the feedback window. Hosts pick the clock:
//! - [`TokioTimer`] for async hosts running a tokio runtime
//! - [`ManualTimer`] for hosts that drive their own event loop (and tests)

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

/// Work run when a timer fires.
pub type TimerTask = Box<dyn FnOnce() + Send + 'static>;

/// Schedules deferred tasks that can be cancelled before they fire.
pub trait Timer {
    /// Identifies one scheduled task.
    type Handle;

    /// Runs `task` once `delay` has elapsed, unless cancelled first.
    fn schedule(&self, delay: Duration, task: TimerTask) -> Self::Handle;

    /// Cancels a scheduled task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, handle: Self::Handle);
}

/// Timer backed by `tokio::time::sleep` on a runtime handle.
#[derive(Debug, Clone)]
pub struct TokioTimer {
    runtime: tokio::runtime::Handle,
}

/// Cancellation handle for a [`TokioTimer`] task.
#[derive(Debug)]
pub struct TokioTimerHandle {
    cancel: CancellationToken,
}

impl TokioTimer {
    pub fn new(runtime: tokio::runtime::Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime the caller is running on.
    pub fn current() -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .context("TokioTimer requires a running tokio runtime")?;
        Ok(Self::new(runtime))
    }
}

impl Timer for TokioTimer {
    type Handle = TokioTimerHandle;

    fn schedule(&self, delay: Duration, task: TimerTask) -> Self::Handle {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        self.runtime.spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => task(),
            }
        });

        TokioTimerHandle { cancel }
    }

    fn cancel(&self, handle: Self::Handle) {
        handle.cancel.cancel();
    }
}

/// Deterministic timer whose clock only moves on [`ManualTimer::advance`].
///
/// Clones share the same clock and queue, so a host can keep one clone and
/// hand another to the engine.
#[derive(Clone, Default)]
pub struct ManualTimer {
    inner: Arc<Mutex<ManualTimerInner>>,
}

/// Handle for a task scheduled on a [`ManualTimer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ManualTimerHandle(u64);

#[derive(Default)]
struct ManualTimerInner {
    now: Duration,
    next_id: u64,
    pending: Vec<ScheduledTask>,
}

struct ScheduledTask {
    id: u64,
    due: Duration,
    task: TimerTask,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time elapsed on this clock since creation.
    pub fn now(&self) -> Duration {
        self.lock().now
    }

    /// Number of tasks scheduled and not yet run or cancelled.
    pub fn pending(&self) -> usize {
        self.lock().pending.len()
    }

    /// Moves the clock forward, running every task that comes due.
    ///
    /// Tasks run in deadline order (ties in scheduling order) with the clock
    /// set to their deadline. The lock is released while a task runs, so a
    /// task may schedule or cancel further work.
    pub fn advance(&self, by: Duration) {
        let target = self.lock().now + by;

        loop {
            let next = {
                let mut inner = self.lock();
                let due_index = inner
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, scheduled)| scheduled.due <= target)
                    .min_by_key(|(_, scheduled)| (scheduled.due, scheduled.id))
                    .map(|(index, _)| index);

                match due_index {
                    Some(index) => {
                        let scheduled = inner.pending.remove(index);
                        inner.now = scheduled.due;
                        Some(scheduled.task)
                    }
                    None => {
                        inner.now = target;
                        None
                    }
                }
            };

            match next {
                Some(task) => task(),
                None => break,
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, ManualTimerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for ManualTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("ManualTimer")
            .field("now", &inner.now)
            .field("pending", &inner.pending.len())
            .finish()
    }
}

impl Timer for ManualTimer {
    type Handle = ManualTimerHandle;

    fn schedule(&self, delay: Duration, task: TimerTask) -> Self::Handle {
        let mut inner = self.lock();
        let id = inner.next_id;
        inner.next_id = inner.next_id.wrapping_add(1);
        let due = inner.now + delay;
        inner.pending.push(ScheduledTask { id, due, task });
        ManualTimerHandle(id)
    }

    fn cancel(&self, handle: Self::Handle) {
        self.lock()
            .pending
            .retain(|scheduled| scheduled.id != handle.0);
    }
}

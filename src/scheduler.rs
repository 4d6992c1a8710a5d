//! Time source for time-based producers and operators.
//!
//! A [`Scheduler`] runs a task after an optional delay and keeps running it
//! for as long as it asks to sleep again. Everything in this crate that
//! involves time (`timer`, `interval`, `take_for`) goes through it, so tests
//! can swap real time for [`TestScheduler`]'s virtual clock.
//!
//! Implementations:
//! - [`TestScheduler`]: virtual time, driven by `advance_by`/`flush`
//! - `futures::executor::LocalSpawner` (feature `timer`)
//! - [`TokioLocalScheduler`] (feature `tokio-scheduler`)

use futures::future::AbortHandle;
use std::{
  cell::{Cell, RefCell},
  rc::Rc,
  time::Duration,
};

use crate::subscription::Subscription;

pub mod test_scheduler;
pub use test_scheduler::TestScheduler;

#[cfg(all(feature = "futures-scheduler", feature = "timer"))]
mod local_spawner;

#[cfg(feature = "tokio-scheduler")]
mod tokio_scheduler;
#[cfg(feature = "tokio-scheduler")]
pub use tokio_scheduler::TokioLocalScheduler;

/// What a scheduled task wants next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
  /// Done, never run again.
  Finished,
  /// Run again after the duration.
  Sleeping(Duration),
}

pub trait Scheduler: Clone {
  /// Runs `task` after `delay` (or as soon as possible), then again after
  /// every `TaskState::Sleeping` it returns, until it returns
  /// `TaskState::Finished` or the handle is unsubscribed.
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnMut() -> TaskState + 'static;

  /// Runs `f` once after `delay`.
  fn schedule_once<F>(&self, delay: Duration, f: F) -> TaskHandle
  where
    F: FnOnce() + 'static,
  {
    let mut f = Some(f);
    self.schedule(
      move || {
        if let Some(f) = f.take() {
          f();
        }
        TaskState::Finished
      },
      Some(delay),
    )
  }

  /// Runs `f` every `period`, the first time after `initial_delay` (or one
  /// `period` when `None`). `f` receives the zero based tick index.
  fn schedule_repeating<F>(
    &self, period: Duration, initial_delay: Option<Duration>, mut f: F,
  ) -> TaskHandle
  where
    F: FnMut(usize) + 'static,
  {
    let mut tick = 0;
    self.schedule(
      move || {
        f(tick);
        tick += 1;
        TaskState::Sleeping(period)
      },
      Some(initial_delay.unwrap_or(period)),
    )
  }
}

/// Cancellation token of a scheduled task.
///
/// Unsubscribing guarantees the task will not run again, including when it
/// is unsubscribed from inside its own run.
#[derive(Clone, Default)]
pub struct TaskHandle(Rc<TaskHandleInner>);

#[derive(Default)]
struct TaskHandleInner {
  closed: Cell<bool>,
  abort: RefCell<Option<AbortHandle>>,
}

impl TaskHandle {
  pub fn new() -> Self { Self::default() }

  /// A handle that is already finished.
  pub fn finished() -> Self {
    let handle = Self::default();
    handle.mark_finished();
    handle
  }

  /// Called by schedulers when the task ran to its end.
  pub(crate) fn mark_finished(&self) { self.0.closed.set(true); }

  /// Lets a scheduler cancel the backing future on unsubscribe.
  #[allow(dead_code)]
  pub(crate) fn set_abort_handle(&self, handle: AbortHandle) {
    if self.is_closed() {
      handle.abort();
    } else {
      *self.0.abort.borrow_mut() = Some(handle);
    }
  }
}

impl Subscription for TaskHandle {
  fn unsubscribe(&mut self) {
    if !self.0.closed.replace(true) {
      tracing::trace!("scheduled task cancelled");
      if let Some(abort) = self.0.abort.borrow_mut().take() {
        abort.abort();
      }
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.closed.get() }
}

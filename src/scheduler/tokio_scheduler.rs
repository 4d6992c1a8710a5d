use futures::future::abortable;
use std::time::Duration;

use super::{Scheduler, TaskHandle, TaskState};
use crate::subscription::Subscription;

/// Runs tasks with `tokio::task::spawn_local`.
///
/// Must be used from inside a `tokio::task::LocalSet`; tokio panics
/// otherwise.
#[derive(Clone, Copy, Default, Debug)]
pub struct TokioLocalScheduler;

impl Scheduler for TokioLocalScheduler {
  fn schedule<T>(&self, mut task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnMut() -> TaskState + 'static,
  {
    let handle = TaskHandle::new();
    let running = handle.clone();
    let (fut, abort) = abortable(async move {
      if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
      }
      while !running.is_closed() {
        match task() {
          TaskState::Finished => break,
          TaskState::Sleeping(d) => tokio::time::sleep(d).await,
        }
      }
      running.mark_finished();
    });
    handle.set_abort_handle(abort);
    tokio::task::spawn_local(fut);
    handle
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[tokio::test(flavor = "current_thread")]
  async fn interval_on_local_set() {
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    let local = tokio::task::LocalSet::new();
    local
      .run_until(async move {
        observable::interval(Duration::from_millis(1), TokioLocalScheduler)
          .take(3)
          .subscribe(move |i| v.borrow_mut().push(i));
        tokio::time::sleep(Duration::from_millis(50)).await;
      })
      .await;

    assert_eq!(*values.borrow(), vec![0, 1, 2]);
  }
}

use futures::{executor::LocalSpawner, future::abortable, task::LocalSpawnExt};
use std::time::Duration;

use super::{Scheduler, TaskHandle, TaskState};
use crate::subscription::Subscription;

/// Runs tasks as futures on a `futures::executor::LocalPool`, sleeping in
/// real time between runs.
impl Scheduler for LocalSpawner {
  fn schedule<T>(&self, mut task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnMut() -> TaskState + 'static,
  {
    let handle = TaskHandle::new();
    let running = handle.clone();
    let fut = async move {
      if let Some(delay) = delay {
        futures_time::task::sleep(delay.into()).await;
      }
      while !running.is_closed() {
        match task() {
          TaskState::Finished => break,
          TaskState::Sleeping(d) => {
            futures_time::task::sleep(d.into()).await;
          }
        }
      }
      running.mark_finished();
    };

    let (fut, abort) = abortable(fut);
    handle.set_abort_handle(abort);
    if let Err(err) = self.spawn_local(async move {
      let _ = fut.await;
    }) {
      tracing::error!(error = %err, "local spawner rejected a scheduled task");
      handle.mark_finished();
    }
    handle
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use futures::executor::LocalPool;
  use std::{cell::RefCell, rc::Rc, time::Duration};

  #[test]
  fn runs_repeating_task_until_finished() {
    let mut local = LocalPool::new();
    let runs = Rc::new(RefCell::new(0));
    let r = runs.clone();
    let handle = local.spawner().schedule(
      move || {
        *r.borrow_mut() += 1;
        if *r.borrow() == 3 {
          TaskState::Finished
        } else {
          TaskState::Sleeping(Duration::from_millis(1))
        }
      },
      Some(Duration::from_millis(1)),
    );
    local.run();

    assert_eq!(*runs.borrow(), 3);
    assert!(handle.is_closed());
  }

  #[test]
  fn unsubscribed_task_never_runs() {
    let mut local = LocalPool::new();
    let runs = Rc::new(RefCell::new(0));
    let r = runs.clone();
    let mut handle = local
      .spawner()
      .schedule_once(Duration::from_millis(5), move || *r.borrow_mut() += 1);
    handle.unsubscribe();
    local.run();

    assert_eq!(*runs.borrow(), 0);
  }
}

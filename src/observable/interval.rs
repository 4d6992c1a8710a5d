use crate::prelude::*;
use std::{convert::Infallible, time::Duration};

/// Creates an observable which will fire `period` time into the future,
/// and will repeat every `period` after. Emits `0, 1, 2, ..` and never
/// completes; unsubscribing stops the periodic task.
pub fn interval<S>(period: Duration, scheduler: S) -> IntervalObservable<S> {
  IntervalObservable { scheduler, period, delay: period }
}

/// Like [`interval`], but the first value fires after `initial_delay`.
pub fn interval_with_delay<S>(
  initial_delay: Duration, period: Duration, scheduler: S,
) -> IntervalObservable<S> {
  IntervalObservable { scheduler, period, delay: initial_delay }
}

#[derive(Clone)]
pub struct IntervalObservable<S> {
  scheduler: S,
  period: Duration,
  delay: Duration,
}

impl<S, O> Observable<usize, Infallible, O> for IntervalObservable<S>
where
  O: Observer<usize, Infallible> + 'static,
  S: Scheduler,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let Self { scheduler, period, delay } = self;
    let mut seq = 0;
    scheduler.schedule(
      move || {
        if observer.is_finished() {
          return TaskState::Finished;
        }
        observer.next(seq);
        seq += 1;
        if observer.is_finished() { TaskState::Finished } else { TaskState::Sleeping(period) }
      },
      Some(delay),
    )
  }
}

impl<S> ObservableExt<usize, Infallible> for IntervalObservable<S> {}

use crate::prelude::*;
use futures::{
  future::{abortable, Future},
  task::{LocalSpawn, LocalSpawnExt},
};
use std::convert::Infallible;

/// Converts a `Future` to an observable that emits its output once and
/// completes.
///
/// The future is spawned on `spawner` at subscribe time. An `Err` output is
/// emitted as a normal value; use [`from_future_result`] to route it to the
/// error channel instead. Unsubscribing before the future resolves aborts it.
///
/// ```
/// use rxlite::prelude::*;
/// use futures::{executor::LocalPool, future};
///
/// let mut pool = LocalPool::new();
/// observable::from_future(future::ready(1), pool.spawner())
///   .subscribe(|v| println!("{v}"));
/// pool.run();
/// ```
pub fn from_future<F, S>(future: F, spawner: S) -> FutureObservable<F, S>
where
  F: Future,
{
  FutureObservable { future, spawner }
}

#[derive(Clone)]
pub struct FutureObservable<F, S> {
  future: F,
  spawner: S,
}

impl<F, S, O> Observable<F::Output, Infallible, O> for FutureObservable<F, S>
where
  F: Future + 'static,
  S: LocalSpawn,
  O: Observer<F::Output, Infallible> + 'static,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let Self { future, spawner } = self;
    spawn_abortable(&spawner, async move {
      let value = future.await;
      if !observer.is_finished() {
        observer.next(value);
        observer.complete();
      }
    })
  }
}

impl<F: Future, S> ObservableExt<F::Output, Infallible> for FutureObservable<F, S> {}

/// Like [`from_future`], but for futures that resolve to a `Result`: `Ok` is
/// emitted and followed by completion, `Err` is delivered as the stream error.
///
/// ```
/// use rxlite::prelude::*;
/// use futures::{executor::LocalPool, future};
///
/// let mut pool = LocalPool::new();
/// observable::from_future_result(future::err::<i32, _>("gone"), pool.spawner())
///   .subscribe_err(|_| {}, |e| println!("error: {e}"));
/// pool.run();
/// ```
pub fn from_future_result<F, S, Item, Err>(future: F, spawner: S) -> FutureResultObservable<F, S>
where
  F: Future<Output = Result<Item, Err>>,
{
  FutureResultObservable { future, spawner }
}

#[derive(Clone)]
pub struct FutureResultObservable<F, S> {
  future: F,
  spawner: S,
}

impl<F, S, Item, Err, O> Observable<Item, Err, O> for FutureResultObservable<F, S>
where
  F: Future<Output = Result<Item, Err>> + 'static,
  S: LocalSpawn,
  O: Observer<Item, Err> + 'static,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let Self { future, spawner } = self;
    spawn_abortable(&spawner, async move {
      let result = future.await;
      if observer.is_finished() {
        return;
      }
      match result {
        Ok(value) => {
          observer.next(value);
          observer.complete();
        }
        Err(err) => observer.error(err),
      }
    })
  }
}

impl<F, S, Item, Err> ObservableExt<Item, Err> for FutureResultObservable<F, S> where
  F: Future<Output = Result<Item, Err>>
{
}

fn spawn_abortable<S, Fut>(spawner: &S, task: Fut) -> TaskHandle
where
  S: LocalSpawn,
  Fut: Future<Output = ()> + 'static,
{
  let handle = TaskHandle::new();
  let running = handle.clone();
  let (task, abort) = abortable(async move {
    task.await;
    running.mark_finished();
  });
  handle.set_abort_handle(abort);
  if let Err(err) = spawner.spawn_local(async move {
    let _ = task.await;
  }) {
    tracing::warn!(%err, "future source could not be spawned");
    handle.mark_finished();
  }
  handle
}

use crate::prelude::*;
use std::{convert::Infallible, time::Duration};

/// Creates an observable which emits `item` once, `delay` time into the
/// future, then completes.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
/// use std::time::Duration;
///
/// TestScheduler::init();
/// observable::timer("done", Duration::from_secs(1), TestScheduler)
///   .subscribe(|v| println!("{v}"));
/// TestScheduler::flush();
/// ```
pub fn timer<Item, S>(item: Item, delay: Duration, scheduler: S) -> TimerObservable<Item, S> {
  TimerObservable { item, delay, scheduler }
}

#[derive(Clone)]
pub struct TimerObservable<Item, S> {
  item: Item,
  delay: Duration,
  scheduler: S,
}

impl<Item, S, O> Observable<Item, Infallible, O> for TimerObservable<Item, S>
where
  Item: 'static,
  O: Observer<Item, Infallible> + 'static,
  S: Scheduler,
{
  type Unsub = TaskHandle;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let Self { item, delay, scheduler } = self;
    scheduler.schedule_once(delay, move || {
      if !observer.is_finished() {
        observer.next(item);
        observer.complete();
      }
    })
  }
}

impl<Item, S> ObservableExt<Item, Infallible> for TimerObservable<Item, S> {}

#[cfg(test)]
mod tests {
  use super::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn emits_once_after_delay() {
    TestScheduler::init();
    let log = Rc::new(RefCell::new(vec![]));
    let (l1, l2) = (log.clone(), log.clone());
    timer(7, Duration::from_millis(100), TestScheduler).subscribe_complete(
      move |v| l1.borrow_mut().push(format!("{v}@{:?}", TestScheduler::now())),
      move || l2.borrow_mut().push("complete".to_owned()),
    );

    TestScheduler::advance_by(Duration::from_millis(99));
    assert!(log.borrow().is_empty());
    TestScheduler::advance_by(Duration::from_millis(1));
    assert_eq!(*log.borrow(), vec!["7@100ms".to_owned(), "complete".to_owned()]);
  }

  #[test]
  fn no_callback_after_unsubscribe() {
    TestScheduler::init();
    let fired = Rc::new(RefCell::new(false));
    let f = fired.clone();
    let mut subscription =
      timer((), Duration::from_millis(10), TestScheduler).subscribe(move |_| *f.borrow_mut() = true);
    subscription.unsubscribe();
    TestScheduler::flush();
    assert!(!*fired.borrow());
  }
}

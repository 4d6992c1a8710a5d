use crate::prelude::*;
use std::time::Duration;

/// Mirrors the source for `duration`, then completes and unsubscribes it.
/// Whichever comes first, the source's terminal event or the timer, wins.
#[derive(Clone)]
pub struct TakeForOp<S, SD> {
  pub(crate) source: S,
  pub(crate) duration: Duration,
  pub(crate) scheduler: SD,
}

impl<Item, Err, O, S, SD> Observable<Item, Err, O> for TakeForOp<S, SD>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<Item, Err, TakeForObserver<O>>,
  S::Unsub: 'static,
  SD: Scheduler,
{
  type Unsub = TupleSubscription<MultiSubscription, TaskHandle>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutRc::own(Some(observer));
    let upstream = MultiSubscription::default();

    let timer = {
      let observer = observer.clone();
      let mut upstream = upstream.clone();
      self.scheduler.schedule_once(self.duration, move || {
        tracing::trace!("take_for elapsed");
        Observer::<Item, Err>::complete(observer);
        upstream.unsubscribe();
      })
    };

    let unsub = self
      .source
      .actual_subscribe(TakeForObserver { observer, timer: timer.clone() });
    upstream.add(unsub);

    TupleSubscription::new(upstream, timer)
  }
}

impl<Item, Err, S, SD> ObservableExt<Item, Err> for TakeForOp<S, SD> where
  S: ObservableExt<Item, Err>
{
}

pub struct TakeForObserver<O> {
  observer: MutRc<Option<O>>,
  timer: TaskHandle,
}

impl<Item, Err, O> Observer<Item, Err> for TakeForObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    Observer::<Item, Err>::next(&mut self.observer, value);
    if Observer::<Item, Err>::is_finished(&self.observer) {
      self.timer.unsubscribe();
    }
  }

  fn error(mut self, err: Err) {
    self.timer.unsubscribe();
    Observer::<Item, Err>::error(self.observer, err)
  }

  fn complete(mut self) {
    self.timer.unsubscribe();
    Observer::<Item, Err>::complete(self.observer)
  }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Item, Err>::is_finished(&self.observer) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc, time::Duration};

  #[test]
  fn completes_when_time_is_up() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(false));
    let (v, c) = (values.clone(), completed.clone());

    let subscription = observable::interval(Duration::from_millis(10), TestScheduler)
      .take_for(Duration::from_millis(35), TestScheduler)
      .subscribe_complete(move |i| v.borrow_mut().push(i), move || *c.borrow_mut() = true);

    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(*values.borrow(), vec![0, 1, 2]);
    assert!(*completed.borrow());
    assert!(subscription.is_closed());
    assert!(TestScheduler::is_empty());
  }

  #[test]
  fn source_completing_first_cancels_timer() {
    TestScheduler::init();
    let completed = Rc::new(RefCell::new(0));
    let c = completed.clone();
    observable::from_iter(0..3)
      .take_for(Duration::from_millis(50), TestScheduler)
      .subscribe_complete(|_| {}, move || *c.borrow_mut() += 1);

    assert_eq!(*completed.borrow(), 1);
    assert_eq!(TestScheduler::pending_count(), 0);
    TestScheduler::flush();
    assert_eq!(*completed.borrow(), 1);
  }

  #[test]
  fn unsubscribe_cancels_everything() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    let mut subscription = observable::interval(Duration::from_millis(10), TestScheduler)
      .take_for(Duration::from_millis(100), TestScheduler)
      .subscribe(move |i| v.borrow_mut().push(i));

    TestScheduler::advance_by(Duration::from_millis(20));
    subscription.unsubscribe();
    TestScheduler::advance_by(Duration::from_millis(200));

    assert_eq!(*values.borrow(), vec![0, 1]);
    assert!(TestScheduler::is_empty());
  }

  #[test]
  fn downstream_finishing_cancels_timer() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    let mut subject = Subject::<i32, ()>::new();
    subject
      .clone()
      .take_for(Duration::from_secs(100), TestScheduler)
      .first()
      .subscribe_err(move |x| v.borrow_mut().push(x), |_| {});
    assert_eq!(TestScheduler::pending_count(), 1);

    subject.next(7);

    assert_eq!(*values.borrow(), vec![7]);
    assert_eq!(TestScheduler::pending_count(), 0);
    assert_eq!(subject.subscribed_size(), 0);
  }
}

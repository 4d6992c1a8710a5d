use crate::prelude::*;

/// Emits only the first `count` values emitted by the source Observable.
///
/// `take` returns an Observable that emits only the first `count` values
/// emitted by the source Observable. If the source emits fewer than `count`
/// values then all of its values are emitted. After that, it completes,
/// regardless if the source completes.
///
/// # Example
/// Take the first 5 values of an infinite Observable
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(0..).take(5).subscribe(|v| println!("{}", v));
///
/// // print logs:
/// // 0
/// // 1
/// // 2
/// // 3
/// // 4
/// ```
#[derive(Clone)]
pub struct TakeOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for TakeOp<S>
where
  S: Observable<Item, Err, TakeObserver<O>>,
  O: Observer<Item, Err>,
{
  type Unsub = Option<S::Unsub>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    if self.count == 0 {
      observer.complete();
      return None;
    }
    let observer = TakeObserver { observer: Some(observer), remaining: self.count };
    Some(self.source.actual_subscribe(observer))
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for TakeOp<S> where S: ObservableExt<Item, Err> {}

pub struct TakeObserver<O> {
  observer: Option<O>,
  remaining: usize,
}

impl<Item, Err, O> Observer<Item, Err> for TakeObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    let Some(observer) = self.observer.as_mut() else {
      return;
    };
    self.remaining -= 1;
    observer.next(value);
    if self.remaining == 0 {
      if let Some(observer) = self.observer.take() {
        observer.complete();
      }
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(observer) = self.observer {
      observer.complete()
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn base_function() {
    let mut completed = false;
    let mut next_count = 0;

    observable::from_iter(0..100)
      .take(5)
      .on_complete(|| completed = true)
      .subscribe(|_| next_count += 1);

    assert_eq!(next_count, 5);
    assert!(completed);
  }

  #[test]
  fn fewer_values_than_count() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter(0..2)
      .take(5)
      .subscribe_complete(|v| values.push(v), || completed = true);
    assert_eq!(values, vec![0, 1]);
    assert!(completed);
  }

  #[test]
  fn take_zero_never_subscribes_upstream() {
    let subscribed = Rc::new(RefCell::new(false));
    let s = subscribed.clone();
    let mut completed = false;
    observable::create(move |emitter: &mut dyn Emitter<i32, ()>| {
      *s.borrow_mut() = true;
      emitter.next(1);
    })
    .take(0)
    .subscribe_all(|_| unreachable!(), |_| unreachable!(), || completed = true);

    assert!(completed);
    assert!(!*subscribed.borrow());
  }

  #[test]
  fn stops_a_subject_subscription() {
    let mut subject = Subject::<i32, ()>::new();
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    subject
      .clone()
      .take(1)
      .subscribe_err(move |x| v.borrow_mut().push(x), |_| {});
    subject.next(1);
    subject.next(2);

    assert_eq!(*values.borrow(), vec![1]);
    assert_eq!(subject.subscribed_size(), 0);
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_take);

  fn bench_take(b: &mut bencher::Bencher) { b.iter(base_function); }
}

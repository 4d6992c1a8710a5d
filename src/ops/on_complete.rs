use crate::prelude::*;

pub struct OnCompleteOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for OnCompleteOp<S, F>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, OnCompleteObserver<O, F>>,
  F: FnOnce(),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(OnCompleteObserver { observer, func: self.func })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for OnCompleteOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct OnCompleteObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for OnCompleteObserver<O, F>
where
  O: Observer<Item, Err>,
  F: FnOnce(),
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(self) {
    (self.func)();
    self.observer.complete();
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn runs_before_downstream_completion() {
    let mut log = vec![];
    {
      let log = std::cell::RefCell::new(&mut log);
      observable::of(1)
        .on_complete(|| log.borrow_mut().push("on_complete"))
        .subscribe_complete(|_| log.borrow_mut().push("next"), || log.borrow_mut().push("complete"));
    }
    assert_eq!(log, vec!["next", "on_complete", "complete"]);
  }

  #[test]
  fn not_called_on_error() {
    let mut called = false;
    observable::throw_err::<i32, _>("e")
      .on_complete(|| called = true)
      .subscribe_err(|_| {}, |_| {});
    assert!(!called);
  }
}

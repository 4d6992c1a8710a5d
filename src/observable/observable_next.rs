use crate::prelude::*;
use std::fmt::Debug;

/// Observer built from a value closure. An error reaching it is logged,
/// completion is ignored.
#[derive(Clone)]
pub struct ObserverN<N>(N);

impl<N> ObserverN<N> {
  #[inline(always)]
  pub fn new(next: N) -> Self { ObserverN(next) }
}

impl<Item, Err, N> Observer<Item, Err> for ObserverN<N>
where
  N: FnMut(Item),
  Err: Debug,
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.0)(value); }
  #[inline]
  fn error(self, err: Err) { log_unhandled_error(&err) }
  #[inline(always)]
  fn complete(self) {}
  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}

pub(crate) fn log_unhandled_error<Err: Debug>(err: &Err) {
  tracing::error!(error = ?err, "observable terminated with an unhandled error");
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn raii() {
    let times = Rc::new(RefCell::new(0));
    let mut subject = Subject::<(), ()>::default();
    {
      let t = times.clone();
      let _guard = subject
        .clone()
        .subscribe(move |_| *t.borrow_mut() += 1)
        .unsubscribe_when_dropped();
      subject.next(());
    }
    subject.next(());
    assert_eq!(*times.borrow(), 1);
  }

  #[test]
  fn unhandled_error_does_not_panic() {
    let mut values = vec![];
    observable::throw_err("oops").subscribe(|v: i32| values.push(v));
    assert!(values.is_empty());
  }
}

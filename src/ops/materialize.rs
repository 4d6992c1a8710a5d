use crate::prelude::*;

/// A stream event captured as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<Item, Err> {
  Next(Item),
  Error(Err),
  Complete,
}

/// Emits each event of the source as a [`Notification`], then completes. The
/// result never errors.
#[derive(Clone)]
pub struct MaterializeOp<S> {
  pub(crate) source: S,
}

impl<Item, Err, O, S> Observable<Notification<Item, Err>, Err, O> for MaterializeOp<S>
where
  S: Observable<Item, Err, MaterializeObserver<O>>,
  O: Observer<Notification<Item, Err>, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(MaterializeObserver(observer))
  }
}

impl<Item, Err, S> ObservableExt<Notification<Item, Err>, Err> for MaterializeOp<S> where
  S: ObservableExt<Item, Err>
{
}

pub struct MaterializeObserver<O>(O);

impl<Item, Err, O> Observer<Item, Err> for MaterializeObserver<O>
where
  O: Observer<Notification<Item, Err>, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.0.next(Notification::Next(value)) }

  fn error(mut self, err: Err) {
    self.0.next(Notification::Error(err));
    self.0.complete()
  }

  fn complete(mut self) {
    self.0.next(Notification::Complete);
    self.0.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.0.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn completion() {
    let mut events = vec![];
    observable::from_iter(1..3)
      .materialize()
      .subscribe(|n| events.push(n));
    assert_eq!(
      events,
      vec![Notification::Next(1), Notification::Next(2), Notification::Complete]
    );
  }

  #[test]
  fn error_becomes_a_value() {
    let mut events = vec![];
    let mut completed = false;
    observable::throw_err::<i32, _>("bad")
      .materialize()
      .subscribe_all(|n| events.push(n), |_| unreachable!(), || completed = true);
    assert_eq!(events, vec![Notification::Error("bad")]);
    assert!(completed);
  }
}

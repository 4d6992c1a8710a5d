use crate::prelude::*;

#[derive(Clone)]
pub struct MapErrOp<S, F, Err> {
  source: S,
  func: F,
  _hint: TypeHint<Err>,
}

impl<S, F, Err> MapErrOp<S, F, Err> {
  #[inline]
  pub(crate) fn new(source: S, func: F) -> Self { Self { source, func, _hint: TypeHint::new() } }
}

impl<Item, Err, E2, O, S, F> Observable<Item, E2, O> for MapErrOp<S, F, Err>
where
  S: Observable<Item, Err, MapErrObserver<O, F>>,
  F: FnOnce(Err) -> E2,
  O: Observer<Item, E2>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(MapErrObserver { observer, func: self.func })
  }
}

impl<Item, Err, E2, S, F> ObservableExt<Item, E2> for MapErrOp<S, F, Err>
where
  S: ObservableExt<Item, Err>,
  F: FnOnce(Err) -> E2,
{
}

pub struct MapErrObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, Err, E2, O, F> Observer<Item, Err> for MapErrObserver<O, F>
where
  O: Observer<Item, E2>,
  F: FnOnce(Err) -> E2,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error((self.func)(err)) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

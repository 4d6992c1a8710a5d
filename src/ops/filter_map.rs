use crate::prelude::*;

/// Keeps the `Some` results of `func`. Also the typed way to narrow a stream
/// of enums down to one variant.
#[derive(Clone)]
pub struct FilterMapOp<S, F, Item> {
  source: S,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> FilterMapOp<S, F, Item> {
  #[inline]
  pub(crate) fn new(source: S, func: F) -> Self { Self { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, Err, O, S, F> Observable<B, Err, O> for FilterMapOp<S, F, Item>
where
  S: Observable<Item, Err, FilterMapObserver<O, F>>,
  F: FnMut(Item) -> Option<B>,
  O: Observer<B, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(FilterMapObserver { observer, func: self.func })
  }
}

impl<Item, B, Err, S, F> ObservableExt<B, Err> for FilterMapOp<S, F, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(Item) -> Option<B>,
{
}

pub struct FilterMapObserver<O, F> {
  observer: O,
  func: F,
}

impl<Item, B, Err, O, F> Observer<Item, Err> for FilterMapObserver<O, F>
where
  O: Observer<B, Err>,
  F: FnMut(Item) -> Option<B>,
{
  fn next(&mut self, value: Item) {
    if let Some(v) = (self.func)(value) {
      self.observer.next(v)
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

use crate::prelude::*;

/// Emits `false` at the first value failing `predicate` (and stops the
/// source), or `true` when the source completes.
#[derive(Clone)]
pub struct AllOp<S, F, Item> {
  source: S,
  predicate: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> AllOp<S, F, Item> {
  #[inline]
  pub(crate) fn new(source: S, predicate: F) -> Self {
    Self { source, predicate, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F> Observable<bool, Err, O> for AllOp<S, F, Item>
where
  S: Observable<Item, Err, AllObserver<O, F>>,
  O: Observer<bool, Err>,
  F: FnMut(&Item) -> bool,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(AllObserver {
      observer: Some(observer),
      predicate: self.predicate,
    })
  }
}

impl<Item, Err, S, F> ObservableExt<bool, Err> for AllOp<S, F, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct AllObserver<O, F> {
  observer: Option<O>,
  predicate: F,
}

impl<Item, Err, O, F> Observer<Item, Err> for AllObserver<O, F>
where
  O: Observer<bool, Err>,
  F: FnMut(&Item) -> bool,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_some() && !(self.predicate)(&value) {
      if let Some(mut observer) = self.observer.take() {
        observer.next(false);
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
    if let Some(mut observer) = self.observer {
      observer.next(true);
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

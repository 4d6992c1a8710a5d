use crate::prelude::*;

/// Like `reduce`, emitting every intermediate accumulator. The first value is
/// emitted as-is.
#[derive(Clone)]
pub struct ScanOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for ScanOp<S, F>
where
  S: Observable<Item, Err, ScanObserver<O, F, Item>>,
  O: Observer<Item, Err>,
  F: FnMut(Item, Item) -> Item,
  Item: Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(ScanObserver { observer, func: self.func, acc: None })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for ScanOp<S, F> where S: ObservableExt<Item, Err> {}

pub struct ScanObserver<O, F, Acc> {
  observer: O,
  func: F,
  acc: Option<Acc>,
}

impl<Item, Err, O, F> Observer<Item, Err> for ScanObserver<O, F, Item>
where
  O: Observer<Item, Err>,
  F: FnMut(Item, Item) -> Item,
  Item: Clone,
{
  fn next(&mut self, value: Item) {
    let acc = match self.acc.take() {
      Some(acc) => (self.func)(acc, value),
      None => value,
    };
    self.acc = Some(acc.clone());
    self.observer.next(acc);
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Like `reduce_initial`, emitting the accumulator after every value. The seed
/// itself is not emitted.
#[derive(Clone)]
pub struct ScanInitialOp<S, F, B, Item> {
  source: S,
  initial: B,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, B, Item> ScanInitialOp<S, F, B, Item> {
  #[inline]
  pub(crate) fn new(source: S, initial: B, func: F) -> Self {
    Self { source, initial, func, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F, B> Observable<B, Err, O> for ScanInitialOp<S, F, B, Item>
where
  S: Observable<Item, Err, ScanInitialObserver<O, F, B>>,
  O: Observer<B, Err>,
  F: FnMut(B, Item) -> B,
  B: Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ScanInitialObserver {
      observer,
      func: self.func,
      acc: Some(self.initial),
    })
  }
}

impl<Item, Err, S, F, B> ObservableExt<B, Err> for ScanInitialOp<S, F, B, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct ScanInitialObserver<O, F, B> {
  observer: O,
  func: F,
  acc: Option<B>,
}

impl<Item, Err, O, F, B> Observer<Item, Err> for ScanInitialObserver<O, F, B>
where
  O: Observer<B, Err>,
  F: FnMut(B, Item) -> B,
  B: Clone,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      let acc = (self.func)(acc, value);
      self.acc = Some(acc.clone());
      self.observer.next(acc);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

use crate::prelude::*;

/// Seedless fold: the first value is the initial accumulator. An empty source
/// completes without a value.
#[derive(Clone)]
pub struct ReduceOp<S, F> {
  pub(crate) source: S,
  pub(crate) func: F,
}

impl<Item, Err, O, S, F> Observable<Item, Err, O> for ReduceOp<S, F>
where
  S: Observable<Item, Err, ReduceObserver<O, F, Item>>,
  O: Observer<Item, Err>,
  F: FnMut(Item, Item) -> Item,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(ReduceObserver { observer, func: self.func, acc: None })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for ReduceOp<S, F> where S: ObservableExt<Item, Err> {}

pub struct ReduceObserver<O, F, Acc> {
  observer: O,
  func: F,
  acc: Option<Acc>,
}

impl<Item, Err, O, F> Observer<Item, Err> for ReduceObserver<O, F, Item>
where
  O: Observer<Item, Err>,
  F: FnMut(Item, Item) -> Item,
{
  fn next(&mut self, value: Item) {
    let acc = match self.acc.take() {
      Some(acc) => (self.func)(acc, value),
      None => value,
    };
    self.acc = Some(acc);
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if let Some(acc) = self.acc.take() {
      self.observer.next(acc);
    }
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Fold into `initial`; an empty source emits `initial` itself.
#[derive(Clone)]
pub struct ReduceInitialOp<S, F, B, Item> {
  source: S,
  initial: B,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, F, B, Item> ReduceInitialOp<S, F, B, Item> {
  #[inline]
  pub(crate) fn new(source: S, initial: B, func: F) -> Self {
    Self { source, initial, func, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F, B> Observable<B, Err, O> for ReduceInitialOp<S, F, B, Item>
where
  S: Observable<Item, Err, ReduceInitialObserver<O, F, B>>,
  O: Observer<B, Err>,
  F: FnMut(B, Item) -> B,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ReduceInitialObserver {
      observer,
      func: self.func,
      acc: Some(self.initial),
    })
  }
}

impl<Item, Err, S, F, B> ObservableExt<B, Err> for ReduceInitialOp<S, F, B, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct ReduceInitialObserver<O, F, B> {
  observer: O,
  func: F,
  acc: Option<B>,
}

impl<Item, Err, O, F, B> Observer<Item, Err> for ReduceInitialObserver<O, F, B>
where
  O: Observer<B, Err>,
  F: FnMut(B, Item) -> B,
{
  fn next(&mut self, value: Item) {
    if let Some(acc) = self.acc.take() {
      self.acc = Some((self.func)(acc, value));
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    if let Some(acc) = self.acc.take() {
      self.observer.next(acc);
    }
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn reduce_sum() {
    let mut emitted = vec![];
    observable::from_iter(0..5)
      .reduce(|acc, v| acc + v)
      .subscribe(|v| emitted.push(v));
    assert_eq!(emitted, vec![10]);
  }

  #[test]
  fn reduce_empty_emits_nothing() {
    let mut emitted = vec![];
    let mut completed = false;
    observable::empty::<i32>()
      .reduce(|acc, v| acc + v)
      .subscribe_complete(|v| emitted.push(v), || completed = true);
    assert!(emitted.is_empty());
    assert!(completed);
  }

  #[test]
  fn reduce_initial() {
    let mut emitted = 0;
    observable::from_iter([1, 1, 1, 1, 1])
      .reduce_initial(100, |acc, v| acc + v)
      .subscribe(|v| emitted = v);
    assert_eq!(105, emitted);
  }

  #[test]
  fn reduce_initial_on_empty() {
    let mut emitted = String::new();
    observable::empty::<char>()
      .reduce_initial(String::from("seed"), |mut acc, c| {
        acc.push(c);
        acc
      })
      .subscribe(|v| emitted = v);
    assert_eq!(emitted, "seed");
  }

  #[test]
  fn reduce_mixed_types() {
    let mut emitted = String::new();
    observable::from_iter(['a', 'b', 'c'])
      .reduce_initial(String::new(), |mut acc, c| {
        acc.push(c);
        acc
      })
      .subscribe(|v| emitted = v);
    assert_eq!(emitted, "abc");
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_reduce);

  fn bench_reduce(b: &mut bencher::Bencher) { b.iter(reduce_sum); }
}

use crate::prelude::*;

#[derive(Clone)]
pub struct MapOp<S, M, Item> {
  source: S,
  func: M,
  _hint: TypeHint<Item>,
}

impl<S, M, Item> MapOp<S, M, Item> {
  #[inline]
  pub(crate) fn new(source: S, func: M) -> Self { Self { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, Err, O, S, M> Observable<B, Err, O> for MapOp<S, M, Item>
where
  S: Observable<Item, Err, MapObserver<O, M>>,
  M: FnMut(Item) -> B,
  O: Observer<B, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(MapObserver { observer, map: self.func })
  }
}

impl<Item, B, Err, S, M> ObservableExt<B, Err> for MapOp<S, M, Item>
where
  S: ObservableExt<Item, Err>,
  M: FnMut(Item) -> B,
{
}

pub struct MapObserver<O, M> {
  observer: O,
  map: M,
}

impl<Item, B, Err, O, M> Observer<Item, Err> for MapObserver<O, M>
where
  O: Observer<B, Err>,
  M: FnMut(Item) -> B,
{
  #[inline]
  fn next(&mut self, value: Item) { self.observer.next((self.map)(value)) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// `map` with a fallible closure. The first `Err` is delivered downstream as
/// the stream's error and the observer stops accepting values.
#[derive(Clone)]
pub struct TryMapOp<S, M, Item> {
  source: S,
  func: M,
  _hint: TypeHint<Item>,
}

impl<S, M, Item> TryMapOp<S, M, Item> {
  #[inline]
  pub(crate) fn new(source: S, func: M) -> Self { Self { source, func, _hint: TypeHint::new() } }
}

impl<Item, B, Err, O, S, M> Observable<B, Err, O> for TryMapOp<S, M, Item>
where
  S: Observable<Item, Err, TryMapObserver<O, M>>,
  M: FnMut(Item) -> Result<B, Err>,
  O: Observer<B, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(TryMapObserver { observer: Some(observer), map: self.func })
  }
}

impl<Item, B, Err, S, M> ObservableExt<B, Err> for TryMapOp<S, M, Item>
where
  S: ObservableExt<Item, Err>,
  M: FnMut(Item) -> Result<B, Err>,
{
}

pub struct TryMapObserver<O, M> {
  observer: Option<O>,
  map: M,
}

impl<Item, B, Err, O, M> Observer<Item, Err> for TryMapObserver<O, M>
where
  O: Observer<B, Err>,
  M: FnMut(Item) -> Result<B, Err>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    match (self.map)(value) {
      Ok(v) => {
        if let Some(observer) = self.observer.as_mut() {
          observer.next(v);
        }
      }
      Err(err) => {
        if let Some(observer) = self.observer.take() {
          observer.error(err);
        }
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

  #[test]
  fn primitive_type() {
    let mut i = 0;
    observable::from_iter(100..101)
      .map(|v| v * 2)
      .subscribe(|v| i += v);
    assert_eq!(i, 200);
  }

  #[test]
  fn reference_lifetime_should_work() {
    let mut i = 0;

    observable::of(100).map(|v| v).subscribe(|v| i += v);
    assert_eq!(i, 100);
  }

  #[test]
  fn map_types_mixed() {
    let mut i = 0;
    observable::from_iter(vec!['a', 'b', 'c'])
      .map(|_| 1)
      .subscribe(|v| i += v);
    assert_eq!(i, 3);
  }

  #[test]
  fn try_map_stops_at_first_error() {
    let mut values = vec![];
    let mut error = None;
    let mut completed = false;
    observable::from_iter(1..10)
      .map_err(|e: std::convert::Infallible| -> String { match e {} })
      .try_map(|v| if v < 3 { Ok(v * 10) } else { Err(format!("{v} too big")) })
      .subscribe_all(|v| values.push(v), |e| error = Some(e), || completed = true);

    assert_eq!(values, vec![10, 20]);
    assert_eq!(error.as_deref(), Some("3 too big"));
    assert!(!completed);
  }

  #[test]
  fn benchmark() { do_bench(); }

  benchmark_group!(do_bench, bench);

  fn bench(b: &mut bencher::Bencher) { b.iter(primitive_type); }
}

use crate::prelude::*;

#[derive(Clone)]
pub struct DistinctUntilChangedOp<S> {
  pub(crate) source: S,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for DistinctUntilChangedOp<S>
where
  S: Observable<Item, Err, DistinctUntilChangedObserver<O, Item>>,
  O: Observer<Item, Err>,
  Item: PartialEq + Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(DistinctUntilChangedObserver { observer, last: None })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for DistinctUntilChangedOp<S> where
  S: ObservableExt<Item, Err>
{
}

pub struct DistinctUntilChangedObserver<O, Item> {
  observer: O,
  last: Option<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for DistinctUntilChangedObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: PartialEq + Clone,
{
  fn next(&mut self, value: Item) {
    if self.last.as_ref() != Some(&value) {
      self.last = Some(value.clone());
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[derive(Clone)]
pub struct DistinctUntilKeyChangedOp<S, F> {
  pub(crate) source: S,
  pub(crate) key: F,
}

impl<Item, Err, O, S, F, K> Observable<Item, Err, O> for DistinctUntilKeyChangedOp<S, F>
where
  S: Observable<Item, Err, DistinctUntilKeyChangedObserver<O, F, K>>,
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> K,
  K: PartialEq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(DistinctUntilKeyChangedObserver {
      observer,
      key: self.key,
      last: None,
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for DistinctUntilKeyChangedOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct DistinctUntilKeyChangedObserver<O, F, K> {
  observer: O,
  key: F,
  last: Option<K>,
}

impl<Item, Err, O, F, K> Observer<Item, Err> for DistinctUntilKeyChangedObserver<O, F, K>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> K,
  K: PartialEq,
{
  fn next(&mut self, value: Item) {
    let key = (self.key)(&value);
    if self.last.as_ref() != Some(&key) {
      self.last = Some(key);
      self.observer.next(value);
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn smoke() {
    let mut x = vec![];
    observable::from_iter([1, 1, 2, 3, 2])
      .distinct_until_changed()
      .subscribe(|v| x.push(v));
    assert_eq!(x, vec![1, 2, 3, 2]);
  }

  #[test]
  fn by_key() {
    let mut x = vec![];
    observable::from_iter([(1, 'a'), (1, 'b'), (2, 'c'), (1, 'd')])
      .distinct_until_key_changed(|v| v.0)
      .subscribe(|v| x.push(v.1));
    assert_eq!(x, vec!['a', 'c', 'd']);
  }

  #[test]
  fn first_value_always_passes() {
    let mut x = vec![];
    observable::of(7).distinct_until_changed().subscribe(|v| x.push(v));
    assert_eq!(x, vec![7]);
  }
}

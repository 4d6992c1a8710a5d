use crate::prelude::*;
use std::{collections::HashSet, hash::Hash};

#[derive(Clone)]
pub struct DistinctOp<S> {
  pub(crate) source: S,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for DistinctOp<S>
where
  S: Observable<Item, Err, DistinctObserver<O, Item>>,
  O: Observer<Item, Err>,
  Item: Hash + Eq + Clone,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(DistinctObserver { observer, seen: HashSet::new() })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for DistinctOp<S> where S: ObservableExt<Item, Err> {}

pub struct DistinctObserver<O, Item> {
  observer: O,
  seen: HashSet<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for DistinctObserver<O, Item>
where
  O: Observer<Item, Err>,
  Item: Hash + Eq + Clone,
{
  fn next(&mut self, value: Item) {
    if !self.seen.contains(&value) {
      self.seen.insert(value.clone());
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

/// Like `DistinctOp`, comparing a key derived from each value.
#[derive(Clone)]
pub struct DistinctKeyOp<S, F> {
  pub(crate) source: S,
  pub(crate) key: F,
}

impl<Item, Err, O, S, F, K> Observable<Item, Err, O> for DistinctKeyOp<S, F>
where
  S: Observable<Item, Err, DistinctKeyObserver<O, F, K>>,
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> K,
  K: Hash + Eq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(DistinctKeyObserver {
      observer,
      key: self.key,
      seen: HashSet::new(),
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Item, Err> for DistinctKeyOp<S, F> where
  S: ObservableExt<Item, Err>
{
}

pub struct DistinctKeyObserver<O, F, K> {
  observer: O,
  key: F,
  seen: HashSet<K>,
}

impl<Item, Err, O, F, K> Observer<Item, Err> for DistinctKeyObserver<O, F, K>
where
  O: Observer<Item, Err>,
  F: FnMut(&Item) -> K,
  K: Hash + Eq,
{
  fn next(&mut self, value: Item) {
    if self.seen.insert((self.key)(&value)) {
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
    observable::from_iter(0..20)
      .map(|v| v % 5)
      .distinct()
      .subscribe(|v| x.push(v));
    assert_eq!(x, vec![0, 1, 2, 3, 4]);
  }

  #[test]
  fn repeated_values() {
    let mut x = vec![];
    observable::from_iter([1, 1, 2, 3, 2])
      .distinct()
      .subscribe(|v| x.push(v));
    assert_eq!(x, vec![1, 2, 3]);
  }

  #[test]
  fn distinct_by_key() {
    let mut x = vec![];
    observable::from_iter(["apple", "avocado", "banana", "blueberry", "cherry"])
      .distinct_key(|s| s.as_bytes()[0])
      .subscribe(|v| x.push(v));
    assert_eq!(x, vec!["apple", "banana", "cherry"]);
  }

  #[test]
  fn bench() { do_bench(); }

  benchmark_group!(do_bench, bench_distinct);

  fn bench_distinct(b: &mut bencher::Bencher) { b.iter(smoke); }
}

use crate::prelude::*;
use std::{cmp::Ordering, collections::HashMap, hash::Hash};

/// Accumulates every value into a container built by `factory` for each
/// subscription, and emits the container when the source completes.
#[derive(Clone)]
pub struct CollectOp<S, Fac, F, Item> {
  source: S,
  factory: Fac,
  func: F,
  _hint: TypeHint<Item>,
}

impl<S, Fac, F, Item> CollectOp<S, Fac, F, Item> {
  #[inline]
  pub(crate) fn new(source: S, factory: Fac, func: F) -> Self {
    Self { source, factory, func, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, Fac, F, C> Observable<C, Err, O> for CollectOp<S, Fac, F, Item>
where
  S: Observable<Item, Err, CollectObserver<O, F, C>>,
  O: Observer<C, Err>,
  Fac: FnOnce() -> C,
  F: FnMut(&mut C, Item),
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(CollectObserver {
      observer,
      func: self.func,
      acc: (self.factory)(),
    })
  }
}

impl<Item, Err, S, Fac, F, C> ObservableExt<C, Err> for CollectOp<S, Fac, F, Item>
where
  S: ObservableExt<Item, Err>,
  Fac: FnOnce() -> C,
{
}

pub struct CollectObserver<O, F, C> {
  observer: O,
  func: F,
  acc: C,
}

impl<Item, Err, O, F, C> Observer<Item, Err> for CollectObserver<O, F, C>
where
  O: Observer<C, Err>,
  F: FnMut(&mut C, Item),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.func)(&mut self.acc, value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    self.observer.next(self.acc);
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Emits every value in a `Vec`, sorted with `compare` (stable), once the
/// source completed.
#[derive(Clone)]
pub struct ToSortedListOp<S, F, Item> {
  source: S,
  compare: F,
  _hint: TypeHint<Item>,
}

impl<S, F, Item> ToSortedListOp<S, F, Item> {
  #[inline]
  pub(crate) fn new(source: S, compare: F) -> Self {
    Self { source, compare, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F> Observable<Vec<Item>, Err, O> for ToSortedListOp<S, F, Item>
where
  S: Observable<Item, Err, ToSortedListObserver<O, F, Item>>,
  O: Observer<Vec<Item>, Err>,
  F: FnMut(&Item, &Item) -> Ordering,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ToSortedListObserver {
      observer,
      compare: self.compare,
      list: vec![],
    })
  }
}

impl<Item, Err, S, F> ObservableExt<Vec<Item>, Err> for ToSortedListOp<S, F, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct ToSortedListObserver<O, F, Item> {
  observer: O,
  compare: F,
  list: Vec<Item>,
}

impl<Item, Err, O, F> Observer<Item, Err> for ToSortedListObserver<O, F, Item>
where
  O: Observer<Vec<Item>, Err>,
  F: FnMut(&Item, &Item) -> Ordering,
{
  #[inline]
  fn next(&mut self, value: Item) { self.list.push(value) }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    self.list.sort_by(&mut self.compare);
    self.observer.next(self.list);
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Emits a `HashMap` built from `key(&item)` and `value(item)`. A later value
/// with a duplicate key replaces the earlier one.
#[derive(Clone)]
pub struct ToMapOp<S, F, FV, Item> {
  source: S,
  key: F,
  value: FV,
  _hint: TypeHint<Item>,
}

impl<S, F, FV, Item> ToMapOp<S, F, FV, Item> {
  #[inline]
  pub(crate) fn new(source: S, key: F, value: FV) -> Self {
    Self { source, key, value, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F, FV, K, V> Observable<HashMap<K, V>, Err, O> for ToMapOp<S, F, FV, Item>
where
  S: Observable<Item, Err, ToMapObserver<O, F, FV, HashMap<K, V>>>,
  O: Observer<HashMap<K, V>, Err>,
  F: FnMut(&Item) -> K,
  FV: FnMut(Item) -> V,
  K: Hash + Eq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ToMapObserver {
      observer,
      key: self.key,
      value: self.value,
      map: HashMap::new(),
    })
  }
}

impl<Item, Err, S, F, FV, K, V> ObservableExt<HashMap<K, V>, Err> for ToMapOp<S, F, FV, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(&Item) -> K,
  FV: FnMut(Item) -> V,
{
}

pub struct ToMapObserver<O, F, FV, M> {
  observer: O,
  key: F,
  value: FV,
  map: M,
}

impl<Item, Err, O, F, FV, K, V> Observer<Item, Err> for ToMapObserver<O, F, FV, HashMap<K, V>>
where
  O: Observer<HashMap<K, V>, Err>,
  F: FnMut(&Item) -> K,
  FV: FnMut(Item) -> V,
  K: Hash + Eq,
{
  fn next(&mut self, value: Item) {
    let key = (self.key)(&value);
    self.map.insert(key, (self.value)(value));
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    self.observer.next(self.map);
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

/// Emits a `HashMap` from each key to all values with that key, in arrival
/// order.
#[derive(Clone)]
pub struct ToMultimapOp<S, F, FV, Item> {
  source: S,
  key: F,
  value: FV,
  _hint: TypeHint<Item>,
}

impl<S, F, FV, Item> ToMultimapOp<S, F, FV, Item> {
  #[inline]
  pub(crate) fn new(source: S, key: F, value: FV) -> Self {
    Self { source, key, value, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, F, FV, K, V> Observable<HashMap<K, Vec<V>>, Err, O>
  for ToMultimapOp<S, F, FV, Item>
where
  S: Observable<Item, Err, ToMultimapObserver<O, F, FV, HashMap<K, Vec<V>>>>,
  O: Observer<HashMap<K, Vec<V>>, Err>,
  F: FnMut(&Item) -> K,
  FV: FnMut(Item) -> V,
  K: Hash + Eq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ToMultimapObserver {
      observer,
      key: self.key,
      value: self.value,
      map: HashMap::new(),
    })
  }
}

impl<Item, Err, S, F, FV, K, V> ObservableExt<HashMap<K, Vec<V>>, Err>
  for ToMultimapOp<S, F, FV, Item>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(&Item) -> K,
  FV: FnMut(Item) -> V,
{
}

pub struct ToMultimapObserver<O, F, FV, M> {
  observer: O,
  key: F,
  value: FV,
  map: M,
}

impl<Item, Err, O, F, FV, K, V> Observer<Item, Err>
  for ToMultimapObserver<O, F, FV, HashMap<K, Vec<V>>>
where
  O: Observer<HashMap<K, Vec<V>>, Err>,
  F: FnMut(&Item) -> K,
  FV: FnMut(Item) -> V,
  K: Hash + Eq,
{
  fn next(&mut self, value: Item) {
    let key = (self.key)(&value);
    self.map.entry(key).or_default().push((self.value)(value));
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    self.observer.next(self.map);
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

//! Observable traits and the factories that create observables.
//!
//! An observable is a plain value describing how to emit to an observer.
//! [`Observable::actual_subscribe`] consumes it, so subscribing twice means
//! cloning it first; every clone re-runs the recipe independently.

use crate::{
  error::RxError,
  ops::{
    all::AllOp,
    collect::{CollectOp, ToMapOp, ToMultimapOp, ToSortedListOp},
    contains::ContainsOp,
    count::CountOp,
    default_if_empty::DefaultIfEmptyOp,
    distinct::{DistinctKeyOp, DistinctOp},
    distinct_until_changed::{DistinctUntilChangedOp, DistinctUntilKeyChangedOp},
    element_at::{ElementAtOp, ElementAtOrErrorOp},
    filter::{FilterOp, TryFilterOp},
    filter_map::FilterMapOp,
    first::{CompleteOnEmpty, EmitOnEmpty, ErrorOnEmpty, FirstOp},
    group_by::GroupByOp,
    ignore_elements::IgnoreElementsOp,
    is_empty::IsEmptyOp,
    last::LastOp,
    map::{MapOp, TryMapOp},
    map_err::MapErrOp,
    materialize::MaterializeOp,
    merge_all::MergeAllOp,
    on_complete::OnCompleteOp,
    reduce::{ReduceInitialOp, ReduceOp},
    scan::{ScanInitialOp, ScanOp},
    single::SingleOp,
    skip::SkipOp,
    skip_last::SkipLastOp,
    skip_until::SkipUntilOp,
    skip_while::SkipWhileOp,
    take::TakeOp,
    take_for::TakeForOp,
    take_last::TakeLastOp,
    take_until::TakeUntilOp,
    take_while::TakeWhileOp,
    tap::TapOp,
  },
  prelude::*,
};
use std::{cmp::Ordering, fmt::Debug, hash::Hash, time::Duration};

mod create;
mod defer;
mod from_future;
mod from_iter;
mod interval;
mod observable_all;
mod observable_comp;
mod observable_err;
mod observable_next;
mod of;
mod timer;
mod trivial;

pub use create::*;
pub use defer::*;
pub use from_future::*;
pub use from_iter::*;
pub use interval::*;
pub use observable_all::*;
pub use observable_comp::*;
pub use observable_err::*;
pub use observable_next::*;
pub use of::*;
pub use timer::*;
pub use trivial::*;

pub use crate::ops::{
  group_by::GroupedObservable,
  materialize::Notification,
  sequence_equal::{sequence_equal, sequence_equal_with},
};

/// A value that can be subscribed by an observer of type `O`.
///
/// Implementations wrap the observer they receive (operators) or drive it
/// (sources), and return the handle that cancels the subscription.
pub trait Observable<Item, Err, O> {
  type Unsub: Subscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub;
}

/// Operators and subscribe helpers, available on every observable.
///
/// Every method returns a new observable wrapping `self`; nothing runs until
/// one of the `subscribe*` methods is called.
pub trait ObservableExt<Item, Err>: Sized {
  /// Invokes an execution of an Observable and registers a handler for its
  /// values. An error reaching the subscriber is logged with
  /// `tracing::error!`.
  fn subscribe<N>(
    self, next: N,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverN<N>>>::Unsub>
  where
    N: FnMut(Item),
    Err: Debug,
    Self: Observable<Item, Err, ObserverN<N>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverN::new(next)))
  }

  /// Like `subscribe`, with a handler for the error. Completion is ignored.
  fn subscribe_err<N, E>(
    self, next: N, error: E,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverErr<N, E>>>::Unsub>
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    Self: Observable<Item, Err, ObserverErr<N, E>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverErr::new(next, error)))
  }

  /// Like `subscribe`, with a handler for the completion. An error reaching
  /// the subscriber is logged.
  fn subscribe_complete<N, C>(
    self, next: N, complete: C,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverComp<N, C>>>::Unsub>
  where
    N: FnMut(Item),
    C: FnOnce(),
    Err: Debug,
    Self: Observable<Item, Err, ObserverComp<N, C>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverComp::new(next, complete)))
  }

  /// Registers handlers for values, the error and the completion.
  fn subscribe_all<N, E, C>(
    self, next: N, error: E, complete: C,
  ) -> SubscriptionWrapper<<Self as Observable<Item, Err, ObserverAll<N, E, C>>>::Unsub>
  where
    N: FnMut(Item),
    E: FnOnce(Err),
    C: FnOnce(),
    Self: Observable<Item, Err, ObserverAll<N, E, C>>,
  {
    SubscriptionWrapper(self.actual_subscribe(ObserverAll::new(next, error, complete)))
  }

  /// Subscribes an observer object.
  fn subscribe_with<O>(self, observer: O) -> SubscriptionWrapper<Self::Unsub>
  where
    O: Observer<Item, Err>,
    Self: Observable<Item, Err, O>,
  {
    SubscriptionWrapper(self.actual_subscribe(observer))
  }

  // ---------------------------------------------------------------------
  // transformation
  // ---------------------------------------------------------------------

  /// Creates a new stream which calls a closure on each element and uses
  /// its return as the value.
  #[inline]
  fn map<B, F>(self, f: F) -> MapOp<Self, F, Item>
  where
    F: FnMut(Item) -> B,
  {
    MapOp::new(self, f)
  }

  /// Like `map`, but an `Err` returned by the closure terminates the stream
  /// with that error.
  #[inline]
  fn try_map<B, F>(self, f: F) -> TryMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> Result<B, Err>,
  {
    TryMapOp::new(self, f)
  }

  /// Converts the error type of the stream.
  ///
  /// `map_err(RxError::from)` lifts an infallible source into one that can
  /// carry the errors synthesized by operators.
  #[inline]
  fn map_err<E2, F>(self, f: F) -> MapErrOp<Self, F, Err>
  where
    F: FnOnce(Err) -> E2,
  {
    MapErrOp::new(self, f)
  }

  /// Maps each value to an observable and merges their emissions; all
  /// inner observables run at the same time.
  #[inline]
  fn flat_map<V, F>(self, f: F) -> MergeAllOp<MapOp<Self, F, Item>, V>
  where
    F: FnMut(Item) -> V,
  {
    MergeAllOp::new(self.map(f), usize::MAX)
  }

  /// Maps each value to an observable and concatenates them: the next inner
  /// observable is subscribed once the previous one completed.
  #[inline]
  fn concat_map<V, F>(self, f: F) -> MergeAllOp<MapOp<Self, F, Item>, V>
  where
    F: FnMut(Item) -> V,
  {
    MergeAllOp::new(self.map(f), 1)
  }

  /// Flattens a stream of observables, keeping at most `concurrent` inner
  /// subscriptions alive; the rest wait in a queue.
  #[inline]
  fn merge_all(self, concurrent: usize) -> MergeAllOp<Self, Item> {
    MergeAllOp::new(self, concurrent)
  }

  /// Routes each value to a [`GroupedObservable`] by key; a group is
  /// emitted the first time its key is seen.
  #[inline]
  fn group_by<Key, F>(self, key: F) -> GroupByOp<Self, F>
  where
    F: FnMut(&Item) -> Key,
  {
    GroupByOp::new(self, key)
  }

  /// Turns every event into a [`Notification`] value.
  #[inline]
  fn materialize(self) -> MaterializeOp<Self> { MaterializeOp { source: self } }

  /// Calls `f` with a reference to every value before passing it on.
  #[inline]
  fn tap<F>(self, f: F) -> TapOp<Self, F>
  where
    F: FnMut(&Item),
  {
    TapOp { source: self, func: f }
  }

  /// Calls `f` when the stream completes, before the downstream completion.
  #[inline]
  fn on_complete<F>(self, f: F) -> OnCompleteOp<Self, F>
  where
    F: FnOnce(),
  {
    OnCompleteOp { source: self, func: f }
  }

  // ---------------------------------------------------------------------
  // filtering
  // ---------------------------------------------------------------------

  /// Emit only the values the predicate accepts.
  #[inline]
  fn filter<F>(self, filter: F) -> FilterOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    FilterOp { source: self, filter }
  }

  /// Like `filter`, but an `Err` returned by the predicate terminates the
  /// stream with that error.
  #[inline]
  fn try_filter<F>(self, filter: F) -> TryFilterOp<Self, F>
  where
    F: FnMut(&Item) -> Result<bool, Err>,
  {
    TryFilterOp { source: self, filter }
  }

  /// Maps and filters in one step, keeping the `Some` results.
  #[inline]
  fn filter_map<B, F>(self, f: F) -> FilterMapOp<Self, F, Item>
  where
    F: FnMut(Item) -> Option<B>,
  {
    FilterMapOp::new(self, f)
  }

  /// Emit only the values never seen before.
  #[inline]
  fn distinct(self) -> DistinctOp<Self> { DistinctOp { source: self } }

  /// Emit only the values whose key was never seen before.
  #[inline]
  fn distinct_key<K, F>(self, key: F) -> DistinctKeyOp<Self, F>
  where
    F: FnMut(&Item) -> K,
  {
    DistinctKeyOp { source: self, key }
  }

  /// Emit a value only when it differs from the previous one.
  #[inline]
  fn distinct_until_changed(self) -> DistinctUntilChangedOp<Self> {
    DistinctUntilChangedOp { source: self }
  }

  /// Emit a value only when its key differs from the previous value's key.
  #[inline]
  fn distinct_until_key_changed<K, F>(self, key: F) -> DistinctUntilKeyChangedOp<Self, F>
  where
    F: FnMut(&Item) -> K,
  {
    DistinctUntilKeyChangedOp { source: self, key }
  }

  /// Emits only the first `count` values emitted by the source, then
  /// completes.
  #[inline]
  fn take(self, count: usize) -> TakeOp<Self> { TakeOp { source: self, count } }

  /// Emits the source values until `duration` elapsed on `scheduler`, then
  /// completes.
  #[inline]
  fn take_for<SD>(self, duration: Duration, scheduler: SD) -> TakeForOp<Self, SD>
  where
    SD: Scheduler,
  {
    TakeForOp { source: self, duration, scheduler }
  }

  /// Emits values while the predicate holds, completes at the first value
  /// that fails it.
  #[inline]
  fn take_while<F>(self, predicate: F) -> TakeWhileOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    TakeWhileOp { source: self, predicate }
  }

  /// Emits only the last `count` values, once the source completed.
  #[inline]
  fn take_last(self, count: usize) -> TakeLastOp<Self> { TakeLastOp { source: self, count } }

  /// Emits the source values until `notifier` emits or completes.
  #[inline]
  fn take_until<N, NotifyItem>(self, notifier: N) -> TakeUntilOp<Self, N, NotifyItem>
  where
    N: ObservableExt<NotifyItem, Err>,
  {
    TakeUntilOp::new(self, notifier)
  }

  /// Ignore the first `count` values.
  #[inline]
  fn skip(self, count: usize) -> SkipOp<Self> { SkipOp { source: self, count } }

  /// Ignore values while the predicate holds; forward everything from the
  /// first value that fails it.
  #[inline]
  fn skip_while<F>(self, predicate: F) -> SkipWhileOp<Self, F>
  where
    F: FnMut(&Item) -> bool,
  {
    SkipWhileOp { source: self, predicate }
  }

  /// Ignore the last `count` values.
  #[inline]
  fn skip_last(self, count: usize) -> SkipLastOp<Self> { SkipLastOp { source: self, count } }

  /// Ignore values until `notifier` emits its first value.
  #[inline]
  fn skip_until<N, NotifyItem>(self, notifier: N) -> SkipUntilOp<Self, N, NotifyItem>
  where
    N: ObservableExt<NotifyItem, Err>,
  {
    SkipUntilOp::new(self, notifier)
  }

  /// Forward only the terminal event.
  #[inline]
  fn ignore_elements(self) -> IgnoreElementsOp<Self> { IgnoreElementsOp { source: self } }

  // ---------------------------------------------------------------------
  // aggregation
  // ---------------------------------------------------------------------

  /// Emits the number of values once the source completed.
  #[inline]
  fn count(self) -> CountOp<Self, Item> { CountOp::new(self) }

  /// Emits the first value then completes; completes empty for an empty
  /// source.
  #[inline]
  fn first(self) -> FirstOp<Self, CompleteOnEmpty> { FirstOp::new(self, CompleteOnEmpty) }

  /// Emits the first value, or `default` for an empty source.
  #[inline]
  fn first_or(self, default: Item) -> FirstOp<Self, EmitOnEmpty<Item>> {
    FirstOp::new(self, EmitOnEmpty(default))
  }

  /// Emits the first value, or errors with `RxError::NoSuchElement`.
  #[inline]
  fn first_or_error(self) -> FirstOp<Self, ErrorOnEmpty>
  where
    Err: From<RxError>,
  {
    FirstOp::new(self, ErrorOnEmpty)
  }

  /// Emits the last value once the source completed.
  #[inline]
  fn last(self) -> LastOp<Self, CompleteOnEmpty> { LastOp::new(self, CompleteOnEmpty) }

  /// Emits the last value, or `default` for an empty source.
  #[inline]
  fn last_or(self, default: Item) -> LastOp<Self, EmitOnEmpty<Item>> {
    LastOp::new(self, EmitOnEmpty(default))
  }

  /// Emits the last value, or errors with `RxError::NoSuchElement`.
  #[inline]
  fn last_or_error(self) -> LastOp<Self, ErrorOnEmpty>
  where
    Err: From<RxError>,
  {
    LastOp::new(self, ErrorOnEmpty)
  }

  /// Emits the only value of the source; a second value is an
  /// `RxError::MoreThanOneElement` error.
  #[inline]
  fn single(self) -> SingleOp<Self, CompleteOnEmpty>
  where
    Err: From<RxError>,
  {
    SingleOp::new(self, CompleteOnEmpty)
  }

  /// Like `single`, emitting `default` for an empty source.
  #[inline]
  fn single_or(self, default: Item) -> SingleOp<Self, EmitOnEmpty<Item>>
  where
    Err: From<RxError>,
  {
    SingleOp::new(self, EmitOnEmpty(default))
  }

  /// Like `single`, with an `RxError::NoSuchElement` error for an empty
  /// source.
  #[inline]
  fn single_or_error(self) -> SingleOp<Self, ErrorOnEmpty>
  where
    Err: From<RxError>,
  {
    SingleOp::new(self, ErrorOnEmpty)
  }

  /// Emits the value at `index`, or completes empty if the source is
  /// shorter.
  #[inline]
  fn element_at(self, index: usize) -> ElementAtOp<Self> { ElementAtOp { source: self, index } }

  /// Emits the value at `index`, or errors with `RxError::IndexOutOfRange`.
  #[inline]
  fn element_at_or_error(self, index: usize) -> ElementAtOrErrorOp<Self>
  where
    Err: From<RxError>,
  {
    ElementAtOrErrorOp { source: self, index }
  }

  /// Combines the values left to right; emits the final value once the
  /// source completed. Emits nothing for an empty source.
  #[inline]
  fn reduce<F>(self, f: F) -> ReduceOp<Self, F>
  where
    F: FnMut(Item, Item) -> Item,
  {
    ReduceOp { source: self, func: f }
  }

  /// Folds the values into `initial`; emits the final accumulator once the
  /// source completed (`initial` itself for an empty source).
  #[inline]
  fn reduce_initial<B, F>(self, initial: B, f: F) -> ReduceInitialOp<Self, F, B, Item>
  where
    F: FnMut(B, Item) -> B,
  {
    ReduceInitialOp::new(self, initial, f)
  }

  /// Like `reduce`, but emits the accumulator after every value.
  #[inline]
  fn scan<F>(self, f: F) -> ScanOp<Self, F>
  where
    F: FnMut(Item, Item) -> Item,
  {
    ScanOp { source: self, func: f }
  }

  /// Like `reduce_initial`, but emits the accumulator after every value.
  #[inline]
  fn scan_initial<B, F>(self, initial: B, f: F) -> ScanInitialOp<Self, F, B, Item>
  where
    F: FnMut(B, Item) -> B,
  {
    ScanInitialOp::new(self, initial, f)
  }

  /// Accumulates the values into a mutable container created by `factory`,
  /// once per subscription; emits it once the source completed.
  #[inline]
  fn collect<C, Fac, F>(self, factory: Fac, f: F) -> CollectOp<Self, Fac, F, Item>
  where
    Fac: FnOnce() -> C,
    F: FnMut(&mut C, Item),
  {
    CollectOp::new(self, factory, f)
  }

  /// Emits every value in a `Vec` once the source completed.
  #[inline]
  #[allow(clippy::type_complexity)]
  fn to_list(self) -> CollectOp<Self, fn() -> Vec<Item>, fn(&mut Vec<Item>, Item), Item> {
    self.collect(Vec::new as fn() -> Vec<Item>, Vec::push as fn(&mut Vec<Item>, Item))
  }

  /// Like `to_list`, sorted in ascending order.
  #[inline]
  fn to_sorted_list(self) -> ToSortedListOp<Self, fn(&Item, &Item) -> Ordering, Item>
  where
    Item: Ord,
  {
    ToSortedListOp::new(self, Item::cmp as fn(&Item, &Item) -> Ordering)
  }

  /// Like `to_list`, sorted (stable) with `compare`.
  #[inline]
  fn to_sorted_list_by<F>(self, compare: F) -> ToSortedListOp<Self, F, Item>
  where
    F: FnMut(&Item, &Item) -> Ordering,
  {
    ToSortedListOp::new(self, compare)
  }

  /// Emits a `HashMap` of the values by key once the source completed; a
  /// later value with a duplicate key replaces the earlier one.
  #[inline]
  fn to_map<K, F>(self, key: F) -> ToMapOp<Self, F, fn(Item) -> Item, Item>
  where
    F: FnMut(&Item) -> K,
    K: Hash + Eq,
  {
    ToMapOp::new(self, key, std::convert::identity as fn(Item) -> Item)
  }

  /// Like `to_map`, storing `value(item)` instead of the item.
  #[inline]
  fn to_map_with<K, V, F, FV>(self, key: F, value: FV) -> ToMapOp<Self, F, FV, Item>
  where
    F: FnMut(&Item) -> K,
    FV: FnMut(Item) -> V,
    K: Hash + Eq,
  {
    ToMapOp::new(self, key, value)
  }

  /// Emits a `HashMap` from key to every value with that key, in arrival
  /// order.
  #[inline]
  fn to_multimap<K, F>(self, key: F) -> ToMultimapOp<Self, F, fn(Item) -> Item, Item>
  where
    F: FnMut(&Item) -> K,
    K: Hash + Eq,
  {
    ToMultimapOp::new(self, key, std::convert::identity as fn(Item) -> Item)
  }

  /// Like `to_multimap`, storing `value(item)` instead of the item.
  #[inline]
  fn to_multimap_with<K, V, F, FV>(self, key: F, value: FV) -> ToMultimapOp<Self, F, FV, Item>
  where
    F: FnMut(&Item) -> K,
    FV: FnMut(Item) -> V,
    K: Hash + Eq,
  {
    ToMultimapOp::new(self, key, value)
  }

  /// Emits `true` if every value passes the predicate, `false` as soon as
  /// one fails.
  #[inline]
  fn all<F>(self, predicate: F) -> AllOp<Self, F, Item>
  where
    F: FnMut(&Item) -> bool,
  {
    AllOp::new(self, predicate)
  }

  /// Emits `false` at the first value, `true` if the source completes
  /// without one.
  #[inline]
  fn is_empty(self) -> IsEmptyOp<Self, Item> { IsEmptyOp::new(self) }

  /// Emits `true` as soon as a value equals `target`, `false` if the source
  /// completes without one.
  #[inline]
  fn contains(self, target: Item) -> ContainsOp<Self, Item>
  where
    Item: PartialEq,
  {
    ContainsOp { source: self, target }
  }

  /// Forwards the values; emits `default` if the source completes without
  /// any.
  #[inline]
  fn default_if_empty(self, default: Item) -> DefaultIfEmptyOp<Self, Item> {
    DefaultIfEmptyOp { source: self, default }
  }
}

use crate::prelude::*;
use std::{
  convert::Infallible,
  iter::{Repeat, Take},
  ops::RangeInclusive,
};

/// Creates an observable that produces values from an iterator.
///
/// Completes when all elements have been emitted. Never emits an error. Stops
/// pulling from the iterator as soon as the downstream observer is finished,
/// so infinite iterators are fine behind `take` or `take_while`.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::from_iter(0..10).subscribe(|v| println!("{},", v));
///
/// observable::from_iter(vec![0, 1, 2, 3]).subscribe(|v| println!("{},", v));
/// ```
pub fn from_iter<Iter>(iter: Iter) -> ObservableIter<Iter>
where
  Iter: IntoIterator,
{
  ObservableIter(iter)
}

#[derive(Clone)]
pub struct ObservableIter<Iter>(Iter);

impl<O, Iter> Observable<Iter::Item, Infallible, O> for ObservableIter<Iter>
where
  Iter: IntoIterator,
  O: Observer<Iter::Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    for v in self.0 {
      if observer.is_finished() {
        return;
      }
      observer.next(v);
    }
    observer.complete();
  }
}

impl<Iter> ObservableExt<Iter::Item, Infallible> for ObservableIter<Iter> where Iter: IntoIterator {}

/// Emits `count` sequential integers starting at `start`, then completes.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::range(5, 3).subscribe(|v| println!("{v}")); // 5, 6, 7
/// ```
///
/// The sequence stops at `i64::MAX` when `count` would run past it.
pub fn range(start: i64, count: usize) -> ObservableIter<RangeInclusive<i64>> {
  let values = match count.checked_sub(1) {
    Some(last) => start..=start.saturating_add(i64::try_from(last).unwrap_or(i64::MAX)),
    None => 1..=0,
  };
  from_iter(values)
}

/// Creates an observable producing the same value repeated N times.
///
/// Completes immediately after emitting N values. Never emits an error.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::repeat(123, 3).subscribe(|v| println!("{},", v));
///
/// // print log:
/// // 123
/// // 123
/// // 123
/// ```
pub fn repeat<Item>(v: Item, n: usize) -> ObservableIter<Take<Repeat<Item>>>
where
  Item: Clone,
{
  from_iter(std::iter::repeat(v).take(n))
}

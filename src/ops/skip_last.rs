use crate::prelude::*;
use std::collections::VecDeque;

/// Ignore the last `count` values. A value is forwarded as soon as `count`
/// newer values arrived behind it.
#[derive(Clone)]
pub struct SkipLastOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for SkipLastOp<S>
where
  S: Observable<Item, Err, SkipLastObserver<O, Item>>,
  O: Observer<Item, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(SkipLastObserver {
      observer,
      count: self.count,
      queue: VecDeque::with_capacity(self.count.min(64)),
    })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for SkipLastOp<S> where S: ObservableExt<Item, Err> {}

pub struct SkipLastObserver<O, Item> {
  observer: O,
  count: usize,
  queue: VecDeque<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for SkipLastObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    self.queue.push_back(value);
    if self.queue.len() > self.count {
      if let Some(v) = self.queue.pop_front() {
        self.observer.next(v);
      }
    }
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  #[inline]
  fn complete(self) { self.observer.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

use std::collections::VecDeque;

use super::Subject;
use crate::prelude::*;

/// A [`Subject`] that records the values it receives and replays them to
/// every new subscriber before the live ones.
///
/// `ReplaySubject::default()` keeps every value; `ReplaySubject::bounded(n)`
/// only the most recent `n`. A terminal event is replayed after the values.
pub struct ReplaySubject<Item, Err> {
  subject: Subject<Item, Err>,
  buffer: MutRc<VecDeque<Item>>,
  capacity: Option<usize>,
}

impl<Item, Err> Clone for ReplaySubject<Item, Err> {
  fn clone(&self) -> Self {
    Self {
      subject: self.subject.clone(),
      buffer: self.buffer.clone(),
      capacity: self.capacity,
    }
  }
}

impl<Item, Err> Default for ReplaySubject<Item, Err> {
  fn default() -> Self {
    Self {
      subject: Subject::default(),
      buffer: MutRc::own(VecDeque::new()),
      capacity: None,
    }
  }
}

impl<Item, Err> ReplaySubject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Replays at most the last `capacity` values.
  pub fn bounded(capacity: usize) -> Self {
    Self {
      capacity: Some(capacity),
      buffer: MutRc::own(VecDeque::with_capacity(capacity)),
      ..Self::default()
    }
  }

  #[inline]
  pub fn subscribed_size(&self) -> usize { self.subject.subscribed_size() }

  /// Number of values that a new subscriber would get replayed.
  #[inline]
  pub fn buffered_len(&self) -> usize { self.buffer.rc_deref().len() }
}

impl<Item, Err> Observer<Item, Err> for ReplaySubject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    if self.subject.is_terminated() {
      return;
    }
    if self.capacity != Some(0) {
      let mut buffer = self.buffer.rc_deref_mut();
      if Some(buffer.len()) == self.capacity {
        buffer.pop_front();
      }
      buffer.push_back(value.clone());
    }
    self.subject.next(value);
  }

  #[inline]
  fn error(self, err: Err) { self.subject.error(err) }

  #[inline]
  fn complete(self) { self.subject.complete() }

  #[inline]
  fn is_finished(&self) -> bool { self.subject.is_finished() }
}

impl<Item, Err, O> Observable<Item, Err, O> for ReplaySubject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let replay: Vec<Item> = self.buffer.rc_deref().iter().cloned().collect();
    for v in replay {
      if observer.is_finished() {
        break;
      }
      observer.next(v);
    }
    if observer.is_finished() {
      return self.subject.closed_subscription();
    }
    self.subject.actual_subscribe(observer)
  }
}

impl<Item, Err> ObservableExt<Item, Err> for ReplaySubject<Item, Err> {}

use crate::prelude::*;
use std::collections::VecDeque;

/// Emits only the last `count` values, once the source completed.
#[derive(Clone)]
pub struct TakeLastOp<S> {
  pub(crate) source: S,
  pub(crate) count: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for TakeLastOp<S>
where
  S: Observable<Item, Err, TakeLastObserver<O, Item>>,
  O: Observer<Item, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(TakeLastObserver {
      observer,
      count: self.count,
      queue: VecDeque::with_capacity(self.count.min(64)),
    })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for TakeLastOp<S> where S: ObservableExt<Item, Err> {}

pub struct TakeLastObserver<O, Item> {
  observer: O,
  count: usize,
  queue: VecDeque<Item>,
}

impl<Item, Err, O> Observer<Item, Err> for TakeLastObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.count == 0 {
      return;
    }
    if self.queue.len() == self.count {
      self.queue.pop_front();
    }
    self.queue.push_back(value);
  }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    for v in self.queue {
      if self.observer.is_finished() {
        break;
      }
      self.observer.next(v);
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
  fn base_function() {
    let mut completed = false;
    let mut ticks = vec![];

    observable::from_iter(0..100)
      .take_last(5)
      .on_complete(|| completed = true)
      .subscribe(|v| ticks.push(v));

    assert_eq!(ticks, vec![95, 96, 97, 98, 99]);
    assert!(completed);
  }

  #[test]
  fn nothing_on_error() {
    let mut values = vec![];
    let mut error = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.next(2);
      emitter.error("broken");
    })
    .take_last(2)
    .subscribe_err(|v| values.push(v), |e| error = Some(e));

    assert!(values.is_empty());
    assert_eq!(error, Some("broken"));
  }
}

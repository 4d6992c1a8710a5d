use std::collections::VecDeque;

use crate::prelude::*;

/// Flattens a stream of observables into one, with at most `concurrent` inner
/// observables subscribed at a time. Extra inner observables wait in a FIFO
/// queue and are subscribed as running ones complete.
///
/// `flat_map` is `map` + `merge_all(usize::MAX)`, `concat_map` is `map` +
/// `merge_all(1)`.
#[derive(Clone)]
pub struct MergeAllOp<S, V> {
  source: S,
  concurrent: usize,
  _hint: TypeHint<V>,
}

impl<S, V> MergeAllOp<S, V> {
  #[inline]
  pub(crate) fn new(source: S, concurrent: usize) -> Self {
    Self { source, concurrent: concurrent.max(1), _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, V> Observable<Item, Err, O> for MergeAllOp<S, V>
where
  O: Observer<Item, Err> + 'static,
  S: Observable<V, Err, MergeAllOuterObserver<O, Item>>,
  S::Unsub: 'static,
  V: Observable<Item, Err, MergeAllInnerObserver<O>> + 'static,
  V::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let ctx = MergeAllCtx {
      observer: MutRc::own(Some(observer)),
      state: MutRc::own(MergeAllState {
        pending: VecDeque::new(),
        subscribed: 0,
        concurrent: self.concurrent,
        outer_completed: false,
      }),
      subscription: MultiSubscription::default(),
    };
    let subscription = ctx.subscription.clone();
    let unsub = self
      .source
      .actual_subscribe(MergeAllOuterObserver { ctx, _hint: TypeHint::new() });
    subscription.add(unsub);
    subscription
  }
}

impl<Item, Err, S, V> ObservableExt<Item, Err> for MergeAllOp<S, V>
where
  S: ObservableExt<V, Err>,
  V: ObservableExt<Item, Err>,
{
}

struct MergeAllState {
  pending: VecDeque<Box<dyn FnOnce()>>,
  subscribed: usize,
  concurrent: usize,
  outer_completed: bool,
}

pub struct MergeAllCtx<O> {
  observer: MutRc<Option<O>>,
  state: MutRc<MergeAllState>,
  subscription: MultiSubscription,
}

impl<O> Clone for MergeAllCtx<O> {
  fn clone(&self) -> Self {
    Self {
      observer: self.observer.clone(),
      state: self.state.clone(),
      subscription: self.subscription.clone(),
    }
  }
}

impl<O> MergeAllCtx<O> {
  fn subscribe_inner<V, Item, Err>(&self, inner: V)
  where
    O: Observer<Item, Err>,
    V: Observable<Item, Err, MergeAllInnerObserver<O>>,
    V::Unsub: 'static,
  {
    let unsub = inner.actual_subscribe(MergeAllInnerObserver { ctx: self.clone() });
    self.subscription.add(unsub);
  }

  fn fail<Item, Err>(&self, err: Err)
  where
    O: Observer<Item, Err>,
  {
    self.state.rc_deref_mut().pending.clear();
    Observer::<Item, Err>::error(self.observer.clone(), err);
    self.subscription.clone().unsubscribe();
  }
}

pub struct MergeAllOuterObserver<O, Item> {
  ctx: MergeAllCtx<O>,
  _hint: TypeHint<Item>,
}

impl<V, Item, Err, O> Observer<V, Err> for MergeAllOuterObserver<O, Item>
where
  O: Observer<Item, Err> + 'static,
  V: Observable<Item, Err, MergeAllInnerObserver<O>> + 'static,
  V::Unsub: 'static,
  Item: 'static,
  Err: 'static,
{
  fn next(&mut self, value: V) {
    let mut state = self.ctx.state.rc_deref_mut();
    if state.subscribed < state.concurrent {
      state.subscribed += 1;
      drop(state);
      self.ctx.subscribe_inner::<V, Item, Err>(value);
    } else {
      let ctx = self.ctx.clone();
      state
        .pending
        .push_back(Box::new(move || ctx.subscribe_inner::<V, Item, Err>(value)));
    }
  }

  fn error(self, err: Err) { self.ctx.fail::<Item, Err>(err) }

  fn complete(self) {
    let done = {
      let mut state = self.ctx.state.rc_deref_mut();
      state.outer_completed = true;
      state.subscribed == 0 && state.pending.is_empty()
    };
    if done {
      Observer::<Item, Err>::complete(self.ctx.observer);
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Item, Err>::is_finished(&self.ctx.observer) }
}

pub struct MergeAllInnerObserver<O> {
  ctx: MergeAllCtx<O>,
}

impl<Item, Err, O> Observer<Item, Err> for MergeAllInnerObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    Observer::<Item, Err>::next(&mut self.ctx.observer, value);
    if Observer::<Item, Err>::is_finished(&self.ctx.observer) {
      self.ctx.subscription.clone().unsubscribe();
    }
  }

  fn error(self, err: Err) { self.ctx.fail::<Item, Err>(err) }

  fn complete(self) {
    let (next_task, done) = {
      let mut state = self.ctx.state.rc_deref_mut();
      match state.pending.pop_front() {
        Some(task) => (Some(task), false),
        None => {
          state.subscribed -= 1;
          (None, state.subscribed == 0 && state.outer_completed)
        }
      }
    };
    if let Some(task) = next_task {
      task();
    } else if done {
      Observer::<Item, Err>::complete(self.ctx.observer);
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Item, Err>::is_finished(&self.ctx.observer) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc, time::Duration};

  #[test]
  fn flat_map_synchronous() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter([1usize, 2, 3])
      .flat_map(|i| observable::range(0, i))
      .subscribe_complete(|v| values.push(v), || completed = true);

    assert_eq!(values, vec![0, 0, 1, 0, 1, 2]);
    assert!(completed);
  }

  #[test]
  fn concat_map_synchronous() {
    let mut values = vec![];
    observable::from_iter([1usize, 2, 3])
      .concat_map(|i| observable::range(0, i))
      .subscribe(|v| values.push(v));

    assert_eq!(values, vec![0, 0, 1, 0, 1, 2]);
  }

  #[test]
  fn flat_map_interleaves_async_inners() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(false));
    let (v, c) = (values.clone(), completed.clone());

    observable::from_iter([10u64, 15])
      .flat_map(|period| {
        observable::interval(Duration::from_millis(period), TestScheduler)
          .take(2)
          .map(move |i| (period, i))
      })
      .subscribe_complete(move |x| v.borrow_mut().push(x), move || *c.borrow_mut() = true);

    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(
      *values.borrow(),
      vec![(10, 0), (15, 0), (10, 1), (15, 1)]
    );
    assert!(*completed.borrow());
  }

  #[test]
  fn concat_map_waits_for_previous_inner() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();

    observable::from_iter([10u64, 15])
      .concat_map(|period| {
        observable::interval(Duration::from_millis(period), TestScheduler)
          .take(2)
          .map(move |i| (period, i, TestScheduler::now()))
      })
      .subscribe(move |x| v.borrow_mut().push(x));

    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(
      *values.borrow(),
      vec![
        (10, 0, Duration::from_millis(10)),
        (10, 1, Duration::from_millis(20)),
        (15, 0, Duration::from_millis(35)),
        (15, 1, Duration::from_millis(50)),
      ]
    );
  }

  #[test]
  fn inner_error_stops_everything() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let error = Rc::new(RefCell::new(None));
    let (v, e) = (values.clone(), error.clone());

    observable::from_iter([0u64, 1])
      .map_err(|e: std::convert::Infallible| -> &'static str { match e {} })
      .flat_map(|i| {
        let ticks = observable::interval(Duration::from_millis(10), TestScheduler)
          .map_err(|e: std::convert::Infallible| -> &'static str { match e {} });
        ticks.try_map(move |t| if i == 1 && t == 1 { Err("inner failed") } else { Ok((i, t)) })
      })
      .subscribe_err(move |x| v.borrow_mut().push(x), move |err| *e.borrow_mut() = Some(err));

    TestScheduler::advance_by(Duration::from_millis(100));
    assert_eq!(*values.borrow(), vec![(0, 0), (1, 0), (0, 1)]);
    assert_eq!(*error.borrow(), Some("inner failed"));
    assert_eq!(TestScheduler::pending_count(), 0);
  }

  #[test]
  fn unsubscribe_cascades_to_inners() {
    TestScheduler::init();
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();

    let mut subscription = observable::from_iter([10u64, 20])
      .flat_map(|p| observable::interval(Duration::from_millis(p), TestScheduler))
      .subscribe(move |x| v.borrow_mut().push(x));

    TestScheduler::advance_by(Duration::from_millis(20));
    subscription.unsubscribe();
    TestScheduler::advance_by(Duration::from_millis(100));

    assert_eq!(values.borrow().len(), 3);
    assert_eq!(TestScheduler::pending_count(), 0);
  }

  #[test]
  fn take_after_flat_map_stops_upstream() {
    let mut values = vec![];
    observable::from_iter(0..)
      .flat_map(|i| observable::of(i))
      .take(3)
      .subscribe(|v| values.push(v));
    assert_eq!(values, vec![0, 1, 2]);
  }
}

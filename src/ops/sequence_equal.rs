use std::collections::VecDeque;

use crate::prelude::*;

/// Emits `true` if `a` and `b` emit equal values in the same order and then
/// both complete, `false` as soon as they are known to differ.
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::sequence_equal(observable::from_iter(0..3), observable::from_iter(0..3))
///   .subscribe(|equal| assert!(equal));
/// ```
pub fn sequence_equal<A, B, Item>(
  a: A, b: B,
) -> SequenceEqualOp<A, B, fn(&Item, &Item) -> bool, Item>
where
  Item: PartialEq,
{
  sequence_equal_with(a, b, <Item as PartialEq>::eq as fn(&Item, &Item) -> bool)
}

/// [`sequence_equal`] with a custom comparator, called as `cmp(a_value,
/// b_value)`.
pub fn sequence_equal_with<A, B, F, Item>(a: A, b: B, cmp: F) -> SequenceEqualOp<A, B, F, Item>
where
  F: FnMut(&Item, &Item) -> bool,
{
  SequenceEqualOp { a, b, cmp, _hint: TypeHint::new() }
}

#[derive(Clone)]
pub struct SequenceEqualOp<A, B, F, Item> {
  a: A,
  b: B,
  cmp: F,
  _hint: TypeHint<Item>,
}

impl<Item, Err, O, A, B, F> Observable<bool, Err, O> for SequenceEqualOp<A, B, F, Item>
where
  O: Observer<bool, Err>,
  A: Observable<Item, Err, SequenceEqualObserver<O, F, Item>>,
  A::Unsub: 'static,
  B: Observable<Item, Err, SequenceEqualObserver<O, F, Item>>,
  B::Unsub: 'static,
  F: FnMut(&Item, &Item) -> bool,
{
  type Unsub = MultiSubscription;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let state = MutRc::own(SequenceEqualState {
      observer: Some(observer),
      cmp: self.cmp,
      queues: [VecDeque::new(), VecDeque::new()],
      done: [false, false],
    });
    let subscription = MultiSubscription::default();

    let side = |side| SequenceEqualObserver {
      state: state.clone(),
      side,
      subscription: subscription.clone(),
    };
    let unsub = self.a.actual_subscribe(side(0));
    subscription.add(unsub);
    if state.rc_deref().observer.is_some() {
      let unsub = self.b.actual_subscribe(side(1));
      subscription.add(unsub);
    }
    subscription
  }
}

impl<Item, Err, A, B, F> ObservableExt<bool, Err> for SequenceEqualOp<A, B, F, Item>
where
  A: ObservableExt<Item, Err>,
  B: ObservableExt<Item, Err>,
{
}

struct SequenceEqualState<O, F, Item> {
  observer: Option<O>,
  cmp: F,
  /// Values of one side still waiting for their counterpart; at most one of
  /// the two is non-empty.
  queues: [VecDeque<Item>; 2],
  done: [bool; 2],
}

pub struct SequenceEqualObserver<O, F, Item> {
  state: MutRc<SequenceEqualState<O, F, Item>>,
  side: usize,
  subscription: MultiSubscription,
}

impl<O, F, Item> SequenceEqualObserver<O, F, Item> {
  fn resolve<Err>(&self, equal: bool)
  where
    O: Observer<bool, Err>,
  {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(mut observer) = observer {
      observer.next(equal);
      observer.complete();
    }
    self.subscription.clone().unsubscribe();
  }
}

impl<Item, Err, O, F> Observer<Item, Err> for SequenceEqualObserver<O, F, Item>
where
  O: Observer<bool, Err>,
  F: FnMut(&Item, &Item) -> bool,
{
  fn next(&mut self, value: Item) {
    let (me, other) = (self.side, 1 - self.side);
    let mismatch = {
      let mut guard = self.state.rc_deref_mut();
      let state = &mut *guard;
      if state.observer.is_none() {
        return;
      }
      if let Some(v) = state.queues[other].pop_front() {
        let equal = if me == 0 { (state.cmp)(&value, &v) } else { (state.cmp)(&v, &value) };
        !equal
      } else if state.done[other] {
        true
      } else {
        state.queues[me].push_back(value);
        false
      }
    };
    if mismatch {
      self.resolve::<Err>(false);
    }
  }

  fn error(self, err: Err) {
    let observer = self.state.rc_deref_mut().observer.take();
    if let Some(observer) = observer {
      observer.error(err);
    }
    self.subscription.clone().unsubscribe();
  }

  fn complete(self) {
    let (me, other) = (self.side, 1 - self.side);
    let result = {
      let mut state = self.state.rc_deref_mut();
      state.done[me] = true;
      if !state.queues[me].is_empty() {
        // the other side may still catch up
        None
      } else if !state.queues[other].is_empty() {
        Some(false)
      } else if state.done[other] {
        Some(true)
      } else {
        None
      }
    };
    if let Some(equal) = result {
      self.resolve::<Err>(equal);
    }
  }

  fn is_finished(&self) -> bool {
    self
      .state
      .rc_deref()
      .observer
      .as_ref()
      .map_or(true, |o| o.is_finished())
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn equal_sequences() {
    let mut result = vec![];
    observable::sequence_equal(observable::from_iter(0..5), observable::from_iter(0..5))
      .subscribe(|v| result.push(v));
    assert_eq!(result, vec![true]);
  }

  #[test]
  fn different_values() {
    let mut result = vec![];
    observable::sequence_equal(
      observable::from_iter([1, 2, 3]),
      observable::from_iter([1, 5, 3]),
    )
    .subscribe(|v| result.push(v));
    assert_eq!(result, vec![false]);
  }

  #[test]
  fn different_lengths() {
    let mut result = vec![];
    observable::sequence_equal(observable::from_iter(0..3), observable::from_iter(0..4))
      .subscribe(|v| result.push(v));
    observable::sequence_equal(observable::from_iter(0..4), observable::from_iter(0..3))
      .subscribe(|v| result.push(v));
    observable::sequence_equal(observable::empty::<i32>(), observable::empty())
      .subscribe(|v| result.push(v));
    assert_eq!(result, vec![false, false, true]);
  }

  #[test]
  fn custom_comparator() {
    let mut result = None;
    observable::sequence_equal_with(
      observable::from_iter([1, 2, 3]),
      observable::from_iter([2, 4, 6]),
      |a: &i32, b: &i32| a * 2 == *b,
    )
    .subscribe(|v| result = Some(v));
    assert_eq!(result, Some(true));
  }

  #[test]
  fn interleaved_subjects() {
    let mut a = Subject::<i32, &'static str>::new();
    let mut b = Subject::<i32, &'static str>::new();
    let result = Rc::new(RefCell::new(vec![]));
    let r = result.clone();
    observable::sequence_equal(a.clone(), b.clone())
      .subscribe_err(move |v| r.borrow_mut().push(v), |_| {});

    a.next(1);
    a.next(2);
    b.next(1);
    b.next(2);
    b.next(3);
    a.next(3);
    a.clone().complete();
    assert!(result.borrow().is_empty());
    b.clone().complete();
    assert_eq!(*result.borrow(), vec![true]);
  }

  #[test]
  fn mismatch_unsubscribes_both() {
    let mut a = Subject::<i32, &'static str>::new();
    let mut b = Subject::<i32, &'static str>::new();
    let result = Rc::new(RefCell::new(vec![]));
    let r = result.clone();
    let subscription = observable::sequence_equal(a.clone(), b.clone())
      .subscribe_err(move |v| r.borrow_mut().push(v), |_| {});

    a.next(1);
    b.next(2);
    assert_eq!(*result.borrow(), vec![false]);
    assert!(subscription.is_closed());
    assert_eq!(a.subscribed_size(), 0);
    assert_eq!(b.subscribed_size(), 0);
  }

  #[test]
  fn error_propagates() {
    let a = Subject::<i32, &'static str>::new();
    let b = Subject::<i32, &'static str>::new();
    let error = Rc::new(RefCell::new(None));
    let e = error.clone();
    observable::sequence_equal(a.clone(), b.clone())
      .subscribe_err(|_| unreachable!(), move |err| *e.borrow_mut() = Some(err));

    b.clone().error("b failed");
    assert_eq!(*error.borrow(), Some("b failed"));
    assert_eq!(a.subscribed_size(), 0);
  }
}

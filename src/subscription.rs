use smallvec::SmallVec;
use std::{
  cell::RefCell,
  fmt::{Debug, Formatter},
  rc::Rc,
};

mod action;
mod tuple;
pub use action::*;
pub use tuple::*;

/// Subscription returns from `Observable.actual_subscribe(observer)` to allow
/// unsubscribing.
pub trait Subscription {
  /// This allows deregistering an stream before it has finished receiving all
  /// events (i.e. before complete is called). Calling it more than once, or
  /// after the stream terminated, does nothing.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

pub type BoxSubscription = Box<dyn Subscription>;

impl Debug for BoxSubscription {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("BoxSubscription")
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

/// Synchronous sources have nothing left to cancel once subscribe returns.
impl Subscription for () {
  #[inline]
  fn unsubscribe(&mut self) {}

  #[inline]
  fn is_closed(&self) -> bool { true }
}

impl<T: Subscription> Subscription for Option<T> {
  #[inline]
  fn unsubscribe(&mut self) {
    if let Some(s) = self {
      s.unsubscribe()
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.as_ref().map_or(true, |s| s.is_closed()) }
}

impl<T: ?Sized> Subscription for Box<T>
where
  T: Subscription,
{
  #[inline]
  fn unsubscribe(&mut self) {
    let s = &mut **self;
    s.unsubscribe()
  }

  #[inline]
  fn is_closed(&self) -> bool {
    let s = &**self;
    s.is_closed()
  }
}

/// A shared, growable set of subscriptions unsubscribed together.
///
/// Adding to a closed `MultiSubscription` unsubscribes the addition right
/// away, so a handle may be added after the event that should have cancelled
/// it already happened.
#[derive(Clone, Debug, Default)]
pub struct MultiSubscription(Rc<RefCell<Inner>>);

#[derive(Debug, Default)]
struct Inner {
  closed: bool,
  teardown: SmallVec<[BoxSubscription; 2]>,
}

impl MultiSubscription {
  pub fn add<S: Subscription + 'static>(&self, mut subscription: S) {
    let mut inner = self.0.borrow_mut();
    if inner.closed {
      drop(inner);
      subscription.unsubscribe();
    } else {
      inner.teardown.retain(|s| !s.is_closed());
      if !subscription.is_closed() {
        inner.teardown.push(Box::new(subscription));
      }
    }
  }

  pub fn len(&self) -> usize { self.0.borrow().teardown.len() }

  pub fn is_empty(&self) -> bool { self.len() == 0 }
}

impl Subscription for MultiSubscription {
  fn unsubscribe(&mut self) {
    let teardown = {
      let mut inner = self.0.borrow_mut();
      if inner.closed {
        return;
      }
      inner.closed = true;
      std::mem::take(&mut inner.teardown)
    };
    for mut s in teardown {
      s.unsubscribe();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.borrow().closed }
}

/// Wrapper around a subscription which provides the
/// `unsubscribe_when_dropped()` method.
pub struct SubscriptionWrapper<T: Subscription>(pub(crate) T);

impl<T: Subscription> SubscriptionWrapper<T> {
  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<T> {
    SubscriptionGuard(self.0)
  }

  /// Consumes this wrapper and returns the underlying subscription.
  pub fn into_inner(self) -> T { self.0 }
}

impl<T: Subscription> Subscription for SubscriptionWrapper<T> {
  #[inline]
  fn unsubscribe(&mut self) { self.0.unsubscribe() }
  #[inline]
  fn is_closed(&self) -> bool { self.0.is_closed() }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[must_use]
pub struct SubscriptionGuard<T: Subscription>(pub(crate) T);

impl<T: Subscription> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> {
    SubscriptionGuard(subscription)
  }
}

impl<T: Subscription> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}

#[cfg(test)]
mod test {
  use super::*;
  use std::cell::Cell;

  #[test]
  fn add_and_unsubscribe_all() {
    let multi = MultiSubscription::default();
    let hits = Rc::new(Cell::new(0));
    for _ in 0..3 {
      let hits = hits.clone();
      multi.add(ActionSubscription::new(move || hits.set(hits.get() + 1)));
    }
    assert_eq!(multi.len(), 3);

    let mut m = multi.clone();
    m.unsubscribe();
    m.unsubscribe();
    assert_eq!(hits.get(), 3);
    assert!(multi.is_closed());
    assert!(multi.is_empty());
  }

  #[test]
  fn add_after_close_unsubscribes_immediately() {
    let mut multi = MultiSubscription::default();
    multi.unsubscribe();
    let hit = Rc::new(Cell::new(false));
    let h = hit.clone();
    multi.add(ActionSubscription::new(move || h.set(true)));
    assert!(hit.get());
    assert!(multi.is_empty());
  }

  #[test]
  fn closed_entries_are_pruned() {
    let multi = MultiSubscription::default();
    multi.add(());
    let mut inner = MultiSubscription::default();
    multi.add(inner.clone());
    inner.unsubscribe();
    multi.add(MultiSubscription::default());
    assert_eq!(multi.len(), 1);
  }

  #[test]
  fn guard_unsubscribes_on_drop() {
    let hit = Rc::new(Cell::new(false));
    {
      let h = hit.clone();
      let _guard =
        SubscriptionWrapper(ActionSubscription::new(move || h.set(true)))
          .unsubscribe_when_dropped();
      assert!(!hit.get());
    }
    assert!(hit.get());
  }
}

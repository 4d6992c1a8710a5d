use crate::prelude::*;
use std::{
  cell::{Ref, RefCell, RefMut},
  rc::Rc,
};

/// Shared mutable state owned by one subscription.
///
/// Operators that fan a single downstream observer out to several upstream
/// observers (`take_until`, `merge_all`, `sequence_equal`, ...) keep that
/// observer in a `MutRc<Option<O>>`.
#[derive(Default)]
pub struct MutRc<T>(Rc<RefCell<T>>);

impl<T> MutRc<T> {
  pub fn own(t: T) -> Self { Self(Rc::new(RefCell::new(t))) }

  #[inline]
  pub fn rc_deref(&self) -> Ref<'_, T> { self.0.borrow() }

  #[inline]
  pub fn rc_deref_mut(&self) -> RefMut<'_, T> { self.0.borrow_mut() }

  /// Returns `None` when the value is borrowed further up the stack.
  #[inline]
  pub fn try_rc_deref_mut(&self) -> Option<RefMut<'_, T>> {
    self.0.try_borrow_mut().ok()
  }

  #[inline]
  pub fn ptr_eq(&self, other: &Self) -> bool { Rc::ptr_eq(&self.0, &other.0) }
}

impl<T> Clone for MutRc<T> {
  #[inline]
  fn clone(&self) -> Self { Self(self.0.clone()) }
}

/// The first terminal call takes the inner observer out, so every later call
/// through another clone is ignored.
impl<Item, Err, O> Observer<Item, Err> for MutRc<Option<O>>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(observer) = self.rc_deref_mut().as_mut() {
      observer.next(value);
    }
  }

  fn error(self, err: Err) {
    let observer = self.rc_deref_mut().take();
    if let Some(observer) = observer {
      observer.error(err);
    }
  }

  fn complete(self) {
    let observer = self.rc_deref_mut().take();
    if let Some(observer) = observer {
      observer.complete();
    }
  }

  fn is_finished(&self) -> bool {
    self
      .0
      .try_borrow()
      .map_or(false, |o| o.as_ref().map_or(true, |o| o.is_finished()))
  }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn shared_observer_terminates_once() {
    let completed = Rc::new(RefCell::new(0));
    let values = Rc::new(RefCell::new(vec![]));
    let (c, v) = (completed.clone(), values.clone());
    let mut shared = MutRc::own(Some(ObserverComp::new(
      move |x: i32| v.borrow_mut().push(x),
      move || *c.borrow_mut() += 1,
    )));
    let other = shared.clone();

    Observer::<i32, std::convert::Infallible>::next(&mut shared, 1);
    Observer::<i32, std::convert::Infallible>::complete(shared);
    assert!(Observer::<i32, std::convert::Infallible>::is_finished(&other));
    Observer::<i32, std::convert::Infallible>::complete(other);

    assert_eq!(*values.borrow(), vec![1]);
    assert_eq!(*completed.borrow(), 1);
  }
}

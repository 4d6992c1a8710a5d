use super::Subscription;

/// A subscription that runs a clean-up action the first time it is
/// unsubscribed.
///
/// ```
/// use rxlite::prelude::*;
///
/// let mut s = ActionSubscription::new(|| println!("released"));
/// s.unsubscribe();
/// s.unsubscribe(); // no-op
/// assert!(s.is_closed());
/// ```
pub struct ActionSubscription<F>(Option<F>);

impl<F: FnOnce()> ActionSubscription<F> {
  pub fn new(action: F) -> Self { ActionSubscription(Some(action)) }
}

impl<F: FnOnce()> Subscription for ActionSubscription<F> {
  fn unsubscribe(&mut self) {
    if let Some(action) = self.0.take() {
      action();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.0.is_none() }
}

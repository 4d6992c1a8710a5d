use super::Subscription;

/// Two subscriptions unsubscribed together.
///
/// Operators with exactly two moving parts use it, for example `take_for`
/// (the upstream subscription and the deadline timer).
pub struct TupleSubscription<U1, U2> {
  unsub1: U1,
  unsub2: U2,
}

impl<U1, U2> TupleSubscription<U1, U2> {
  pub fn new(unsub1: U1, unsub2: U2) -> Self { TupleSubscription { unsub1, unsub2 } }
}

impl<U1, U2> Subscription for TupleSubscription<U1, U2>
where
  U1: Subscription,
  U2: Subscription,
{
  fn unsubscribe(&mut self) {
    self.unsub1.unsubscribe();
    self.unsub2.unsubscribe();
  }

  fn is_closed(&self) -> bool { self.unsub1.is_closed() && self.unsub2.is_closed() }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::subscription::MultiSubscription;

  #[test]
  fn closes_both() {
    let a = MultiSubscription::default();
    let b = MultiSubscription::default();
    let mut tuple = TupleSubscription::new(a.clone(), b.clone());
    assert!(!tuple.is_closed());

    tuple.unsubscribe();
    assert!(a.is_closed());
    assert!(b.is_closed());
    assert!(tuple.is_closed());
  }

  #[test]
  fn open_while_one_side_is_open() {
    let mut a = MultiSubscription::default();
    let tuple = TupleSubscription::new(a.clone(), MultiSubscription::default());
    a.unsubscribe();
    assert!(!tuple.is_closed());
  }
}

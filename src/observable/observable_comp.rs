use crate::prelude::*;
use std::fmt::Debug;

use super::observable_next::log_unhandled_error;

/// Observer built from a value and a completion closure. An error reaching
/// it is logged.
#[derive(Clone)]
pub struct ObserverComp<N, C> {
  next: N,
  complete: C,
}

impl<N, C> ObserverComp<N, C> {
  #[inline(always)]
  pub fn new(next: N, complete: C) -> Self { ObserverComp { next, complete } }
}

impl<Item, Err, N, C> Observer<Item, Err> for ObserverComp<N, C>
where
  N: FnMut(Item),
  C: FnOnce(),
  Err: Debug,
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline]
  fn error(self, err: Err) { log_unhandled_error(&err) }
  #[inline(always)]
  fn complete(self) { (self.complete)(); }
  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}

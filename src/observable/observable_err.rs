use crate::prelude::*;

/// Observer built from a value and an error closure; completion is ignored.
#[derive(Clone)]
pub struct ObserverErr<N, E> {
  next: N,
  error: E,
}

impl<N, E> ObserverErr<N, E> {
  #[inline(always)]
  pub fn new(next: N, error: E) -> Self { ObserverErr { next, error } }
}

impl<Item, Err, N, E> Observer<Item, Err> for ObserverErr<N, E>
where
  N: FnMut(Item),
  E: FnOnce(Err),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(self, err: Err) { (self.error)(err); }
  #[inline(always)]
  fn complete(self) {}
  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn receives_error() {
    let mut values = vec![];
    let mut err = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.error("failed");
    })
    .subscribe_err(|v| values.push(v), |e| err = Some(e));
    assert_eq!(values, vec![1]);
    assert_eq!(err, Some("failed"));
  }
}

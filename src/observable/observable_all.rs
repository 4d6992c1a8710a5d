use crate::prelude::*;

/// Observer built from three closures, used by
/// [`ObservableExt::subscribe_all`].
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline(always)]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnOnce(Err),
  C: FnOnce(),
{
  #[inline(always)]
  fn next(&mut self, value: Item) { (self.next)(value); }
  #[inline(always)]
  fn error(self, err: Err) { (self.error)(err); }
  #[inline(always)]
  fn complete(self) { (self.complete)(); }
  #[inline(always)]
  fn is_finished(&self) -> bool { false }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn all_three_callbacks() {
    let mut values = vec![];
    let mut err = None;
    let mut completed = false;
    observable::from_iter(1..4)
      .map_err(|e: std::convert::Infallible| -> &str { match e {} })
      .subscribe_all(|v| values.push(v), |e| err = Some(e), || completed = true);
    assert_eq!(values, vec![1, 2, 3]);
    assert!(completed);
    assert_eq!(err, None);

    let mut err = None;
    observable::throw_err("boom").subscribe_all(
      |_: ()| {},
      |e| err = Some(e),
      || completed = false,
    );
    assert_eq!(err, Some("boom"));
    assert!(completed);
  }
}

use crate::prelude::*;

/// Creates an observable that calls `factory` on every subscription and
/// subscribes to the observable it returns.
///
/// Unlike building the observable up front, whatever `factory` computes is
/// computed anew for each subscriber.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
/// use std::time::Instant;
///
/// let now = observable::defer(|| observable::of(Instant::now()));
/// now.clone().subscribe(|t| println!("{:?}", t));
/// now.subscribe(|t| println!("{:?}", t));
/// ```
pub fn defer<F, R>(factory: F) -> Defer<F>
where
  F: FnOnce() -> R,
{
  Defer(factory)
}

#[derive(Clone)]
pub struct Defer<F>(F);

impl<F, R, Item, Err, O> Observable<Item, Err, O> for Defer<F>
where
  F: FnOnce() -> R,
  R: Observable<Item, Err, O>,
{
  type Unsub = R::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub { (self.0)().actual_subscribe(observer) }
}

impl<F, R, Item, Err> ObservableExt<Item, Err> for Defer<F>
where
  F: FnOnce() -> R,
  R: ObservableExt<Item, Err>,
{
}

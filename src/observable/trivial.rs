use crate::prelude::*;
use std::convert::Infallible;

/// Creates an observable that emits no items, just terminates with an error.
///
/// # Arguments
///
/// * `e` - An error to emit and terminate with
pub fn throw_err<Item, Err>(e: Err) -> ThrowErr<Item, Err> { ThrowErr(e, TypeHint::new()) }

#[derive(Clone)]
pub struct ThrowErr<Item, Err>(Err, TypeHint<Item>);

impl<Item, Err, O> Observable<Item, Err, O> for ThrowErr<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.error(self.0) }
}

impl<Item, Err> ObservableExt<Item, Err> for ThrowErr<Item, Err> {}

/// Creates an observable that produces no values.
///
/// Completes immediately. Never emits an error.
///
/// # Examples
/// ```
/// use rxlite::prelude::*;
///
/// observable::empty().subscribe(|v: i32| println!("{},", v));
///
/// // Result: no thing printed
/// ```
pub fn empty<Item>() -> Empty<Item> { Empty(TypeHint::new()) }

#[derive(Clone)]
pub struct Empty<Item>(TypeHint<Item>);

impl<Item, O> Observable<Item, Infallible, O> for Empty<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, observer: O) -> Self::Unsub { observer.complete() }
}

impl<Item> ObservableExt<Item, Infallible> for Empty<Item> {}

/// Creates an observable that never emits anything.
///
/// Neither emits a value, nor completes, nor emits an error. Subscribing
/// returns right away.
pub fn never<Item>() -> Never<Item> { Never(TypeHint::new()) }

#[derive(Clone)]
pub struct Never<Item>(TypeHint<Item>);

impl<Item, O> Observable<Item, Infallible, O> for Never<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  #[inline]
  fn actual_subscribe(self, _observer: O) -> Self::Unsub {}
}

impl<Item> ObservableExt<Item, Infallible> for Never<Item> {}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn throw() {
    let mut value_emitted = false;
    let mut completed = false;
    let mut error_emitted = String::new();
    observable::throw_err(String::from("error")).subscribe_all(
      |_: i32| value_emitted = true,
      |e| error_emitted = e,
      || completed = true,
    );
    assert!(!value_emitted);
    assert!(!completed);
    assert_eq!(error_emitted, "error");
  }

  #[test]
  fn empty() {
    let mut hits = 0;
    let mut completed = false;
    observable::empty().subscribe_complete(|_: i32| hits += 1, || completed = true);

    assert_eq!(hits, 0);
    assert!(completed);
  }

  #[test]
  fn never_returns_immediately() {
    let mut hits = 0;
    let mut completed = false;
    observable::never().subscribe_complete(|_: i32| hits += 1, || completed = true);

    assert_eq!(hits, 0);
    assert!(!completed);
  }
}

use crate::prelude::*;
use std::convert::Infallible;

/// Creates an observable producing multiple values.
///
/// Completes immediately after emitting the values given. Never emits an error.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
/// use rxlite::of_sequence;
///
/// of_sequence!(1, 2, 3).subscribe(|v| println!("{},", v));
///
/// // print log:
/// // 1
/// // 2
/// // 3
/// ```
#[macro_export]
macro_rules! of_sequence {
  ( $( $item:expr ),* $(,)? ) => {
    $crate::observable::from_iter([$( $item ),*])
  };
}

/// Creates an observable producing a single value.
///
/// Completes immediately after emitting the value given. Never emits an error.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::of(123).subscribe(|v| println!("{},", v));
/// ```
pub fn of<Item>(v: Item) -> OfObservable<Item> { OfObservable(v) }

#[derive(Clone)]
pub struct OfObservable<Item>(Item);

impl<Item, O> Observable<Item, Infallible, O> for OfObservable<Item>
where
  O: Observer<Item, Infallible>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    observer.next(self.0);
    observer.complete();
  }
}

impl<Item> ObservableExt<Item, Infallible> for OfObservable<Item> {}

/// Creates an observable that emits the value of an `Ok` and completes, or
/// emits the error of an `Err`.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::of_result(Ok::<_, &str>(1234)).subscribe(|v| println!("{},", v));
///
/// observable::of_result(Err::<i32, _>("An error"))
///   .subscribe_err(|_| {}, |e| println!("Error: {},", e));
/// ```
pub fn of_result<Item, Err>(r: Result<Item, Err>) -> ResultObservable<Item, Err> {
  ResultObservable(r)
}

#[derive(Clone)]
pub struct ResultObservable<Item, Err>(Result<Item, Err>);

impl<Item, Err, O> Observable<Item, Err, O> for ResultObservable<Item, Err>
where
  O: Observer<Item, Err>,
{
  type Unsub = ();

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    match self.0 {
      Ok(v) => {
        observer.next(v);
        observer.complete();
      }
      Err(e) => observer.error(e),
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for ResultObservable<Item, Err> {}

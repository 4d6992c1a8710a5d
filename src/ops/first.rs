use crate::prelude::*;

/// What `first`, `last` and `single` do when the source completes without a
/// value.
pub trait OnEmpty<Item, Err> {
  fn on_empty<O>(self, observer: O)
  where
    O: Observer<Item, Err>;
}

/// Complete without a value.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompleteOnEmpty;

/// Emit the held default, then complete.
#[derive(Clone, Debug)]
pub struct EmitOnEmpty<Item>(pub Item);

/// Error with `RxError::NoSuchElement`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ErrorOnEmpty;

impl<Item, Err> OnEmpty<Item, Err> for CompleteOnEmpty {
  #[inline]
  fn on_empty<O>(self, observer: O)
  where
    O: Observer<Item, Err>,
  {
    observer.complete()
  }
}

impl<Item, Err> OnEmpty<Item, Err> for EmitOnEmpty<Item> {
  fn on_empty<O>(self, mut observer: O)
  where
    O: Observer<Item, Err>,
  {
    observer.next(self.0);
    observer.complete()
  }
}

impl<Item, Err> OnEmpty<Item, Err> for ErrorOnEmpty
where
  Err: From<RxError>,
{
  #[inline]
  fn on_empty<O>(self, observer: O)
  where
    O: Observer<Item, Err>,
  {
    observer.error(RxError::NoSuchElement.into())
  }
}

/// Emits the first value and completes, without waiting for the source.
#[derive(Clone)]
pub struct FirstOp<S, E> {
  source: S,
  on_empty: E,
}

impl<S, E> FirstOp<S, E> {
  #[inline]
  pub(crate) fn new(source: S, on_empty: E) -> Self { Self { source, on_empty } }
}

impl<Item, Err, O, S, E> Observable<Item, Err, O> for FirstOp<S, E>
where
  S: Observable<Item, Err, FirstObserver<O, E>>,
  O: Observer<Item, Err>,
  E: OnEmpty<Item, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(FirstObserver { observer: Some(observer), on_empty: self.on_empty })
  }
}

impl<Item, Err, S, E> ObservableExt<Item, Err> for FirstOp<S, E> where S: ObservableExt<Item, Err> {}

pub struct FirstObserver<O, E> {
  observer: Option<O>,
  on_empty: E,
}

impl<Item, Err, O, E> Observer<Item, Err> for FirstObserver<O, E>
where
  O: Observer<Item, Err>,
  E: OnEmpty<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if let Some(mut observer) = self.observer.take() {
      observer.next(value);
      observer.complete();
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(observer) = self.observer {
      self.on_empty.on_empty(observer)
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

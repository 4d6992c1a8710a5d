use crate::prelude::*;

/// Emits the value at `index` and completes; completes empty when the source
/// is shorter.
#[derive(Clone)]
pub struct ElementAtOp<S> {
  pub(crate) source: S,
  pub(crate) index: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for ElementAtOp<S>
where
  S: Observable<Item, Err, ElementAtObserver<O>>,
  O: Observer<Item, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ElementAtObserver {
      observer: Some(observer),
      remaining: self.index,
    })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for ElementAtOp<S> where S: ObservableExt<Item, Err> {}

pub struct ElementAtObserver<O> {
  observer: Option<O>,
  remaining: usize,
}

impl<Item, Err, O> Observer<Item, Err> for ElementAtObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.remaining > 0 {
      self.remaining -= 1;
    } else if let Some(mut observer) = self.observer.take() {
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
      observer.complete()
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

/// Like `ElementAtOp`, erroring with `RxError::IndexOutOfRange` when the
/// source is shorter.
#[derive(Clone)]
pub struct ElementAtOrErrorOp<S> {
  pub(crate) source: S,
  pub(crate) index: usize,
}

impl<Item, Err, O, S> Observable<Item, Err, O> for ElementAtOrErrorOp<S>
where
  S: Observable<Item, Err, ElementAtOrErrorObserver<O>>,
  O: Observer<Item, Err>,
  Err: From<RxError>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ElementAtOrErrorObserver {
      observer: Some(observer),
      index: self.index,
      seen: 0,
    })
  }
}

impl<Item, Err, S> ObservableExt<Item, Err> for ElementAtOrErrorOp<S> where
  S: ObservableExt<Item, Err>
{
}

pub struct ElementAtOrErrorObserver<O> {
  observer: Option<O>,
  index: usize,
  seen: usize,
}

impl<Item, Err, O> Observer<Item, Err> for ElementAtOrErrorObserver<O>
where
  O: Observer<Item, Err>,
  Err: From<RxError>,
{
  fn next(&mut self, value: Item) {
    if self.seen < self.index {
      self.seen += 1;
    } else if let Some(mut observer) = self.observer.take() {
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
      let err = RxError::IndexOutOfRange { index: self.index, len: self.seen };
      observer.error(err.into())
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

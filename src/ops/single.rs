use super::first::OnEmpty;
use crate::prelude::*;

/// Emits the only value of the source once it completed. A second value
/// errors with `RxError::MoreThanOneElement` right away.
#[derive(Clone)]
pub struct SingleOp<S, E> {
  source: S,
  on_empty: E,
}

impl<S, E> SingleOp<S, E> {
  #[inline]
  pub(crate) fn new(source: S, on_empty: E) -> Self { Self { source, on_empty } }
}

impl<Item, Err, O, S, E> Observable<Item, Err, O> for SingleOp<S, E>
where
  S: Observable<Item, Err, SingleObserver<O, Item, E>>,
  O: Observer<Item, Err>,
  E: OnEmpty<Item, Err>,
  Err: From<RxError>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(SingleObserver {
      observer: Some(observer),
      value: None,
      on_empty: self.on_empty,
    })
  }
}

impl<Item, Err, S, E> ObservableExt<Item, Err> for SingleOp<S, E> where S: ObservableExt<Item, Err> {}

pub struct SingleObserver<O, Item, E> {
  observer: Option<O>,
  value: Option<Item>,
  on_empty: E,
}

impl<Item, Err, O, E> Observer<Item, Err> for SingleObserver<O, Item, E>
where
  O: Observer<Item, Err>,
  E: OnEmpty<Item, Err>,
  Err: From<RxError>,
{
  fn next(&mut self, value: Item) {
    if self.observer.is_none() {
      return;
    }
    if self.value.is_some() {
      self.value = None;
      if let Some(observer) = self.observer.take() {
        observer.error(RxError::MoreThanOneElement.into());
      }
    } else {
      self.value = Some(value);
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    let Some(mut observer) = self.observer else {
      return;
    };
    match self.value {
      Some(v) => {
        observer.next(v);
        observer.complete();
      }
      None => self.on_empty.on_empty(observer),
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

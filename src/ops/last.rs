use super::first::OnEmpty;
use crate::prelude::*;

#[derive(Clone)]
pub struct LastOp<S, E> {
  source: S,
  on_empty: E,
}

impl<S, E> LastOp<S, E> {
  #[inline]
  pub(crate) fn new(source: S, on_empty: E) -> Self { Self { source, on_empty } }
}

impl<Item, Err, O, S, E> Observable<Item, Err, O> for LastOp<S, E>
where
  S: Observable<Item, Err, LastObserver<O, Item, E>>,
  O: Observer<Item, Err>,
  E: OnEmpty<Item, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(LastObserver { observer, last: None, on_empty: self.on_empty })
  }
}

impl<Item, Err, S, E> ObservableExt<Item, Err> for LastOp<S, E> where S: ObservableExt<Item, Err> {}

pub struct LastObserver<O, Item, E> {
  observer: O,
  last: Option<Item>,
  on_empty: E,
}

impl<Item, Err, O, E> Observer<Item, Err> for LastObserver<O, Item, E>
where
  O: Observer<Item, Err>,
  E: OnEmpty<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) { self.last = Some(value); }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    match self.last.take() {
      Some(v) => {
        self.observer.next(v);
        self.observer.complete();
      }
      None => self.on_empty.on_empty(self.observer),
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn last_or_hundred_items() {
    let mut completed = 0;
    let mut last_item = None;

    observable::from_iter(0..100)
      .last_or(200)
      .on_complete(|| completed += 1)
      .subscribe(|v| last_item = Some(v));

    assert_eq!(completed, 1);
    assert_eq!(Some(99), last_item);
  }

  #[test]
  fn last_or_no_items() {
    let mut completed = 0;
    let mut last_item = None;

    observable::empty()
      .last_or(100)
      .on_complete(|| completed += 1)
      .subscribe(|v| last_item = Some(v));

    assert_eq!(completed, 1);
    assert_eq!(Some(100), last_item);
  }

  #[test]
  fn last_one_item() {
    let mut completed = 0;
    let mut last_item = None;

    observable::from_iter(0..2)
      .last()
      .on_complete(|| completed += 1)
      .subscribe(|v| last_item = Some(v));

    assert_eq!(completed, 1);
    assert_eq!(Some(1), last_item);
  }

  #[test]
  fn last_no_items() {
    let mut completed = 0;
    let mut last_item = None;

    observable::empty::<i32>()
      .last()
      .on_complete(|| completed += 1)
      .subscribe(|v| last_item = Some(v));

    assert_eq!(completed, 1);
    assert_eq!(None, last_item);
  }

  #[test]
  fn last_or_error_on_empty() {
    let mut error = None;
    observable::empty::<i32>()
      .map_err(RxError::from)
      .last_or_error()
      .subscribe_err(|_| unreachable!(), |e| error = Some(e));
    assert_eq!(error, Some(RxError::NoSuchElement));
  }

  #[test]
  fn error_overrides_last_value() {
    let mut values = vec![];
    let mut error = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.error("late failure");
    })
    .last()
    .subscribe_err(|v| values.push(v), |e| error = Some(e));

    assert!(values.is_empty());
    assert_eq!(error, Some("late failure"));
  }
}

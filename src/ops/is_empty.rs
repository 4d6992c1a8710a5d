use crate::prelude::*;

#[derive(Clone)]
pub struct IsEmptyOp<S, Item> {
  source: S,
  _hint: TypeHint<Item>,
}

impl<S, Item> IsEmptyOp<S, Item> {
  #[inline]
  pub(crate) fn new(source: S) -> Self { Self { source, _hint: TypeHint::new() } }
}

impl<Item, Err, O, S> Observable<bool, Err, O> for IsEmptyOp<S, Item>
where
  S: Observable<Item, Err, IsEmptyObserver<O>>,
  O: Observer<bool, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self
      .source
      .actual_subscribe(IsEmptyObserver { observer: Some(observer) })
  }
}

impl<Item, Err, S> ObservableExt<bool, Err> for IsEmptyOp<S, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct IsEmptyObserver<O> {
  observer: Option<O>,
}

impl<Item, Err, O> Observer<Item, Err> for IsEmptyObserver<O>
where
  O: Observer<bool, Err>,
{
  fn next(&mut self, _: Item) {
    if let Some(mut observer) = self.observer.take() {
      observer.next(false);
      observer.complete();
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(mut observer) = self.observer {
      observer.next(true);
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn smoke() {
    let mut result = vec![];
    observable::from_iter(0..).is_empty().subscribe(|b| result.push(b));
    observable::empty::<i32>().is_empty().subscribe(|b| result.push(b));
    assert_eq!(result, vec![false, true]);
  }

  #[test]
  fn error_on_empty_source_is_forwarded() {
    let mut result = None;
    let mut error = None;
    observable::throw_err::<i32, _>("boom")
      .is_empty()
      .subscribe_err(|v| result = Some(v), |e| error = Some(e));
    assert_eq!(result, None);
    assert_eq!(error, Some("boom"));
  }

  #[test]
  fn error_after_first_value_is_ignored() {
    let mut result = vec![];
    let mut error = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.error("boom");
    })
    .is_empty()
    .subscribe_err(|v| result.push(v), |e| error = Some(e));
    assert_eq!(result, vec![false]);
    assert_eq!(error, None);
  }
}

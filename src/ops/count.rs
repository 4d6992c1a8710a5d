use crate::prelude::*;

#[derive(Clone)]
pub struct CountOp<S, Item> {
  source: S,
  _hint: TypeHint<Item>,
}

impl<S, Item> CountOp<S, Item> {
  #[inline]
  pub(crate) fn new(source: S) -> Self { Self { source, _hint: TypeHint::new() } }
}

impl<Item, Err, O, S> Observable<usize, Err, O> for CountOp<S, Item>
where
  S: Observable<Item, Err, CountObserver<O>>,
  O: Observer<usize, Err>,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(CountObserver { observer, count: 0 })
  }
}

impl<Item, Err, S> ObservableExt<usize, Err> for CountOp<S, Item> where S: ObservableExt<Item, Err> {}

pub struct CountObserver<O> {
  observer: O,
  count: usize,
}

impl<Item, Err, O> Observer<Item, Err> for CountObserver<O>
where
  O: Observer<usize, Err>,
{
  #[inline]
  fn next(&mut self, _: Item) { self.count += 1; }

  #[inline]
  fn error(self, err: Err) { self.observer.error(err) }

  fn complete(mut self) {
    self.observer.next(self.count);
    self.observer.complete()
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.is_finished() }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;

  #[test]
  fn count() {
    let mut emitted = 0;
    observable::from_iter(vec!['1'; 5])
      .count()
      .subscribe(|v| emitted = v);
    assert_eq!(5, emitted);
  }

  #[test]
  fn count_empty() {
    let mut emitted = None;
    observable::empty::<i32>().count().subscribe(|v| emitted = Some(v));
    assert_eq!(Some(0), emitted);
  }

  #[test]
  fn error_overrides_the_count() {
    let mut result = None;
    let mut error = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.next(2);
      emitter.error("boom");
    })
    .count()
    .subscribe_err(|v| result = Some(v), |e| error = Some(e));
    assert_eq!(result, None);
    assert_eq!(error, Some("boom"));
  }
}

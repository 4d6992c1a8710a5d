use crate::prelude::*;

#[derive(Clone)]
pub struct ContainsOp<S, Item> {
  pub(crate) source: S,
  pub(crate) target: Item,
}

impl<Item, Err, O, S> Observable<bool, Err, O> for ContainsOp<S, Item>
where
  S: Observable<Item, Err, ContainsObserver<O, Item>>,
  O: Observer<bool, Err>,
  Item: PartialEq,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(ContainsObserver {
      observer: Some(observer),
      target: self.target,
    })
  }
}

impl<Item, Err, S> ObservableExt<bool, Err> for ContainsOp<S, Item> where
  S: ObservableExt<Item, Err>
{
}

pub struct ContainsObserver<O, Item> {
  observer: Option<O>,
  target: Item,
}

impl<Item, Err, O> Observer<Item, Err> for ContainsObserver<O, Item>
where
  O: Observer<bool, Err>,
  Item: PartialEq,
{
  fn next(&mut self, value: Item) {
    if value == self.target {
      if let Some(mut observer) = self.observer.take() {
        observer.next(true);
        observer.complete();
      }
    }
  }

  fn error(self, err: Err) {
    if let Some(observer) = self.observer {
      observer.error(err)
    }
  }

  fn complete(self) {
    if let Some(mut observer) = self.observer {
      observer.next(false);
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.observer.as_ref().map_or(true, |o| o.is_finished()) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn contains_target() {
    let mut result = vec![];
    observable::from_iter(0..20)
      .contains(4)
      .subscribe(|b| result.push(b));
    assert_eq!(result, vec![true]);
  }

  #[test]
  fn missing_target() {
    let mut result = vec![];
    observable::from_iter(0..20)
      .contains(40)
      .subscribe(|b| result.push(b));
    assert_eq!(result, vec![false]);
  }

  #[test]
  fn error_before_target_is_forwarded() {
    let mut result = None;
    let mut error = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.error("boom");
    })
    .contains(4)
    .subscribe_err(|v| result = Some(v), |e| error = Some(e));
    assert_eq!(result, None);
    assert_eq!(error, Some("boom"));
  }

  #[test]
  fn error_after_target_is_ignored() {
    let mut result = vec![];
    let mut error = None;
    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(4);
      emitter.error("boom");
    })
    .contains(4)
    .subscribe_err(|v| result.push(v), |e| error = Some(e));
    assert_eq!(result, vec![true]);
    assert_eq!(error, None);
  }

  #[test]
  fn found_target_releases_the_source() {
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    let mut source = Subject::<i32, ()>::new();
    source
      .clone()
      .contains(2)
      .subscribe_err(move |x| v.borrow_mut().push(x), |_| {});
    source.next(1);
    assert_eq!(source.subscribed_size(), 1);
    source.next(2);
    assert_eq!(source.subscribed_size(), 0);
    assert_eq!(*values.borrow(), vec![true]);
  }
}

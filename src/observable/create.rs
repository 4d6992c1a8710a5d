use crate::prelude::*;

/// Creates an observable from a recipe run once per subscription.
///
/// The recipe receives a fresh [`Emitter`] and returns the teardown of that
/// subscription (any [`Subscription`], `()` when there is nothing to release).
/// Calls made through the emitter after a terminal event are dropped.
///
/// # Examples
///
/// ```
/// use rxlite::prelude::*;
///
/// observable::create(|emitter: &mut dyn Emitter<i32, String>| {
///   emitter.next(1);
///   emitter.next(2);
///   emitter.complete();
/// })
/// .subscribe(|v| println!("{v}"));
/// ```
pub fn create<F, Item, Err, U>(recipe: F) -> Create<F, Item, Err>
where
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  Create { recipe, _hint: TypeHint::new() }
}

#[derive(Clone)]
pub struct Create<F, Item, Err> {
  recipe: F,
  _hint: TypeHint<(Item, Err)>,
}

struct CreateEmitter<O>(Option<O>);

impl<O, Item, Err> Emitter<Item, Err> for CreateEmitter<O>
where
  O: Observer<Item, Err>,
{
  #[inline]
  fn next(&mut self, value: Item) {
    if let Some(observer) = &mut self.0 {
      observer.next(value);
    }
  }

  #[inline]
  fn error(&mut self, err: Err) {
    if let Some(observer) = self.0.take() {
      observer.error(err);
    }
  }

  #[inline]
  fn complete(&mut self) {
    if let Some(observer) = self.0.take() {
      observer.complete();
    }
  }

  #[inline]
  fn is_finished(&self) -> bool { self.0.as_ref().map_or(true, |o| o.is_finished()) }
}

impl<F, Item, Err, U, O> Observable<Item, Err, O> for Create<F, Item, Err>
where
  O: Observer<Item, Err>,
  F: FnOnce(&mut dyn Emitter<Item, Err>) -> U,
  U: Subscription,
{
  type Unsub = U;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut emitter = CreateEmitter(Some(observer));
    (self.recipe)(&mut emitter)
  }
}

impl<F, Item, Err> ObservableExt<Item, Err> for Create<F, Item, Err> {}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::Cell, convert::Infallible, rc::Rc};

  #[test]
  fn proxy_call() {
    let mut next = 0;
    let mut err = 0;
    let mut complete = 0;

    observable::create(|emitter: &mut dyn Emitter<i32, &str>| {
      emitter.next(1);
      emitter.next(2);
      emitter.next(3);
      emitter.complete();
      emitter.next(3);
      emitter.error("never dispatch error");
    })
    .subscribe_all(|_| next += 1, |_| err += 1, || complete += 1);

    assert_eq!(next, 3);
    assert_eq!(complete, 1);
    assert_eq!(err, 0);
  }

  #[test]
  fn recipe_runs_per_subscription() {
    let runs = Cell::new(0);
    let o = observable::create(|emitter: &mut dyn Emitter<i32, Infallible>| {
      runs.set(runs.get() + 1);
      emitter.next(runs.get());
      emitter.complete();
    });
    let mut sum = 0;
    o.clone().subscribe(|v| sum += v);
    o.subscribe(|v| sum += v);

    assert_eq!(runs.get(), 2);
    assert_eq!(sum, 3);
  }

  #[test]
  fn teardown_runs_on_unsubscribe() {
    let released = Rc::new(Cell::new(false));
    let r = released.clone();
    let mut subscription = observable::create(move |emitter: &mut dyn Emitter<i32, Infallible>| {
      emitter.next(1);
      ActionSubscription::new(move || r.set(true))
    })
    .subscribe(|_| {});

    assert!(!released.get());
    subscription.unsubscribe();
    assert!(released.get());
  }

  #[test]
  fn emitter_sees_finished_downstream() {
    let mut emitted = vec![];
    observable::create(|emitter: &mut dyn Emitter<i32, Infallible>| {
      let mut i = 0;
      while !emitter.is_finished() {
        emitter.next(i);
        i += 1;
      }
    })
    .take(3)
    .subscribe(|v| emitted.push(v));

    assert_eq!(emitted, vec![0, 1, 2]);
  }
}

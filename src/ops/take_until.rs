use crate::prelude::*;

/// Mirrors the source until `notifier` emits a value or completes; then the
/// source is unsubscribed and the result completes. A notifier error becomes
/// the result's error.
#[derive(Clone)]
pub struct TakeUntilOp<S, N, NotifyItem> {
  source: S,
  notifier: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> TakeUntilOp<S, N, NotifyItem> {
  #[inline]
  pub(crate) fn new(source: S, notifier: N) -> Self {
    Self { source, notifier, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, N, NotifyItem> Observable<Item, Err, O> for TakeUntilOp<S, N, NotifyItem>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, TakeUntilObserver<O>>,
  S::Unsub: 'static,
  N: Observable<NotifyItem, Err, TakeUntilNotifierObserver<O, Item>>,
  N::Unsub: 'static,
{
  type Unsub = TupleSubscription<MultiSubscription, MultiSubscription>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutRc::own(Some(observer));
    let source_subscription = MultiSubscription::default();
    let notifier_subscription = MultiSubscription::default();

    let unsub = self.notifier.actual_subscribe(TakeUntilNotifierObserver {
      observer: observer.clone(),
      source_subscription: source_subscription.clone(),
      _hint: TypeHint::new(),
    });
    notifier_subscription.add(unsub);

    // The notifier may already have fired while being subscribed.
    if !Observer::<Item, Err>::is_finished(&observer) {
      let unsub = self.source.actual_subscribe(TakeUntilObserver {
        observer,
        notifier_subscription: notifier_subscription.clone(),
      });
      source_subscription.add(unsub);
    }

    TupleSubscription::new(source_subscription, notifier_subscription)
  }
}

impl<Item, Err, S, N, NotifyItem> ObservableExt<Item, Err> for TakeUntilOp<S, N, NotifyItem>
where
  S: ObservableExt<Item, Err>,
  N: ObservableExt<NotifyItem, Err>,
{
}

pub struct TakeUntilObserver<O> {
  observer: MutRc<Option<O>>,
  notifier_subscription: MultiSubscription,
}

impl<Item, Err, O> Observer<Item, Err> for TakeUntilObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    Observer::<Item, Err>::next(&mut self.observer, value);
    if Observer::<Item, Err>::is_finished(&self.observer) {
      self.notifier_subscription.unsubscribe();
    }
  }

  fn error(mut self, err: Err) {
    self.notifier_subscription.unsubscribe();
    Observer::<Item, Err>::error(self.observer, err)
  }

  fn complete(mut self) {
    self.notifier_subscription.unsubscribe();
    Observer::<Item, Err>::complete(self.observer)
  }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Item, Err>::is_finished(&self.observer) }
}

pub struct TakeUntilNotifierObserver<O, Item> {
  observer: MutRc<Option<O>>,
  source_subscription: MultiSubscription,
  _hint: TypeHint<Item>,
}

impl<O, Item> TakeUntilNotifierObserver<O, Item> {
  fn finish<Err>(&mut self)
  where
    O: Observer<Item, Err>,
  {
    self.source_subscription.unsubscribe();
    Observer::<Item, Err>::complete(self.observer.clone());
  }
}

impl<NotifyItem, Item, Err, O> Observer<NotifyItem, Err> for TakeUntilNotifierObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, _: NotifyItem) { self.finish::<Err>() }

  fn error(mut self, err: Err) {
    self.source_subscription.unsubscribe();
    Observer::<Item, Err>::error(self.observer, err)
  }

  fn complete(mut self) { self.finish::<Err>() }

  #[inline]
  fn is_finished(&self) -> bool { Observer::<Item, Err>::is_finished(&self.observer) }
}

#[cfg(test)]
mod test {
  use crate::prelude::*;
  use std::{cell::RefCell, rc::Rc};

  #[test]
  fn base_function() {
    let values = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(0));
    let (v, c) = (values.clone(), completed.clone());

    let mut notifier = Subject::<(), ()>::new();
    let mut source = Subject::<i32, ()>::new();
    source.clone().take_until(notifier.clone()).subscribe_all(
      move |i| v.borrow_mut().push(i),
      |_| {},
      move || *c.borrow_mut() += 1,
    );
    source.next(5);
    notifier.next(());
    source.next(6);
    notifier.clone().complete();
    source.clone().complete();

    assert_eq!(*values.borrow(), vec![5]);
    assert_eq!(*completed.borrow(), 1);
    assert_eq!(source.subscribed_size(), 0);
    assert_eq!(notifier.subscribed_size(), 0);
  }

  #[test]
  fn notifier_completion_completes() {
    let mut notifier = Subject::<(), ()>::new();
    let completed = Rc::new(RefCell::new(false));
    let c = completed.clone();
    observable::never::<i32>()
      .map_err(|e| -> () { match e {} })
      .take_until(notifier.clone())
      .subscribe_all(|_| {}, |_| {}, move || *c.borrow_mut() = true);
    notifier.next(());

    assert!(*completed.borrow());
  }

  #[test]
  fn notifier_error_is_forwarded() {
    let mut error = None;
    let mut values = vec![];
    observable::from_iter(0..3)
      .map_err(|e| -> &'static str { match e {} })
      .take_until(observable::throw_err::<(), _>("stop"))
      .subscribe_err(|v| values.push(v), |e| error = Some(e));

    assert!(values.is_empty());
    assert_eq!(error, Some("stop"));
  }

  #[test]
  fn synchronous_source_ends_normally() {
    let mut values = vec![];
    let mut completed = false;
    observable::from_iter(0..3)
      .take_until(observable::never::<()>())
      .subscribe_complete(|v| values.push(v), || completed = true);

    assert_eq!(values, vec![0, 1, 2]);
    assert!(completed);
  }

  #[test]
  fn downstream_finishing_releases_notifier() {
    let values = Rc::new(RefCell::new(vec![]));
    let v = values.clone();
    let mut source = Subject::<i32, ()>::new();
    let notifier = Subject::<(), ()>::new();
    source
      .clone()
      .take_until(notifier.clone())
      .take(1)
      .subscribe_err(move |x| v.borrow_mut().push(x), |_| {});
    assert_eq!(notifier.subscribed_size(), 1);

    source.next(1);

    assert_eq!(*values.borrow(), vec![1]);
    assert_eq!(source.subscribed_size(), 0);
    assert_eq!(notifier.subscribed_size(), 0);
  }
}

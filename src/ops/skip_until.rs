use crate::prelude::*;
use std::{cell::Cell, rc::Rc};

/// Drops the source values until `notifier` emits its first value. A notifier
/// that completes without emitting keeps the gate shut for good.
#[derive(Clone)]
pub struct SkipUntilOp<S, N, NotifyItem> {
  source: S,
  notifier: N,
  _hint: TypeHint<NotifyItem>,
}

impl<S, N, NotifyItem> SkipUntilOp<S, N, NotifyItem> {
  #[inline]
  pub(crate) fn new(source: S, notifier: N) -> Self {
    Self { source, notifier, _hint: TypeHint::new() }
  }
}

impl<Item, Err, O, S, N, NotifyItem> Observable<Item, Err, O> for SkipUntilOp<S, N, NotifyItem>
where
  O: Observer<Item, Err>,
  S: Observable<Item, Err, SkipUntilObserver<O>>,
  S::Unsub: 'static,
  N: Observable<NotifyItem, Err, SkipUntilNotifierObserver<O, Item>>,
  N::Unsub: 'static,
{
  type Unsub = TupleSubscription<MultiSubscription, MultiSubscription>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let observer = MutRc::own(Some(observer));
    let open = Rc::new(Cell::new(false));
    let source_subscription = MultiSubscription::default();
    let notifier_subscription = MultiSubscription::default();

    let unsub = self.notifier.actual_subscribe(SkipUntilNotifierObserver {
      observer: observer.clone(),
      open: open.clone(),
      source_subscription: source_subscription.clone(),
      notifier_subscription: notifier_subscription.clone(),
      _hint: TypeHint::new(),
    });
    notifier_subscription.add(unsub);

    if !Observer::<Item, Err>::is_finished(&observer) {
      let unsub = self.source.actual_subscribe(SkipUntilObserver {
        observer,
        open,
        notifier_subscription: notifier_subscription.clone(),
      });
      source_subscription.add(unsub);
    }

    TupleSubscription::new(source_subscription, notifier_subscription)
  }
}

impl<Item, Err, S, N, NotifyItem> ObservableExt<Item, Err> for SkipUntilOp<S, N, NotifyItem>
where
  S: ObservableExt<Item, Err>,
  N: ObservableExt<NotifyItem, Err>,
{
}

pub struct SkipUntilObserver<O> {
  observer: MutRc<Option<O>>,
  open: Rc<Cell<bool>>,
  notifier_subscription: MultiSubscription,
}

impl<Item, Err, O> Observer<Item, Err> for SkipUntilObserver<O>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, value: Item) {
    if self.open.get() {
      Observer::<Item, Err>::next(&mut self.observer, value);
    }
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

pub struct SkipUntilNotifierObserver<O, Item> {
  observer: MutRc<Option<O>>,
  open: Rc<Cell<bool>>,
  source_subscription: MultiSubscription,
  notifier_subscription: MultiSubscription,
  _hint: TypeHint<Item>,
}

impl<NotifyItem, Item, Err, O> Observer<NotifyItem, Err> for SkipUntilNotifierObserver<O, Item>
where
  O: Observer<Item, Err>,
{
  fn next(&mut self, _: NotifyItem) {
    if !self.open.replace(true) {
      tracing::trace!("skip_until gate opened");
      self.notifier_subscription.unsubscribe();
    }
  }

  fn error(mut self, err: Err) {
    if !self.open.get() {
      self.source_subscription.unsubscribe();
      Observer::<Item, Err>::error(self.observer, err)
    }
  }

  fn complete(self) {}

  fn is_finished(&self) -> bool {
    self.open.get() || Observer::<Item, Err>::is_finished(&self.observer)
  }
}

//! Hot observables that are also observers.
//!
//! A [`Subject`] broadcasts every value it receives to the observers
//! subscribed at that moment. A [`ReplaySubject`] also records the values and
//! replays them to late subscribers.

use std::{
  cell::{Cell, RefCell},
  collections::VecDeque,
  rc::Rc,
};

use crate::prelude::*;

mod replay_subject;
pub use replay_subject::ReplaySubject;

type BoxedObserver<Item, Err> = Box<dyn BoxObserver<Item, Err>>;

/// One subscribed observer.
///
/// `closed` is set by unsubscribe, or once the observer reports it is
/// finished; the slot is pruned from the list when no broadcast is running.
struct Slot<Item, Err> {
  closed: Cell<bool>,
  observer: RefCell<Option<BoxedObserver<Item, Err>>>,
}

#[derive(Clone)]
enum Terminal<Err> {
  Completed,
  Errored(Err),
}

impl<Err: Clone> Terminal<Err> {
  fn deliver<Item>(&self, observer: BoxedObserver<Item, Err>) {
    match self {
      Terminal::Completed => observer.complete(),
      Terminal::Errored(err) => observer.error(err.clone()),
    }
  }
}

/// An event fed to the subject while it was already broadcasting.
enum Queued<Item> {
  Value(Item),
  Terminal,
}

struct SubjectInner<Item, Err> {
  observers: Vec<Rc<Slot<Item, Err>>>,
  terminal: Option<Terminal<Err>>,
  emitting: bool,
  queued: VecDeque<Queued<Item>>,
}

impl<Item, Err> Default for SubjectInner<Item, Err> {
  fn default() -> Self {
    Self { observers: vec![], terminal: None, emitting: false, queued: VecDeque::new() }
  }
}

/// A multicast observable that forwards whatever it is fed.
///
/// Cloning a `Subject` gives another handle to the same observer list. Once
/// it received an error or a completion it keeps that terminal event and
/// delivers it to every later subscriber.
///
/// Feeding the subject from inside one of its own observers does not nest:
/// the event is queued and broadcast to every observer, the one that fed it
/// included, once the current broadcast returns.
pub struct Subject<Item, Err> {
  inner: MutRc<SubjectInner<Item, Err>>,
}

impl<Item, Err> Clone for Subject<Item, Err> {
  fn clone(&self) -> Self { Self { inner: self.inner.clone() } }
}

impl<Item, Err> Default for Subject<Item, Err> {
  fn default() -> Self { Self { inner: MutRc::own(SubjectInner::default()) } }
}

impl<Item, Err> Subject<Item, Err> {
  pub fn new() -> Self { Self::default() }

  /// Number of observers that are still subscribed.
  pub fn subscribed_size(&self) -> usize {
    self
      .inner
      .rc_deref()
      .observers
      .iter()
      .filter(|s| !s.closed.get())
      .count()
  }

  /// `true` once the subject received an error or a completion.
  pub fn is_terminated(&self) -> bool { self.inner.rc_deref().terminal.is_some() }

  /// A subscription that is already closed, for observers that finished
  /// before they were added.
  pub(crate) fn closed_subscription(&self) -> SubjectSubscription<Item, Err> {
    SubjectSubscription::closed(self.inner.clone())
  }

  fn prune(&self) {
    if let Some(mut inner) = self.inner.try_rc_deref_mut() {
      inner.observers.retain(|s| !s.closed.get());
    }
  }
}

impl<Item: Clone, Err: Clone> Subject<Item, Err> {
  /// Runs `first`, then everything queued meanwhile, with `emitting` set.
  fn emit(&self, first: Queued<Item>) {
    let mut event = Some(first);
    while let Some(e) = event {
      match e {
        Queued::Value(value) => self.broadcast_value(value),
        Queued::Terminal => self.broadcast_terminal(),
      }
      let mut inner = self.inner.rc_deref_mut();
      event = inner.queued.pop_front();
      if event.is_none() {
        inner.emitting = false;
      }
    }
  }

  fn broadcast_value(&self, value: Item) {
    let observers = self.inner.rc_deref().observers.clone();
    for slot in observers.iter() {
      if slot.closed.get() {
        continue;
      }
      if let Ok(mut observer) = slot.observer.try_borrow_mut() {
        if let Some(o) = observer.as_mut() {
          o.next(value.clone());
          if o.is_finished() {
            slot.closed.set(true);
          }
        }
      }
    }
    self.prune();
  }

  fn broadcast_terminal(&self) {
    let (observers, terminal) = {
      let mut inner = self.inner.rc_deref_mut();
      let Some(terminal) = inner.terminal.clone() else {
        return;
      };
      (std::mem::take(&mut inner.observers), terminal)
    };
    tracing::debug!(observers = observers.len(), "subject terminated");
    for slot in observers {
      if slot.closed.replace(true) {
        continue;
      }
      let observer = slot.observer.try_borrow_mut().ok().and_then(|mut o| o.take());
      if let Some(o) = observer {
        terminal.deliver(o);
      }
    }
  }

  /// Queues `event` if a broadcast is running, otherwise broadcasts it.
  fn feed(&self, event: Queued<Item>) {
    {
      let mut inner = self.inner.rc_deref_mut();
      if inner.emitting {
        inner.queued.push_back(event);
        return;
      }
      inner.emitting = true;
    }
    self.emit(event);
  }

  fn terminate(&self, terminal: Terminal<Err>) {
    {
      let mut inner = self.inner.rc_deref_mut();
      if inner.terminal.is_some() {
        return;
      }
      inner.terminal = Some(terminal);
    }
    self.feed(Queued::Terminal);
  }
}

impl<Item, Err> Observer<Item, Err> for Subject<Item, Err>
where
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    if self.is_terminated() {
      return;
    }
    self.feed(Queued::Value(value));
  }

  fn error(self, err: Err) { self.terminate(Terminal::Errored(err)) }

  fn complete(self) { self.terminate(Terminal::Completed) }

  #[inline]
  fn is_finished(&self) -> bool { self.is_terminated() }
}

impl<Item, Err, O> Observable<Item, Err, O> for Subject<Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    let mut inner = self.inner.rc_deref_mut();
    match &inner.terminal {
      Some(Terminal::Completed) => {
        drop(inner);
        observer.complete();
        SubjectSubscription::closed(self.inner.clone())
      }
      Some(Terminal::Errored(err)) => {
        let err = err.clone();
        drop(inner);
        observer.error(err);
        SubjectSubscription::closed(self.inner.clone())
      }
      None => {
        let slot = Rc::new(Slot {
          closed: Cell::new(false),
          observer: RefCell::new(Some(Box::new(observer) as BoxedObserver<Item, Err>)),
        });
        inner.observers.push(slot.clone());
        SubjectSubscription { subject: self.inner.clone(), slot: Some(slot) }
      }
    }
  }
}

impl<Item, Err> ObservableExt<Item, Err> for Subject<Item, Err> {}

/// Removes one observer from its subject.
///
/// Safe to call from inside that observer's own callback: the slot is marked
/// closed right away and removed once the broadcast in progress returns.
pub struct SubjectSubscription<Item, Err> {
  subject: MutRc<SubjectInner<Item, Err>>,
  slot: Option<Rc<Slot<Item, Err>>>,
}

impl<Item, Err> SubjectSubscription<Item, Err> {
  fn closed(subject: MutRc<SubjectInner<Item, Err>>) -> Self { Self { subject, slot: None } }
}

impl<Item, Err> Subscription for SubjectSubscription<Item, Err> {
  fn unsubscribe(&mut self) {
    let Some(slot) = self.slot.take() else {
      return;
    };
    slot.closed.set(true);
    if let Some(mut inner) = self.subject.try_rc_deref_mut() {
      inner.observers.retain(|s| !Rc::ptr_eq(s, &slot));
    }
    // Not borrowed unless we are inside this observer's callback; then it is
    // dropped along with the slot later.
    if let Ok(mut observer) = slot.observer.try_borrow_mut() {
      observer.take();
    };
  }

  fn is_closed(&self) -> bool { self.slot.as_ref().map_or(true, |s| s.closed.get()) }
}

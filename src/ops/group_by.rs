use std::{collections::HashMap, hash::Hash};

use crate::prelude::*;

#[derive(Clone)]
pub struct GroupByOp<S, F> {
  source: S,
  key: F,
}

impl<S, F> GroupByOp<S, F> {
  #[inline]
  pub(crate) fn new(source: S, key: F) -> Self { Self { source, key } }
}

impl<Key, Item, Err, O, S, F> Observable<GroupedObservable<Key, Item, Err>, Err, O>
  for GroupByOp<S, F>
where
  O: Observer<GroupedObservable<Key, Item, Err>, Err>,
  S: Observable<Item, Err, GroupByObserver<O, F, Key, Item, Err>>,
  F: FnMut(&Item) -> Key,
  Key: Hash + Eq + Clone,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = S::Unsub;

  fn actual_subscribe(self, observer: O) -> Self::Unsub {
    self.source.actual_subscribe(GroupByObserver {
      observer,
      key: self.key,
      groups: HashMap::new(),
    })
  }
}

impl<Key, Item, Err, S, F> ObservableExt<GroupedObservable<Key, Item, Err>, Err>
  for GroupByOp<S, F>
where
  S: ObservableExt<Item, Err>,
  F: FnMut(&Item) -> Key,
{
}

pub struct GroupByObserver<O, F, Key, Item, Err> {
  observer: O,
  key: F,
  groups: HashMap<Key, GroupedObservable<Key, Item, Err>>,
}

impl<Key, Item, Err, O, F> Observer<Item, Err> for GroupByObserver<O, F, Key, Item, Err>
where
  O: Observer<GroupedObservable<Key, Item, Err>, Err>,
  F: FnMut(&Item) -> Key,
  Key: Hash + Eq + Clone,
  Item: Clone,
  Err: Clone,
{
  fn next(&mut self, value: Item) {
    let key = (self.key)(&value);
    let group = match self.groups.get(&key) {
      Some(group) if !group.is_abandoned() => group.clone(),
      _ => {
        self.groups.retain(|_, g| !g.is_abandoned());
        let group = GroupedObservable::new(key.clone());
        self.groups.insert(key, group.clone());
        if !self.observer.is_finished() {
          self.observer.next(group.clone());
        }
        group
      }
    };
    group.push(value);
  }

  fn error(self, err: Err) {
    tracing::debug!(groups = self.groups.len(), "group_by source errored");
    for group in self.groups.into_values() {
      group.subject.error(err.clone());
    }
    self.observer.error(err);
  }

  fn complete(self) {
    for group in self.groups.into_values() {
      group.subject.complete();
    }
    self.observer.complete();
  }

  fn is_finished(&self) -> bool {
    self.observer.is_finished() && self.groups.values().all(|g| g.is_abandoned())
  }
}

/// The values of a `group_by` source that share one key.
///
/// Values routed here before the first subscriber arrives are kept and handed
/// to that subscriber; afterwards the group behaves like a [`Subject`].
pub struct GroupedObservable<Key, Item, Err> {
  pub key: Key,
  subject: Subject<Item, Err>,
  pending: MutRc<Option<Vec<Item>>>,
}

impl<Key: Clone, Item, Err> Clone for GroupedObservable<Key, Item, Err> {
  fn clone(&self) -> Self {
    Self {
      key: self.key.clone(),
      subject: self.subject.clone(),
      pending: self.pending.clone(),
    }
  }
}

impl<Key, Item, Err> GroupedObservable<Key, Item, Err> {
  fn new(key: Key) -> Self {
    Self { key, subject: Subject::new(), pending: MutRc::own(Some(vec![])) }
  }

  /// Was subscribed once and every subscriber has left.
  fn is_abandoned(&self) -> bool {
    self.pending.rc_deref().is_none() && self.subject.subscribed_size() == 0
  }

  fn push(&self, value: Item)
  where
    Item: Clone,
    Err: Clone,
  {
    if let Some(buffer) = self.pending.rc_deref_mut().as_mut() {
      buffer.push(value);
      return;
    }
    self.subject.clone().next(value);
  }
}

impl<Key, Item, Err, O> Observable<Item, Err, O> for GroupedObservable<Key, Item, Err>
where
  O: Observer<Item, Err> + 'static,
  Item: Clone + 'static,
  Err: Clone + 'static,
{
  type Unsub = SubjectSubscription<Item, Err>;

  fn actual_subscribe(self, mut observer: O) -> Self::Unsub {
    let buffered = self.pending.rc_deref_mut().take();
    for v in buffered.into_iter().flatten() {
      if observer.is_finished() {
        break;
      }
      observer.next(v);
    }
    if observer.is_finished() {
      return self.subject.closed_subscription();
    }
    self.subject.actual_subscribe(observer)
  }
}

impl<Key, Item, Err> ObservableExt<Item, Err> for GroupedObservable<Key, Item, Err> {}

#[cfg(test)]
mod test {
  use super::GroupByObserver;
  use crate::prelude::*;
  use std::{cell::RefCell, collections::HashMap, rc::Rc};

  #[test]
  fn routes_by_key() {
    let values = Rc::new(RefCell::new(vec![]));
    let mut keys = vec![];
    observable::from_iter(0..6)
      .group_by(|v| v % 2 == 0)
      .subscribe(|group| {
        keys.push(group.key);
        let (key, v) = (group.key, values.clone());
        group.subscribe(move |x| v.borrow_mut().push((key, x)));
      });

    assert_eq!(keys, vec![true, false]);
    assert_eq!(
      *values.borrow(),
      vec![(true, 0), (false, 1), (true, 2), (false, 3), (true, 4), (false, 5)]
    );
  }

  #[test]
  fn late_subscriber_gets_buffered_values() {
    let mut groups = vec![];
    observable::from_iter(["apple", "avocado", "banana", "apricot"])
      .group_by(|s| s.chars().next())
      .subscribe(|g| groups.push(g));

    let values = Rc::new(RefCell::new(vec![]));
    let completed = Rc::new(RefCell::new(0));
    for group in groups {
      let (v, c) = (values.clone(), completed.clone());
      group.subscribe_complete(
        move |x| v.borrow_mut().push(x),
        move || *c.borrow_mut() += 1,
      );
    }

    assert_eq!(*values.borrow(), vec!["apple", "avocado", "apricot", "banana"]);
    assert_eq!(*completed.borrow(), 2);
  }

  #[test]
  fn abandoned_group_is_replaced() {
    let mut keys = vec![];
    let firsts = Rc::new(RefCell::new(vec![]));
    observable::from_iter([1, 1, 2, 1])
      .group_by(|v| *v)
      .subscribe(|group| {
        keys.push(group.key);
        let f = firsts.clone();
        group.take(1).subscribe(move |x| f.borrow_mut().push(x));
      });

    assert_eq!(keys, vec![1, 1, 2, 1]);
    assert_eq!(*firsts.borrow(), vec![1, 1, 2, 1]);
  }

  #[test]
  fn error_reaches_groups_and_outer() {
    let errors = Rc::new(RefCell::new(vec![]));
    let e = errors.clone();
    let mut subject = Subject::<i32, &'static str>::new();
    subject.clone().group_by(|v| *v > 0).subscribe_err(
      move |group| {
        let e = e.clone();
        group.subscribe_err(|_| {}, move |err| e.borrow_mut().push(("group", err)));
      },
      {
        let e = errors.clone();
        move |err| e.borrow_mut().push(("outer", err))
      },
    );
    subject.next(1);
    subject.next(-1);
    subject.error("boom");

    assert_eq!(
      *errors.borrow(),
      vec![("group", "boom"), ("group", "boom"), ("outer", "boom")]
    );
  }

  #[test]
  fn abandoned_groups_are_dropped() {
    let downstream = Subject::<GroupedObservable<i32, i32, ()>, ()>::new();
    downstream.clone().subscribe(|group| {
      group.take(1).subscribe(|_| {});
    });
    let mut observer: GroupByObserver<_, _, i32, i32, ()> =
      GroupByObserver { observer: downstream, key: |v: &i32| *v, groups: HashMap::new() };

    for v in 0..100 {
      observer.next(v);
      assert_eq!(observer.groups.len(), 1);
    }
    observer.next(0);
    assert_eq!(observer.groups.len(), 1);
  }
}

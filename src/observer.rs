//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// This consumes the observer, as no more values can be emitted after an
  /// error
  fn error(self, err: Err);

  /// Handle completion of the observable
  ///
  /// This consumes the observer, as no more values can be emitted after
  /// completion
  fn complete(self);

  /// Returns `true` once this observer will not accept more values.
  ///
  /// Producers (like `from_iter` or `interval`) poll it to stop emitting
  /// early, e.g. after a downstream `take` has completed.
  fn is_finished(&self) -> bool;
}

/// The handle a `create` recipe emits through.
///
/// Unlike `Observer`, every method takes `&mut self`, so the recipe can work
/// with a `&mut dyn Emitter` without knowing the concrete observer type
/// down the chain. Calls after a terminal event are ignored.
pub trait Emitter<Item, Err> {
  fn next(&mut self, value: Item);
  fn error(&mut self, err: Err);
  fn complete(&mut self);
  /// `true` after a terminal event, or once the downstream stopped
  /// listening. Long-running recipes should check it and bail out.
  fn is_finished(&self) -> bool;
}

/// Object-safe mirror of [`Observer`], used where observers of different
/// concrete types are stored side by side (subjects, groups).
pub trait BoxObserver<Item, Err> {
  fn box_next(&mut self, value: Item);
  fn box_error(self: Box<Self>, err: Err);
  fn box_complete(self: Box<Self>);
  fn box_is_finished(&self) -> bool;
}

impl<T, Item, Err> BoxObserver<Item, Err> for T
where
  T: Observer<Item, Err>,
{
  #[inline]
  fn box_next(&mut self, value: Item) { self.next(value) }
  #[inline]
  fn box_error(self: Box<Self>, err: Err) { (*self).error(err) }
  #[inline]
  fn box_complete(self: Box<Self>) { (*self).complete() }
  #[inline]
  fn box_is_finished(&self) -> bool { self.is_finished() }
}

impl<Item, Err> Observer<Item, Err> for Box<dyn BoxObserver<Item, Err>> {
  #[inline]
  fn next(&mut self, value: Item) { (**self).box_next(value) }
  #[inline]
  fn error(self, err: Err) { self.box_error(err) }
  #[inline]
  fn complete(self) { self.box_complete() }
  #[inline]
  fn is_finished(&self) -> bool { (**self).box_is_finished() }
}

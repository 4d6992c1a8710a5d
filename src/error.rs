use std::convert::Infallible;

use thiserror::Error;

/// Errors synthesized by the operators themselves rather than raised by a
/// source.
///
/// Operators that can produce one of these require the stream error type to
/// implement `From<RxError>`. Sources that never fail (`Infallible`) can be
/// lifted with `map_err(RxError::from)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
  /// The source completed without the value an operator needed.
  #[error("sequence contains no elements")]
  NoSuchElement,
  /// A `single` operator saw a second value.
  #[error("sequence contains more than one element")]
  MoreThanOneElement,
  /// `element_at_or_error` was asked for an index past the end.
  #[error("index {index} is out of range, the sequence has {len} elements")]
  IndexOutOfRange { index: usize, len: usize },
}

impl From<Infallible> for RxError {
  fn from(e: Infallible) -> Self { match e {} }
}

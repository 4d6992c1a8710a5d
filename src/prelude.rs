//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::{
  error::RxError,
  observable,
  observable::{
    GroupedObservable, Notification, Observable, ObservableExt, ObserverAll, ObserverComp,
    ObserverErr, ObserverN,
  },
  observer::{BoxObserver, Emitter, Observer},
  rc::MutRc,
  scheduler::{Scheduler, TaskHandle, TaskState, TestScheduler},
  subject::*,
  subscription::*,
  type_hint::TypeHint,
};

#[cfg(feature = "tokio-scheduler")]
pub use crate::scheduler::TokioLocalScheduler;

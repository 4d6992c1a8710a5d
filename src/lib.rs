//! # rxlite: push-based Reactive Extensions for Rust
//!
//! A single-threaded implementation of [Reactive Extensions](http://reactivex.io/).
//! Observables are plain values describing how to emit to an observer;
//! operators wrap them and return new observables.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! observable::from_iter(0..10)
//!   .filter(|v| v % 2 == 0)
//!   .map(|v| v * 2)
//!   .subscribe(|v| println!("Value: {}", v));
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Subscribes an observer, returns a subscription |
//! | [`ObservableExt`] | Operators and the `subscribe*` helpers |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`Subscription`] | Handle to cancel an active subscription |
//! | [`Scheduler`] | Source of time for `timer`, `interval` and friends |
//!
//! ## Feature Flags
//!
//! - **`futures-scheduler`** (default): `futures` executor support
//! - **`timer`** (default): real-time sleeping for `LocalSpawner`
//! - **`tokio-scheduler`**: `TokioLocalScheduler` running on a tokio
//!   `LocalSet`
//!
//! [`Observable`]: observable::Observable
//! [`ObservableExt`]: observable::ObservableExt
//! [`Observer`]: observer::Observer
//! [`Subscription`]: subscription::Subscription
//! [`Scheduler`]: scheduler::Scheduler

#[cfg(test)]
#[macro_use]
extern crate bencher;

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod rc;
pub mod scheduler;
pub mod subject;
pub mod subscription;
pub mod type_hint;

pub use prelude::*;

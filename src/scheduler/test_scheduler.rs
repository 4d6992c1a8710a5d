//! Test Scheduler for deterministic testing of time-based operators.
//!
//! Provides virtual time that only advances when explicitly instructed,
//! enabling deterministic testing of `timer`, `interval`, `take_for`, etc.
//!
//! # Usage
//!
//! ```rust
//! use rxlite::prelude::*;
//! use std::time::Duration;
//!
//! // Initialize the test scheduler (required before use)
//! TestScheduler::init();
//!
//! observable::timer(42, Duration::from_millis(100), TestScheduler)
//!   .subscribe(|v| println!("{v}"));
//!
//! // Advance virtual time to trigger the delayed emission
//! TestScheduler::advance_by(Duration::from_millis(100));
//!
//! // Or execute all pending tasks
//! TestScheduler::flush();
//! ```
//!
//! # Thread Safety
//!
//! TestScheduler uses thread-local storage, so each thread has its own
//! independent virtual time and task queue. This keeps tests isolated when
//! the test harness runs them in parallel on different threads.

use std::{cell::RefCell, cmp::Ordering, collections::BinaryHeap, time::Duration};

use super::{Scheduler, TaskHandle, TaskState};
use crate::subscription::Subscription;

struct TestSchedulerState {
  virtual_time: Duration,
  task_queue: BinaryHeap<ScheduledTask>,
  next_task_id: usize,
  initialized: bool,
}

impl Default for TestSchedulerState {
  fn default() -> Self {
    Self {
      virtual_time: Duration::ZERO,
      task_queue: BinaryHeap::new(),
      next_task_id: 0,
      initialized: false,
    }
  }
}

struct ScheduledTask {
  scheduled_time: Duration,
  task_id: usize,
  task: Box<dyn FnMut() -> TaskState>,
  handle: TaskHandle,
}

impl PartialEq for ScheduledTask {
  fn eq(&self, other: &Self) -> bool {
    self.scheduled_time == other.scheduled_time && self.task_id == other.task_id
  }
}

impl Eq for ScheduledTask {}

impl PartialOrd for ScheduledTask {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for ScheduledTask {
  fn cmp(&self, other: &Self) -> Ordering {
    // Min-heap: earlier times first, then FIFO by task_id
    other
      .scheduled_time
      .cmp(&self.scheduled_time)
      .then_with(|| other.task_id.cmp(&self.task_id))
  }
}

thread_local! {
  static TEST_SCHEDULER_STATE: RefCell<TestSchedulerState>
    = RefCell::new(TestSchedulerState::default());
}

/// A virtual time scheduler for deterministic testing.
///
/// This is a zero-sized type that accesses thread-local state.
/// All instances in the same thread share the same virtual time and task queue.
#[derive(Clone, Copy, Default, Debug)]
pub struct TestScheduler;

impl TestScheduler {
  /// Initialize or reset the test scheduler state.
  ///
  /// Call it at the start of each test. It resets the virtual time to zero,
  /// clears the task queue, and resets the task ID counter.
  ///
  /// # Panics
  ///
  /// Other methods panic if `init()` has not been called first.
  pub fn init() {
    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();
      state.virtual_time = Duration::ZERO;
      state.task_queue.clear();
      state.next_task_id = 0;
      state.initialized = true;
    });
  }

  fn ensure_initialized() {
    TEST_SCHEDULER_STATE.with(|state| {
      assert!(
        state.borrow().initialized,
        "TestScheduler::init() must be called before using the scheduler"
      );
    });
  }

  /// Get the current virtual time.
  pub fn now() -> Duration {
    Self::ensure_initialized();
    TEST_SCHEDULER_STATE.with(|state| state.borrow().virtual_time)
  }

  /// Number of tasks waiting in the queue, cancelled ones included until
  /// their due time is reached.
  pub fn pending_count() -> usize {
    Self::ensure_initialized();
    TEST_SCHEDULER_STATE.with(|state| {
      state
        .borrow()
        .task_queue
        .iter()
        .filter(|t| !t.handle.is_closed())
        .count()
    })
  }

  pub fn is_empty() -> bool { Self::pending_count() == 0 }

  fn execute_tasks_until(target_time: Option<Duration>) {
    loop {
      let task = TEST_SCHEDULER_STATE.with(|state| {
        let mut state = state.borrow_mut();

        let should_stop = state
          .task_queue
          .peek()
          .map_or(true, |peek| target_time.map_or(false, |limit| peek.scheduled_time > limit));
        if should_stop {
          return None;
        }

        let scheduled_task = state.task_queue.pop()?;
        state.virtual_time = scheduled_task.scheduled_time;
        Some(scheduled_task)
      });

      let Some(mut scheduled_task) = task else {
        break;
      };

      // Never hold the state borrow while a task runs: tasks schedule and
      // cancel other tasks.
      if scheduled_task.handle.is_closed() {
        continue;
      }
      let result = (scheduled_task.task)();

      match result {
        TaskState::Sleeping(delay) if !scheduled_task.handle.is_closed() => {
          TEST_SCHEDULER_STATE.with(|state| {
            let mut state = state.borrow_mut();
            let task_id = state.next_task_id;
            state.next_task_id += 1;
            scheduled_task.scheduled_time = state.virtual_time + delay;
            scheduled_task.task_id = task_id;
            state.task_queue.push(scheduled_task);
          });
        }
        _ => {
          tracing::trace!(task_id = scheduled_task.task_id, "test task finished");
          scheduled_task.handle.mark_finished();
        }
      }
    }
  }

  /// Advance virtual time by the specified duration and execute due tasks.
  ///
  /// Tasks are executed in order of their scheduled time, with FIFO ordering
  /// for tasks scheduled at the same time. A task returning
  /// `TaskState::Sleeping(d)` is queued again for `now + d` and runs within
  /// the same call if that is still inside the window.
  pub fn advance_by(duration: Duration) {
    Self::ensure_initialized();
    let target_time = TEST_SCHEDULER_STATE.with(|state| state.borrow().virtual_time + duration);

    Self::execute_tasks_until(Some(target_time));

    TEST_SCHEDULER_STATE.with(|state| {
      state.borrow_mut().virtual_time = target_time;
    });
  }

  /// Execute all pending tasks by advancing time to each task's scheduled time.
  ///
  /// Tasks that keep rescheduling themselves (an un-cancelled `interval`)
  /// make this loop forever.
  pub fn flush() {
    Self::ensure_initialized();
    Self::execute_tasks_until(None);
  }
}

impl Scheduler for TestScheduler {
  fn schedule<T>(&self, task: T, delay: Option<Duration>) -> TaskHandle
  where
    T: FnMut() -> TaskState + 'static,
  {
    TestScheduler::ensure_initialized();
    TEST_SCHEDULER_STATE.with(|state| {
      let mut state = state.borrow_mut();

      let scheduled_time = state.virtual_time + delay.unwrap_or(Duration::ZERO);
      let handle = TaskHandle::new();
      let task_id = state.next_task_id;
      state.next_task_id += 1;
      tracing::trace!(task_id, ?scheduled_time, "test task scheduled");

      state.task_queue.push(ScheduledTask {
        scheduled_time,
        task_id,
        task: Box::new(task),
        handle: handle.clone(),
      });

      handle
    })
  }
}

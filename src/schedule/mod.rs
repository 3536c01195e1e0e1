//! Cooperative timers.
//!
//! All round logic runs on the host's thread. Instead of sleeping, the
//! controller schedules a task with a delay and the host advances a virtual
//! clock; due tasks are popped in order and run to completion one at a time.
//!
//! ```
//! use std::time::Duration;
//! use matchit::schedule::Scheduler;
//!
//! let mut timers = Scheduler::new();
//! let slow = timers.schedule(Duration::from_millis(800), "slow");
//! timers.schedule(Duration::from_millis(500), "fast");
//! timers.cancel(slow);
//!
//! let until = timers.now() + Duration::from_millis(1000);
//! let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(until)).collect();
//! timers.settle(until);
//!
//! assert_eq!(fired, vec!["fast"]);
//! assert_eq!(timers.now(), Duration::from_millis(1000));
//! ```

pub mod timer;

pub use timer::{Scheduler, TimerId};

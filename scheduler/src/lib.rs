//! Discrete-time CPU/I/O scheduling simulator.
//!
//! A [`Scheduler`] owns a logical clock, a pool of CPUs and I/O devices and
//! the ready/wait queues. Processes are sequences of CPU and I/O bursts; each
//! [`Scheduler::step`] advances the simulation by one tick under the selected
//! [`Algorithm`] and appends to a structured [`Event`] log that can be
//! exported as JSON or CSV.

mod scheduler;

pub use scheduler::*;

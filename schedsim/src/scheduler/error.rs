/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the scheduling engine.
//!
//! Two layers:
//!
//! * [`InputViolation`]: which precondition a process set or quantum broke
//!   (carries the offending process id and value).
//! * [`SchedulerError`]: top-level failure returned from
//!   [`run_schedule()`](super::run_schedule).
//!
//! All input violations are detected before the first simulated tick, so a
//! failed call never produces a partial timeline.

use thiserror::Error;

use crate::process::{ProcessId, Ticks};

// ── Input validation ──────────────────────────────────────────────────────────

/// Detailed reason why a process set was rejected before simulation.
///
/// Carried inside [`SchedulerError::InvalidInput`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputViolation {
    /// `run_schedule()` was called with no processes.
    EmptyProcessSet,

    /// A process needs zero CPU units.
    ZeroBurst { process: ProcessId },

    /// Round Robin was requested with a zero quantum.
    ZeroQuantum,

    /// Two processes share the same identifier.
    DuplicateProcessId { process: ProcessId },

    /// `max arrival + Σ burst` does not fit in [`Ticks`].
    HorizonOverflow,
}

impl std::fmt::Display for InputViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputViolation::EmptyProcessSet => write!(f, "process set is empty"),

            InputViolation::ZeroBurst { process } => {
                write!(f, "process {} has a burst time of 0", process)
            }

            InputViolation::ZeroQuantum => {
                write!(f, "Round Robin quantum must be greater than 0")
            }

            InputViolation::DuplicateProcessId { process } => {
                write!(f, "process id {} appears more than once", process)
            }

            InputViolation::HorizonOverflow => write!(
                f,
                "latest arrival plus total burst time overflows the simulation clock"
            ),
        }
    }
}

// ── Top-level scheduler errors ────────────────────────────────────────────────

/// Top-level error type returned by
/// [`run_schedule()`](super::run_schedule).
///
/// | Variant | Meaning |
/// |---|---|
/// | `InvalidInput` | caller bug, reported before simulation starts |
/// | `NonTerminating` | the bounded-iteration guard tripped mid-run |
/// | `UnknownPolicy` | a policy name could not be parsed |
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid input: {0}")]
    InvalidInput(InputViolation),

    /// The simulated clock passed the latest instant at which every process
    /// must have completed.  Terminal; retrying with the same input fails the
    /// same way.
    #[error("{policy} simulation did not converge: clock {clock} passed horizon {horizon}")]
    NonTerminating {
        policy: &'static str,
        clock: Ticks,
        horizon: Ticks,
    },

    #[error("unknown scheduling policy: '{0}' (valid: FCFS, SJF, SJF_PREEMPTIVE, PRIORITY, PRIORITY_PREEMPTIVE, ROUND_ROBIN)")]
    UnknownPolicy(String),
}

impl From<InputViolation> for SchedulerError {
    fn from(v: InputViolation) -> Self {
        SchedulerError::InvalidInput(v)
    }
}

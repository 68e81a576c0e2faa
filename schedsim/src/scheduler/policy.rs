/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dispatch policies and their ranking strategy.
//!
//! Every policy ranks the arrived, unfinished processes with the same
//! three-level key:
//!
//! 1. the policy's own key (burst, remaining time, priority, or nothing),
//! 2. earliest arrival time,
//! 3. input position (stable).
//!
//! Keeping the key in one place means FCFS, SJF and both priority variants
//! can never disagree on how ties are broken.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use super::error::SchedulerError;
use crate::process::{cmp_priority, Process};

/// Quantum used by Round Robin when the caller does not pass one.
pub const DEFAULT_QUANTUM: u64 = 4;

// ── Policy ────────────────────────────────────────────────────────────────────

/// Single-CPU dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Policy {
    /// First come, first served.
    Fcfs,
    /// Shortest job first, non-preemptive.
    Sjf,
    /// Shortest remaining time first (preemptive SJF).
    SjfPreemptive,
    /// Lowest priority value first, non-preemptive.
    Priority,
    /// Lowest priority value first, re-evaluated every tick.
    PriorityPreemptive,
    /// FIFO ready queue with a fixed quantum.
    RoundRobin,
}

/// How the engine advances time for a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// Event-driven: the clock jumps to the next arrival or completion.
    RunToCompletion,
    /// One unit at a time, re-ranking at every tick.
    PerTick,
    /// FIFO queue, one slice of at most `quantum` units per dispatch.
    Quantum,
}

impl Policy {
    /// All policies, in the order they are listed to users.
    pub const ALL: [Policy; 6] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::SjfPreemptive,
        Policy::Priority,
        Policy::PriorityPreemptive,
        Policy::RoundRobin,
    ];

    /// Human-readable name stored in `SchedulingResult::policy_label`.
    pub fn label(self) -> &'static str {
        match self {
            Policy::Fcfs => "First Come First Serve",
            Policy::Sjf => "Shortest Job First",
            Policy::SjfPreemptive => "Shortest Job First (Preemptive)",
            Policy::Priority => "Priority Scheduling",
            Policy::PriorityPreemptive => "Priority Scheduling (Preemptive)",
            Policy::RoundRobin => "Round Robin",
        }
    }

    /// Canonical short name, accepted back by [`Policy::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            Policy::Fcfs => "FCFS",
            Policy::Sjf => "SJF",
            Policy::SjfPreemptive => "SJF_PREEMPTIVE",
            Policy::Priority => "PRIORITY",
            Policy::PriorityPreemptive => "PRIORITY_PREEMPTIVE",
            Policy::RoundRobin => "ROUND_ROBIN",
        }
    }

    pub fn dispatch_mode(self) -> DispatchMode {
        match self {
            Policy::Fcfs | Policy::Sjf | Policy::Priority => DispatchMode::RunToCompletion,
            Policy::SjfPreemptive | Policy::PriorityPreemptive => DispatchMode::PerTick,
            Policy::RoundRobin => DispatchMode::Quantum,
        }
    }

    pub fn is_preemptive(self) -> bool {
        self.dispatch_mode() != DispatchMode::RunToCompletion
    }

    /// The policy's own comparison key (level 1 of the ranking).
    fn key_order(self, a: &Process, b: &Process) -> Ordering {
        match self {
            Policy::Fcfs | Policy::RoundRobin => Ordering::Equal,
            Policy::Sjf => a.burst_time.cmp(&b.burst_time),
            Policy::SjfPreemptive => a.remaining_time.cmp(&b.remaining_time),
            Policy::Priority | Policy::PriorityPreemptive => cmp_priority(a.priority, b.priority),
        }
    }

    /// Full ranking of two candidates; `Less` means `a` runs first.
    ///
    /// `a_pos` / `b_pos` are the candidates' positions in the caller's input
    /// and make the order total.
    pub fn rank(self, a: &Process, a_pos: usize, b: &Process, b_pos: usize) -> Ordering {
        self.key_order(a, b)
            .then_with(|| a.arrival_time.cmp(&b.arrival_time))
            .then_with(|| a_pos.cmp(&b_pos))
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = SchedulerError;

    /// Case-insensitive; `-` and `_` are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        match normalized.as_str() {
            "FCFS" => Ok(Policy::Fcfs),
            "SJF" => Ok(Policy::Sjf),
            "SJF_PREEMPTIVE" | "SRTF" => Ok(Policy::SjfPreemptive),
            "PRIORITY" => Ok(Policy::Priority),
            "PRIORITY_PREEMPTIVE" => Ok(Policy::PriorityPreemptive),
            "ROUND_ROBIN" | "RR" => Ok(Policy::RoundRobin),
            _ => Err(SchedulerError::UnknownPolicy(s.to_string())),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

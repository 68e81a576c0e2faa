/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core process data structures for the scheduling simulator.
//!
//! Two sides of one simulation run:
//!
//! ```text
//! caller  ──(&[Process])──►  engine copy  ──(simulation)──►  SchedulingResult
//!            ↑ read-only        ↑ owned working set            ↑ fresh processes + timeline
//! ```
//!
//! # Ownership model
//! The engine borrows the caller's `&[Process]` and clones it into a working
//! set on entry.  Derived fields are only ever written on that copy, so the
//! caller's input is never mutated and two runs over the same slice cannot
//! observe each other.

use std::cmp::Ordering;

use serde::Serialize;

/// Simulation time in abstract CPU units.
pub type Ticks = u64;

/// Caller-assigned process identifier, unique within one run.
pub type ProcessId = u32;

// ── Priority ordering ─────────────────────────────────────────────────────────

/// Total order over optional priorities.
///
/// Lower numeric value means higher priority.  An absent priority sorts after
/// every present value, so it can never collide with a real priority the way a
/// numeric stand-in (`0`, `i32::MAX`) could.
pub fn cmp_priority(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// ── Process ───────────────────────────────────────────────────────────────────

/// A CPU-bound process descriptor.
///
/// The first four fields are supplied by the caller.  `remaining_time` is the
/// simulation counter; the `Option` fields are filled in by the engine on its
/// own copy and stay `None` on caller-owned values.
///
/// Invariants once a run has finished:
/// * `remaining_time == 0`
/// * `turnaround_time == completion_time - arrival_time`
/// * `turnaround_time == waiting_time + burst_time`
/// * `response_time <= turnaround_time`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    // ── Identity / input ──────────────────────────────────────────────────────
    pub id: ProcessId,

    /// Time at which the process becomes eligible to run.
    pub arrival_time: Ticks,

    /// Total CPU units the process needs.  Must be non-zero.
    pub burst_time: Ticks,

    /// Lower value = higher priority.  `None` sorts last.
    pub priority: Option<i32>,

    // ── Simulation counter ────────────────────────────────────────────────────
    /// Units still to execute.  Always `0 ≤ remaining_time ≤ burst_time`.
    pub remaining_time: Ticks,

    // ── Derived (filled by the engine) ────────────────────────────────────────
    pub completion_time: Option<Ticks>,
    pub turnaround_time: Option<Ticks>,
    pub waiting_time: Option<Ticks>,
    pub response_time: Option<Ticks>,
}

impl Process {
    /// New process with no priority and `remaining_time == burst_time`.
    pub fn new(id: ProcessId, arrival_time: Ticks, burst_time: Ticks) -> Self {
        Self {
            id,
            arrival_time,
            burst_time,
            priority: None,
            remaining_time: burst_time,
            completion_time: None,
            turnaround_time: None,
            waiting_time: None,
            response_time: None,
        }
    }

    /// Builder-style setter for the priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Fresh working copy for a simulation run: derived fields cleared and
    /// `remaining_time` reset to the full burst.
    pub(crate) fn reset_for_run(&self) -> Self {
        Self {
            priority: self.priority,
            ..Self::new(self.id, self.arrival_time, self.burst_time)
        }
    }

    /// Returns `true` once every unit of the burst has executed.
    pub fn is_finished(&self) -> bool {
        self.remaining_time == 0
    }

    /// Returns `true` once all four derived metrics have been assigned.
    pub fn has_metrics(&self) -> bool {
        self.completion_time.is_some()
            && self.turnaround_time.is_some()
            && self.waiting_time.is_some()
            && self.response_time.is_some()
    }

    /// Record the first time this process was put on the CPU.
    ///
    /// Later calls are no-ops: the first dispatch fixes the response time.
    pub(crate) fn mark_started(&mut self, now: Ticks) {
        if self.response_time.is_none() {
            self.response_time = Some(now - self.arrival_time);
        }
    }

    /// Fix completion, turnaround and waiting time at `now`.
    pub(crate) fn mark_completed(&mut self, now: Ticks) {
        debug_assert!(
            self.remaining_time == 0,
            "process {} completed with {} units left",
            self.id,
            self.remaining_time
        );
        let turnaround = now - self.arrival_time;
        self.completion_time = Some(now);
        self.turnaround_time = Some(turnaround);
        self.waiting_time = Some(turnaround - self.burst_time);
    }
}

// ── TimelineEntry ─────────────────────────────────────────────────────────────

/// One contiguous CPU interval `[start_time, end_time)` for one process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineEntry {
    pub process_id: ProcessId,
    pub start_time: Ticks,
    pub end_time: Ticks,
}

impl TimelineEntry {
    /// Length of the interval in CPU units.
    pub fn duration(&self) -> Ticks {
        self.end_time - self.start_time
    }
}

// ── SchedulingResult ──────────────────────────────────────────────────────────

/// Finished simulation: processes with derived fields, the CPU timeline and
/// aggregate metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulingResult {
    /// All processes, in input order, with derived fields populated.
    pub processes: Vec<Process>,

    /// CPU intervals ordered by start time.  Idle gaps have no entry.
    pub timeline: Vec<TimelineEntry>,

    /// Averages rounded half-up to two decimal places.
    pub average_turnaround_time: f64,
    pub average_waiting_time: f64,
    pub average_response_time: f64,

    /// Makespan: the latest end time in the timeline.
    pub total_time: Ticks,

    /// Human-readable policy name.
    pub policy_label: String,
}

impl SchedulingResult {
    /// Look up a finished process by id.
    pub fn process(&self, id: ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| p.id == id)
    }

    /// Timeline with adjacent entries of the same process merged.
    ///
    /// Presentation only: response times were already fixed from the
    /// unmerged timeline.
    pub fn merged_timeline(&self) -> Vec<TimelineEntry> {
        let mut merged: Vec<TimelineEntry> = Vec::with_capacity(self.timeline.len());
        for entry in &self.timeline {
            match merged.last_mut() {
                Some(last) if last.process_id == entry.process_id && last.end_time == entry.start_time => {
                    last.end_time = entry.end_time;
                }
                _ => merged.push(*entry),
            }
        }
        merged
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Aggregate timing metrics for a finished simulation.
//!
//! Per-process turnaround / waiting / response times are fixed by the engine
//! as each process completes.  This module folds them into the three averages
//! and the makespan that make up a [`SchedulingResult`].
//!
//! Averages are computed from integer sums and rounded half-up to two decimal
//! places in integer arithmetic, so `8.745` never becomes `8.74` through
//! binary floating-point error.

use crate::process::{Process, SchedulingResult, Ticks, TimelineEntry};

// ── Public API ────────────────────────────────────────────────────────────────

/// `sum / count`, rounded half-up to two decimal places.
///
/// Returns `0.0` for `count == 0`.  `sum` is a `u128` because the sum of
/// per-process times can exceed [`Ticks`] even when every single time fits.
pub fn average_rounded(sum: u128, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let n = count as u128;
    // hundredths = floor(sum * 100 / n + 1/2), computed as floor(sum * 100 / n)
    // plus the rounding of the remainder so that sum * 200 cannot overflow
    let whole = sum / n * 100;
    let rem = sum % n;
    let hundredths = whole + (rem * 200 + n) / (2 * n);
    hundredths as f64 / 100.0
}

/// Latest end time across the timeline; `0` for an empty timeline.
pub fn makespan(timeline: &[TimelineEntry]) -> Ticks {
    timeline.iter().map(|e| e.end_time).max().unwrap_or(0)
}

/// Build the final [`SchedulingResult`] from a finished run.
///
/// # Panics
/// Panics if any process is missing completion, turnaround, waiting or
/// response time.  The engine assigns all four before calling this; a
/// missing value is a bug in the engine, not a caller error.
pub fn summarize(
    processes: Vec<Process>,
    timeline: Vec<TimelineEntry>,
    policy_label: &str,
) -> SchedulingResult {
    let mut turnaround_sum: u128 = 0;
    let mut waiting_sum: u128 = 0;
    let mut response_sum: u128 = 0;

    for p in &processes {
        assert!(p.has_metrics(), "metrics requested for unfinished process {}", p.id);
        turnaround_sum += u128::from(p.turnaround_time.unwrap_or_default());
        waiting_sum += u128::from(p.waiting_time.unwrap_or_default());
        response_sum += u128::from(p.response_time.unwrap_or_default());
    }

    let count = processes.len();
    let total_time = makespan(&timeline);

    SchedulingResult {
        average_turnaround_time: average_rounded(turnaround_sum, count),
        average_waiting_time: average_rounded(waiting_sum, count),
        average_response_time: average_rounded(response_sum, count),
        total_time,
        policy_label: policy_label.to_string(),
        processes,
        timeline,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

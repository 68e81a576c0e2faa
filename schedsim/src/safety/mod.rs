/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Banker's-algorithm safety analysis over a static allocation snapshot.
//!
//! # Algorithm
//! 1. `work = available`, every process unfinished.
//! 2. Scan the records **in index order**; the first unfinished record whose
//!    need fits componentwise into `work` is selected, marked finished,
//!    appended to the safe sequence, and its allocation is added to `work`.
//! 3. After a selection the scan restarts from the first record.  A scan that
//!    selects nothing ends the search.
//! 4. Safe iff every process was selected.
//!
//! Any process that passes the test is accepted, so the returned sequence is
//! *a* valid witness, not the only one.
//!
//! # Conservation
//! By default the snapshot must satisfy
//! `available[r] + Σ allocation[r] == total[r]` for every resource.
//! [`SafetyAnalyzer::lenient`] skips that check and treats `available` as
//! authoritative.

pub mod error;
pub mod trace;

pub use error::{AllocationViolation, SafetyError};
pub use trace::SafetyStep;

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::process::ProcessId;
use crate::resource::{AllocationRecord, Resource};
use trace::{format_sequence, format_vector};

// ── SafetyResult ──────────────────────────────────────────────────────────────

/// Verdict and audit trace of one safety analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyResult {
    pub is_safe: bool,

    /// Completion order witnessing safety.  `Some` iff `is_safe`.
    pub safe_sequence: Option<Vec<ProcessId>>,

    /// One-line summary of the verdict.
    pub message: String,

    /// Available vector the search started from.
    pub initial_available: Vec<u32>,

    /// One entry per selected process, in selection order.
    pub steps: Vec<SafetyStep>,
}

impl SafetyResult {
    /// Work vector after the last selection (the initial vector if nothing
    /// was selected).
    pub fn final_work(&self) -> &[u32] {
        self.steps
            .last()
            .map(|s| s.work_after.as_slice())
            .unwrap_or(&self.initial_available)
    }

    /// Full textual trace: initial state, one block per selection, verdict.
    pub fn trace_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Initial state:".to_string(),
            format!("Available resources: {}", format_vector(&self.initial_available)),
        ];
        for step in &self.steps {
            lines.extend(step.lines());
        }

        match &self.safe_sequence {
            Some(seq) => {
                lines.push("System is in safe state".to_string());
                lines.push(format!("Safe sequence: {}", format_sequence(seq)));
            }
            None => {
                lines.push(format!("Iteration {}:", self.steps.len() + 1));
                lines.push(format!("Work: {}", format_vector(self.final_work())));
                lines.push("System is in deadlock state".to_string());
                lines.push("No safe sequence exists".to_string());
            }
        }
        lines
    }
}

// ── SafetyAnalyzer ────────────────────────────────────────────────────────────

/// Runs the safety search.
///
/// Holds only configuration; every call to [`analyze`](Self::analyze) works
/// on its own copy of the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct SafetyAnalyzer {
    /// Reject snapshots whose vectors do not add up to the resource totals.
    enforce_conservation: bool,
}

impl SafetyAnalyzer {
    /// Strict analyzer: the conservation invariant is enforced.
    pub fn new() -> Self {
        Self {
            enforce_conservation: true,
        }
    }

    /// Analyzer that trusts `available` and skips the conservation check.
    ///
    /// Every other validation still applies.
    pub fn lenient() -> Self {
        Self {
            enforce_conservation: false,
        }
    }

    pub fn enforces_conservation(&self) -> bool {
        self.enforce_conservation
    }

    /// Analyse `records` against `resources`.
    ///
    /// # Errors
    /// [`SafetyError::InvalidInput`] if the snapshot is inconsistent: zero
    /// totals, `available > total`, vector length mismatch, an allocation
    /// above a resource's total, duplicate process ids, or (strict mode) a
    /// conservation violation.  An unsafe state is **not** an error.
    pub fn analyze(
        &self,
        resources: &[Resource],
        records: &[AllocationRecord],
    ) -> Result<SafetyResult, SafetyError> {
        self.validate(resources, records)?;

        let n = records.len();
        let initial_available: Vec<u32> = resources.iter().map(|r| r.available).collect();

        info!(
            resources = resources.len(),
            processes = n,
            available = ?initial_available,
            strict = self.enforces_conservation(),
            "=== analyze_safety() ==="
        );

        let mut work = initial_available.clone();
        let mut finished = vec![false; n];
        let mut sequence: Vec<ProcessId> = Vec::with_capacity(n);
        let mut steps: Vec<SafetyStep> = Vec::with_capacity(n);

        // At most one selection per scan and one scan per process
        while sequence.len() < n {
            let Some(idx) = (0..n).find(|&i| !finished[i] && records[i].can_finish_with(&work))
            else {
                break;
            };

            let rec = &records[idx];
            let work_before = work.clone();
            for (w, &a) in work.iter_mut().zip(rec.allocation()) {
                *w = w.saturating_add(a);
            }

            finished[idx] = true;
            sequence.push(rec.process_id());

            debug!(
                process = rec.process_id(),
                need = ?rec.need(),
                before = ?work_before,
                after = ?work,
                "process can complete"
            );

            steps.push(SafetyStep {
                iteration: steps.len() + 1,
                process_id: rec.process_id(),
                need: rec.need().to_vec(),
                released: rec.allocation().to_vec(),
                work_before,
                work_after: work.clone(),
            });
        }

        let is_safe = sequence.len() == n;

        let result = if is_safe {
            info!(sequence = %format_sequence(&sequence), "✓ system is in a safe state");
            SafetyResult {
                is_safe,
                message: format!(
                    "System is in safe state. Safe sequence: {}",
                    format_sequence(&sequence)
                ),
                safe_sequence: Some(sequence),
                initial_available,
                steps,
            }
        } else {
            let blocked: Vec<ProcessId> = records
                .iter()
                .zip(&finished)
                .filter(|(_, done)| !**done)
                .map(|(r, _)| r.process_id())
                .collect();
            warn!(
                completed = sequence.len(),
                blocked = ?blocked,
                work = ?work,
                "✗ system is in an unsafe state"
            );
            SafetyResult {
                is_safe,
                safe_sequence: None,
                message: "System is in deadlock state. No safe sequence exists.".to_string(),
                initial_available,
                steps,
            }
        };

        Ok(result)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshot validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate(
        &self,
        resources: &[Resource],
        records: &[AllocationRecord],
    ) -> Result<(), AllocationViolation> {
        for r in resources {
            if r.total == 0 {
                return Err(AllocationViolation::ZeroTotal {
                    resource: r.name.clone(),
                });
            }
            if r.available > r.total {
                return Err(AllocationViolation::AvailableExceedsTotal {
                    resource: r.name.clone(),
                    available: r.available,
                    total: r.total,
                });
            }
        }

        let mut seen = BTreeSet::new();
        for rec in records {
            if !seen.insert(rec.process_id()) {
                return Err(AllocationViolation::DuplicateProcessId {
                    process: rec.process_id(),
                });
            }
            // AllocationRecord::new already guarantees allocation and
            // max_need have the same length
            if rec.allocation().len() != resources.len() {
                return Err(AllocationViolation::VectorLengthMismatch {
                    process: rec.process_id(),
                    expected: resources.len(),
                    actual: rec.allocation().len(),
                });
            }
            for (r, &alloc) in resources.iter().zip(rec.allocation()) {
                if alloc > r.total {
                    return Err(AllocationViolation::AllocationExceedsTotal {
                        process: rec.process_id(),
                        resource: r.name.clone(),
                        allocation: alloc,
                        total: r.total,
                    });
                }
            }
        }

        if self.enforces_conservation() {
            for (i, r) in resources.iter().enumerate() {
                let held: u64 = records
                    .iter()
                    .map(|rec| u64::from(rec.allocation()[i]))
                    .sum();
                // available <= total was checked above
                if held != u64::from(r.allocated()) {
                    return Err(AllocationViolation::ConservationViolated {
                        resource: r.name.clone(),
                        total: r.total,
                        accounted: u64::from(r.available) + held,
                    });
                }
            }
        }

        Ok(())
    }
}

impl Default for SafetyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

// ── Free functions ────────────────────────────────────────────────────────────

/// Analyse a snapshot with the strict (conservation-checking) analyzer.
pub fn analyze_safety(
    resources: &[Resource],
    records: &[AllocationRecord],
) -> Result<SafetyResult, SafetyError> {
    SafetyAnalyzer::new().analyze(resources, records)
}

/// Check that `sequence` is a valid completion order for the snapshot.
///
/// Replays the sequence from the resources' `available` vector: each
/// process's need must fit into the running work vector at its turn, and
/// every record must appear exactly once.
pub fn replay_sequence(
    resources: &[Resource],
    records: &[AllocationRecord],
    sequence: &[ProcessId],
) -> bool {
    if sequence.len() != records.len() {
        return false;
    }

    let mut work: Vec<u32> = resources.iter().map(|r| r.available).collect();
    let mut done = vec![false; records.len()];

    for &pid in sequence {
        let Some(idx) = records
            .iter()
            .enumerate()
            .position(|(i, r)| !done[i] && r.process_id() == pid)
        else {
            return false;
        };
        let rec = &records[idx];
        if !rec.can_finish_with(&work) {
            return false;
        }
        for (w, &a) in work.iter_mut().zip(rec.allocation()) {
            *w = w.saturating_add(a);
        }
        done[idx] = true;
    }
    true
}

// ── Tests ─────────────────────────────────────────────────────────────────────

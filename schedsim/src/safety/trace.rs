/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Audit trace of a safety search.
//!
//! The analyzer records one [`SafetyStep`] per selected process.  The trace is
//! informational only; nothing in the search reads it back.

use serde::Serialize;

use crate::process::ProcessId;

/// One selection made by the safety search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetyStep {
    /// 1-based scan number.  Every scan restarts from the first record.
    pub iteration: usize,

    pub process_id: ProcessId,

    /// The process's need vector, which fit into `work_before`.
    pub need: Vec<u32>,

    /// Allocation handed back when the process finishes.
    pub released: Vec<u32>,

    pub work_before: Vec<u32>,
    pub work_after: Vec<u32>,
}

impl SafetyStep {
    /// Human-readable lines for this step.
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Iteration {}:", self.iteration),
            format!("Work: {}", format_vector(&self.work_before)),
            format!("Process P{} can complete", self.process_id),
            format!("Resources released: {}", format_vector(&self.released)),
            format!("New work: {}", format_vector(&self.work_after)),
        ]
    }
}

/// `[1, 0, 2]`
pub fn format_vector(v: &[u32]) -> String {
    let parts: Vec<String> = v.iter().map(u32::to_string).collect();
    format!("[{}]", parts.join(", "))
}

/// `P1 -> P3 -> P2`
pub fn format_sequence(seq: &[ProcessId]) -> String {
    seq.iter()
        .map(|id| format!("P{id}"))
        .collect::<Vec<_>>()
        .join(" -> ")
}

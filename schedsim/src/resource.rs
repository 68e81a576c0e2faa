/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Resource and allocation snapshot types for the safety analyzer.
//!
//! A snapshot is one [`Resource`] per resource type plus one
//! [`AllocationRecord`] per process.  Vectors in a record are indexed like the
//! resource slice they are analysed against.
//!
//! The need vector is derived once in [`AllocationRecord::new`] and has no
//! setter, so it can never drift from `max_need - allocation`.

use serde::Serialize;

use crate::process::ProcessId;
use crate::safety::error::{AllocationViolation, SafetyError};

// ── Resource ──────────────────────────────────────────────────────────────────

/// One resource type with a fixed number of interchangeable instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resource {
    pub id: u32,

    /// Display name (`"R1"`, `"Printer"`).
    pub name: String,

    /// Instances in the system.  Must be non-zero.
    pub total: u32,

    /// Instances not held by any process.  `0 ≤ available ≤ total`.
    pub available: u32,
}

impl Resource {
    pub fn new(id: u32, name: impl Into<String>, total: u32, available: u32) -> Self {
        Self {
            id,
            name: name.into(),
            total,
            available,
        }
    }

    /// Instances currently held by processes, as implied by `available`.
    pub fn allocated(&self) -> u32 {
        self.total.saturating_sub(self.available)
    }
}

// ── AllocationRecord ──────────────────────────────────────────────────────────

/// What one process holds and may still request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationRecord {
    process_id: ProcessId,
    allocation: Vec<u32>,
    max_need: Vec<u32>,
    need: Vec<u32>,
}

impl AllocationRecord {
    /// Build a record and derive `need = max_need - allocation`.
    ///
    /// # Errors
    /// * `VectorLengthMismatch`: the two vectors differ in length.
    /// * `MaxBelowAllocation`: some `max_need[i] < allocation[i]`.
    pub fn new(
        process_id: ProcessId,
        allocation: Vec<u32>,
        max_need: Vec<u32>,
    ) -> Result<Self, SafetyError> {
        if allocation.len() != max_need.len() {
            return Err(AllocationViolation::VectorLengthMismatch {
                process: process_id,
                expected: allocation.len(),
                actual: max_need.len(),
            }
            .into());
        }

        let need = allocation
            .iter()
            .zip(&max_need)
            .enumerate()
            .map(|(i, (&alloc, &max))| {
                max.checked_sub(alloc)
                    .ok_or(AllocationViolation::MaxBelowAllocation {
                        process: process_id,
                        resource_index: i,
                        allocation: alloc,
                        max_need: max,
                    })
            })
            .collect::<Result<Vec<u32>, _>>()?;

        Ok(Self {
            process_id,
            allocation,
            max_need,
            need,
        })
    }

    pub fn process_id(&self) -> ProcessId {
        self.process_id
    }

    /// Instances currently held, per resource.
    pub fn allocation(&self) -> &[u32] {
        &self.allocation
    }

    /// Declared maximum demand, per resource.
    pub fn max_need(&self) -> &[u32] {
        &self.max_need
    }

    /// Instances still to be requested: `max_need - allocation`.
    pub fn need(&self) -> &[u32] {
        &self.need
    }

    /// Returns `true` if every component of `need` fits into `work`.
    pub fn can_finish_with(&self, work: &[u32]) -> bool {
        self.need.len() == work.len() && self.need.iter().zip(work).all(|(n, w)| n <= w)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

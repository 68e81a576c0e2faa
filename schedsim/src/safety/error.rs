/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the resource-safety analyzer.
//!
//! An unsafe verdict is **not** an error: it is a normal
//! [`SafetyResult`](super::SafetyResult).  Errors are reserved for snapshots
//! that are internally inconsistent and cannot be analysed at all.

use thiserror::Error;

use crate::process::ProcessId;

// ── Snapshot validation ───────────────────────────────────────────────────────

/// Detailed reason why a resource / allocation snapshot was rejected.
///
/// Resource-level variants carry the resource's display name; record-level
/// variants carry the process id and the resource index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationViolation {
    /// A resource has no instances at all.
    ZeroTotal { resource: String },

    /// More instances are available than the resource has.
    AvailableExceedsTotal {
        resource: String,
        available: u32,
        total: u32,
    },

    /// A record's vector does not have one entry per resource.
    VectorLengthMismatch {
        process: ProcessId,
        expected: usize,
        actual: usize,
    },

    /// A process holds more instances than it declared as its maximum need.
    MaxBelowAllocation {
        process: ProcessId,
        resource_index: usize,
        allocation: u32,
        max_need: u32,
    },

    /// A process holds more instances than the resource has.
    AllocationExceedsTotal {
        process: ProcessId,
        resource: String,
        allocation: u32,
        total: u32,
    },

    /// `available + Σ allocation != total` for a resource.
    ConservationViolated {
        resource: String,
        total: u32,
        accounted: u64,
    },

    /// Two records share the same process id.
    DuplicateProcessId { process: ProcessId },
}

impl std::fmt::Display for AllocationViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationViolation::ZeroTotal { resource } => {
                write!(f, "resource '{}' has a total of 0 instances", resource)
            }

            AllocationViolation::AvailableExceedsTotal {
                resource,
                available,
                total,
            } => write!(
                f,
                "resource '{}' has {} available but only {} in total",
                resource, available, total
            ),

            AllocationViolation::VectorLengthMismatch {
                process,
                expected,
                actual,
            } => write!(
                f,
                "P{} has {} vector entries, expected one per resource ({})",
                process, actual, expected
            ),

            AllocationViolation::MaxBelowAllocation {
                process,
                resource_index,
                allocation,
                max_need,
            } => write!(
                f,
                "P{} holds {} of resource #{} but declares a maximum need of {}",
                process, allocation, resource_index, max_need
            ),

            AllocationViolation::AllocationExceedsTotal {
                process,
                resource,
                allocation,
                total,
            } => write!(
                f,
                "P{} holds {} of resource '{}' which only has {}",
                process, allocation, resource, total
            ),

            AllocationViolation::ConservationViolated {
                resource,
                total,
                accounted,
            } => write!(
                f,
                "resource '{}': available + allocated = {} but total is {}",
                resource, accounted, total
            ),

            AllocationViolation::DuplicateProcessId { process } => {
                write!(f, "P{} appears in more than one allocation record", process)
            }
        }
    }
}

// ── Top-level safety errors ───────────────────────────────────────────────────

/// Error type returned by [`analyze_safety()`](super::analyze_safety) and
/// [`AllocationRecord::new()`](crate::resource::AllocationRecord::new).
#[derive(Debug, Error)]
pub enum SafetyError {
    #[error("invalid input: {0}")]
    InvalidInput(AllocationViolation),
}

impl From<AllocationViolation> for SafetyError {
    fn from(v: AllocationViolation) -> Self {
        SafetyError::InvalidInput(v)
    }
}

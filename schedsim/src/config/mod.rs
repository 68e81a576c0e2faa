//! Workload file loading.
//!
//! A workload file carries the input for either engine, or both:
//! ```yaml
//! processes:
//!   - { id: 1, arrival_time: 0, burst_time: 8, priority: 2 }
//!   - { id: 2, arrival_time: 1, burst_time: 4 }
//! resources:
//!   - { id: 1, name: "R1", total: 3, available: 1 }
//!   - { id: 2, name: "R2", total: 2, available: 1 }
//! allocations:
//!   - { process_id: 1, allocation: [1, 0], max_need: [2, 1] }
//! ```
//!
//! Times are unsigned integers, so a negative arrival time is rejected by the
//! YAML parser.  Engine-level validation (zero bursts, conservation, …) is
//! left to the engines themselves.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::process::{Process, ProcessId, Ticks};
use crate::resource::{AllocationRecord, Resource};

// ── Private YAML deserialization types ────────────────────────────────────────

/// Top-level wrapper that maps directly onto the YAML file layout.
///
/// Kept private; callers work with [`WorkloadConfig`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkloadFile {
    #[serde(default)]
    processes: Vec<ProcessEntry>,
    #[serde(default)]
    resources: Vec<ResourceEntry>,
    #[serde(default)]
    allocations: Vec<AllocationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProcessEntry {
    id: ProcessId,
    #[serde(default)]
    arrival_time: Ticks,
    burst_time: Ticks,
    priority: Option<i32>,
}

/// `id` defaults to the 1-based position, `name` to `"R<id>"`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourceEntry {
    id: Option<u32>,
    name: Option<String>,
    total: u32,
    available: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct AllocationEntry {
    process_id: ProcessId,
    allocation: Vec<u32>,
    max_need: Vec<u32>,
}

// ── Public data structures ────────────────────────────────────────────────────

/// Parsed workload: a process set and / or a resource snapshot.
#[derive(Debug, Clone, Default)]
pub struct WorkloadConfig {
    pub processes: Vec<Process>,
    pub resources: Vec<Resource>,
    pub allocations: Vec<AllocationRecord>,
}

impl WorkloadConfig {
    /// Read and parse the workload file at `path`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, the YAML is structurally
    /// invalid, or an allocation record has `max_need < allocation`.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading workload from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open workload file: {}", path.display()))?;

        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid workload file: {}", path.display()))
    }

    /// Parse a workload from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: WorkloadFile =
            serde_yaml::from_str(content).context("Failed to parse workload YAML")?;

        let processes: Vec<Process> = file
            .processes
            .into_iter()
            .map(|e| {
                let p = Process::new(e.id, e.arrival_time, e.burst_time);
                match e.priority {
                    Some(prio) => p.with_priority(prio),
                    None => p,
                }
            })
            .collect();

        let resources: Vec<Resource> = file
            .resources
            .into_iter()
            .enumerate()
            .map(|(i, e)| {
                let id = e.id.unwrap_or(i as u32 + 1);
                let name = e.name.unwrap_or_else(|| format!("R{id}"));
                Resource::new(id, name, e.total, e.available)
            })
            .collect();

        let allocations = file
            .allocations
            .into_iter()
            .map(|e| {
                AllocationRecord::new(e.process_id, e.allocation, e.max_need).with_context(|| {
                    format!("Invalid allocation record for P{}", e.process_id)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        for p in &processes {
            debug!(
                "  Process: P{} | arrival: {} | burst: {} | priority: {:?}",
                p.id, p.arrival_time, p.burst_time, p.priority
            );
        }
        for r in &resources {
            debug!(
                "  Resource: {} (#{}) | total: {} | available: {}",
                r.name, r.id, r.total, r.available
            );
        }

        if !allocations.is_empty() && resources.is_empty() {
            warn!("Allocation records present but no resources defined");
        }

        info!(
            processes = processes.len(),
            resources = resources.len(),
            allocations = allocations.len(),
            "Workload loaded"
        );

        Ok(Self {
            processes,
            resources,
            allocations,
        })
    }

    /// Returns `true` if the file defined at least one process.
    pub fn has_processes(&self) -> bool {
        !self.processes.is_empty()
    }

    /// Returns `true` if the file defined a resource snapshot.
    pub fn has_safety_snapshot(&self) -> bool {
        !self.resources.is_empty()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! schedsim – single-CPU scheduling simulator and resource-safety analyzer
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── process      – process records, timeline entries, scheduling results
//! ├── scheduler/   – policy engine (FCFS, SJF, SRTF, priority, round robin)
//! │   ├── policy   – policy enum, dispatch modes, ranking
//! │   ├── metrics  – per-process metrics and rounded averages
//! │   └── error    – scheduler input / termination errors
//! ├── resource     – resource types and allocation records
//! ├── safety/      – Banker's safety search with audit trace
//! └── config/      – YAML workload files
//! ```

pub mod config;
pub mod process;
pub mod resource;
pub mod safety;
pub mod scheduler;

pub use safety::{analyze_safety, SafetyAnalyzer, SafetyResult};
pub use scheduler::{run_schedule, Policy};

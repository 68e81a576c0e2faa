/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use schedsim::config::WorkloadConfig;
use schedsim::process::{SchedulingResult, Ticks};
use schedsim::safety::SafetyAnalyzer;
use schedsim::scheduler::{run_schedule, Policy};

// ── CLI argument definition ───────────────────────────────────────────────────

/// Single-CPU scheduling simulator and Banker's safety analyzer.
///
/// Example:
///   schedsim schedule --workload demos/classic.yaml --policy rr --quantum 4
///   schedsim safety   --workload demos/deadlock.yaml
#[derive(Debug, Parser)]
#[command(
    name = "schedsim",
    about = "Scheduling simulator and resource-safety analyzer",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Simulate a scheduling policy over the workload's processes.
    Schedule {
        /// Path to the YAML workload file.
        #[arg(short = 'w', long = "workload")]
        workload: PathBuf,

        /// FCFS, SJF, SRTF, PRIORITY, PRIORITY_PREEMPTIVE or RR.
        #[arg(short = 'p', long = "policy")]
        policy: String,

        /// Time quantum for round robin (defaults to 4).
        #[arg(short = 'q', long = "quantum")]
        quantum: Option<Ticks>,

        /// Print the full result as YAML instead of a text report.
        #[arg(long = "yaml", default_value_t = false)]
        yaml: bool,
    },

    /// Run the Banker's safety check on the workload's resource snapshot.
    Safety {
        /// Path to the YAML workload file.
        #[arg(short = 'w', long = "workload")]
        workload: PathBuf,

        /// Skip the available + allocated == total check.
        #[arg(long = "lenient", default_value_t = false)]
        lenient: bool,

        /// Print the full result as YAML instead of a text report.
        #[arg(long = "yaml", default_value_t = false)]
        yaml: bool,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so that reports on stdout stay machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Command::Schedule {
            workload,
            policy,
            quantum,
            yaml,
        } => schedule(&workload, &policy, quantum, yaml),
        Command::Safety {
            workload,
            lenient,
            yaml,
        } => safety(&workload, lenient, yaml),
    };

    if let Err(e) = outcome {
        error!("{:#}", e);
        process::exit(1);
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

fn schedule(path: &Path, policy: &str, quantum: Option<Ticks>, yaml: bool) -> Result<()> {
    let policy: Policy = policy.parse()?;
    let workload = WorkloadConfig::load_from_file(path)?;

    if !workload.has_processes() {
        bail!("Workload {} defines no processes", path.display());
    }

    info!(policy = %policy, quantum = ?quantum, "Running scheduler");
    let result = run_schedule(&workload.processes, policy, quantum)
        .with_context(|| format!("{} simulation failed", policy.label()))?;

    if yaml {
        print!("{}", serde_yaml::to_string(&result)?);
    } else {
        print_schedule_report(&result);
    }
    Ok(())
}

fn safety(path: &Path, lenient: bool, yaml: bool) -> Result<()> {
    let workload = WorkloadConfig::load_from_file(path)?;

    if !workload.has_safety_snapshot() {
        bail!("Workload {} defines no resources", path.display());
    }
    if workload.allocations.is_empty() {
        warn!("No allocation records; the state is trivially safe");
    }

    let analyzer = if lenient {
        SafetyAnalyzer::lenient()
    } else {
        SafetyAnalyzer::new()
    };

    let result = analyzer
        .analyze(&workload.resources, &workload.allocations)
        .context("Safety analysis failed")?;

    if yaml {
        print!("{}", serde_yaml::to_string(&result)?);
    } else {
        for line in result.trace_lines() {
            println!("{line}");
        }
        println!();
        println!("{}", result.message);
    }
    Ok(())
}

// ── Report formatting ─────────────────────────────────────────────────────────

fn print_schedule_report(result: &SchedulingResult) {
    println!("{}", result.policy_label);
    println!();
    println!(
        "{:<8} {:>8} {:>6} {:>9} {:>11} {:>8} {:>9}",
        "Process", "Arrival", "Burst", "Complete", "Turnaround", "Waiting", "Response"
    );
    for p in &result.processes {
        println!(
            "{:<8} {:>8} {:>6} {:>9} {:>11} {:>8} {:>9}",
            format!("P{}", p.id),
            p.arrival_time,
            p.burst_time,
            fmt_opt(p.completion_time),
            fmt_opt(p.turnaround_time),
            fmt_opt(p.waiting_time),
            fmt_opt(p.response_time),
        );
    }

    println!();
    println!("Timeline:");
    for entry in &result.timeline {
        println!(
            "  [{:>4} - {:>4})  P{}",
            entry.start_time, entry.end_time, entry.process_id
        );
    }

    println!();
    println!("Average turnaround time: {:.2}", result.average_turnaround_time);
    println!("Average waiting time:    {:.2}", result.average_waiting_time);
    println!("Average response time:   {:.2}", result.average_response_time);
    println!("Total time:              {}", result.total_time);
}

fn fmt_opt(v: Option<Ticks>) -> String {
    v.map_or_else(|| "-".to_string(), |t| t.to_string())
}

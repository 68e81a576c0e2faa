//! Single-CPU scheduling simulation engine.
//!
//! [`run_schedule`] simulates one of six dispatch [`Policy`]s over a set of
//! [`Process`]es and returns a [`SchedulingResult`]: the finished processes,
//! the CPU timeline and the aggregate metrics.
//!
//! # Simulation model
//!
//! | Policy | Clock | Timeline entries |
//! |---|---|---|
//! | FCFS / SJF / Priority | jumps to the next arrival or completion | one per process |
//! | SJF (preemptive) / Priority (preemptive) | one unit per step, re-ranked each step | consecutive units of one process coalesced |
//! | Round Robin | one slice of at most `quantum` units per dispatch | one per dispatch |
//!
//! All six share one `Simulation` skeleton: candidate selection goes
//! through [`Policy::rank`], and CPU time is accounted in one place
//! (`Simulation::execute`), so tie-breaking and timeline emission cannot
//! drift between policies.
//!
//! # Guarantees
//! * Deterministic: identical input yields an identical result.
//! * The caller's slice is never mutated; the engine works on a copy.
//! * Invalid input is rejected before the first simulated unit.
//! * Every loop is bounded by the horizon `max arrival + Σ burst`; passing it
//!   returns [`SchedulerError::NonTerminating`] instead of spinning.
//!
//! # Example
//! ```rust
//! use schedsim::process::Process;
//! use schedsim::scheduler::{run_schedule, Policy};
//!
//! let processes = vec![Process::new(1, 0, 8), Process::new(2, 1, 4)];
//! let result = run_schedule(&processes, Policy::Fcfs, None).unwrap();
//! assert_eq!(result.total_time, 12);
//! ```

pub mod error;
pub mod metrics;
pub mod policy;

pub use error::{InputViolation, SchedulerError};
pub use policy::{DispatchMode, Policy, DEFAULT_QUANTUM};

use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, info, warn};

use crate::process::{Process, SchedulingResult, Ticks, TimelineEntry};

// ── Public entry point ────────────────────────────────────────────────────────

/// Simulate `processes` under `policy`.
///
/// `quantum` is only read by [`Policy::RoundRobin`]; `None` means
/// [`DEFAULT_QUANTUM`].
///
/// # Errors
/// * [`SchedulerError::InvalidInput`]: empty set, zero burst, duplicate id,
///   zero quantum, or a horizon that overflows [`Ticks`].
/// * [`SchedulerError::NonTerminating`]: the simulation passed its horizon.
pub fn run_schedule(
    processes: &[Process],
    policy: Policy,
    quantum: Option<Ticks>,
) -> Result<SchedulingResult, SchedulerError> {
    // ── Preconditions ─────────────────────────────────────────────────────────
    let quantum = match (policy, quantum) {
        (Policy::RoundRobin, Some(0)) => return Err(InputViolation::ZeroQuantum.into()),
        (Policy::RoundRobin, q) => q.unwrap_or(DEFAULT_QUANTUM),
        (_, Some(q)) => {
            warn!(policy = %policy, quantum = q, "quantum ignored by non-Round-Robin policy");
            DEFAULT_QUANTUM
        }
        (_, None) => DEFAULT_QUANTUM,
    };

    let mut sim = Simulation::new(processes, policy)?;

    info!(
        policy = %policy,
        preemptive = policy.is_preemptive(),
        process_count = processes.len(),
        horizon = sim.horizon,
        "=== run_schedule() ==="
    );

    // ── Policy dispatch ───────────────────────────────────────────────────────
    match policy.dispatch_mode() {
        DispatchMode::RunToCompletion => sim.run_to_completion()?,
        DispatchMode::PerTick => sim.run_per_tick()?,
        DispatchMode::Quantum => sim.run_round_robin(quantum)?,
    }

    let result = metrics::summarize(sim.processes, sim.timeline, policy.label());

    info!(
        policy = %policy,
        total_time = result.total_time,
        entries = result.timeline.len(),
        avg_turnaround = result.average_turnaround_time,
        avg_waiting = result.average_waiting_time,
        avg_response = result.average_response_time,
        "=== Simulation complete ==="
    );

    Ok(result)
}

// ── Simulation state ──────────────────────────────────────────────────────────

/// Per-call simulation state.  Created inside `run_schedule()` and consumed
/// by the metrics step; nothing outlives one call.
struct Simulation {
    policy: Policy,

    /// Working copy of the input, in input order.  The index into this vector
    /// is the stable tie-breaker.
    processes: Vec<Process>,

    timeline: Vec<TimelineEntry>,

    clock: Ticks,

    /// Latest instant by which every process must have completed.
    horizon: Ticks,

    finished: usize,
}

impl Simulation {
    /// Validate `input` and take a fresh working copy of it.
    fn new(input: &[Process], policy: Policy) -> Result<Self, SchedulerError> {
        if input.is_empty() {
            return Err(InputViolation::EmptyProcessSet.into());
        }

        let mut seen = BTreeSet::new();
        let mut total_burst: Ticks = 0;
        let mut latest_arrival: Ticks = 0;

        for p in input {
            if p.burst_time == 0 {
                return Err(InputViolation::ZeroBurst { process: p.id }.into());
            }
            if !seen.insert(p.id) {
                return Err(InputViolation::DuplicateProcessId { process: p.id }.into());
            }
            total_burst = total_burst
                .checked_add(p.burst_time)
                .ok_or(InputViolation::HorizonOverflow)?;
            latest_arrival = latest_arrival.max(p.arrival_time);
        }

        let horizon = latest_arrival
            .checked_add(total_burst)
            .ok_or(InputViolation::HorizonOverflow)?;

        Ok(Self {
            policy,
            processes: input.iter().map(Process::reset_for_run).collect(),
            timeline: Vec::new(),
            clock: 0,
            horizon,
            finished: 0,
        })
    }

    fn all_finished(&self) -> bool {
        self.finished == self.processes.len()
    }

    /// Termination guard, checked at the top of every loop iteration.
    ///
    /// The clock strictly increases on every iteration, so this also bounds
    /// the iteration count.
    fn check_horizon(&self) -> Result<(), SchedulerError> {
        if self.clock > self.horizon {
            return Err(SchedulerError::NonTerminating {
                policy: self.policy.name(),
                clock: self.clock,
                horizon: self.horizon,
            });
        }
        Ok(())
    }

    /// Highest-ranked process that has arrived and is not finished.
    fn select(&self) -> Option<usize> {
        self.processes
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_finished() && p.arrival_time <= self.clock)
            .min_by(|(ia, a), (ib, b)| self.policy.rank(a, *ia, b, *ib))
            .map(|(i, _)| i)
    }

    /// Earliest future arrival among unfinished processes.
    fn next_arrival(&self) -> Option<Ticks> {
        self.processes
            .iter()
            .filter(|p| !p.is_finished() && p.arrival_time > self.clock)
            .map(|p| p.arrival_time)
            .min()
    }

    /// Run process `idx` for `units` starting at the current clock.
    ///
    /// Records the response time on first execution, appends (or, with
    /// `coalesce`, extends) a timeline entry, advances the clock and fixes
    /// completion metrics once the process has no time left.
    fn execute(&mut self, idx: usize, units: Ticks, coalesce: bool) {
        let start = self.clock;
        let end = start + units;
        let p = &mut self.processes[idx];

        debug_assert!(units > 0 && units <= p.remaining_time);

        p.mark_started(start);
        p.remaining_time -= units;

        match self.timeline.last_mut() {
            Some(last) if coalesce && last.process_id == p.id && last.end_time == start => {
                last.end_time = end;
            }
            _ => {
                debug!(process = p.id, start, end, remaining = p.remaining_time, "dispatch");
                self.timeline.push(TimelineEntry {
                    process_id: p.id,
                    start_time: start,
                    end_time: end,
                });
            }
        }

        self.clock = end;

        if p.is_finished() {
            p.mark_completed(end);
            self.finished += 1;
            debug!(
                process = p.id,
                completion = end,
                turnaround = ?p.turnaround_time,
                waiting = ?p.waiting_time,
                "✓ completed"
            );
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Non-preemptive: FCFS, SJF, Priority
    // ─────────────────────────────────────────────────────────────────────────

    fn run_to_completion(&mut self) -> Result<(), SchedulerError> {
        while !self.all_finished() {
            self.check_horizon()?;

            match self.select() {
                Some(idx) => {
                    let burst = self.processes[idx].remaining_time;
                    self.execute(idx, burst, false);
                }
                None => {
                    // Nothing has arrived yet: jump, CPU idle, no entry
                    let next = self.next_arrival().ok_or(SchedulerError::NonTerminating {
                        policy: self.policy.name(),
                        clock: self.clock,
                        horizon: self.horizon,
                    })?;
                    debug!(from = self.clock, to = next, "CPU idle");
                    self.clock = next;
                }
            }
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preemptive, unit ticks: SRTF, Priority (preemptive)
    // ─────────────────────────────────────────────────────────────────────────

    fn run_per_tick(&mut self) -> Result<(), SchedulerError> {
        let mut running: Option<usize> = None;

        while !self.all_finished() {
            self.check_horizon()?;

            let Some(idx) = self.select() else {
                self.clock += 1;
                continue;
            };

            if let Some(prev) = running {
                if prev != idx && !self.processes[prev].is_finished() {
                    debug!(
                        preempted = self.processes[prev].id,
                        by = self.processes[idx].id,
                        at = self.clock,
                        "preemption"
                    );
                }
            }

            self.execute(idx, 1, true);
            running = Some(idx);
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Round Robin
    // ─────────────────────────────────────────────────────────────────────────

    fn run_round_robin(&mut self, quantum: Ticks) -> Result<(), SchedulerError> {
        let mut ready: VecDeque<usize> = VecDeque::new();
        let mut admitted = vec![false; self.processes.len()];

        self.admit_arrivals(&mut ready, &mut admitted);

        while !self.all_finished() {
            self.check_horizon()?;

            let Some(idx) = ready.pop_front() else {
                self.clock += 1;
                self.admit_arrivals(&mut ready, &mut admitted);
                continue;
            };

            let slice = quantum.min(self.processes[idx].remaining_time);
            self.execute(idx, slice, false);

            // Fresh arrivals go ahead of the process that was just preempted
            self.admit_arrivals(&mut ready, &mut admitted);
            if !self.processes[idx].is_finished() {
                ready.push_back(idx);
            }
        }
        Ok(())
    }

    /// Append every process that has arrived by now and was never queued,
    /// ordered by arrival time then input position.
    fn admit_arrivals(&self, ready: &mut VecDeque<usize>, admitted: &mut [bool]) {
        let mut arrivals: Vec<usize> = (0..self.processes.len())
            .filter(|&i| !admitted[i] && self.processes[i].arrival_time <= self.clock)
            .collect();
        arrivals.sort_by_key(|&i| (self.processes[i].arrival_time, i));

        for i in arrivals {
            admitted[i] = true;
            ready.push_back(i);
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::ProcessId;

    // ── Test helpers ──────────────────────────────────────────────────────────

    /// The classic four-process workload:
    /// (id1, arr0, burst8), (id2, arr1, burst4), (id3, arr2, burst9), (id4, arr3, burst5)
    fn classic() -> Vec<Process> {
        vec![
            Process::new(1, 0, 8),
            Process::new(2, 1, 4),
            Process::new(3, 2, 9),
            Process::new(4, 3, 5),
        ]
    }

    /// Same workload with priorities 3, 1, 0, 2.
    fn classic_with_priorities() -> Vec<Process> {
        classic()
            .into_iter()
            .zip([3, 1, 0, 2])
            .map(|(p, prio)| p.with_priority(prio))
            .collect()
    }

    fn completion(result: &SchedulingResult, id: ProcessId) -> Ticks {
        result.process(id).unwrap().completion_time.unwrap()
    }

    fn completions(result: &SchedulingResult) -> Vec<Ticks> {
        result
            .processes
            .iter()
            .map(|p| p.completion_time.unwrap())
            .collect()
    }

    fn spans(result: &SchedulingResult) -> Vec<(ProcessId, Ticks, Ticks)> {
        result
            .timeline
            .iter()
            .map(|e| (e.process_id, e.start_time, e.end_time))
            .collect()
    }

    // ── FCFS ──────────────────────────────────────────────────────────────────

    #[test]
    fn fcfs_classic_workload() {
        let result = run_schedule(&classic(), Policy::Fcfs, None).unwrap();

        assert_eq!(completions(&result), vec![8, 12, 21, 26]);
        assert_eq!(result.average_waiting_time, 8.75); // (0 + 7 + 10 + 18) / 4
        assert_eq!(result.average_turnaround_time, 15.25);
        assert_eq!(result.average_response_time, 8.75);
        assert_eq!(result.total_time, 26);
        assert_eq!(result.policy_label, "First Come First Serve");
        assert_eq!(
            spans(&result),
            vec![(1, 0, 8), (2, 8, 12), (3, 12, 21), (4, 21, 26)]
        );
    }

    #[test]
    fn fcfs_same_arrival_keeps_input_order() {
        let procs = vec![Process::new(9, 0, 2), Process::new(3, 0, 1), Process::new(5, 0, 1)];
        let result = run_schedule(&procs, Policy::Fcfs, None).unwrap();
        let order: Vec<ProcessId> = result.timeline.iter().map(|e| e.process_id).collect();
        assert_eq!(order, vec![9, 3, 5]);
    }

    #[test]
    fn idle_gap_is_a_jump_without_timeline_entry() {
        let procs = vec![Process::new(1, 2, 3), Process::new(2, 10, 1)];
        let result = run_schedule(&procs, Policy::Fcfs, None).unwrap();

        assert_eq!(spans(&result), vec![(1, 2, 5), (2, 10, 11)]);
        assert_eq!(result.process(1).unwrap().response_time, Some(0));
        assert_eq!(result.total_time, 11);
    }

    // ── SJF ───────────────────────────────────────────────────────────────────

    #[test]
    fn sjf_picks_shortest_arrived_burst() {
        let result = run_schedule(&classic(), Policy::Sjf, None).unwrap();

        // P1 alone at t=0, then P2 (4), P4 (5), P3 (9)
        assert_eq!(
            spans(&result),
            vec![(1, 0, 8), (2, 8, 12), (4, 12, 17), (3, 17, 26)]
        );
        assert_eq!(result.average_waiting_time, 7.75); // (0 + 7 + 15 + 9) / 4
        assert_eq!(result.policy_label, "Shortest Job First");
    }

    // ── SRTF ──────────────────────────────────────────────────────────────────

    #[test]
    fn srtf_preempts_on_shorter_remaining_time() {
        let result = run_schedule(&classic(), Policy::SjfPreemptive, None).unwrap();

        assert_eq!(
            spans(&result),
            vec![(1, 0, 1), (2, 1, 5), (4, 5, 10), (1, 10, 17), (3, 17, 26)]
        );
        assert_eq!(completions(&result), vec![17, 5, 26, 10]);
        assert_eq!(result.average_waiting_time, 6.5); // (9 + 0 + 15 + 2) / 4
        assert_eq!(result.average_response_time, 4.25); // (0 + 0 + 15 + 2) / 4
    }

    #[test]
    fn srtf_coalesces_consecutive_units_into_one_entry() {
        let result = run_schedule(&[Process::new(1, 0, 5)], Policy::SjfPreemptive, None).unwrap();
        assert_eq!(spans(&result), vec![(1, 0, 5)]);
    }

    // ── Priority ──────────────────────────────────────────────────────────────

    #[test]
    fn priority_non_preemptive_runs_to_completion() {
        let result = run_schedule(&classic_with_priorities(), Policy::Priority, None).unwrap();

        // P1 holds the CPU until 8 even though P3 (priority 0) arrives at 2
        assert_eq!(
            spans(&result),
            vec![(1, 0, 8), (3, 8, 17), (2, 17, 21), (4, 21, 26)]
        );
    }

    #[test]
    fn priority_preemptive_switches_on_higher_priority_arrival() {
        let result =
            run_schedule(&classic_with_priorities(), Policy::PriorityPreemptive, None).unwrap();

        assert_eq!(
            spans(&result),
            vec![(1, 0, 1), (2, 1, 2), (3, 2, 11), (2, 11, 14), (4, 14, 19), (1, 19, 26)]
        );
        assert_eq!(completion(&result, 3), 11);
        assert_eq!(completion(&result, 1), 26);
        // P2 first ran at 1 and keeps that response time after being resumed
        assert_eq!(result.process(2).unwrap().response_time, Some(0));
    }

    #[test]
    fn missing_priority_runs_after_any_present_priority() {
        let procs = vec![Process::new(1, 0, 2), Process::new(2, 0, 2).with_priority(1_000)];
        for policy in [Policy::Priority, Policy::PriorityPreemptive] {
            let result = run_schedule(&procs, policy, None).unwrap();
            assert_eq!(result.timeline[0].process_id, 2, "{policy}");
        }
    }

    #[test]
    fn equal_priority_falls_back_to_fcfs_order() {
        let procs = vec![
            Process::new(1, 0, 1).with_priority(5),
            Process::new(2, 1, 3).with_priority(2),
            Process::new(3, 0, 3).with_priority(2),
        ];
        let result = run_schedule(&procs, Policy::Priority, None).unwrap();
        // At t=0 P3 (prio 2) beats P1 (prio 5); at t=3 P2 (prio 2) beats P1
        let order: Vec<ProcessId> = result.timeline.iter().map(|e| e.process_id).collect();
        assert_eq!(order, vec![3, 2, 1]);
    }

    // ── Round Robin ───────────────────────────────────────────────────────────

    #[test]
    fn round_robin_classic_workload_quantum_4() {
        let result = run_schedule(&classic(), Policy::RoundRobin, Some(4)).unwrap();

        assert_eq!(
            spans(&result),
            vec![
                (1, 0, 4),
                (2, 4, 8),
                (3, 8, 12),
                (4, 12, 16),
                (1, 16, 20),
                (3, 20, 24),
                (4, 24, 25),
                (3, 25, 26),
            ]
        );
        // P1 completes after exactly two slices
        assert_eq!(
            result.timeline.iter().filter(|e| e.process_id == 1).count(),
            2
        );
        assert_eq!(completions(&result), vec![20, 8, 26, 25]);

        let turnaround: Vec<Ticks> = result
            .processes
            .iter()
            .map(|p| p.turnaround_time.unwrap())
            .collect();
        assert_eq!(turnaround, vec![20, 7, 24, 22]);

        assert_eq!(result.average_turnaround_time, 18.25);
        assert_eq!(result.average_waiting_time, 11.75);
        assert_eq!(result.average_response_time, 4.5);
        assert_eq!(result.total_time, 26);
    }

    #[test]
    fn round_robin_new_arrival_queues_ahead_of_preempted_process() {
        // P2 arrives exactly when P1's first slice ends
        let procs = vec![Process::new(1, 0, 3), Process::new(2, 2, 2)];
        let result = run_schedule(&procs, Policy::RoundRobin, Some(2)).unwrap();
        assert_eq!(spans(&result), vec![(1, 0, 2), (2, 2, 4), (1, 4, 5)]);
    }

    #[test]
    fn round_robin_does_not_merge_back_to_back_slices() {
        let result = run_schedule(&[Process::new(1, 0, 5)], Policy::RoundRobin, Some(2)).unwrap();
        assert_eq!(spans(&result), vec![(1, 0, 2), (1, 2, 4), (1, 4, 5)]);
        assert_eq!(result.merged_timeline().len(), 1);
    }

    #[test]
    fn round_robin_idles_until_next_arrival() {
        let procs = vec![Process::new(1, 0, 1), Process::new(2, 5, 2)];
        let result = run_schedule(&procs, Policy::RoundRobin, Some(4)).unwrap();
        assert_eq!(spans(&result), vec![(1, 0, 1), (2, 5, 7)]);
        assert_eq!(result.process(2).unwrap().response_time, Some(0));
    }

    #[test]
    fn round_robin_default_quantum_is_four() {
        let implicit = run_schedule(&classic(), Policy::RoundRobin, None).unwrap();
        let explicit = run_schedule(&classic(), Policy::RoundRobin, Some(DEFAULT_QUANTUM)).unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn round_robin_dispatches_every_other_ready_process_between_turns() {
        let procs = vec![
            Process::new(1, 0, 7),
            Process::new(2, 0, 3),
            Process::new(3, 1, 6),
            Process::new(4, 2, 2),
            Process::new(5, 4, 5),
        ];
        let result = run_schedule(&procs, Policy::RoundRobin, Some(2)).unwrap();
        let order: Vec<ProcessId> = result.timeline.iter().map(|e| e.process_id).collect();

        // Between two consecutive turns of one process, no other process may
        // run twice: a full pass of the queue always reaches everyone.
        for (i, &pid) in order.iter().enumerate() {
            let Some(offset) = order[i + 1..].iter().position(|&p| p == pid) else {
                continue;
            };
            let between = &order[i + 1..i + 1 + offset];
            let unique: BTreeSet<_> = between.iter().collect();
            assert_eq!(unique.len(), between.len(), "starvation window {between:?}");
        }
    }

    #[test]
    fn quantum_is_ignored_by_other_policies() {
        let with = run_schedule(&classic(), Policy::Sjf, Some(1)).unwrap();
        let without = run_schedule(&classic(), Policy::Sjf, None).unwrap();
        assert_eq!(with, without);
    }

    // ── Properties over every policy ──────────────────────────────────────────

    fn mixed_workload() -> Vec<Process> {
        vec![
            Process::new(1, 0, 5).with_priority(2),
            Process::new(2, 0, 3),
            Process::new(3, 2, 1).with_priority(1),
            Process::new(4, 3, 7).with_priority(2),
            Process::new(5, 3, 2).with_priority(0),
            Process::new(6, 20, 4).with_priority(3),
            Process::new(7, 21, 1),
        ]
    }

    #[test]
    fn every_policy_satisfies_metric_invariants() {
        for policy in Policy::ALL {
            let result = run_schedule(&mixed_workload(), policy, Some(3)).unwrap();
            for p in &result.processes {
                let completion = p.completion_time.unwrap();
                let turnaround = p.turnaround_time.unwrap();
                let waiting = p.waiting_time.unwrap();
                let response = p.response_time.unwrap();
                assert_eq!(turnaround, waiting + p.burst_time, "{policy} P{}", p.id);
                assert_eq!(turnaround, completion - p.arrival_time, "{policy} P{}", p.id);
                assert!(response <= turnaround, "{policy} P{}", p.id);
                assert_eq!(p.remaining_time, 0, "{policy} P{}", p.id);
            }
        }
    }

    #[test]
    fn every_policy_produces_ordered_non_overlapping_timeline() {
        for policy in Policy::ALL {
            let result = run_schedule(&mixed_workload(), policy, Some(3)).unwrap();
            for e in &result.timeline {
                assert!(e.start_time < e.end_time, "{policy}: empty entry {e:?}");
            }
            for w in result.timeline.windows(2) {
                assert!(w[1].start_time >= w[0].end_time, "{policy}: overlap {w:?}");
            }
            assert_eq!(
                result.total_time,
                result.timeline.last().unwrap().end_time,
                "{policy}"
            );
        }
    }

    #[test]
    fn every_policy_executes_exactly_the_burst_of_each_process() {
        for policy in Policy::ALL {
            let result = run_schedule(&mixed_workload(), policy, Some(3)).unwrap();
            for p in &result.processes {
                let executed: Ticks = result
                    .timeline
                    .iter()
                    .filter(|e| e.process_id == p.id)
                    .map(|e| e.duration())
                    .sum();
                assert_eq!(executed, p.burst_time, "{policy} P{}", p.id);
            }
        }
    }

    #[test]
    fn response_time_comes_from_first_timeline_entry() {
        for policy in Policy::ALL {
            let result = run_schedule(&mixed_workload(), policy, Some(3)).unwrap();
            for p in &result.processes {
                let first = result.timeline.iter().find(|e| e.process_id == p.id).unwrap();
                assert_eq!(
                    p.response_time,
                    Some(first.start_time - p.arrival_time),
                    "{policy} P{}",
                    p.id
                );
            }
        }
    }

    #[test]
    fn input_is_never_mutated() {
        let input = mixed_workload();
        let snapshot = input.clone();
        for policy in Policy::ALL {
            run_schedule(&input, policy, None).unwrap();
        }
        assert_eq!(input, snapshot);
    }

    #[test]
    fn result_processes_are_in_input_order() {
        let result = run_schedule(&mixed_workload(), Policy::Sjf, None).unwrap();
        let ids: Vec<ProcessId> = result.processes.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn scheduler_is_deterministic() {
        for policy in Policy::ALL {
            let reference = run_schedule(&mixed_workload(), policy, Some(2)).unwrap();
            for _ in 0..20 {
                let again = run_schedule(&mixed_workload(), policy, Some(2)).unwrap();
                assert_eq!(again, reference, "{policy} produced different output");
            }
        }
    }

    // ── Input validation ──────────────────────────────────────────────────────

    #[test]
    fn empty_process_set_is_invalid() {
        let err = run_schedule(&[], Policy::Fcfs, None).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidInput(InputViolation::EmptyProcessSet)
        ));
    }

    #[test]
    fn zero_burst_is_invalid() {
        let procs = vec![Process::new(1, 0, 3), Process::new(2, 1, 0)];
        let err = run_schedule(&procs, Policy::SjfPreemptive, None).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidInput(InputViolation::ZeroBurst { process: 2 })
        ));
    }

    #[test]
    fn zero_quantum_is_invalid_for_round_robin() {
        let err = run_schedule(&classic(), Policy::RoundRobin, Some(0)).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidInput(InputViolation::ZeroQuantum)
        ));
    }

    #[test]
    fn duplicate_ids_are_invalid() {
        let procs = vec![Process::new(1, 0, 3), Process::new(1, 1, 2)];
        let err = run_schedule(&procs, Policy::Fcfs, None).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidInput(InputViolation::DuplicateProcessId { process: 1 })
        ));
    }

    #[test]
    fn overflowing_horizon_is_invalid() {
        let procs = vec![Process::new(1, u64::MAX, 1)];
        let err = run_schedule(&procs, Policy::Fcfs, None).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::InvalidInput(InputViolation::HorizonOverflow)
        ));
    }

    // ── Termination guard ─────────────────────────────────────────────────────

    #[test]
    fn horizon_guard_reports_non_terminating() {
        let mut sim = Simulation::new(&[Process::new(1, 0, 5)], Policy::SjfPreemptive).unwrap();
        // Shrink the horizon below the work actually required
        sim.horizon = 2;
        let err = sim.run_per_tick().unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::NonTerminating { clock: 3, horizon: 2, .. }
        ));
    }

    #[test]
    fn horizon_guard_stops_run_to_completion() {
        let procs = [Process::new(1, 0, 3), Process::new(2, 0, 3)];
        let mut sim = Simulation::new(&procs, Policy::Fcfs).unwrap();
        sim.horizon = 2;
        let err = sim.run_to_completion().unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::NonTerminating { policy: "FCFS", clock: 3, horizon: 2 }
        ));
    }

    #[test]
    fn horizon_guard_stops_round_robin() {
        let mut sim = Simulation::new(&[Process::new(1, 0, 5)], Policy::RoundRobin).unwrap();
        sim.horizon = 3;
        // Slices end at 2 and 4; the check at clock 4 trips
        let err = sim.run_round_robin(2).unwrap_err();
        assert!(matches!(
            err,
            SchedulerError::NonTerminating { clock: 4, horizon: 3, .. }
        ));
    }

    #[test]
    fn metric_sums_beyond_ticks_range_do_not_overflow() {
        let half = u64::MAX / 2;
        let procs = [Process::new(1, 0, half), Process::new(2, 0, half)];
        let result = run_schedule(&procs, Policy::Fcfs, None).unwrap();

        assert_eq!(result.total_time, u64::MAX - 1);
        assert_eq!(result.process(2).unwrap().turnaround_time, Some(u64::MAX - 1));

        // (half + 2 * half) / 2
        let expected = 1.5 * half as f64;
        let rel = (result.average_turnaround_time - expected).abs() / expected;
        assert!(rel < 1e-12, "got {}", result.average_turnaround_time);
        assert!(result.average_waiting_time > 0.0);
    }

    #[test]
    fn horizon_is_latest_arrival_plus_total_burst() {
        let sim = Simulation::new(&classic(), Policy::Fcfs).unwrap();
        assert_eq!(sim.horizon, 3 + 26);
    }
}

use std::thread;
use std::time::Duration;

use tracing::{debug, trace};

use crate::aggregate::CpuCounts;
use crate::process::{Pid, Tid};
use crate::sample::{Observation, ThreadReader};
use crate::topology::CpuTopology;

/// How many times to sample and how far apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingPlan {
	/// Rounds taken after the initial one
	pub rounds: u64,

	/// Pause before each of those rounds
	pub interval: Duration,
}

impl SamplingPlan {
	pub fn new(rounds: u64, interval: Duration) -> Self {
		Self { rounds, interval }
	}

	/// Passes over the thread set, counting the initial one
	pub fn passes(&self) -> u64 {
		self.rounds + 1
	}

	/// Upper bound on running observations for `threads` threads
	pub fn planned_checks(&self, threads: usize) -> u64 {
		self.passes() * threads as u64
	}
}

/// Samples a fixed thread set and folds the results into per-CPU counts
#[derive(Debug)]
pub struct ThreadSampler<'a, R: ThreadReader> {
	reader: &'a R,
	topology: &'a CpuTopology,
}

impl<'a, R: ThreadReader> ThreadSampler<'a, R> {
	pub fn new(reader: &'a R, topology: &'a CpuTopology) -> Self {
		Self { reader, topology }
	}

	/// Samples every thread once
	pub fn sample_round(&self, pid: Pid, tids: &[Tid], counts: &mut CpuCounts) {
		for &tid in tids {
			let observation = Observation::classify(self.reader.read_sample(pid, tid), self.topology);
			if !counts.record(observation) {
				trace!(pid, tid, ?observation, "observation not counted");
			}
		}
	}

	/// Runs one immediate round then `plan.rounds` more, sleeping
	/// `plan.interval` before each
	pub fn run(&self, pid: Pid, tids: &[Tid], plan: &SamplingPlan) -> CpuCounts {
		let mut counts = CpuCounts::new(self.topology);

		self.sample_round(pid, tids, &mut counts);
		for round in 1..=plan.rounds {
			thread::sleep(plan.interval);
			self.sample_round(pid, tids, &mut counts);
			trace!(round, total_running = counts.total_running(), "round complete");
		}

		debug!(
			pid,
			planned = plan.planned_checks(tids.len()),
			running = counts.total_running(),
			"sampling finished"
		);
		counts
	}
}

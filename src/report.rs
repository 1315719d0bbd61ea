use crate::aggregate::{CpuCounts, Distribution};
use crate::monitor::SamplingPlan;
use crate::process::Pid;
use crate::topology::CpuTopology;

/// Everything the final report shows about one profiling run
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileReport {
	/// Name the process was resolved by
	pub name: String,

	pub pid: Pid,

	/// Threads present when the run started
	pub thread_count: usize,

	/// Passes over the thread set, including the initial one
	pub passes: u64,

	/// Checks that would have been made had every thread been readable every round
	pub planned_checks: u64,

	/// Running-state observations that were counted
	pub running_checks: u64,

	/// Per-CPU and per-socket percentages; `None` if nothing was seen running
	pub distribution: Option<Distribution>,

	/// Sockets and total cores of the topology, with the shared per-socket
	/// core count when every socket has the same number
	pub summary: TopologySummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologySummary {
	pub total_cores: usize,
	pub sockets: usize,
	pub uniform_cores_per_socket: Option<usize>,
}

impl TopologySummary {
	pub fn of(topology: &CpuTopology) -> Self {
		Self {
			total_cores: topology.total_cores(),
			sockets: topology.socket_count(),
			uniform_cores_per_socket: topology.uniform_cores_per_socket(),
		}
	}
}

impl ProfileReport {
	pub fn new(
		name: &str,
		pid: Pid,
		thread_count: usize,
		plan: &SamplingPlan,
		counts: &CpuCounts,
		topology: &CpuTopology,
	) -> Self {
		Self {
			name: name.to_string(),
			pid,
			thread_count,
			passes: plan.passes(),
			planned_checks: plan.planned_checks(thread_count),
			running_checks: counts.total_running(),
			distribution: counts.distribution(topology),
			summary: TopologySummary::of(topology),
		}
	}
}

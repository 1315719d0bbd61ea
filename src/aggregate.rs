use std::collections::BTreeMap;

use crate::sample::Observation;
use crate::topology::{CpuId, CpuTopology, SocketId};
use crate::util::percentage;

/// Running-state observation counts per logical CPU
///
/// Counts only ever increase during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuCounts {
	counts: BTreeMap<CpuId, u64>,
	total_running: u64,
}

impl CpuCounts {
	/// Starts every CPU of the topology at zero
	pub fn new(topology: &CpuTopology) -> Self {
		Self {
			counts: topology.cpus.iter().map(|&cpu_id| (cpu_id, 0)).collect(),
			total_running: 0,
		}
	}

	/// Folds one observation in, returning whether it was counted
	pub fn record(&mut self, observation: Observation) -> bool {
		let Some(count) = observation
			.running_cpu()
			.and_then(|cpu_id| self.counts.get_mut(&cpu_id))
		else {
			return false;
		};

		*count += 1;
		self.total_running += 1;
		true
	}

	pub fn total_running(&self) -> u64 {
		self.total_running
	}

	pub fn count(&self, cpu_id: CpuId) -> u64 {
		self.counts.get(&cpu_id).copied().unwrap_or(0)
	}

	pub fn iter(&self) -> impl Iterator<Item = (CpuId, u64)> + '_ {
		self.counts.iter().map(|(&cpu_id, &count)| (cpu_id, count))
	}

	/// Sums the per-CPU counts of each socket
	pub fn socket_counts(&self, topology: &CpuTopology) -> BTreeMap<SocketId, u64> {
		let mut sockets = BTreeMap::new();
		for (cpu_id, count) in self.iter() {
			if let Some(socket_id) = topology.socket_of(cpu_id) {
				*sockets.entry(socket_id).or_insert(0) += count;
			}
		}
		sockets
	}

	/// Percentage breakdown, or `None` when nothing was seen running
	pub fn distribution(&self, topology: &CpuTopology) -> Option<Distribution> {
		if self.total_running == 0 {
			return None;
		}

		let cpus = self
			.iter()
			.map(|(cpu_id, count)| CpuShare {
				cpu_id,
				percent: percentage(count, self.total_running),
			})
			.collect();

		let socket_counts = self.socket_counts(topology);
		let cores_per_socket = topology.cores_per_socket();
		let mut socket_ids: Vec<SocketId> = socket_counts.keys().chain(cores_per_socket.keys()).copied().collect();
		socket_ids.sort_unstable();
		socket_ids.dedup();

		let sockets = socket_ids
			.into_iter()
			.map(|socket_id| SocketShare {
				socket_id,
				cores: cores_per_socket.get(&socket_id).copied().unwrap_or(0),
				percent: percentage(socket_counts.get(&socket_id).copied().unwrap_or(0), self.total_running),
			})
			.collect();

		Some(Distribution { cpus, sockets })
	}
}

/// Share of running observations attributed to one CPU
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpuShare {
	pub cpu_id: CpuId,
	pub percent: f64,
}

/// Share of running observations attributed to one socket
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SocketShare {
	pub socket_id: SocketId,
	pub cores: usize,
	pub percent: f64,
}

/// Final per-CPU and per-socket percentages, ordered by ID
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution {
	pub cpus: Vec<CpuShare>,
	pub sockets: Vec<SocketShare>,
}

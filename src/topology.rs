use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::{fs, io};

use tracing::debug;

use crate::constants::{CORE_ID_ATTR, DEFAULT_SOCKET_ID, PACKAGE_ID_ATTR};

/// Logical CPU index as exposed by the kernel
pub type CpuId = usize;

/// Physical package identifier
pub type SocketId = i32;

/// Core identifier, unique within a socket
pub type CoreId = i32;

/// Maps every logical CPU to its socket and every socket to the cores it holds
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuTopology {
	/// Logical CPUs in ascending order
	pub cpus: Vec<CpuId>,

	/// Maps logical CPU ID to its socket ID
	pub cpu_to_socket: BTreeMap<CpuId, SocketId>,

	/// Maps socket ID to the set of distinct core IDs it holds
	pub socket_to_cores: BTreeMap<SocketId, BTreeSet<CoreId>>,
}

impl CpuTopology {
	/// Detects the topology under `sysfs_cpu_root`, falling back to a flat
	/// single-socket model sized to the host CPU count when nothing is readable
	pub fn detect(sysfs_cpu_root: &Path) -> Self {
		match Self::from_sysfs(sysfs_cpu_root) {
			Ok(topology) => topology,
			Err(e) => {
				let cpu_count = host_cpu_count();
				debug!(
					root = %sysfs_cpu_root.display(),
					error = %e,
					cpu_count,
					"CPU topology unavailable, using flat single-socket layout"
				);
				Self::flat(cpu_count)
			},
		}
	}

	/// Reads the topology from a sysfs CPU directory
	///
	/// Every `cpuN` entry becomes a logical CPU. Missing attributes degrade to
	/// socket 0 and a core ID equal to the CPU index. Fails only when the
	/// directory cannot be listed or holds no CPU entries.
	pub fn from_sysfs(sysfs_cpu_root: &Path) -> io::Result<Self> {
		let mut attrs = Vec::new();

		for entry in fs::read_dir(sysfs_cpu_root)?.filter_map(Result::ok) {
			let path = entry.path();
			let Some(cpu_id) = entry.file_name().to_str().and_then(parse_cpu_dir_name) else {
				continue;
			};

			let socket_id = read_topology_attr(&path.join(PACKAGE_ID_ATTR)).unwrap_or_else(|| {
				debug!(cpu_id, "physical_package_id unreadable, assuming socket {}", DEFAULT_SOCKET_ID);
				DEFAULT_SOCKET_ID
			});
			let core_id = read_topology_attr(&path.join(CORE_ID_ATTR)).unwrap_or_else(|| {
				debug!(cpu_id, "core_id unreadable, using the CPU index");
				cpu_id as CoreId
			});

			attrs.push((cpu_id, socket_id, core_id));
		}

		if attrs.is_empty() {
			return Err(io::Error::new(
				io::ErrorKind::NotFound,
				format!("no cpuN entries under {}", sysfs_cpu_root.display()),
			));
		}

		Ok(Self::from_attributes(attrs))
	}

	/// Builds a topology from `(cpu, socket, core)` triples
	pub fn from_attributes(attrs: impl IntoIterator<Item = (CpuId, SocketId, CoreId)>) -> Self {
		let mut cpu_to_socket = BTreeMap::new();
		let mut socket_to_cores: BTreeMap<SocketId, BTreeSet<CoreId>> = BTreeMap::new();

		for (cpu_id, socket_id, core_id) in attrs {
			cpu_to_socket.insert(cpu_id, socket_id);
			socket_to_cores.entry(socket_id).or_default().insert(core_id);
		}

		Self {
			cpus: cpu_to_socket.keys().copied().collect(),
			cpu_to_socket,
			socket_to_cores,
		}
	}

	/// One socket, one core per logical CPU
	pub fn flat(cpu_count: usize) -> Self {
		Self::from_attributes((0..cpu_count.max(1)).map(|cpu| (cpu, DEFAULT_SOCKET_ID, cpu as CoreId)))
	}

	/// Resolves a kernel-reported CPU number to a known logical CPU
	pub fn lookup(&self, cpu: i64) -> Option<CpuId> {
		let cpu_id = CpuId::try_from(cpu).ok()?;
		self.cpu_to_socket.contains_key(&cpu_id).then_some(cpu_id)
	}

	pub fn socket_of(&self, cpu_id: CpuId) -> Option<SocketId> {
		self.cpu_to_socket.get(&cpu_id).copied()
	}

	/// Count of distinct cores per socket
	pub fn cores_per_socket(&self) -> BTreeMap<SocketId, usize> {
		self.socket_to_cores
			.iter()
			.map(|(&socket_id, cores)| (socket_id, cores.len()))
			.collect()
	}

	pub fn socket_count(&self) -> usize {
		self.socket_to_cores.len()
	}

	pub fn total_cores(&self) -> usize {
		self.socket_to_cores.values().map(BTreeSet::len).sum()
	}

	/// Core count shared by every socket, if all sockets agree
	pub fn uniform_cores_per_socket(&self) -> Option<usize> {
		let mut counts = self.socket_to_cores.values().map(BTreeSet::len);
		let first = counts.next()?;
		counts.all(|count| count == first).then_some(first)
	}
}

/// Logical CPU count reported by the host, never less than 1
pub fn host_cpu_count() -> usize {
	num_cpus::get().max(1)
}

/// Accepts exactly `cpu` followed by one or more ASCII digits
fn parse_cpu_dir_name(name: &str) -> Option<CpuId> {
	let digits = name.strip_prefix("cpu")?;
	if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	digits.parse().ok()
}

fn read_topology_attr(path: &Path) -> Option<i32> {
	fs::read_to_string(path).ok()?.trim().parse().ok()
}

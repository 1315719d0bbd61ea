use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{PROC_ROOT, SYSFS_CPU_ROOT};
use crate::monitor::SamplingPlan;

/// Settings for one profiling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfig {
	/// Exact `comm` of the target process
	pub name: String,

	pub plan: SamplingPlan,

	/// procfs mount point
	pub proc_root: PathBuf,

	/// Directory holding the `cpuN` topology entries
	pub sysfs_cpu_root: PathBuf,
}

impl ProfileConfig {
	/// Configuration against the live procfs and sysfs
	pub fn new(name: impl Into<String>, rounds: u64, interval: Duration) -> Self {
		Self {
			name: name.into(),
			plan: SamplingPlan::new(rounds, interval),
			proc_root: PathBuf::from(PROC_ROOT),
			sysfs_cpu_root: PathBuf::from(SYSFS_CPU_ROOT),
		}
	}

	pub fn with_proc_root(mut self, proc_root: impl Into<PathBuf>) -> Self {
		self.proc_root = proc_root.into();
		self
	}

	pub fn with_sysfs_cpu_root(mut self, sysfs_cpu_root: impl Into<PathBuf>) -> Self {
		self.sysfs_cpu_root = sysfs_cpu_root.into();
		self
	}
}

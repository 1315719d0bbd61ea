pub mod aggregate;
pub mod cli;
pub mod config;
pub mod constants;
pub mod display;
pub mod error;
pub mod monitor;
pub mod process;
pub mod report;
pub mod sample;
pub mod topology;
pub mod util;

use tracing::info;

use crate::config::ProfileConfig;
use crate::error::ProfileError;
use crate::monitor::ThreadSampler;
use crate::process::ProcFs;
use crate::report::ProfileReport;
use crate::topology::CpuTopology;

/// Profiles which CPUs the threads of a named process run on
///
/// This is the main entry point. The process and its thread set are resolved
/// once up front; failing either is fatal and nothing is sampled. The
/// topology is read once, then every thread is sampled `rounds + 1` times.
/// Threads that exit or return unreadable records are skipped for that round.
pub fn profile_process(config: &ProfileConfig) -> Result<ProfileReport, ProfileError> {
	let procfs = ProcFs::new(&config.proc_root);

	let pid = procfs.find_pid_by_name(&config.name)?;
	let tids = procfs.list_threads(pid)?;
	info!(pid, threads = tids.len(), "resolved {}", config.name);

	let topology = CpuTopology::detect(&config.sysfs_cpu_root);
	info!(
		cpus = topology.cpus.len(),
		sockets = topology.socket_count(),
		"read CPU topology"
	);

	let counts = ThreadSampler::new(&procfs, &topology).run(pid, &tids, &config.plan);

	Ok(ProfileReport::new(&config.name, pid, tids.len(), &config.plan, &counts, &topology))
}

//! Command line for the thread CPU profiler

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::ProfileConfig;
use crate::constants::{PROC_ROOT, SYSFS_CPU_ROOT};

#[derive(Parser, Debug)]
#[command(name = "thread-cpu-profile")]
#[command(version)]
#[command(about = "Sample which CPUs and sockets a process's threads are running on", long_about = None)]
pub struct Cli {
	/// Name of the target process (matches /proc/<pid>/comm exactly)
	#[arg(value_name = "NAME")]
	pub name: String,

	/// Number of samples taken after the initial one
	#[arg(short = 'n', long = "samples", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
	pub samples: u64,

	/// Interval between samples, in milliseconds
	#[arg(short = 't', long = "interval", value_name = "MS", value_parser = clap::value_parser!(u64).range(1..))]
	pub interval_ms: u64,

	/// procfs mount point
	#[arg(long = "proc-root", value_name = "DIR", default_value = PROC_ROOT)]
	pub proc_root: PathBuf,

	/// sysfs directory holding the cpuN topology entries
	#[arg(long = "sysfs-cpu-root", value_name = "DIR", default_value = SYSFS_CPU_ROOT)]
	pub sysfs_cpu_root: PathBuf,

	/// Enable debug logging on stderr
	#[arg(short = 'd', long = "debug")]
	pub debug: bool,
}

impl Cli {
	pub fn to_config(&self) -> ProfileConfig {
		ProfileConfig::new(&self.name, self.samples, Duration::from_millis(self.interval_ms))
			.with_proc_root(&self.proc_root)
			.with_sysfs_cpu_root(&self.sysfs_cpu_root)
	}
}

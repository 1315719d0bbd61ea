use std::fmt::Debug;
use std::{fs, io};

use thiserror::Error;

use crate::constants::RUNNING_STATE;
use crate::process::{Pid, ProcFs, Tid};
use crate::topology::{CpuId, CpuTopology};
use crate::util::stat::{StatParseError, ThreadStat, parse_thread_stat};

/// Why a single thread could not be sampled in one round
///
/// None of these are fatal; the observation is simply dropped.
#[derive(Error, Debug)]
pub enum SampleError {
	#[error("thread exited before its stat record was read")]
	Vanished,

	#[error("failed to read stat record: {0}")]
	Io(io::Error),

	#[error("malformed stat record: {0}")]
	Malformed(#[from] StatParseError),
}

impl From<io::Error> for SampleError {
	fn from(e: io::Error) -> Self {
		if e.kind() == io::ErrorKind::NotFound || e.raw_os_error() == Some(libc::ESRCH) {
			SampleError::Vanished
		} else {
			SampleError::Io(e)
		}
	}
}

/// Source of per-thread scheduling samples
pub trait ThreadReader: Debug {
	/// Reads the current state and last-run CPU of one thread
	fn read_sample(&self, pid: Pid, tid: Tid) -> Result<ThreadStat, SampleError>;
}

impl ThreadReader for ProcFs {
	fn read_sample(&self, pid: Pid, tid: Tid) -> Result<ThreadStat, SampleError> {
		let record = fs::read(self.thread_stat_path(pid, tid))?;
		Ok(parse_thread_stat(&record)?)
	}
}

/// Outcome of sampling one thread once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
	/// Running on a CPU that belongs to the topology
	Running(CpuId),

	/// Readable, but not in the running state
	NotRunning(char),

	/// Running on a CPU the topology does not know about
	UnknownCpu(i64),

	/// The stat record could not be read or parsed
	Unavailable,
}

impl Observation {
	/// Classifies a read result against the topology
	pub fn classify(result: Result<ThreadStat, SampleError>, topology: &CpuTopology) -> Self {
		match result {
			Ok(stat) if stat.state != RUNNING_STATE => Observation::NotRunning(stat.state),
			Ok(stat) => match topology.lookup(stat.processor) {
				Some(cpu_id) => Observation::Running(cpu_id),
				None => Observation::UnknownCpu(stat.processor),
			},
			Err(_) => Observation::Unavailable,
		}
	}

	/// The CPU to credit, if this observation counts
	pub fn running_cpu(self) -> Option<CpuId> {
		match self {
			Observation::Running(cpu_id) => Some(cpu_id),
			_ => None,
		}
	}
}

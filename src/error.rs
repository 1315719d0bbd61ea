use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::process::Pid;

/// Conditions that abort a profiling run before any sampling begins
#[derive(Error, Debug)]
pub enum ProfileError {
	#[error("No process named '{name}' found.")]
	ProcessNotFound { name: String },

	#[error("No threads found for PID {pid}.")]
	NoThreads { pid: Pid },

	#[error("Failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

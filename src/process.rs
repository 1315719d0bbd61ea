use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::{debug, trace};

use crate::constants::PROC_ROOT;
use crate::error::ProfileError;

/// Process ID
pub type Pid = libc::pid_t;

/// Thread ID within a process
pub type Tid = libc::pid_t;

/// Handle on a procfs mount
#[derive(Debug, Clone)]
pub struct ProcFs {
	root: PathBuf,
}

impl Default for ProcFs {
	fn default() -> Self {
		Self::new(PROC_ROOT)
	}
}

impl ProcFs {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn task_dir(&self, pid: Pid) -> PathBuf {
		self.root.join(pid.to_string()).join("task")
	}

	pub fn thread_stat_path(&self, pid: Pid, tid: Tid) -> PathBuf {
		self.task_dir(pid).join(tid.to_string()).join("stat")
	}

	/// Finds the first process whose `comm` equals `name` exactly
	///
	/// The process table is walked in directory order, so when several
	/// processes share a name the one returned is unspecified.
	pub fn find_pid_by_name(&self, name: &str) -> Result<Pid, ProfileError> {
		let entries = fs::read_dir(&self.root).map_err(|source| ProfileError::Io {
			path: self.root.clone(),
			source,
		})?;

		for entry in entries.filter_map(Result::ok) {
			let Some(pid) = entry.file_name().to_str().and_then(parse_numeric_name) else {
				continue;
			};

			// Processes may exit while the table is being walked
			let Ok(comm) = fs::read_to_string(entry.path().join("comm")) else {
				continue;
			};

			if comm.trim() == name {
				debug!(pid, name, "resolved target process");
				return Ok(pid);
			}
		}

		Err(ProfileError::ProcessNotFound { name: name.to_string() })
	}

	/// Lists the thread IDs currently present under `/proc/<pid>/task`, ascending
	pub fn list_threads(&self, pid: Pid) -> Result<Vec<Tid>, ProfileError> {
		let task_dir = self.task_dir(pid);
		let entries = match fs::read_dir(&task_dir) {
			Ok(entries) => entries,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				trace!(pid, "task directory vanished before threads were listed");
				return Err(ProfileError::NoThreads { pid });
			},
			Err(source) => return Err(ProfileError::Io { path: task_dir, source }),
		};

		let mut tids: Vec<Tid> = entries
			.filter_map(Result::ok)
			.filter_map(|entry| entry.file_name().to_str().and_then(parse_numeric_name))
			.collect();

		if tids.is_empty() {
			return Err(ProfileError::NoThreads { pid });
		}

		tids.sort_unstable();
		Ok(tids)
	}
}

fn parse_numeric_name(name: &str) -> Option<libc::pid_t> {
	if name.is_empty() || !name.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}
	name.parse().ok()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::path::Path;
	use tempfile::TempDir;

	fn add_process(root: &Path, pid: Pid, comm: &str, tids: &[Tid]) {
		let proc_dir = root.join(pid.to_string());
		fs::create_dir_all(proc_dir.join("task")).unwrap();
		fs::write(proc_dir.join("comm"), format!("{comm}\n")).unwrap();
		for tid in tids {
			fs::create_dir_all(proc_dir.join("task").join(tid.to_string())).unwrap();
		}
	}

	#[test]
	fn test_find_exact_name() {
		let dir = TempDir::new().unwrap();
		add_process(dir.path(), 100, "polluter-helper", &[100]);
		add_process(dir.path(), 200, "polluter", &[200]);
		fs::create_dir_all(dir.path().join("self")).unwrap();
		fs::write(dir.path().join("uptime"), "1.0 1.0\n").unwrap();

		let procfs = ProcFs::new(dir.path());
		assert_eq!(procfs.find_pid_by_name("polluter").unwrap(), 200);
	}

	#[test]
	fn test_prefix_does_not_match() {
		let dir = TempDir::new().unwrap();
		add_process(dir.path(), 100, "polluter-helper", &[100]);

		let procfs = ProcFs::new(dir.path());
		assert!(matches!(
			procfs.find_pid_by_name("polluter"),
			Err(ProfileError::ProcessNotFound { name }) if name == "polluter"
		));
	}

	#[test]
	fn test_process_without_comm_is_skipped() {
		let dir = TempDir::new().unwrap();
		fs::create_dir_all(dir.path().join("42")).unwrap();
		add_process(dir.path(), 43, "target", &[43]);

		let procfs = ProcFs::new(dir.path());
		assert_eq!(procfs.find_pid_by_name("target").unwrap(), 43);
	}

	#[test]
	fn test_unreadable_proc_root() {
		let dir = TempDir::new().unwrap();
		let procfs = ProcFs::new(dir.path().join("missing"));
		assert!(matches!(procfs.find_pid_by_name("x"), Err(ProfileError::Io { .. })));
	}

	#[test]
	fn test_list_threads_sorted() {
		let dir = TempDir::new().unwrap();
		add_process(dir.path(), 7, "app", &[9, 7, 12, 8]);

		let procfs = ProcFs::new(dir.path());
		assert_eq!(procfs.list_threads(7).unwrap(), vec![7, 8, 9, 12]);
	}

	#[test]
	fn test_list_threads_empty_is_fatal() {
		let dir = TempDir::new().unwrap();
		add_process(dir.path(), 7, "app", &[]);

		let procfs = ProcFs::new(dir.path());
		assert!(matches!(procfs.list_threads(7), Err(ProfileError::NoThreads { pid: 7 })));
	}

	#[test]
	fn test_list_threads_vanished_process() {
		let dir = TempDir::new().unwrap();
		let procfs = ProcFs::new(dir.path());
		assert!(matches!(procfs.list_threads(55), Err(ProfileError::NoThreads { pid: 55 })));
	}

	#[test]
	fn test_thread_stat_path() {
		let procfs = ProcFs::default();
		assert_eq!(procfs.thread_stat_path(10, 11), PathBuf::from("/proc/10/task/11/stat"));
	}
}

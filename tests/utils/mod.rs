//! Synthetic procfs and sysfs trees for end-to-end tests

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub struct FakeHost {
	dir: TempDir,
}

impl FakeHost {
	pub fn new() -> Self {
		let host = Self { dir: TempDir::new().unwrap() };
		fs::create_dir_all(host.proc_root()).unwrap();
		fs::create_dir_all(host.cpu_root()).unwrap();
		host
	}

	pub fn proc_root(&self) -> PathBuf {
		self.dir.path().join("proc")
	}

	pub fn cpu_root(&self) -> PathBuf {
		self.dir.path().join("cpu")
	}

	pub fn add_cpu(&self, cpu: usize, socket: i32, core: i32) -> &Self {
		let topo = self.cpu_root().join(format!("cpu{cpu}")).join("topology");
		fs::create_dir_all(&topo).unwrap();
		fs::write(topo.join("physical_package_id"), format!("{socket}\n")).unwrap();
		fs::write(topo.join("core_id"), format!("{core}\n")).unwrap();
		self
	}

	pub fn add_process(&self, pid: i32, comm: &str) -> &Self {
		let proc_dir = self.proc_root().join(pid.to_string());
		fs::create_dir_all(proc_dir.join("task")).unwrap();
		fs::write(proc_dir.join("comm"), format!("{comm}\n")).unwrap();
		self
	}

	/// Adds a thread whose stat record reports `state` on `processor`
	pub fn add_thread(&self, pid: i32, tid: i32, comm: &str, state: char, processor: i64) -> &Self {
		let task = self.proc_root().join(pid.to_string()).join("task").join(tid.to_string());
		fs::create_dir_all(&task).unwrap();
		fs::write(task.join("stat"), stat_record(tid, comm, state, processor)).unwrap();
		self
	}

	/// Adds a thread directory with no stat record, as if it exited mid-run
	pub fn add_vanished_thread(&self, pid: i32, tid: i32) -> &Self {
		let task = self.proc_root().join(pid.to_string()).join("task").join(tid.to_string());
		fs::create_dir_all(task).unwrap();
		self
	}
}

pub fn stat_record(tid: i32, comm: &str, state: char, processor: i64) -> String {
	let mut fields = vec!["0".to_string(); 50];
	fields[0] = state.to_string();
	fields[36] = processor.to_string();
	format!("{tid} ({comm}) {}\n", fields.join(" "))
}

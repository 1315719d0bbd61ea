// Kernel-exposed locations
pub const PROC_ROOT: &str = "/proc";
pub const SYSFS_CPU_ROOT: &str = "/sys/devices/system/cpu";

// Per-CPU topology attributes, relative to cpuN/
pub const PACKAGE_ID_ATTR: &str = "topology/physical_package_id";
pub const CORE_ID_ATTR: &str = "topology/core_id";

// /proc/<pid>/task/<tid>/stat layout after the closing ')' of the comm field
pub const STAT_STATE_FIELD: usize = 0;
pub const STAT_PROCESSOR_FIELD: usize = 36;

/// Scheduling state code of a thread that is currently running
pub const RUNNING_STATE: char = 'R';

// Socket used when physical_package_id is unavailable
pub const DEFAULT_SOCKET_ID: i32 = 0;

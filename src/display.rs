use std::io::{self, Write};

use crate::aggregate::Distribution;
use crate::report::{ProfileReport, TopologySummary};

/// Writes the human-readable report
pub fn write_report<W: Write>(out: &mut W, report: &ProfileReport) -> io::Result<()> {
	writeln!(out, "Process: {} (PID {}), Threads: {}", report.name, report.pid, report.thread_count)?;
	writeln!(
		out,
		"Samples: {} × {} = {} total checks",
		report.passes,
		report.thread_count,
		report.planned_checks
	)?;
	writeln!(out, "Running state checks: {}", report.running_checks)?;
	writeln!(out)?;

	match &report.distribution {
		Some(distribution) => write_distribution(out, distribution, &report.summary),
		None => writeln!(out, "No threads found in running state during sampling."),
	}
}

fn write_distribution<W: Write>(out: &mut W, distribution: &Distribution, summary: &TopologySummary) -> io::Result<()> {
	writeln!(out, "CPU  % Time")?;
	for share in &distribution.cpus {
		writeln!(out, "{:>3}  {:6.2}%", share.cpu_id, share.percent)?;
	}
	writeln!(out)?;

	writeln!(out, "Sockets: {}", summary.sockets)?;
	writeln!(out, "Socket  Cores  % Time")?;
	for share in &distribution.sockets {
		writeln!(out, "{:>6}  {:>5}  {:6.2}%", share.socket_id, share.cores, share.percent)?;
	}

	if let Some(cores_per_socket) = summary.uniform_cores_per_socket {
		writeln!(out)?;
		writeln!(
			out,
			"Total cores: {}, Sockets: {}, Cores per socket: {}",
			summary.total_cores, summary.sockets, cores_per_socket
		)?;
	}

	Ok(())
}

/// Renders the report to a string
pub fn render_report(report: &ProfileReport) -> io::Result<String> {
	let mut buf = Vec::new();
	write_report(&mut buf, report)?;
	Ok(String::from_utf8_lossy(&buf).into_owned())
}

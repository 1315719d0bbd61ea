use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use thread_cpu_profile::cli::Cli;
use thread_cpu_profile::display::write_report;
use thread_cpu_profile::profile_process;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; RUST_LOG overrides the default level
fn init_tracing(debug: bool) {
	let default_level = if debug { "debug" } else { "warn" };
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.init();
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_tracing(cli.debug);

	let report = profile_process(&cli.to_config())?;

	let mut stdout = io::stdout().lock();
	write_report(&mut stdout, &report)?;
	stdout.flush()?;

	Ok(())
}

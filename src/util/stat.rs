//! Parsing of `/proc/<pid>/task/<tid>/stat` records.
//!
//! The second field is the thread's command name wrapped in parentheses. The
//! name is chosen by the program and may itself hold spaces and parentheses,
//! so the record is split at the *last* `)` and only the remainder is
//! tokenized on whitespace.

use thiserror::Error;

use crate::constants::{STAT_PROCESSOR_FIELD, STAT_STATE_FIELD};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatParseError {
	#[error("no closing ')' after the command name")]
	MissingComm,

	#[error("record ends before field {0}")]
	MissingField(usize),

	#[error("invalid state field {0:?}")]
	InvalidState(String),

	#[error("invalid processor field {0:?}")]
	InvalidProcessor(String),

	#[error("fields after the command name are not UTF-8")]
	NonUtf8Fields,
}

/// Scheduling fields of one thread's stat record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadStat {
	/// One-letter scheduling state (`R`, `S`, `D`, ...)
	pub state: char,

	/// CPU the thread last ran on
	pub processor: i64,
}

/// Returns the part of a raw stat record after the last `)`
///
/// Only that tail has to be valid UTF-8; the command name before it is
/// arbitrary bytes and may be cut mid-character by the kernel.
pub fn fields_after_comm(record: &[u8]) -> Result<&str, StatParseError> {
	let close = record.iter().rposition(|&b| b == b')').ok_or(StatParseError::MissingComm)?;
	std::str::from_utf8(&record[close + 1..]).map_err(|_| StatParseError::NonUtf8Fields)
}

/// Parses the state and last-run processor out of a stat record
pub fn parse_thread_stat(record: impl AsRef<[u8]>) -> Result<ThreadStat, StatParseError> {
	parse_stat_fields(fields_after_comm(record.as_ref())?)
}

/// Parses the whitespace-separated fields that follow the command name
pub fn parse_stat_fields(tail: &str) -> Result<ThreadStat, StatParseError> {
	let fields: Vec<&str> = tail.split_whitespace().collect();

	let state_field = *fields
		.get(STAT_STATE_FIELD)
		.ok_or(StatParseError::MissingField(STAT_STATE_FIELD))?;
	let mut chars = state_field.chars();
	let state = match (chars.next(), chars.next()) {
		(Some(state), None) => state,
		_ => return Err(StatParseError::InvalidState(state_field.to_string())),
	};

	let processor_field = *fields
		.get(STAT_PROCESSOR_FIELD)
		.ok_or(StatParseError::MissingField(STAT_PROCESSOR_FIELD))?;
	let processor = processor_field
		.parse()
		.map_err(|_| StatParseError::InvalidProcessor(processor_field.to_string()))?;

	Ok(ThreadStat { state, processor })
}

#[cfg(test)]
pub(crate) fn synthetic_record(tid: i32, comm: &str, state: char, processor: i64) -> String {
	// 50 fields follow the comm, as on current kernels
	let tail: Vec<String> = (1..50)
		.map(|i| if i == STAT_PROCESSOR_FIELD { processor.to_string() } else { "0".to_string() })
		.collect();
	format!("{tid} ({comm}) {state} {}\n", tail.join(" "))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_real_kernel_record() {
		let record = "1234 (bash) S 1200 1234 1234 34816 1250 4194304 1421 6390 0 3 2 1 9 5 20 0 1 0 \
		              52093 9060352 1323 18446744073709551615 94412 94413 140732 0 0 0 65536 3686404 \
		              1266761467 0 0 0 17 3 0 0 0 0 0 94414 94415 94416 140733 140734 140735 140736 0\n";

		assert_eq!(parse_thread_stat(record).unwrap(), ThreadStat { state: 'S', processor: 3 });
	}

	#[test]
	fn test_comm_with_spaces_and_parens() {
		let record = synthetic_record(123, "my proc (v2)", 'R', 7);

		assert_eq!(parse_thread_stat(&record).unwrap(), ThreadStat { state: 'R', processor: 7 });
	}

	#[test]
	fn test_comm_with_unbalanced_close_paren() {
		let record = synthetic_record(5, ") R 1 2 3 )", 'S', 2);
		assert_eq!(parse_thread_stat(&record).unwrap(), ThreadStat { state: 'S', processor: 2 });
	}

	#[test]
	fn test_first_paren_split_would_be_wrong() {
		let record = synthetic_record(9, "a) X (b", 'D', 11);
		let fields: Vec<&str> = fields_after_comm(record.as_bytes()).unwrap().split_whitespace().collect();

		assert_eq!(fields[0], "D");
		assert_eq!(fields[STAT_PROCESSOR_FIELD], "11");
	}

	#[test]
	fn test_comm_cut_mid_character() {
		let mut record = b"11 (worker-\xe2\x82) ".to_vec();
		record.extend_from_slice(synthetic_record(11, "x", 'R', 3).split_once(") ").unwrap().1.as_bytes());

		assert_eq!(parse_thread_stat(&record).unwrap(), ThreadStat { state: 'R', processor: 3 });
	}

	#[test]
	fn test_non_utf8_after_comm() {
		assert_eq!(parse_thread_stat(b"1 (x) R \xff 0"), Err(StatParseError::NonUtf8Fields));
	}

	#[test]
	fn test_missing_close_paren() {
		assert_eq!(parse_thread_stat("1 (trunc R 0 0"), Err(StatParseError::MissingComm));
	}

	#[test]
	fn test_truncated_record() {
		assert_eq!(
			parse_thread_stat("1 (x) R 0 0 0"),
			Err(StatParseError::MissingField(STAT_PROCESSOR_FIELD))
		);
		assert_eq!(parse_thread_stat("1 (x)"), Err(StatParseError::MissingField(STAT_STATE_FIELD)));
	}

	#[test]
	fn test_non_numeric_processor() {
		let mut fields: Vec<String> = (0..50).map(|_| "0".to_string()).collect();
		fields[STAT_STATE_FIELD] = "R".to_string();
		fields[STAT_PROCESSOR_FIELD] = "cpu".to_string();
		let record = format!("1 (x) {}", fields.join(" "));

		assert_eq!(parse_thread_stat(&record), Err(StatParseError::InvalidProcessor("cpu".to_string())));
	}

	#[test]
	fn test_negative_processor() {
		let record = synthetic_record(1, "x", 'R', -1);
		assert_eq!(parse_thread_stat(&record).unwrap().processor, -1);
	}

	#[test]
	fn test_multi_char_state() {
		let record = synthetic_record(1, "x", 'R', 0).replacen(") R ", ") RS ", 1);
		assert_eq!(parse_thread_stat(&record), Err(StatParseError::InvalidState("RS".to_string())));
	}
}

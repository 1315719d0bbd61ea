pub mod stat;

/// Share of `count` in `total`, as a percentage
///
/// Callers must check `total` is non-zero.
pub fn percentage(count: u64, total: u64) -> f64 {
	count as f64 / total as f64 * 100.0
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_percentage() {
		assert_eq!(percentage(1, 4), 25.0);
		assert_eq!(percentage(0, 9), 0.0);
		assert_eq!(percentage(3, 3), 100.0);
	}
}

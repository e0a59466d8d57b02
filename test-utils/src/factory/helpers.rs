//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
///
/// Starts well above zero so generated snowflakes never collide with the small
/// literal ids tests use for channels and roles.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(100_000);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

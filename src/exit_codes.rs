//! Exit code constants for the ccr CLI.
//!
//! - 0: Success (or the child reported no exit code)
//! - 1: Failure (executable missing, spawn failure, bad config)
//!
//! When a child process runs to completion its own exit code is used instead.

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// Any launcher-side failure.
pub const FAILURE: i32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        assert_ne!(SUCCESS, FAILURE);
    }

    #[test]
    fn exit_codes_match_documented_values() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(FAILURE, 1);
    }
}

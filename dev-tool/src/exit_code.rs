//! Exit codes of the dev-tool commands.

/// The command completed without any problems.
pub const NO_ERROR: i32 = 0;

/// The command failed and did not produce any output.
pub const FATAL_ERROR: i32 = 1;

/// The command completed but some checks did not pass.
pub const NON_FATAL_ERROR: i32 = 2;

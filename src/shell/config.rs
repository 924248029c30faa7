//! Configuration constants for the shell channel

/// End-of-output sentinel echoed after every command
///
/// The channel frames command output by echoing this line and reading until
/// it appears. The string is reserved: a command whose own output contains
/// it will be framed short. Operators must treat it as off limits.
pub const END_OF_OUTPUT_SENTINEL: &str = "AUTOSHELL_END_251223";

/// Screen-clear directive sent ahead of every command
pub const CLEAR_DIRECTIVE: &str = "clear";

/// Shell executables probed, in order, when none is configured
pub const SHELL_CANDIDATES: &[&str] = &["bash", "sh"];

/// Default token cap applied to one command's output before it is folded
/// back into the session
pub const DEFAULT_OUTPUT_TOKEN_CAP: usize = 1000;

//! Global quiet mode state for CLI.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set once at startup from the parsed flags.
static QUIET: AtomicBool = AtomicBool::new(false);

/// Enable or disable quiet mode (suppresses warnings and decorations,
/// leaving only the password on stdout).
pub fn set(quiet: bool) {
    QUIET.store(quiet, Ordering::SeqCst);
}

/// Check if quiet mode is enabled.
pub fn enabled() -> bool {
    QUIET.load(Ordering::Relaxed)
}

/// Check if stdin is a tty (interactive).
pub fn is_interactive() -> bool {
    unsafe { libc::isatty(0) == 1 }
}

/// True when interactive prompts should be skipped: quiet mode is on, or
/// stdin is not a tty.
pub fn skip_prompt() -> bool {
    enabled() || !is_interactive()
}

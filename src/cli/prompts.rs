//! Centralized warning and prompt messages for CLI output.

use std::io::Write;

use super::quiet;

// ANSI color codes
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

/// Print a warning message to stderr (yellow) - suppressed in quiet mode
pub fn warn(msg: &str) {
    if !quiet::enabled() {
        eprintln!("{YELLOW}{msg}{RESET}");
    }
}

/// Print an error message to stderr (red) - NOT suppressed (errors are always shown)
pub fn error(msg: &str) {
    eprintln!("{RED}{msg}{RESET}");
}

/// Usage reminder printed after argument errors.
pub fn usage_hint() {
    eprintln!("Usage: dpass [OPTIONS] <SERVICE>  (--help for details)");
}

/// Confirmation after saving defaults - suppressed in quiet mode
pub fn settings_saved() {
    if !quiet::enabled() {
        println!("Defaults saved.");
    }
}

/// Print clipboard copied confirmation - suppressed in quiet mode
pub fn clipboard_copied() {
    if !quiet::enabled() {
        println!("*** -COPIED TO CLIPBOARD- ***");
    }
}

/// Print clipboard error - NOT suppressed (errors are always shown)
pub fn clipboard_error(err: &str) {
    eprintln!("Clipboard error: {err}");
}

/// Prompt user when clipboard is unavailable. Returns true to fall back to
/// terminal output, false to abort. In quiet/non-interactive mode, silently
/// falls back to terminal.
pub fn clipboard_fallback_prompt() -> bool {
    if quiet::skip_prompt() {
        return true;
    }

    eprint!("Clipboard unavailable. Print to terminal instead? [Y/n]: ");
    let _ = std::io::stderr().flush();

    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_ok() {
        let input = input.trim().to_lowercase();
        if input.is_empty() || input == "y" || input == "yes" {
            eprintln!();
            return true;
        }
    } else {
        return true;
    }

    eprintln!("\nAborted.");
    false
}

/// Opt-in salt construction diagnostics on stderr. Reveals the lowercased
/// secret prefix, so this only ever runs behind --show-salt.
pub fn salt_diagnostics(service: &str, prefix: &str, salt_hex: &str) {
    eprintln!("[DEBUG] Service: {service}");
    eprintln!("[DEBUG] Master Password (first 8 chars, lowercased): {prefix}");
    eprintln!("[DEBUG] Salt (hex): {salt_hex}");
}

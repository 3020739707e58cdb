//! Master password entry.
//!
//! Interactive reads go through crossterm raw mode so keystrokes are never
//! echoed; piped stdin falls back to a plain line read. The [`SecretPrompt`]
//! trait keeps the confirmation flow testable without a terminal.

use std::io::{self, BufRead, Write};

use crossterm::event::{Event, KeyCode, KeyModifiers, read};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use thiserror::Error;
use zeroize::Zeroizing;

use crate::cli::prompts;

use super::reset_terminal;

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("master password must not be empty")]
    Empty,
    #[error("master passwords do not match")]
    Mismatch,
    #[error("failed to read master password: {0}")]
    Io(#[from] io::Error),
}

/// Source of the master password.
pub trait SecretPrompt {
    /// Read one entry. `label` is shown on stderr.
    fn read_secret(&mut self, label: &str) -> io::Result<Zeroizing<String>>;

    /// Interactive sources get a confirmation pass, piped ones do not.
    fn is_interactive(&self) -> bool;
}

/// Read the master password from `source`, rejecting empty entries and, on
/// interactive sources, requiring a matching confirmation entry.
pub fn read_master_secret(
    source: &mut dyn SecretPrompt,
) -> Result<Zeroizing<String>, SecretError> {
    let secret = source.read_secret("Enter your Master Password: ")?;
    if secret.is_empty() {
        return Err(SecretError::Empty);
    }

    if source.is_interactive() {
        let confirmation = source.read_secret("Confirm your Master Password: ")?;
        if *secret != *confirmation {
            return Err(SecretError::Mismatch);
        }
    }

    Ok(secret)
}

/// Guard that ensures raw mode is disabled when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// No-echo prompt on the controlling terminal.
///
/// Enter submits, Backspace deletes, Ctrl+U clears the entry, Ctrl+C
/// restores the terminal and exits 130.
pub struct TtySecretPrompt;

impl SecretPrompt for TtySecretPrompt {
    fn read_secret(&mut self, label: &str) -> io::Result<Zeroizing<String>> {
        eprint!("{label}");
        let _ = io::stderr().flush();

        let guard = match RawModeGuard::new() {
            Ok(guard) => guard,
            Err(_) => {
                prompts::warn("Warning: raw terminal input unavailable, input will be echoed");
                return read_line_secret();
            }
        };

        let mut secret = Zeroizing::new(String::new());
        loop {
            if let Event::Key(key_event) = read()? {
                match key_event.code {
                    KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                        // process::exit skips destructors, so restore the
                        // terminal by hand first.
                        reset_terminal();
                        eprintln!();
                        std::process::exit(130);
                    }
                    KeyCode::Char('u') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                        secret.clear();
                    }
                    KeyCode::Enter => break,
                    KeyCode::Backspace => {
                        secret.pop();
                    }
                    KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::CONTROL) => {
                        secret.push(c);
                    }
                    _ => {}
                }
            }
        }

        // Leave raw mode before touching stderr again.
        drop(guard);
        eprintln!();
        Ok(secret)
    }

    fn is_interactive(&self) -> bool {
        true
    }
}

/// Line-oriented read for piped or redirected stdin. Nothing to suppress,
/// nothing to confirm.
pub struct StdinSecretPrompt;

impl SecretPrompt for StdinSecretPrompt {
    fn read_secret(&mut self, label: &str) -> io::Result<Zeroizing<String>> {
        eprint!("{label}");
        let _ = io::stderr().flush();
        read_line_secret()
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// Read one line from stdin, stripping the trailing newline but nothing
/// else (passwords may contain interior and leading spaces).
fn read_line_secret() -> io::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    io::stdin().lock().read_line(&mut line)?;
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(line)
}

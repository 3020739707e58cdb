//! Shared terminal utilities.
//!
//! Box drawing, entropy readout, and no-echo master password entry.

mod output;
mod secret;

pub use output::*;
pub use secret::*;

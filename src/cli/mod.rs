mod context;
mod flags;
mod help;
mod parse;
pub mod prompts;
pub mod quiet;

pub use context::Context;
pub use flags::CliFlags;
pub use parse::{ParseError, parse};

use std::process::ExitCode;

/// Parse arguments and run one derivation end to end.
pub fn run(args: Vec<String>) -> ExitCode {
    let mut ctx = match Context::new(args) {
        Ok(ctx) => ctx,
        Err(e) => {
            prompts::error(&e.to_string());
            prompts::usage_hint();
            return ExitCode::from(2);
        }
    };
    ctx.run()
}

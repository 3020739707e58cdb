use std::env;
use std::process::ExitCode;

mod cli;
mod clipboard;
mod derive;
mod exits;
mod settings;
mod terminal;

fn main() -> ExitCode {
    exits::reset_terminal();
    exits::install_handlers();
    // Keep the master password out of core dumps and ptrace.
    unsafe { libc::prctl(libc::PR_SET_DUMPABLE, 0) };

    let args: Vec<String> = env::args().collect();
    cli::run(args)
}

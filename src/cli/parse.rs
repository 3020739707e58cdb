use thiserror::Error;

use super::CliFlags;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("missing value for {0}")]
    MissingValue(&'static str),
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArg(String),
}

/// Parse `args` as handed over by `env::args` (args[0] is the binary name).
///
/// Exactly one positional argument (the service) is accepted, anywhere
/// among the flags. A second positional is an error rather than a silent
/// overwrite.
pub fn parse(args: &[String]) -> Result<CliFlags, ParseError> {
    let mut flags = CliFlags::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => flags.help = true,
            "-v" | "--version" => flags.version = true,
            "-q" | "--quiet" => flags.quiet = true,
            "-c" | "--copy" => flags.copy = true,
            "-nd" | "--no-digit" => flags.no_digit = true,
            "-ns" | "--no-symbol" => flags.no_symbol = true,
            "-na" | "--no-ambiguous" => flags.no_ambiguous = true,
            "--show-salt" => flags.show_salt = true,
            "--save" => flags.save = true,
            "-l" | "--length" => {
                i += 1;
                if i >= args.len() {
                    return Err(ParseError::MissingValue("--length"));
                }
                flags.length = Some(
                    args[i]
                        .parse()
                        .map_err(|_| ParseError::InvalidNumber(args[i].clone()))?,
                );
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(ParseError::UnknownArg(arg.to_string()));
            }
            arg => {
                if flags.service.is_some() {
                    return Err(ParseError::UnexpectedArg(arg.to_string()));
                }
                flags.service = Some(arg.to_string());
            }
        }
        i += 1;
    }

    Ok(flags)
}

/// Parsed command-line flags. `false`/`None` means "not given", so the
/// persisted defaults can fill the gaps.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub quiet: bool,
    pub copy: bool,
    pub no_digit: bool,
    pub no_symbol: bool,
    pub no_ambiguous: bool,
    pub show_salt: bool,
    pub save: bool,
    pub length: Option<usize>,
    pub service: Option<String>,
}

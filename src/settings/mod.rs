//! Persisted default flags.

mod file;

use crate::derive::DeriveConfig;

/// User defaults applied before explicit flags. One line on disk at
/// `~/.config/dpass/settings`; never holds secrets or derived passwords.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub length: usize,
    pub digits: bool,
    pub symbols: bool,
    pub exclude_ambiguous: bool,
    pub copy: bool,
}

impl Settings {
    pub fn load_from_file() -> Result<Self, std::io::Error> {
        let mut settings = Settings::default();
        file::load(&mut settings)?;
        Ok(settings)
    }

    pub fn save_to_file(&self) -> Result<(), std::io::Error> {
        file::save(self)
    }

    /// Derivation parameters for the current defaults.
    pub fn derive_config(&self) -> DeriveConfig {
        DeriveConfig {
            length: self.length,
            digits: self.digits,
            symbols: self.symbols,
            exclude_ambiguous: self.exclude_ambiguous,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            length: 16,
            digits: true,
            symbols: true,
            exclude_ambiguous: false,
            copy: false,
        }
    }
}

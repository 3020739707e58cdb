//! Deterministic password derivation.
//!
//! Same (service, master password, config) in, same password out, every
//! time. Nothing is stored; the derivation is a pure function of its
//! inputs. `alphabet` builds the ordered character set, `engine` turns
//! stretched key material into characters.

pub mod alphabet;
mod engine;

pub use engine::{build_salt, derive_password, secret_prefix};

use thiserror::Error;

/// Minimum accepted password length.
pub const MIN_LENGTH: usize = 8;

/// PBKDF2 iteration count. Changing it changes every derived password, so
/// it is a fixed constant rather than a tunable.
pub const KDF_ITERATIONS: u32 = 150_000;

/// Parameters for one derivation. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveConfig {
    /// Output length in characters.
    pub length: usize,
    /// Include digits 0-9 in the alphabet.
    pub digits: bool,
    /// Include ASCII punctuation in the alphabet.
    pub symbols: bool,
    /// Strip the easily confused characters (l 1 I 0 O).
    pub exclude_ambiguous: bool,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            length: 16,
            digits: true,
            symbols: true,
            exclude_ambiguous: false,
        }
    }
}

/// Everything that can go wrong during a derivation.
///
/// The first two variants are caller-input problems, `EmptyAlphabet` is a
/// configuration problem, and the last two indicate a broken internal
/// invariant. None of them are transient; retrying never helps.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    /// Requested length is below [`MIN_LENGTH`].
    #[error("password length must be at least 8 characters (got {requested})")]
    LengthTooShort { requested: usize },
    /// The master password was empty.
    #[error("master password must not be empty")]
    EmptySecret,
    /// Character-set flags left nothing to map onto. Unreachable while the
    /// letter base is unconditional; guarded anyway.
    #[error("character set configuration left an empty alphabet")]
    EmptyAlphabet,
    /// More characters requested than derived key bytes available.
    #[error("{requested} characters requested but only {available} bytes of key material are derived")]
    KeyMaterialExhausted { requested: usize, available: usize },
    /// The KDF backend rejected its parameters.
    #[error("key derivation backend failure")]
    Kdf,
}

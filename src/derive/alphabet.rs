//! Character set assembly for the byte-to-character mapping.

use super::{DeriveConfig, DeriveError};

const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";
/// The 32 ASCII punctuation characters in code-point order.
const SYMBOLS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
/// Characters easily misread for one another in many fonts.
const AMBIGUOUS: &str = "l1I0O";

/// Assemble the ordered alphabet for a config.
///
/// Order is fixed and load-bearing: lowercase a-z, uppercase A-Z, then
/// digits and symbols when enabled. Every byte of key material indexes into
/// this sequence, so reordering it would change every derived password.
/// Ambiguous-character exclusion removes every occurrence of `l 1 I 0 O`
/// (three of which are letters) while preserving the relative order of the
/// remainder.
///
/// The base letter set makes an empty result unreachable today; the guard
/// stays because the mapping loop divides by the alphabet length.
pub fn build(config: &DeriveConfig) -> Result<Vec<u8>, DeriveError> {
    let mut chars: Vec<u8> = Vec::with_capacity(94);

    chars.extend(LOWERCASE.bytes());
    chars.extend(UPPERCASE.bytes());

    if config.digits {
        chars.extend(DIGITS.bytes());
    }
    if config.symbols {
        chars.extend(SYMBOLS.bytes());
    }
    if config.exclude_ambiguous {
        chars.retain(|c| !AMBIGUOUS.as_bytes().contains(c));
    }

    if chars.is_empty() {
        return Err(DeriveError::EmptyAlphabet);
    }
    Ok(chars)
}

/// Effective alphabet size for a config (for the entropy readout).
pub fn size(config: &DeriveConfig) -> usize {
    build(config).map(|chars| chars.len()).unwrap_or(0)
}

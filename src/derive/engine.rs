//! Salt construction, key stretching, and the byte-to-character mapping.

use hmac::Hmac;
use sha2::Sha384;
use zeroize::Zeroize;

use super::{DeriveConfig, DeriveError, KDF_ITERATIONS, MIN_LENGTH, alphabet};

/// PRF for the key-stretching step. Fixed: swapping the hash would change
/// every derived password, so any future change needs explicit output
/// versioning.
type PbkdfSha384Hmac = Hmac<Sha384>;

/// Bytes of key material produced per derivation. Caps the password length.
const KEY_MATERIAL_LEN: usize = 512;
/// Master-secret characters feeding the salt.
const SECRET_PREFIX_CHARS: usize = 8;

/// Lowercased window of the master secret that feeds the salt.
///
/// The first 8 characters (fewer if the secret is shorter), lowercased with
/// the locale-independent Unicode mapping. The lowercasing is a deliberate,
/// documented weakening: secrets differing only in the case of this window
/// contribute identical salt bytes. The full secret still feeds the KDF
/// case-sensitively, so such secrets produce different passwords.
pub fn secret_prefix(master: &str) -> String {
    master
        .chars()
        .take(SECRET_PREFIX_CHARS)
        .collect::<String>()
        .to_lowercase()
}

/// Salt for a (service, master secret) pair: the service's UTF-8 bytes
/// followed by the lowercased secret prefix's UTF-8 bytes. Recomputed on
/// every call, never cached or persisted.
pub fn build_salt(service: &str, master: &str) -> Vec<u8> {
    let prefix = secret_prefix(master);
    let mut salt = Vec::with_capacity(service.len() + prefix.len());
    salt.extend_from_slice(service.as_bytes());
    salt.extend_from_slice(prefix.as_bytes());
    salt
}

/// Derive the password for a service from the master secret.
///
/// PBKDF2-HMAC-SHA384 stretches the master secret over the salt for 150 000
/// iterations into 512 bytes of key material; each byte then selects one
/// alphabet character via `byte % alphabet_len` until `config.length`
/// characters are emitted. Key material and salt are zeroized before
/// returning.
///
/// The modulo mapping is slightly biased toward low alphabet indices
/// whenever 256 is not a multiple of the alphabet length. That bias is an
/// accepted limitation, kept on purpose: rejection sampling would silently
/// change every previously derived password.
pub fn derive_password(
    service: &str,
    master: &str,
    config: &DeriveConfig,
) -> Result<String, DeriveError> {
    if config.length < MIN_LENGTH {
        return Err(DeriveError::LengthTooShort {
            requested: config.length,
        });
    }
    if master.is_empty() {
        return Err(DeriveError::EmptySecret);
    }
    if config.length > KEY_MATERIAL_LEN {
        return Err(DeriveError::KeyMaterialExhausted {
            requested: config.length,
            available: KEY_MATERIAL_LEN,
        });
    }

    let chars = alphabet::build(config)?;

    let mut salt = build_salt(service, master);
    let mut key = [0u8; KEY_MATERIAL_LEN];
    let stretched =
        pbkdf2::pbkdf2::<PbkdfSha384Hmac>(master.as_bytes(), &salt, KDF_ITERATIONS, &mut key);
    salt.zeroize();
    if stretched.is_err() {
        key.zeroize();
        return Err(DeriveError::Kdf);
    }

    let mut password = String::with_capacity(config.length);
    for &byte in key.iter().take(config.length) {
        password.push(chars[byte as usize % chars.len()] as char);
    }
    key.zeroize();

    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERVICE: &str = "github.com";
    const MASTER: &str = "Tr0ub4dor&3";

    fn config(length: usize) -> DeriveConfig {
        DeriveConfig {
            length,
            ..DeriveConfig::default()
        }
    }

    #[test]
    fn matches_recorded_vector() {
        let pass = derive_password(SERVICE, MASTER, &config(16)).unwrap();
        assert_eq!(pass, "kcSpNaI3Fa3o3_mh");
    }

    #[test]
    fn vector_with_ambiguous_excluded() {
        let cfg = DeriveConfig {
            exclude_ambiguous: true,
            ..config(16)
        };
        let pass = derive_password(SERVICE, MASTER, &cfg).unwrap();
        assert_eq!(pass, "qh2AQfQ8Sk)z$enh");
    }

    #[test]
    fn vector_digits_without_symbols() {
        let cfg = DeriveConfig {
            symbols: false,
            ..config(20)
        };
        let pass = derive_password("example.com", "correct horse battery staple", &cfg).unwrap();
        assert_eq!(pass, "ZWoXZ9jyOH1D9gxqB7Z6");
    }

    #[test]
    fn vector_letters_only_with_short_master() {
        // Masters shorter than 8 characters contribute their whole
        // lowercased text to the salt.
        let cfg = DeriveConfig {
            length: 12,
            digits: false,
            symbols: false,
            exclude_ambiguous: true,
        };
        let pass = derive_password("mail.example.org", "hunter2", &cfg).unwrap();
        assert_eq!(pass, "GwikByFXxJtK");
    }

    #[test]
    fn vector_three_char_master() {
        let pass = derive_password("svc", "abc", &config(16)).unwrap();
        assert_eq!(pass, "'{iyCGzfHSOy3Iwm");
    }

    #[test]
    fn vector_multibyte_master() {
        let pass = derive_password("db.internal", "PÄsswörter sind schwer", &config(24)).unwrap();
        assert_eq!(pass, "9JOjJa4mDj88UAU9Q3R<7Y(_");
    }

    #[test]
    fn shorter_length_yields_prefix_of_longer() {
        // Same key stream, earlier cutoff.
        let short = derive_password(SERVICE, MASTER, &config(8)).unwrap();
        let long = derive_password(SERVICE, MASTER, &config(16)).unwrap();
        assert_eq!(short, "kcSpNaI3");
        assert_eq!(short, long[..8]);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let first = derive_password(SERVICE, MASTER, &config(32)).unwrap();
        let second = derive_password(SERVICE, MASTER, &config(32)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn output_length_matches_config() {
        for length in [8, 16, 32, 64, 512] {
            let pass = derive_password(SERVICE, MASTER, &config(length)).unwrap();
            assert_eq!(pass.chars().count(), length);
        }
    }

    #[test]
    fn output_stays_within_alphabet() {
        let cfg = config(64);
        let chars = alphabet::build(&cfg).unwrap();
        let pass = derive_password(SERVICE, MASTER, &cfg).unwrap();
        for c in pass.bytes() {
            assert!(chars.contains(&c));
        }
    }

    #[test]
    fn excluded_characters_never_appear() {
        let cfg = DeriveConfig {
            exclude_ambiguous: true,
            ..config(64)
        };
        for service in ["github.com", "example.com", "mail.example.org"] {
            let pass = derive_password(service, MASTER, &cfg).unwrap();
            for c in ['l', '1', 'I', '0', 'O'] {
                assert!(!pass.contains(c), "{c:?} leaked into {pass:?}");
            }
        }
    }

    #[test]
    fn distinct_services_produce_distinct_passwords() {
        let services = ["github.com", "gitlab.com", "example.com"];
        let passwords: Vec<String> = services
            .iter()
            .map(|s| derive_password(s, MASTER, &config(16)).unwrap())
            .collect();
        assert_ne!(passwords[0], passwords[1]);
        assert_ne!(passwords[0], passwords[2]);
        assert_ne!(passwords[1], passwords[2]);
    }

    #[test]
    fn distinct_masters_produce_distinct_passwords() {
        let a = derive_password(SERVICE, "first master", &config(16)).unwrap();
        let b = derive_password(SERVICE, "second master", &config(16)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn salt_is_service_then_lowercased_prefix() {
        assert_eq!(build_salt(SERVICE, MASTER), b"github.comtr0ub4do".to_vec());
    }

    #[test]
    fn salt_of_short_master_uses_whole_secret() {
        assert_eq!(build_salt("svc", "abc"), b"svcabc".to_vec());
    }

    #[test]
    fn salt_prefix_ignores_case() {
        assert_eq!(
            build_salt("svc", "PassWord123"),
            build_salt("svc", "pASSWORD123")
        );
    }

    #[test]
    fn multibyte_salt_hex_matches_utf8_bytes() {
        let salt = build_salt("db.internal", "PÄsswörter sind schwer");
        assert_eq!(hex::encode(salt), "64622e696e7465726e616c70c3a4737377c3b67274");
    }

    #[test]
    fn case_flip_changes_password_but_not_salt() {
        // The prefix window is case-folded, the KDF input is not.
        let flipped = "tR0UB4DOR&3";
        assert_eq!(build_salt(SERVICE, MASTER), build_salt(SERVICE, flipped));
        let pass = derive_password(SERVICE, flipped, &config(16)).unwrap();
        assert_eq!(pass, "92#IL$YlfwoLvwvq");
        assert_ne!(pass, "kcSpNaI3Fa3o3_mh");
    }

    #[test]
    fn multibyte_prefix_counts_characters_not_bytes() {
        assert_eq!(secret_prefix("PÄsswörter sind schwer"), "pässwört");
    }

    #[test]
    fn length_below_minimum_is_rejected() {
        let err = derive_password(SERVICE, MASTER, &config(7)).unwrap_err();
        assert_eq!(err, DeriveError::LengthTooShort { requested: 7 });
    }

    #[test]
    fn empty_master_is_rejected() {
        let err = derive_password(SERVICE, "", &config(16)).unwrap_err();
        assert_eq!(err, DeriveError::EmptySecret);
    }

    #[test]
    fn length_beyond_key_material_is_rejected() {
        let err = derive_password(SERVICE, MASTER, &config(513)).unwrap_err();
        assert_eq!(
            err,
            DeriveError::KeyMaterialExhausted {
                requested: 513,
                available: 512
            }
        );
    }

    #[test]
    fn maximum_length_consumes_entire_key() {
        let pass = derive_password(SERVICE, MASTER, &config(512)).unwrap();
        assert_eq!(pass.len(), 512);
    }
}

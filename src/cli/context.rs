//! CLI context - bundles settings, flags, and clipboard state.

use std::process::ExitCode;

use zeroize::{Zeroize, Zeroizing};

use super::{CliFlags, ParseError, help, prompts, quiet};
use crate::clipboard::{ClipboardSink, SystemClipboard};
use crate::derive::{self, DeriveConfig, DeriveError};
use crate::settings::Settings;
use crate::terminal::{
    SecretPrompt, StdinSecretPrompt, TtySecretPrompt, box_bottom, box_line, box_top,
    calculate_entropy, entropy_strength, format_number, print_rule, read_master_secret,
};

/// Early exit - not an error, just done. Carries the process exit code.
pub struct Done(pub ExitCode);

/// Application context for a single derivation run.
pub struct Context {
    pub settings: Settings,
    pub flags: CliFlags,
    pub clipboard: Option<Box<dyn ClipboardSink>>,
}

impl Context {
    /// Parse the command line and load persisted defaults.
    pub fn new(args: Vec<String>) -> Result<Self, ParseError> {
        let flags = super::parse(&args)?;

        let settings = Settings::load_from_file().unwrap_or_else(|e| {
            prompts::warn(&format!("Failed to load settings: {}", e));
            Settings::default()
        });

        Ok(Self {
            settings,
            flags,
            clipboard: None,
        })
    }

    /// Run to completion. Returns the process exit code.
    pub fn run(&mut self) -> ExitCode {
        match self.execute() {
            Ok(()) => ExitCode::SUCCESS,
            Err(Done(code)) => code,
        }
    }

    fn execute(&mut self) -> Result<(), Done> {
        self.handle_info_flags()?;
        quiet::set(self.flags.quiet);
        self.apply_flags();
        self.handle_save()?;
        let service = self.require_service()?;
        self.validate_length()?;
        self.setup_clipboard()?;
        let master = self.read_secret()?;
        self.derive_and_output(&service, &master)
    }

    fn handle_info_flags(&self) -> Result<(), Done> {
        if self.flags.help {
            help::print_help();
            return Err(Done(ExitCode::SUCCESS));
        }
        if self.flags.version {
            println!("dpass {}", env!("CARGO_PKG_VERSION"));
            return Err(Done(ExitCode::SUCCESS));
        }
        Ok(())
    }

    /// Fold explicit flags over the persisted defaults.
    fn apply_flags(&mut self) {
        if let Some(length) = self.flags.length {
            self.settings.length = length;
        }
        if self.flags.no_digit {
            self.settings.digits = false;
        }
        if self.flags.no_symbol {
            self.settings.symbols = false;
        }
        if self.flags.no_ambiguous {
            self.settings.exclude_ambiguous = true;
        }
        if self.flags.copy {
            self.settings.copy = true;
        }
    }

    fn handle_save(&mut self) -> Result<(), Done> {
        if !self.flags.save {
            return Ok(());
        }
        // Never persist a length the next run would reject.
        self.validate_length()?;
        if let Err(e) = self.settings.save_to_file() {
            prompts::error(&format!("Failed to save settings: {}", e));
            return Err(Done(ExitCode::FAILURE));
        }
        prompts::settings_saved();
        if self.flags.service.is_none() {
            // Saving alone is a complete run.
            return Err(Done(ExitCode::SUCCESS));
        }
        Ok(())
    }

    fn require_service(&self) -> Result<String, Done> {
        match self.flags.service.clone() {
            Some(service) => Ok(service),
            None => {
                prompts::error("missing required <SERVICE> argument");
                prompts::usage_hint();
                Err(Done(ExitCode::from(2)))
            }
        }
    }

    /// Reject too-short lengths before prompting for the master password
    /// (and before `--save` persists them).
    fn validate_length(&self) -> Result<(), Done> {
        if self.settings.length < derive::MIN_LENGTH {
            let err = DeriveError::LengthTooShort {
                requested: self.settings.length,
            };
            prompts::error(&err.to_string());
            return Err(Done(ExitCode::FAILURE));
        }
        Ok(())
    }

    /// Resolve the clipboard provider when copying is requested.
    fn setup_clipboard(&mut self) -> Result<(), Done> {
        if !self.settings.copy {
            return Ok(());
        }
        match SystemClipboard::new() {
            Some(clipboard) => self.clipboard = Some(Box::new(clipboard)),
            None => {
                if prompts::clipboard_fallback_prompt() {
                    self.settings.copy = false;
                } else {
                    return Err(Done(ExitCode::SUCCESS));
                }
            }
        }
        Ok(())
    }

    fn read_secret(&self) -> Result<Zeroizing<String>, Done> {
        let mut source: Box<dyn SecretPrompt> = if quiet::is_interactive() {
            Box::new(TtySecretPrompt)
        } else {
            Box::new(StdinSecretPrompt)
        };
        read_master_secret(source.as_mut()).map_err(|e| {
            prompts::error(&e.to_string());
            Done(ExitCode::FAILURE)
        })
    }

    fn derive_and_output(&mut self, service: &str, master: &str) -> Result<(), Done> {
        if self.flags.show_salt {
            let mut salt = derive::build_salt(service, master);
            let mut prefix = derive::secret_prefix(master);
            prompts::salt_diagnostics(service, &prefix, &hex::encode(&salt));
            prefix.zeroize();
            salt.zeroize();
        }

        let config = self.settings.derive_config();
        let mut password = derive::derive_password(service, master, &config).map_err(|e| {
            prompts::error(&e.to_string());
            Done(ExitCode::FAILURE)
        })?;

        self.deliver(service, &password, &config);
        password.zeroize();
        Ok(())
    }

    /// Route the derived password to the clipboard or the terminal.
    fn deliver(&mut self, service: &str, password: &str, config: &DeriveConfig) {
        if let Some(sink) = self.clipboard.as_mut() {
            match sink.set_text(password) {
                Ok(()) => {
                    prompts::clipboard_copied();
                    return;
                }
                // Fall through to terminal output so the password is not
                // silently lost.
                Err(e) => prompts::clipboard_error(&e.to_string()),
            }
        }
        self.display(service, password, config);
    }

    fn display(&self, service: &str, password: &str, config: &DeriveConfig) {
        if quiet::enabled() {
            println!("{password}");
            return;
        }

        let alphabet_size = derive::alphabet::size(config);
        let entropy = calculate_entropy(config.length, alphabet_size);

        println!();
        box_top(service);
        box_line(&format!("Password: {}", password));
        box_line(&format!("Length: {} characters", config.length));
        print_rule();
        box_line(&format!(
            "Entropy: {:.1} bits ({})",
            entropy,
            entropy_strength(entropy)
        ));
        box_line(&format!(
            "Alphabet: {} chars • PBKDF2-HMAC-SHA384, {} rounds",
            alphabet_size,
            format_number(derive::KDF_ITERATIONS as usize)
        ));
        box_bottom();
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::error::Error;
    use std::rc::Rc;

    use tempfile::TempDir;

    struct RecordingSink {
        received: Rc<RefCell<Vec<String>>>,
    }

    impl ClipboardSink for RecordingSink {
        fn set_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            self.received.borrow_mut().push(text.to_owned());
            Ok(())
        }
    }

    struct FailingSink;

    impl ClipboardSink for FailingSink {
        fn set_text(&mut self, _text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
            Err("clipboard backend went away".into())
        }
    }

    fn context() -> Context {
        Context {
            settings: Settings::default(),
            flags: CliFlags::default(),
            clipboard: None,
        }
    }

    #[test]
    fn copy_delivers_exact_text_to_the_sink() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let mut ctx = context();
        ctx.clipboard = Some(Box::new(RecordingSink {
            received: Rc::clone(&received),
        }));

        let config = ctx.settings.derive_config();
        ctx.deliver("github.com", "kcSpNaI3Fa3o3_mh", &config);

        assert_eq!(*received.borrow(), ["kcSpNaI3Fa3o3_mh"]);
    }

    #[test]
    fn sink_errors_carry_their_message_through_the_trait_object() {
        let mut sink: Box<dyn ClipboardSink> = Box::new(FailingSink);
        let err = sink.set_text("kcSpNaI3Fa3o3_mh").unwrap_err();
        assert_eq!(err.to_string(), "clipboard backend went away");
    }

    #[test]
    fn save_rejects_an_unusable_length() {
        let dir = TempDir::new().unwrap();
        unsafe { std::env::set_var("HOME", dir.path()) };

        let mut ctx = context();
        ctx.flags.save = true;
        ctx.flags.length = Some(4);
        ctx.apply_flags();

        assert!(ctx.handle_save().is_err());
        assert!(!dir.path().join(".config/dpass/settings").exists());
    }

    #[test]
    fn flags_override_persisted_defaults() {
        let mut ctx = context();
        ctx.flags = CliFlags {
            length: Some(24),
            no_digit: true,
            no_ambiguous: true,
            ..CliFlags::default()
        };

        ctx.apply_flags();

        assert_eq!(ctx.settings.length, 24);
        assert!(!ctx.settings.digits);
        assert!(ctx.settings.symbols);
        assert!(ctx.settings.exclude_ambiguous);
        assert!(!ctx.settings.copy);
    }

    #[test]
    fn unset_flags_leave_defaults_alone() {
        let mut ctx = context();
        ctx.apply_flags();
        assert_eq!(ctx.settings, Settings::default());
    }

    #[test]
    fn short_length_fails_before_any_prompt() {
        let mut ctx = context();
        ctx.settings.length = 7;
        assert!(ctx.validate_length().is_err());

        ctx.settings.length = 8;
        assert!(ctx.validate_length().is_ok());
    }
}

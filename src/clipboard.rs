//! Clipboard delivery for derived passwords.

use std::error::Error;

use copypasta::{ClipboardContext, ClipboardProvider};
use zeroize::Zeroize;

/// Where the derived password goes when copying is in effect.
///
/// Injected interface so the CLI flow can be exercised without a real
/// clipboard (headless CI, tests).
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// System clipboard via the platform provider.
pub struct SystemClipboard {
    ctx: ClipboardContext,
}

impl SystemClipboard {
    /// `None` when no clipboard provider is reachable (headless session,
    /// missing display server).
    pub fn new() -> Option<Self> {
        ClipboardContext::new().ok().map(|ctx| Self { ctx })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.ctx.set_contents(text.to_owned())?;
        // Reading back forces lazy providers to latch the contents; wipe
        // the returned copy.
        if let Ok(mut echoed) = self.ctx.get_contents() {
            echoed.zeroize();
        }
        Ok(())
    }
}

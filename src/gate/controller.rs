use std::fmt;
use std::time::Duration;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::app::GateSettings;
use crate::cipher::CipherError;
use crate::views::ContactZone;

use super::token::MountToken;

/// Status label shown while an attempt is pending
pub const WORKING_LABEL: &str = "EXECUTING...";

/// Gate lifecycle on the profile view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatePhase {
    /// Trigger visible, nothing entered
    Locked,
    /// Masked key field visible
    AwaitingInput,
    /// Attempt scheduled, waiting on the cipher
    Decrypting,
    /// Contacts shown; no further transitions
    Revealed,
    /// Last attempt failed; the field takes another attempt
    Denied(CipherError),
}

/// Cosmetic delays between gate steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTimings {
    pub focus_delay: Duration,
    pub decrypt_delay: Duration,
    pub shake: Duration,
}

impl Default for GateTimings {
    fn default() -> Self {
        Self::from(&GateSettings::default())
    }
}

impl From<&GateSettings> for GateTimings {
    fn from(settings: &GateSettings) -> Self {
        Self {
            focus_delay: Duration::from_millis(settings.focus_delay_ms),
            decrypt_delay: Duration::from_millis(settings.decrypt_delay_ms),
            shake: Duration::from_millis(settings.shake_ms),
        }
    }
}

/// Work the shell must run later, then report back with the same token
pub enum GateEffect {
    /// Move keyboard focus into the key field
    FocusInput { token: MountToken, after: Duration },
    /// Try the passphrase against the cipher adapter
    RunAttempt {
        token: MountToken,
        passphrase: Zeroizing<String>,
        after: Duration,
    },
    /// Stop the denial shake
    ClearShake { token: MountToken, after: Duration },
}

impl fmt::Debug for GateEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FocusInput { token, after } => f
                .debug_struct("FocusInput")
                .field("token", token)
                .field("after", after)
                .finish(),
            Self::RunAttempt { token, after, .. } => f
                .debug_struct("RunAttempt")
                .field("token", token)
                .field("passphrase", &"<redacted>")
                .field("after", after)
                .finish(),
            Self::ClearShake { token, after } => f
                .debug_struct("ClearShake")
                .field("token", token)
                .field("after", after)
                .finish(),
        }
    }
}

impl GateEffect {
    pub fn token(&self) -> MountToken {
        match self {
            Self::FocusInput { token, .. }
            | Self::RunAttempt { token, .. }
            | Self::ClearShake { token, .. } => *token,
        }
    }

    pub fn delay(&self) -> Duration {
        match self {
            Self::FocusInput { after, .. }
            | Self::RunAttempt { after, .. }
            | Self::ClearShake { after, .. } => *after,
        }
    }
}

/// One mounted contact gate. Dropping it wipes the entered key.
pub struct GateController {
    token: MountToken,
    timings: GateTimings,
    phase: GatePhase,
    input: Zeroizing<String>,
    focused: bool,
    shaking: bool,
    status: Option<String>,
    contacts: Vec<String>,
    attempts: u32,
}

impl fmt::Debug for GateController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateController")
            .field("token", &self.token)
            .field("phase", &self.phase)
            .field("input_len", &self.input_len())
            .field("focused", &self.focused)
            .field("attempts", &self.attempts)
            .finish_non_exhaustive()
    }
}

impl GateController {
    pub fn mount(token: MountToken, timings: GateTimings) -> Self {
        debug!("Mounted {}", token);
        Self {
            token,
            timings,
            phase: GatePhase::Locked,
            input: Zeroizing::new(String::new()),
            focused: false,
            shaking: false,
            status: None,
            contacts: Vec::new(),
            attempts: 0,
        }
    }

    pub fn token(&self) -> MountToken {
        self.token
    }

    pub fn phase(&self) -> GatePhase {
        self.phase
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_shaking(&self) -> bool {
        self.shaking
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn input_len(&self) -> usize {
        self.input.chars().count()
    }

    /// Decrypted lines once revealed
    pub fn contacts(&self) -> &[String] {
        &self.contacts
    }

    /// Whether the key field is on screen and editable
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, GatePhase::AwaitingInput | GatePhase::Denied(_))
    }

    /// Reveal trigger: swap it for the key field, focus shortly after
    pub fn activate(&mut self) -> Option<GateEffect> {
        if self.phase != GatePhase::Locked {
            return None;
        }

        self.phase = GatePhase::AwaitingInput;
        Some(GateEffect::FocusInput {
            token: self.token,
            after: self.timings.focus_delay,
        })
    }

    /// Scheduled focus arrived; ignored for other mounts or once the field is gone
    pub fn focus(&mut self, token: MountToken) -> bool {
        if token != self.token || !self.accepts_input() {
            return false;
        }
        self.focused = true;
        true
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn push_char(&mut self, c: char) -> bool {
        if !self.accepts_input() || !self.focused || c.is_control() {
            return false;
        }
        self.input.push(c);
        true
    }

    pub fn pop_char(&mut self) -> bool {
        if !self.accepts_input() || !self.focused {
            return false;
        }
        self.input.pop().is_some()
    }

    /// Submit the current field value. The working label shows immediately.
    pub fn submit(&mut self) -> Option<GateEffect> {
        if !self.accepts_input() {
            return None;
        }

        self.phase = GatePhase::Decrypting;
        self.attempts += 1;
        self.status = Some(WORKING_LABEL.to_string());
        debug!("{} attempt #{} scheduled", self.token, self.attempts);

        Some(GateEffect::RunAttempt {
            token: self.token,
            passphrase: Zeroizing::new(self.input.as_str().to_string()),
            after: self.timings.decrypt_delay,
        })
    }

    /// Apply an attempt's outcome. Stale tokens and unexpected completions change nothing.
    pub fn complete(
        &mut self,
        token: MountToken,
        outcome: Result<String, CipherError>,
    ) -> Option<GateEffect> {
        if token != self.token {
            debug!("Dropping completion for {} on {}", token, self.token);
            return None;
        }
        if self.phase != GatePhase::Decrypting {
            return None;
        }

        self.input.clear();

        match outcome {
            Ok(plaintext) => {
                self.contacts = plaintext
                    .lines()
                    .filter(|line| !line.trim().is_empty())
                    .map(str::to_string)
                    .collect();
                self.phase = GatePhase::Revealed;
                self.status = None;
                self.focused = false;
                info!(
                    "{} revealed after {} attempt(s)",
                    self.token, self.attempts
                );
                None
            }
            Err(reason) => {
                self.phase = GatePhase::Denied(reason);
                self.status = Some(format!("ERROR: {}", reason));
                self.focused = true;
                self.shaking = true;
                info!("{} denied: {}", self.token, reason);
                Some(GateEffect::ClearShake {
                    token: self.token,
                    after: self.timings.shake,
                })
            }
        }
    }

    pub fn clear_shake(&mut self, token: MountToken) {
        if token == self.token {
            self.shaking = false;
        }
    }

    /// What the contact zone shows right now
    pub fn zone(&self) -> ContactZone<'_> {
        match self.phase {
            GatePhase::Locked => ContactZone::Locked,
            GatePhase::Revealed => ContactZone::Revealed(&self.contacts),
            GatePhase::AwaitingInput | GatePhase::Denied(_) | GatePhase::Decrypting => {
                ContactZone::Entry {
                    masked_len: self.input_len(),
                    focused: self.focused,
                    working: self.phase == GatePhase::Decrypting,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{encrypt, CipherAdapter, CryptoJsAes};
    use std::sync::Arc;

    fn gate() -> GateController {
        GateController::mount(MountToken::new(1), GateTimings::default())
    }

    fn type_str(gate: &mut GateController, text: &str) {
        for c in text.chars() {
            gate.push_char(c);
        }
    }

    /// Drive one attempt through a real adapter
    fn attempt(
        gate: &mut GateController,
        adapter: &CipherAdapter,
        ciphertext: Option<&str>,
        passphrase: &str,
    ) -> GatePhase {
        type_str(gate, passphrase);
        let Some(GateEffect::RunAttempt {
            token, passphrase, ..
        }) = gate.submit()
        else {
            panic!("submit did not schedule an attempt");
        };
        assert_eq!(gate.phase(), GatePhase::Decrypting);
        gate.complete(token, adapter.decrypt(ciphertext, &passphrase));
        gate.phase()
    }

    #[test]
    fn test_activate_reaches_awaiting_input() {
        let mut gate = gate();
        assert_eq!(gate.phase(), GatePhase::Locked);
        assert_eq!(gate.zone(), ContactZone::Locked);

        let effect = gate.activate().unwrap();
        assert!(matches!(effect, GateEffect::FocusInput { .. }));
        assert_eq!(effect.delay(), Duration::from_millis(50));
        assert_eq!(gate.phase(), GatePhase::AwaitingInput);
        assert!(!gate.is_focused());

        assert!(gate.focus(effect.token()));
        assert!(gate.is_focused());
        assert!(gate.activate().is_none());
    }

    #[test]
    fn test_typing_needs_focus() {
        let mut gate = gate();
        gate.activate();
        assert!(!gate.push_char('x'));

        gate.focus(gate.token());
        type_str(&mut gate, "abc");
        assert_eq!(gate.input_len(), 3);
        assert!(gate.pop_char());
        assert_eq!(gate.input_len(), 2);
    }

    #[test]
    fn test_submit_shows_working_label_immediately() {
        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());
        type_str(&mut gate, "guess");

        let effect = gate.submit().unwrap();
        assert_eq!(gate.status(), Some(WORKING_LABEL));
        assert_eq!(effect.delay(), Duration::from_millis(300));
        match effect {
            GateEffect::RunAttempt { passphrase, .. } => assert_eq!(passphrase.as_str(), "guess"),
            other => panic!("unexpected effect {:?}", other),
        }
        assert!(gate.submit().is_none());
    }

    #[test]
    fn test_correct_passphrase_reveals_non_blank_lines() {
        let adapter = CipherAdapter::new(Arc::new(CryptoJsAes));
        let ciphertext = encrypt("EMAIL: ghost@noir.net\n\n   \nTG: @ghost_op\n", "nightshift");

        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());
        let phase = attempt(&mut gate, &adapter, Some(&ciphertext), "nightshift");

        assert_eq!(phase, GatePhase::Revealed);
        assert_eq!(gate.contacts(), ["EMAIL: ghost@noir.net", "TG: @ghost_op"]);
        assert_eq!(gate.status(), None);
        assert_eq!(gate.input_len(), 0);
        assert!(gate.activate().is_none());
        assert!(gate.submit().is_none());
    }

    #[test]
    fn test_denial_clears_refocuses_and_allows_retry() {
        let adapter = CipherAdapter::new(Arc::new(CryptoJsAes));
        let ciphertext = encrypt("EMAIL: ghost@noir.net", "nightshift");

        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());

        for guess in ["one", "two", "three", "four", "five"] {
            let phase = attempt(&mut gate, &adapter, Some(&ciphertext), guess);
            assert_eq!(phase, GatePhase::Denied(CipherError::WrongPassphrase));
            assert_eq!(gate.status(), Some("ERROR: Access Denied: Invalid Token."));
            assert_eq!(gate.input_len(), 0);
            assert!(gate.is_focused());
            assert!(gate.is_shaking());
        }

        let phase = attempt(&mut gate, &adapter, Some(&ciphertext), "nightshift");
        assert_eq!(phase, GatePhase::Revealed);
        assert_eq!(gate.attempts(), 6);
    }

    #[test]
    fn test_placeholder_denial_reason() {
        let adapter = CipherAdapter::new(Arc::new(CryptoJsAes));
        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());

        let phase = attempt(&mut gate, &adapter, Some("PASTE_CIPHERTEXT_HERE"), "anything");
        assert_eq!(phase, GatePhase::Denied(CipherError::Placeholder));
        assert_eq!(gate.status(), Some("ERROR: Placeholder detected in config."));
    }

    #[test]
    fn test_unavailable_cipher_denial_reason() {
        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());

        let phase = attempt(&mut gate, &CipherAdapter::unavailable(), Some("U2Fs"), "x");
        assert_eq!(phase, GatePhase::Denied(CipherError::Unavailable));
        assert_eq!(gate.status(), Some("ERROR: Encryption module missing."));
    }

    #[test]
    fn test_stale_token_is_a_no_op() {
        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());
        type_str(&mut gate, "key");
        gate.submit();

        let stale = MountToken::new(99);
        assert!(gate.complete(stale, Ok("leak".to_string())).is_none());
        assert_eq!(gate.phase(), GatePhase::Decrypting);
        assert!(gate.contacts().is_empty());
        assert!(!gate.focus(stale));
    }

    #[test]
    fn test_shake_clears_for_own_token_only() {
        let mut gate = gate();
        gate.activate();
        gate.focus(gate.token());
        gate.submit();
        let effect = gate.complete(gate.token(), Err(CipherError::WrongPassphrase)).unwrap();
        assert!(matches!(effect, GateEffect::ClearShake { .. }));

        gate.clear_shake(MountToken::new(42));
        assert!(gate.is_shaking());
        gate.clear_shake(effect.token());
        assert!(!gate.is_shaking());
    }
}

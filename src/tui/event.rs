use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::cipher::{CipherAdapter, CipherError};
use crate::content::AppConfig;
use crate::gate::{GateEffect, MountToken};

/// Events posted back to the UI loop by scheduled work
#[derive(Debug)]
pub enum UiEvent {
    /// The key field's focus delay elapsed
    FocusGate { token: MountToken },
    /// A decryption attempt finished
    AttemptFinished {
        token: MountToken,
        outcome: Result<String, CipherError>,
    },
    /// The denial shake is over
    ClearShake { token: MountToken },
}

/// Wait out an effect's delay, then perform it
pub async fn resolve_effect(
    effect: GateEffect,
    cipher: Arc<CipherAdapter>,
    config: Arc<AppConfig>,
) -> UiEvent {
    tokio::time::sleep(effect.delay()).await;

    match effect {
        GateEffect::FocusInput { token, .. } => UiEvent::FocusGate { token },
        GateEffect::RunAttempt {
            token, passphrase, ..
        } => UiEvent::AttemptFinished {
            token,
            outcome: cipher.decrypt(config.encrypted_contacts.as_deref(), &passphrase),
        },
        GateEffect::ClearShake { token, .. } => UiEvent::ClearShake { token },
    }
}

/// Run an effect in the background and post its event to the loop
pub fn schedule(
    effect: GateEffect,
    cipher: Arc<CipherAdapter>,
    config: Arc<AppConfig>,
    tx: UnboundedSender<UiEvent>,
) {
    tokio::spawn(async move {
        let event = resolve_effect(effect, cipher, config).await;
        // The loop has exited when the receiver is gone
        let _ = tx.send(event);
    });
}

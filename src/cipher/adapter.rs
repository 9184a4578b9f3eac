use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::constants::PLACEHOLDER_MARKERS;

/// Low-level failures reported by a primitive. Never shown to the visitor as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("malformed ciphertext: {0}")]
    Decode(String),

    #[error("ciphertext is not salted")]
    MissingSalt,

    #[error("padding check failed")]
    BadPadding,
}

/// A symmetric decryption capability keyed by a passphrase
#[cfg_attr(test, mockall::automock)]
pub trait CipherPrimitive: Send + Sync {
    /// Short identifier for logs
    fn name(&self) -> &'static str;

    /// Decrypt `ciphertext` with `passphrase`, returning raw plaintext bytes
    fn decrypt(&self, ciphertext: &str, passphrase: &str) -> Result<Vec<u8>, PrimitiveError>;
}

/// Why the contact channel stayed locked. Messages are shown in the gate status line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherError {
    #[error("Encryption module missing.")]
    Unavailable,

    #[error("No encrypted data found.")]
    MissingCiphertext,

    #[error("Placeholder detected in config.")]
    Placeholder,

    #[error("Access Denied: Invalid Token.")]
    WrongPassphrase,
}

impl CipherError {
    /// True when the content was never populated, as opposed to a bad guess
    pub fn is_configuration_issue(&self) -> bool {
        matches!(self, Self::MissingCiphertext | Self::Placeholder)
    }
}

/// Does this ciphertext still carry a "fill me in" marker?
pub fn is_placeholder(ciphertext: &str) -> bool {
    PLACEHOLDER_MARKERS
        .iter()
        .any(|marker| ciphertext.contains(marker))
}

/// Boundary around the decryption primitive
#[derive(Clone)]
pub struct CipherAdapter {
    primitive: Option<Arc<dyn CipherPrimitive>>,
}

impl std::fmt::Debug for CipherAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CipherAdapter")
            .field("primitive", &self.primitive.as_ref().map(|p| p.name()))
            .finish()
    }
}

impl CipherAdapter {
    pub fn new(primitive: Arc<dyn CipherPrimitive>) -> Self {
        Self {
            primitive: Some(primitive),
        }
    }

    /// An adapter whose runtime lacks the capability
    pub fn unavailable() -> Self {
        Self { primitive: None }
    }

    pub fn is_available(&self) -> bool {
        self.primitive.is_some()
    }

    /// Decrypt the contact channel. The passphrase goes to the primitive unchanged.
    pub fn decrypt(&self, ciphertext: Option<&str>, passphrase: &str) -> Result<String, CipherError> {
        let primitive = self.primitive.as_ref().ok_or(CipherError::Unavailable)?;

        let ciphertext = match ciphertext.map(str::trim) {
            Some(text) if !text.is_empty() => text,
            _ => return Err(CipherError::MissingCiphertext),
        };
        if is_placeholder(ciphertext) {
            return Err(CipherError::Placeholder);
        }

        let bytes = primitive.decrypt(ciphertext, passphrase).map_err(|e| {
            debug!("{} rejected the attempt: {}", primitive.name(), e);
            CipherError::WrongPassphrase
        })?;

        let plaintext = String::from_utf8(bytes).map_err(|_| {
            debug!("{} produced non UTF-8 output", primitive.name());
            CipherError::WrongPassphrase
        })?;

        // Without authentication an empty result is indistinguishable from a bad key
        if plaintext.is_empty() {
            debug!("{} produced empty output", primitive.name());
            return Err(CipherError::WrongPassphrase);
        }

        Ok(plaintext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::{encrypt, CryptoJsAes};
    use mockall::predicate::eq;

    fn adapter() -> CipherAdapter {
        CipherAdapter::new(Arc::new(CryptoJsAes))
    }

    #[test]
    fn test_roundtrip_through_adapter() {
        let ciphertext = encrypt("EMAIL: ghost@noir.net", "nightshift");
        let plaintext = adapter().decrypt(Some(&ciphertext), "nightshift").unwrap();
        assert_eq!(plaintext, "EMAIL: ghost@noir.net");
    }

    #[test]
    fn test_wrong_passphrase_is_denied() {
        let ciphertext = encrypt("EMAIL: ghost@noir.net\nTG: @ghost", "nightshift");
        for guess in ["", "nightshif", "NIGHTSHIFT", "nightshift "] {
            assert_eq!(
                adapter().decrypt(Some(&ciphertext), guess),
                Err(CipherError::WrongPassphrase),
                "guess {:?}",
                guess
            );
        }
    }

    #[test]
    fn test_placeholder_has_its_own_reason() {
        for marker in PLACEHOLDER_MARKERS {
            let err = adapter().decrypt(Some(marker), "anything").unwrap_err();
            assert_eq!(err, CipherError::Placeholder);
            assert!(err.is_configuration_issue());
        }
    }

    #[test]
    fn test_missing_ciphertext() {
        assert_eq!(
            adapter().decrypt(None, "x"),
            Err(CipherError::MissingCiphertext)
        );
        assert_eq!(
            adapter().decrypt(Some("   "), "x"),
            Err(CipherError::MissingCiphertext)
        );
    }

    #[test]
    fn test_unavailable_never_touches_primitive() {
        let err = CipherAdapter::unavailable()
            .decrypt(Some("U2FsdGVkX1..."), "x")
            .unwrap_err();
        assert_eq!(err, CipherError::Unavailable);
        assert_eq!(err.to_string(), "Encryption module missing.");
    }

    #[test]
    fn test_empty_plaintext_reads_as_wrong_passphrase() {
        // printf '' | openssl enc -aes-256-cbc -md md5 -salt -base64 -A -pass pass:nightshift
        let empty = "U2FsdGVkX18MHFVuoGWzFfLSz4h/2XwP09ejUm1JxsM=";
        assert_eq!(
            adapter().decrypt(Some(empty), "nightshift"),
            Err(CipherError::WrongPassphrase)
        );
    }

    #[test]
    fn test_primitive_failures_are_generic() {
        let mut primitive = MockCipherPrimitive::new();
        primitive.expect_name().return_const("mock");
        primitive
            .expect_decrypt()
            .with(eq("cipher"), eq("pass"))
            .times(1)
            .returning(|_, _| Err(PrimitiveError::BadPadding));

        let adapter = CipherAdapter::new(Arc::new(primitive));
        assert_eq!(
            adapter.decrypt(Some("cipher"), "pass"),
            Err(CipherError::WrongPassphrase)
        );
    }

    #[test]
    fn test_invalid_utf8_is_wrong_passphrase() {
        let mut primitive = MockCipherPrimitive::new();
        primitive.expect_name().return_const("mock");
        primitive
            .expect_decrypt()
            .returning(|_, _| Ok(vec![0xff, 0xfe, 0x00]));

        let adapter = CipherAdapter::new(Arc::new(primitive));
        assert_eq!(
            adapter.decrypt(Some("cipher"), "pass"),
            Err(CipherError::WrongPassphrase)
        );
    }

    #[test]
    fn test_passphrase_passed_unchanged() {
        let mut primitive = MockCipherPrimitive::new();
        primitive.expect_name().return_const("mock");
        primitive
            .expect_decrypt()
            .with(eq("cipher"), eq("  spaced pass  "))
            .returning(|_, _| Ok(b"ok".to_vec()));

        let adapter = CipherAdapter::new(Arc::new(primitive));
        assert_eq!(adapter.decrypt(Some("cipher"), "  spaced pass  ").unwrap(), "ok");
    }
}

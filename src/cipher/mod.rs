// Gateway module for cipher - the contact channel's decryption boundary
// Callers go through these re-exports, never the private submodules

mod adapter;
mod cryptojs;

pub use adapter::{is_placeholder, CipherAdapter, CipherError, CipherPrimitive, PrimitiveError};
pub use cryptojs::{encrypt, CryptoJsAes};

#[cfg(test)]
pub use adapter::MockCipherPrimitive;

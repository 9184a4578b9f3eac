//! Passphrase-based AES compatible with `CryptoJS.AES` and `openssl enc`.
//!
//! Wire format (base64): `"Salted__"` || salt (8 bytes) || AES-256-CBC ciphertext.
//! Key and IV come from OpenSSL's `EVP_BytesToKey` with MD5 and a single round,
//! which is what CryptoJS does when handed a passphrase string.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use md5::{Digest, Md5};
use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use super::{CipherPrimitive, PrimitiveError};

type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;
type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;

/// Header OpenSSL puts in front of salted ciphertext.
const SALT_HEADER: &[u8] = b"Salted__";

/// Salt size used by OpenSSL and CryptoJS.
const SALT_SIZE: usize = 8;

const KEY_SIZE: usize = 32;
const IV_SIZE: usize = 16;

/// `EVP_BytesToKey(MD5, count = 1)`: returns key || iv.
fn derive_key_iv(passphrase: &[u8], salt: &[u8]) -> Zeroizing<[u8; KEY_SIZE + IV_SIZE]> {
    let mut out = Zeroizing::new([0u8; KEY_SIZE + IV_SIZE]);
    let mut filled = 0;
    let mut previous: Option<Zeroizing<Vec<u8>>> = None;

    while filled < out.len() {
        let mut hasher = Md5::new();
        if let Some(block) = &previous {
            hasher.update(block.as_slice());
        }
        hasher.update(passphrase);
        hasher.update(salt);
        let block = Zeroizing::new(hasher.finalize().to_vec());

        let take = block.len().min(out.len() - filled);
        out[filled..filled + take].copy_from_slice(&block[..take]);
        filled += take;
        previous = Some(block);
    }

    out
}

/// The shipped cipher primitive
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoJsAes;

impl CipherPrimitive for CryptoJsAes {
    fn name(&self) -> &'static str {
        "aes-256-cbc/evp-md5"
    }

    fn decrypt(&self, ciphertext: &str, passphrase: &str) -> Result<Vec<u8>, PrimitiveError> {
        let compact: String = ciphertext.split_whitespace().collect();
        let raw = BASE64
            .decode(compact.as_bytes())
            .map_err(|e| PrimitiveError::Decode(e.to_string()))?;

        if raw.len() < SALT_HEADER.len() + SALT_SIZE || !raw.starts_with(SALT_HEADER) {
            return Err(PrimitiveError::MissingSalt);
        }

        let salt = &raw[SALT_HEADER.len()..SALT_HEADER.len() + SALT_SIZE];
        let body = &raw[SALT_HEADER.len() + SALT_SIZE..];
        if body.is_empty() || body.len() % IV_SIZE != 0 {
            return Err(PrimitiveError::Decode(format!(
                "ciphertext length {} is not a multiple of the block size",
                body.len()
            )));
        }

        let key_iv = derive_key_iv(passphrase.as_bytes(), salt);
        let cipher = Aes256CbcDec::new_from_slices(&key_iv[..KEY_SIZE], &key_iv[KEY_SIZE..])
            .map_err(|e| PrimitiveError::Decode(e.to_string()))?;

        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(body)
            .map_err(|_| PrimitiveError::BadPadding)
    }
}

/// Encrypt `plaintext` in the format [`CryptoJsAes`] decrypts, with a random salt.
pub fn encrypt(plaintext: &str, passphrase: &str) -> String {
    let mut salt = [0u8; SALT_SIZE];
    OsRng.fill_bytes(&mut salt);
    encrypt_with_salt(plaintext, passphrase, salt)
}

fn encrypt_with_salt(plaintext: &str, passphrase: &str, salt: [u8; SALT_SIZE]) -> String {
    let key_iv = derive_key_iv(passphrase.as_bytes(), &salt);
    let cipher = Aes256CbcEnc::new(
        (&key_iv[..KEY_SIZE]).into(),
        (&key_iv[KEY_SIZE..]).into(),
    );
    let body = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes());

    let mut raw = Vec::with_capacity(SALT_HEADER.len() + SALT_SIZE + body.len());
    raw.extend_from_slice(SALT_HEADER);
    raw.extend_from_slice(&salt);
    raw.extend_from_slice(&body);
    BASE64.encode(raw)
}

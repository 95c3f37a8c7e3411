//! # Encrypted PEM Keys
//!
//! [`EncryptedKey`] is the production [`Oracle`]: it holds one encrypted
//! private key and accepts a candidate when the candidate decrypts it into a
//! well-formed PKCS#1, PKCS#8 or SEC1 structure.
//!
//! Two encryption envelopes are recognised:
//!
//! | Envelope | Marker | Key derivation | Ciphers |
//! |----------|--------|----------------|---------|
//! | Legacy OpenSSL | `DEK-Info` header | `EVP_BytesToKey` (MD5) | DES, 3DES, AES-128/192/256 CBC |
//! | PKCS#8 PBES2 | `ENCRYPTED PRIVATE KEY` label | PBKDF2 (SHA-1/256/512) | 3DES, AES-128/192/256 CBC |
//!
//! Padding is checked before the structure, so most wrong candidates are
//! rejected without touching the DER parser. About 1 in 256 wrong candidates
//! survives the padding check; the structure check catches those.

pub mod block;
pub mod der;
pub mod legacy;
pub mod pkcs8;

pub use block::PemBlock;
pub use der::KeyFormat;
pub use legacy::LegacyKey;
pub use pkcs8::Pbes2Key;

use tracing::debug;

use crate::consts::{PEM_HEADER_DEK_INFO, PEM_LABEL_ENCRYPTED_PKCS8};
use crate::error::{BruteError, Rejection};
use crate::oracle::Oracle;

/// An encrypted private key, ready to test candidates against.
#[derive(Debug, Clone)]
pub enum EncryptedKey {
    /// OpenSSL traditional encryption (`Proc-Type: 4,ENCRYPTED`).
    Legacy {
        /// Label of the PEM block, e.g. `RSA PRIVATE KEY`.
        label: String,
        key: LegacyKey,
    },
    /// PKCS#8 `EncryptedPrivateKeyInfo`.
    Pkcs8(Pbes2Key),
}

impl EncryptedKey {
    /// Parse the first PEM block in `input`.
    ///
    /// # Errors
    ///
    /// - [`BruteError::Pem`] for a malformed envelope
    /// - [`BruteError::NotEncrypted`] for a plain key
    /// - [`BruteError::Der`] / [`BruteError::Unsupported`] for PKCS#8 parameters
    ///   that are malformed or not implemented
    pub fn from_pem(input: &[u8]) -> Result<Self, BruteError> {
        Self::from_block(&PemBlock::parse(input)?)
    }

    /// Classify an already parsed block.
    ///
    /// # Errors
    ///
    /// See [`from_pem`](Self::from_pem).
    pub fn from_block(block: &PemBlock) -> Result<Self, BruteError> {
        if let Some(dek_info) = block.header(PEM_HEADER_DEK_INFO) {
            let key = LegacyKey::from_block(block, dek_info)?;
            debug!(label = block.label(), cipher = key.cipher().name(), "legacy encrypted PEM");
            return Ok(Self::Legacy {
                label: block.label().to_string(),
                key,
            });
        }

        if block.label() == PEM_LABEL_ENCRYPTED_PKCS8 {
            return Pbes2Key::from_der(block.contents()).map(Self::Pkcs8);
        }

        Err(BruteError::NotEncrypted {
            label: block.label().to_string(),
        })
    }

    /// The PEM label the key was read from.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Legacy { label, .. } => label,
            Self::Pkcs8(_) => PEM_LABEL_ENCRYPTED_PKCS8,
        }
    }

    /// Human readable description of the encryption, e.g. `PBES2/hmacWithSHA256/AES-256-CBC`.
    #[must_use]
    pub fn scheme(&self) -> String {
        match self {
            Self::Legacy { key, .. } => format!("legacy/{}", key.cipher()),
            Self::Pkcs8(key) => format!(
                "PBES2/{}/{} ({} iterations)",
                key.prf().name(),
                key.cipher(),
                key.iterations()
            ),
        }
    }

    /// Decrypt with `passphrase` and identify the resulting key structure.
    ///
    /// # Errors
    ///
    /// - [`Rejection::Candidate`] when the padding check fails
    /// - [`Rejection::Structure`] when the plaintext is not a private key
    pub fn decrypt(&self, passphrase: &[u8]) -> Result<KeyFormat, Rejection> {
        let plaintext = match self {
            Self::Legacy { key, .. } => key.decrypt(passphrase)?,
            Self::Pkcs8(key) => key.decrypt(passphrase)?,
        };
        KeyFormat::detect(&plaintext)
            .ok_or(Rejection::Structure("not a PKCS#1, PKCS#8 or SEC1 private key"))
    }
}

impl Oracle for EncryptedKey {
    #[inline]
    fn attempt(&self, candidate: &[u8]) -> Result<(), Rejection> {
        self.decrypt(candidate).map(|_| ())
    }
}

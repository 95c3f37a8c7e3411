//! src/pem/legacy.rs
//! OpenSSL "traditional" PEM encryption (`Proc-Type: 4,ENCRYPTED` + `DEK-Info`)

use crate::aliases::SecretBytes;
use crate::crypto::{derive_evp_bytes_to_key, CipherKind};
use crate::error::{BruteError, Rejection};
use crate::pem::block::PemBlock;

/// A PEM block encrypted with a `DEK-Info` cipher and an `EVP_BytesToKey` key.
#[derive(Debug, Clone)]
pub struct LegacyKey {
    cipher: CipherKind,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
}

impl LegacyKey {
    /// Build from a block and the value of its `DEK-Info` header.
    ///
    /// # Errors
    ///
    /// - [`BruteError::Unsupported`] for an unknown cipher name
    /// - [`BruteError::Pem`] for a malformed header, a wrong IV length, or a
    ///   body that is not a non-zero multiple of the block size
    pub fn from_block(block: &PemBlock, dek_info: &str) -> Result<Self, BruteError> {
        let (name, iv_hex) = dek_info
            .split_once(',')
            .ok_or_else(|| BruteError::Pem(format!("malformed DEK-Info header: {dek_info:?}")))?;

        let cipher = CipherKind::from_dek_name(name.trim())
            .ok_or_else(|| BruteError::Unsupported(format!("legacy PEM cipher {:?}", name.trim())))?;

        let iv = hex::decode(iv_hex.trim())
            .map_err(|e| BruteError::Pem(format!("DEK-Info IV is not hex: {e}")))?;
        if iv.len() != cipher.block_len() {
            return Err(BruteError::Pem(format!(
                "DEK-Info IV is {} bytes, {cipher} needs {}",
                iv.len(),
                cipher.block_len()
            )));
        }

        let ciphertext = block.contents().to_vec();
        if ciphertext.is_empty() || ciphertext.len() % cipher.block_len() != 0 {
            return Err(BruteError::Pem(
                "encrypted PEM data is not a multiple of the block size".into(),
            ));
        }

        Ok(Self {
            cipher,
            iv,
            ciphertext,
        })
    }

    #[must_use]
    pub const fn cipher(&self) -> CipherKind {
        self.cipher
    }

    /// Decrypt the body with `passphrase`.
    ///
    /// # Errors
    ///
    /// [`Rejection::Candidate`] when the padding check fails.
    pub fn decrypt(&self, passphrase: &[u8]) -> Result<SecretBytes, Rejection> {
        let key = derive_evp_bytes_to_key(passphrase, &self.iv, self.cipher.key_len());
        self.cipher.decrypt_cbc(&key, &self.iv, &self.ciphertext)
    }
}

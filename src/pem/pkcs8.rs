//! src/pem/pkcs8.rs
//! PKCS#8 `EncryptedPrivateKeyInfo` with PBES2 (PBKDF2 + CBC cipher)
//!
//! ```text
//! EncryptedPrivateKeyInfo ::= SEQUENCE {
//!     encryptionAlgorithm  SEQUENCE { id-PBES2, PBES2-params },
//!     encryptedData        OCTET STRING }
//!
//! PBES2-params ::= SEQUENCE {
//!     keyDerivationFunc  SEQUENCE { id-PBKDF2, PBKDF2-params },
//!     encryptionScheme   SEQUENCE { cipher OID, iv OCTET STRING } }
//!
//! PBKDF2-params ::= SEQUENCE {
//!     salt            OCTET STRING,
//!     iterationCount  INTEGER,
//!     keyLength       INTEGER OPTIONAL,
//!     prf             AlgorithmIdentifier DEFAULT hmacWithSHA1 }
//! ```

use tracing::debug;

use crate::aliases::SecretBytes;
use crate::consts::{OID_PBES2, OID_PBKDF2, PBKDF2_MAX_ITER, PBKDF2_MIN_ITER};
use crate::crypto::{derive_pbkdf2_key, CipherKind, Prf};
use crate::error::{BruteError, Rejection};
use crate::pem::der::{
    read_whole, DerReader, TAG_INTEGER, TAG_OCTET_STRING, TAG_OID, TAG_SEQUENCE,
};

/// A PBES2-encrypted PKCS#8 private key.
#[derive(Debug, Clone)]
pub struct Pbes2Key {
    prf: Prf,
    salt: Vec<u8>,
    iterations: u32,
    cipher: CipherKind,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
}

fn malformed(what: &str) -> BruteError {
    BruteError::Der(format!("malformed EncryptedPrivateKeyInfo: {what}"))
}

impl Pbes2Key {
    /// Parse a DER `EncryptedPrivateKeyInfo`.
    ///
    /// # Errors
    ///
    /// - [`BruteError::Der`] for malformed structures or out-of-range parameters
    /// - [`BruteError::Unsupported`] for schemes other than PBES2/PBKDF2 with a
    ///   known PRF and CBC cipher
    pub fn from_der(der: &[u8]) -> Result<Self, BruteError> {
        let mut info = DerReader::new(
            read_whole(der, TAG_SEQUENCE).ok_or_else(|| malformed("outer SEQUENCE"))?,
        );

        let mut algorithm = DerReader::new(
            info.read(TAG_SEQUENCE)
                .ok_or_else(|| malformed("encryptionAlgorithm"))?,
        );
        let scheme = algorithm
            .read(TAG_OID)
            .ok_or_else(|| malformed("encryptionAlgorithm OID"))?;
        if scheme != OID_PBES2 {
            return Err(BruteError::Unsupported(format!(
                "PKCS#8 encryption scheme {} (only PBES2 is supported)",
                hex::encode(scheme)
            )));
        }
        let mut params = DerReader::new(
            algorithm
                .read(TAG_SEQUENCE)
                .ok_or_else(|| malformed("PBES2-params"))?,
        );

        // keyDerivationFunc
        let mut kdf = DerReader::new(
            params
                .read(TAG_SEQUENCE)
                .ok_or_else(|| malformed("keyDerivationFunc"))?,
        );
        let kdf_oid = kdf.read(TAG_OID).ok_or_else(|| malformed("KDF OID"))?;
        if kdf_oid != OID_PBKDF2 {
            return Err(BruteError::Unsupported(format!(
                "PBES2 key derivation {} (only PBKDF2 is supported)",
                hex::encode(kdf_oid)
            )));
        }
        let mut pbkdf2 = DerReader::new(
            kdf.read(TAG_SEQUENCE)
                .ok_or_else(|| malformed("PBKDF2-params"))?,
        );
        let salt = pbkdf2
            .read(TAG_OCTET_STRING)
            .ok_or_else(|| malformed("PBKDF2 salt"))?
            .to_vec();
        let iterations = pbkdf2
            .read_small_uint()
            .and_then(|n| u32::try_from(n).ok())
            .filter(|n| (PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(n))
            .ok_or_else(|| malformed("PBKDF2 iteration count out of range"))?;
        let key_length = if pbkdf2.peek_tag() == Some(TAG_INTEGER) {
            Some(
                pbkdf2
                    .read_small_uint()
                    .ok_or_else(|| malformed("PBKDF2 keyLength"))?,
            )
        } else {
            None
        };
        let prf = match pbkdf2.read_optional(TAG_SEQUENCE) {
            Some(prf_algorithm) => {
                let oid = DerReader::new(prf_algorithm)
                    .read(TAG_OID)
                    .ok_or_else(|| malformed("PRF OID"))?;
                Prf::from_oid(oid).ok_or_else(|| {
                    BruteError::Unsupported(format!("PBKDF2 PRF {}", hex::encode(oid)))
                })?
            }
            None => Prf::default(),
        };
        if !pbkdf2.is_empty() {
            return Err(malformed("trailing data in PBKDF2-params"));
        }

        // encryptionScheme
        let mut encryption = DerReader::new(
            params
                .read(TAG_SEQUENCE)
                .ok_or_else(|| malformed("encryptionScheme"))?,
        );
        let cipher_oid = encryption
            .read(TAG_OID)
            .ok_or_else(|| malformed("cipher OID"))?;
        let cipher = CipherKind::from_oid(cipher_oid).ok_or_else(|| {
            BruteError::Unsupported(format!("PBES2 cipher {}", hex::encode(cipher_oid)))
        })?;
        let iv = encryption
            .read(TAG_OCTET_STRING)
            .ok_or_else(|| malformed("cipher IV"))?
            .to_vec();
        if iv.len() != cipher.block_len() {
            return Err(malformed("IV length does not match the cipher block size"));
        }
        if key_length.is_some_and(|len| len != cipher.key_len() as u64) {
            return Err(malformed("PBKDF2 keyLength does not match the cipher"));
        }

        let ciphertext = info
            .read(TAG_OCTET_STRING)
            .ok_or_else(|| malformed("encryptedData"))?
            .to_vec();
        if ciphertext.is_empty() || ciphertext.len() % cipher.block_len() != 0 {
            return Err(malformed("encryptedData is not a multiple of the block size"));
        }

        debug!(
            prf = prf.name(),
            iterations,
            cipher = cipher.name(),
            "parsed PBES2 parameters"
        );

        Ok(Self {
            prf,
            salt,
            iterations,
            cipher,
            iv,
            ciphertext,
        })
    }

    #[must_use]
    pub const fn prf(&self) -> Prf {
        self.prf
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    #[must_use]
    pub const fn cipher(&self) -> CipherKind {
        self.cipher
    }

    /// Decrypt the key with `passphrase`.
    ///
    /// # Errors
    ///
    /// [`Rejection::Candidate`] when the padding check fails.
    pub fn decrypt(&self, passphrase: &[u8]) -> Result<SecretBytes, Rejection> {
        let mut key = SecretBytes::new(vec![0u8; self.cipher.key_len()]);
        derive_pbkdf2_key(self.prf, passphrase, &self.salt, self.iterations, &mut key)
            .map_err(|_| Rejection::Candidate("key derivation failed"))?;
        self.cipher.decrypt_cbc(&key, &self.iv, &self.ciphertext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_pbes2_schemes() {
        // SEQUENCE { SEQUENCE { OID pbeWithMD5AndDES-CBC, SEQUENCE {} }, OCTET STRING (8) }
        let der = [
            0x30, 0x19, 0x30, 0x0d, 0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x05,
            0x03, 0x30, 0x00, 0x04, 0x08, 0, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert!(matches!(
            Pbes2Key::from_der(&der),
            Err(BruteError::Unsupported(_))
        ));
        assert!(matches!(
            Pbes2Key::from_der(&der[..20]),
            Err(BruteError::Der(_))
        ));
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(Pbes2Key::from_der(b"nope"), Err(BruteError::Der(_))));
    }
}

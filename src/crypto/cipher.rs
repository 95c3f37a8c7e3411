//! src/crypto/cipher.rs
//! CBC decryption for the block ciphers used by encrypted PEM keys

use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes128Dec, Aes192Dec, Aes256Dec};
use des::{Des, TdesEde3};

use crate::aliases::{Block16, SecretBytes};
use crate::consts::{
    MAX_BLOCK_LEN, OID_AES128_CBC, OID_AES192_CBC, OID_AES256_CBC, OID_DES_EDE3_CBC,
};
use crate::error::Rejection;
use crate::utils::xor_blocks;

/// A CBC-mode block cipher an encrypted key may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherKind {
    DesCbc,
    DesEde3Cbc,
    Aes128Cbc,
    Aes192Cbc,
    Aes256Cbc,
}

impl CipherKind {
    /// Parse the cipher name of a legacy `DEK-Info` header (case-insensitive).
    #[must_use]
    pub fn from_dek_name(name: &str) -> Option<Self> {
        match name.to_ascii_uppercase().as_str() {
            "DES-CBC" => Some(Self::DesCbc),
            "DES-EDE3-CBC" => Some(Self::DesEde3Cbc),
            "AES-128-CBC" => Some(Self::Aes128Cbc),
            "AES-192-CBC" => Some(Self::Aes192Cbc),
            "AES-256-CBC" => Some(Self::Aes256Cbc),
            _ => None,
        }
    }

    /// Look up a PBES2 encryption scheme by its DER-encoded OID.
    #[must_use]
    pub fn from_oid(oid: &[u8]) -> Option<Self> {
        match oid {
            OID_AES128_CBC => Some(Self::Aes128Cbc),
            OID_AES192_CBC => Some(Self::Aes192Cbc),
            OID_AES256_CBC => Some(Self::Aes256Cbc),
            OID_DES_EDE3_CBC => Some(Self::DesEde3Cbc),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DesCbc => "DES-CBC",
            Self::DesEde3Cbc => "DES-EDE3-CBC",
            Self::Aes128Cbc => "AES-128-CBC",
            Self::Aes192Cbc => "AES-192-CBC",
            Self::Aes256Cbc => "AES-256-CBC",
        }
    }

    #[must_use]
    pub const fn key_len(self) -> usize {
        match self {
            Self::DesCbc => 8,
            Self::Aes128Cbc => 16,
            Self::DesEde3Cbc | Self::Aes192Cbc => 24,
            Self::Aes256Cbc => 32,
        }
    }

    /// Block size, which is also the IV size.
    #[must_use]
    pub const fn block_len(self) -> usize {
        match self {
            Self::DesCbc | Self::DesEde3Cbc => 8,
            Self::Aes128Cbc | Self::Aes192Cbc | Self::Aes256Cbc => 16,
        }
    }

    /// Decrypt `ciphertext` in CBC mode and strip PKCS#7 padding.
    ///
    /// `key` and `iv` must be exactly [`key_len`](Self::key_len) and
    /// [`block_len`](Self::block_len) bytes; `ciphertext` must be a non-zero
    /// multiple of the block size. Callers validate all three when the key is
    /// parsed, so only the padding check depends on the candidate.
    ///
    /// # Errors
    ///
    /// [`Rejection::Candidate`] if the padding is invalid (the usual sign of a
    /// wrong passphrase) or if a length precondition is violated.
    pub fn decrypt_cbc(
        self,
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<SecretBytes, Rejection> {
        let plaintext = match self {
            Self::DesCbc => cbc_decrypt::<Des>(key, iv, ciphertext)?,
            Self::DesEde3Cbc => cbc_decrypt::<TdesEde3>(key, iv, ciphertext)?,
            Self::Aes128Cbc => cbc_decrypt::<Aes128Dec>(key, iv, ciphertext)?,
            Self::Aes192Cbc => cbc_decrypt::<Aes192Dec>(key, iv, ciphertext)?,
            Self::Aes256Cbc => cbc_decrypt::<Aes256Dec>(key, iv, ciphertext)?,
        };
        strip_pkcs7(plaintext, self.block_len())
    }
}

impl std::fmt::Display for CipherKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

fn cbc_decrypt<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<SecretBytes, Rejection>
where
    C: BlockDecrypt + KeyInit,
{
    let block_len = C::block_size();
    if iv.len() != block_len || ciphertext.is_empty() || ciphertext.len() % block_len != 0 {
        return Err(Rejection::Candidate("ciphertext or IV length mismatch"));
    }
    let cipher = C::new_from_slice(key).map_err(|_| Rejection::Candidate("invalid key length"))?;

    let mut plaintext = SecretBytes::new(ciphertext.to_vec());
    let mut previous = Block16::new([0u8; MAX_BLOCK_LEN]);
    previous[..block_len].copy_from_slice(iv);

    for (chunk, encrypted) in plaintext
        .chunks_exact_mut(block_len)
        .zip(ciphertext.chunks_exact(block_len))
    {
        cipher.decrypt_block(GenericArray::from_mut_slice(chunk));
        xor_blocks(chunk, &previous[..block_len]);
        previous[..block_len].copy_from_slice(encrypted);
    }

    Ok(plaintext)
}

/// Remove PKCS#7 padding in place.
fn strip_pkcs7(mut data: SecretBytes, block_len: usize) -> Result<SecretBytes, Rejection> {
    let pad = match data.last() {
        Some(&pad) => usize::from(pad),
        None => return Err(Rejection::Candidate("empty plaintext")),
    };
    if pad == 0 || pad > block_len || pad > data.len() {
        return Err(Rejection::Candidate("invalid padding length"));
    }
    let body_len = data.len() - pad;
    if data[body_len..].iter().any(|&b| usize::from(b) != pad) {
        return Err(Rejection::Candidate("invalid padding bytes"));
    }
    data.truncate(body_len);
    Ok(data)
}

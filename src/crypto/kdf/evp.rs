//! src/crypto/kdf/evp.rs
//! OpenSSL `EVP_BytesToKey` (MD5, one round), the legacy PEM key derivation

use md5::{Digest, Md5};

use crate::aliases::SecretBytes;
use crate::consts::LEGACY_SALT_LEN;

/// Derive a `key_len`-byte key from `password` and the first 8 bytes of `salt`.
///
/// - `D_1 = MD5(password ‖ salt)`
/// - `D_i = MD5(D_{i-1} ‖ password ‖ salt)`
/// - key = first `key_len` bytes of `D_1 ‖ D_2 ‖ …`
///
/// Salts longer than 8 bytes (a full AES IV from `DEK-Info`) are truncated.
#[inline(always)]
#[must_use]
pub fn derive_evp_bytes_to_key(password: &[u8], salt: &[u8], key_len: usize) -> SecretBytes {
    let salt = &salt[..salt.len().min(LEGACY_SALT_LEN)];
    let mut key = SecretBytes::new(Vec::with_capacity(key_len + 16));
    let mut hasher = Md5::new();

    while key.len() < key_len {
        let tail = key.len().saturating_sub(16);
        hasher.update(&key[tail..]);
        hasher.update(password);
        hasher.update(salt);
        key.extend_from_slice(&hasher.finalize_reset());
    }

    key.truncate(key_len);
    key
}

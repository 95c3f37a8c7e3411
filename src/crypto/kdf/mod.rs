//! # Key Derivation Functions (KDF)
//!
//! Passphrase-to-key derivations used by encrypted PEM keys.
//!
//! ## Modules
//!
//! - [`evp`] - OpenSSL `EVP_BytesToKey` with MD5 (legacy `DEK-Info` keys)
//! - [`pbkdf2`] - PBKDF2-HMAC with SHA-1/SHA-256/SHA-512 (PKCS#8 PBES2 keys)

pub mod evp;
pub mod pbkdf2;

pub use evp::derive_evp_bytes_to_key;
pub use self::pbkdf2::{derive_pbkdf2_key, Prf};

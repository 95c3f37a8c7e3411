// src/crypto/mod.rs

//! Low-level crypto primitives: CBC block ciphers and password-based KDFs.
//!
//! HMAC types are defined in `aliases.rs`.

pub mod cipher;
pub mod kdf;

pub use cipher::CipherKind;
pub use kdf::{derive_evp_bytes_to_key, derive_pbkdf2_key, Prf};

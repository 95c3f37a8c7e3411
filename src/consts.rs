//! # Constants
//!
//! PEM labels, ASN.1 object identifiers and search defaults.

/// PEM label of a PKCS#8 `EncryptedPrivateKeyInfo`.
pub const PEM_LABEL_ENCRYPTED_PKCS8: &str = "ENCRYPTED PRIVATE KEY";

/// PEM header carrying the legacy cipher name and IV.
pub const PEM_HEADER_DEK_INFO: &str = "DEK-Info";

/// Salt length used by OpenSSL's legacy `EVP_BytesToKey` derivation.
///
/// The salt is always the first 8 bytes of the IV from `DEK-Info`.
pub const LEGACY_SALT_LEN: usize = 8;

/// Largest block size among the supported ciphers (AES).
pub const MAX_BLOCK_LEN: usize = 16;

/// Minimum accepted PBKDF2 iteration count.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum accepted PBKDF2 iteration count.
///
/// Keys claiming more than this are treated as malformed rather than searched,
/// since every candidate would pay the full cost.
pub const PBKDF2_MAX_ITER: u32 = 10_000_000;

/// Thread name prefix for search workers.
pub const WORKER_THREAD_PREFIX: &str = "keybrute-worker";

/// Thread name of the candidate feeder.
pub const FEEDER_THREAD_NAME: &str = "keybrute-feeder";

// ─────────────────────────────────────────────────────────────────────────────
// Object identifiers, DER-encoded content octets (without tag and length)
// ─────────────────────────────────────────────────────────────────────────────

/// 1.2.840.113549.1.5.13
pub const OID_PBES2: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x05, 0x0d];
/// 1.2.840.113549.1.5.12
pub const OID_PBKDF2: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x05, 0x0c];

/// 1.2.840.113549.2.7
pub const OID_HMAC_SHA1: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x07];
/// 1.2.840.113549.2.9
pub const OID_HMAC_SHA256: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x09];
/// 1.2.840.113549.2.11
pub const OID_HMAC_SHA512: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x02, 0x0b];

/// 2.16.840.1.101.3.4.1.2
pub const OID_AES128_CBC: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x02];
/// 2.16.840.1.101.3.4.1.22
pub const OID_AES192_CBC: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x16];
/// 2.16.840.1.101.3.4.1.42
pub const OID_AES256_CBC: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x01, 0x2a];
/// 1.2.840.113549.3.7
pub const OID_DES_EDE3_CBC: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x03, 0x07];

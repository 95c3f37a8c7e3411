//! src/crypto/kdf/pbkdf2.rs

use pbkdf2::pbkdf2;

use crate::aliases::{HmacSha1, HmacSha256, HmacSha512};
use crate::consts::{OID_HMAC_SHA1, OID_HMAC_SHA256, OID_HMAC_SHA512, PBKDF2_MIN_ITER};
use crate::error::BruteError;

/// PBKDF2 pseudo-random function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Prf {
    /// `hmacWithSHA1`, the PKCS#5 default when the PRF field is absent.
    #[default]
    HmacSha1,
    HmacSha256,
    HmacSha512,
}

impl Prf {
    /// Look up a PRF by its DER-encoded OID.
    #[must_use]
    pub fn from_oid(oid: &[u8]) -> Option<Self> {
        match oid {
            OID_HMAC_SHA1 => Some(Self::HmacSha1),
            OID_HMAC_SHA256 => Some(Self::HmacSha256),
            OID_HMAC_SHA512 => Some(Self::HmacSha512),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HmacSha1 => "hmacWithSHA1",
            Self::HmacSha256 => "hmacWithSHA256",
            Self::HmacSha512 => "hmacWithSHA512",
        }
    }
}

/// Derive PBKDF2-HMAC directly into `out_key`.
///
/// The output length is `out_key.len()`.
#[inline(always)]
pub fn derive_pbkdf2_key(
    prf: Prf,
    password: &[u8],
    salt: &[u8],
    iterations: u32,
    out_key: &mut [u8],
) -> Result<(), BruteError> {
    if iterations < PBKDF2_MIN_ITER {
        return Err(BruteError::Der("PBKDF2 iterations must be ≥1".into()));
    }

    let derived = match prf {
        Prf::HmacSha1 => pbkdf2::<HmacSha1>(password, salt, iterations, out_key),
        Prf::HmacSha256 => pbkdf2::<HmacSha256>(password, salt, iterations, out_key),
        Prf::HmacSha512 => pbkdf2::<HmacSha512>(password, salt, iterations, out_key),
    };
    derived.map_err(|e| BruteError::Unsupported(format!("PBKDF2 failed: {e}")))
}

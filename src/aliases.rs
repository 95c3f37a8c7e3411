//! # Secret Type Aliases
//!
//! Every buffer that holds passphrase material or derived key bytes is wrapped
//! in [`zeroize::Zeroizing`], so it is wiped when dropped.
//!
//! ## Type Categories
//!
//! ### HMAC Primitives
//! - [`HmacSha1`], [`HmacSha256`], [`HmacSha512`] - PBKDF2 pseudo-random functions
//!
//! ### Secrets
//! - [`SecretBytes`] - passphrase copies, derived keys, decrypted plaintext
//! - [`Block16`] - one cipher block (scratch space for CBC chaining)

use hmac::Hmac;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use zeroize::Zeroizing;

use crate::consts::MAX_BLOCK_LEN;

// ─────────────────────────────────────────────────────────────────────────────
// HMAC primitives
// ─────────────────────────────────────────────────────────────────────────────
pub type HmacSha1 = Hmac<Sha1>;
pub type HmacSha256 = Hmac<Sha256>;
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// Secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type SecretBytes = Zeroizing<Vec<u8>>;
pub type Block16 = Zeroizing<[u8; MAX_BLOCK_LEN]>; // DES uses the first 8 bytes

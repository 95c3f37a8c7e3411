//! # Error Types
//!
//! Two error families live here:
//!
//! - [`BruteError`] covers everything that can stop a search from starting or
//!   finishing cleanly: unreadable inputs, keys that are not encrypted or are
//!   malformed, unsupported encryption schemes, and worker pool failures.
//! - [`Rejection`] is the per-candidate verdict returned by an
//!   [`Oracle`](crate::Oracle). It never leaves the unit of work that produced it.

use thiserror::Error;

/// The error type for key parsing and search setup.
#[derive(Error, Debug)]
pub enum BruteError {
    /// I/O error while reading the wordlist or key file.
    ///
    /// A read error from the candidate stream ends the feed early and is
    /// reported through [`SearchResults::finish`](crate::SearchResults::finish).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The PEM envelope is malformed.
    ///
    /// Examples:
    /// - no `-----BEGIN ...-----` line
    /// - missing or mismatched `-----END ...-----` line
    /// - invalid base64 body
    /// - malformed `DEK-Info` header
    #[error("PEM error: {0}")]
    Pem(String),

    /// The encrypted DER structure (PKCS#8 `EncryptedPrivateKeyInfo`) is malformed.
    #[error("DER error: {0}")]
    Der(String),

    /// The key is a valid PEM block but carries no encryption.
    #[error("key is not encrypted (PEM label: {label})")]
    NotEncrypted {
        /// Label of the PEM block, e.g. `RSA PRIVATE KEY`.
        label: String,
    },

    /// The key uses a cipher, KDF or PRF this crate does not implement.
    #[error("unsupported encryption: {0}")]
    Unsupported(String),

    /// The worker pool could not be built.
    #[error("worker pool error: {0}")]
    Pool(String),

    /// A unit of work panicked while testing a candidate.
    #[error("a search worker panicked")]
    WorkerPanicked,
}

/// Why a single candidate did not unlock the payload.
///
/// Both variants collapse to "not a match" for the search engine; they are only
/// distinguished for diagnostics.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The decryption step rejected the candidate (e.g. bad padding).
    #[error("candidate rejected: {0}")]
    Candidate(&'static str),

    /// Decryption succeeded but the plaintext is not a recognised key structure.
    #[error("structure rejected: {0}")]
    Structure(&'static str),
}

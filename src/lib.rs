// src/lib.rs

pub mod aliases;
pub mod builders;
pub mod cancel;
pub mod candidate;
pub mod consts;
pub mod crypto;
pub mod error;
pub mod oracle;
pub mod pem;
pub mod search;
pub mod utils;

// High-level API
pub use builders::SearchBuilder;
pub use cancel::CancelToken;
pub use candidate::Candidate;
pub use error::{BruteError, Rejection};
pub use oracle::Oracle;
pub use search::{search, FeedReport, SearchResults, StopReason};

// Production oracle
pub use pem::{EncryptedKey, KeyFormat};

// Key derivations, for callers building their own oracles
pub use crypto::kdf::{derive_evp_bytes_to_key, derive_pbkdf2_key, Prf};

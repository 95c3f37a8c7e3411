//! src/candidate.rs
//! One passphrase candidate, owned by the unit of work that tests it.

use std::fmt;

use crate::aliases::SecretBytes;

/// An immutable, owned copy of one wordlist record.
///
/// The bytes are wiped on drop. `Debug` never prints them.
pub struct Candidate {
    bytes: SecretBytes,
}

impl Candidate {
    /// Copy `bytes` into a new candidate.
    #[must_use]
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            bytes: SecretBytes::new(bytes.to_vec()),
        }
    }

    /// The candidate bytes, exactly as read (line terminator removed).
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lossy UTF-8 rendering, for diagnostics.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

impl AsRef<[u8]> for Candidate {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<&[u8]> for Candidate {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from(bytes)
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Self::copy_from(s.as_bytes())
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

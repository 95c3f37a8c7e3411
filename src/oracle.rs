//! # Oracle
//!
//! The predicate the search engine consults for every admitted candidate.
//!
//! An oracle owns (or borrows, through an `Arc`) the encrypted payload and
//! answers one question: does this candidate unlock it? Implementations must be
//! pure with respect to the payload, because the engine calls
//! [`Oracle::attempt`] concurrently from up to `concurrency` worker threads.
//!
//! [`EncryptedKey`](crate::EncryptedKey) is the production oracle. Any
//! `Fn(&[u8]) -> Result<(), Rejection> + Send + Sync` closure is an oracle too,
//! which is how the engine is tested in isolation.

use crate::error::Rejection;

/// Decides whether a candidate unlocks a fixed encrypted payload.
pub trait Oracle: Send + Sync {
    /// Try `candidate` against the payload.
    ///
    /// # Errors
    ///
    /// - [`Rejection::Candidate`] when the decryption step fails
    /// - [`Rejection::Structure`] when decryption succeeds but the plaintext is
    ///   not a recognised structure
    fn attempt(&self, candidate: &[u8]) -> Result<(), Rejection>;
}

impl<F> Oracle for F
where
    F: Fn(&[u8]) -> Result<(), Rejection> + Send + Sync,
{
    #[inline]
    fn attempt(&self, candidate: &[u8]) -> Result<(), Rejection> {
        self(candidate)
    }
}

//! # Cancellation
//!
//! [`CancelToken`] is the shared stop request observed by the candidate feeder
//! and by every unit of work that has not yet invoked the oracle.
//!
//! - **Cooperative**: nothing is interrupted; tasks poll [`CancelToken::is_cancelled`]
//!   at their checkpoints.
//! - **Monotonic**: once a token reports cancelled it never reports otherwise.
//! - **Hierarchical**: a child token (see [`CancelToken::child`],
//!   [`CancelToken::with_timeout`]) is cancelled whenever its parent is, but
//!   cancelling a child leaves the parent untouched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Cloneable handle to a cancellation flag with an optional deadline.
///
/// Clones share the same flag. Cheap to clone and safe to share across threads.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    parent: Option<CancelToken>,
}

impl CancelToken {
    /// A fresh, uncancelled root token without a deadline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A child token that observes this one.
    #[must_use]
    pub fn child(&self) -> Self {
        self.derive(None)
    }

    /// A child token that additionally cancels itself once `deadline` passes.
    #[must_use]
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        self.derive(Some(deadline))
    }

    /// A child token that cancels itself `timeout` from now.
    ///
    /// A timeout too large to represent is treated as "no deadline".
    #[must_use]
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        self.derive(Instant::now().checked_add(timeout))
    }

    fn derive(&self, deadline: Option<Instant>) -> Self {
        Self {
            inner: Arc::new(Inner {
                cancelled: AtomicBool::new(false),
                deadline,
                parent: Some(self.clone()),
            }),
        }
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    /// Whether this token, its deadline or any ancestor has fired.
    ///
    /// Deadline expiry and parent cancellation are latched into this token's
    /// own flag the first time they are observed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        if self.inner.cancelled.load(Ordering::Acquire) {
            return true;
        }

        let expired = self.inner.deadline.is_some_and(|d| Instant::now() >= d);
        let parent_cancelled = self
            .inner
            .parent
            .as_ref()
            .is_some_and(CancelToken::is_cancelled);

        if expired || parent_cancelled {
            self.cancel();
            return true;
        }
        false
    }

    /// The deadline attached to this token, if any (ancestors not included).
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }
}

//! Shutdown coordination.
//!
//! A [`Shutdown`] is a handle on the server's root cancellation token.
//! Every request context is a child of that token, so triggering it stops
//! the accept loop and cancels in-flight Gates in one step.

use tokio_util::sync::CancellationToken;

/// Cloneable handle that stops a server.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop the server. Idempotent.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once [`trigger`](Self::trigger) has been called on any clone.
    pub async fn triggered(&self) {
        self.token.cancelled().await
    }

    /// Token that request contexts derive from.
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

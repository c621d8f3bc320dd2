// SPDX-License-Identifier: AGPL-3.0-or-later

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{Error, Result};

/// Cooperative cancellation flag polled at component boundaries (§5:
/// "between seeds in scoring; between enrichment batches"). Cloning
/// shares the same underlying flag; the caller (dispatch surface or a
/// per-request deadline) sets it, use cases poll it.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Returns `Err(Error::Cancelled)` if cancellation has been
    /// requested, otherwise `Ok(())`. Call at component boundaries,
    /// never inside tight numeric loops (§5).
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

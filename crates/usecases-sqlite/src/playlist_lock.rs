// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, TryLockError},
    thread,
    time::{Duration, Instant},
};

use listmagify_core::PlaylistId;
use listmagify_usecases::Error as UsecaseError;

use crate::{Error, Result};

/// How long `with_lock` waits for a playlist's advisory lock before
/// failing with `Conflict` (§5: "serialized on a per-playlist
/// advisory lock"; §7: `Conflict` "concurrent ingestion aborted by
/// the per-playlist lock timeout").
pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// One `Mutex<()>` per playlist that has been ingested, created on
/// first use and kept for the process lifetime. Held for the duration
/// of a single ingestion transaction and no longer (§5).
#[derive(Debug, Default)]
pub struct PlaylistLocks {
    locks: Mutex<HashMap<PlaylistId, Arc<Mutex<()>>>>,
}

impl PlaylistLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&self, playlist_id: &PlaylistId) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry(playlist_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Run `f` while holding `playlist_id`'s advisory lock. Two
    /// concurrent ingestions of the same playlist are serialized;
    /// their relative order is unspecified but both are applied.
    /// Fails with `Conflict` if the lock is not free within `timeout`.
    pub fn with_lock<T>(
        &self,
        playlist_id: &PlaylistId,
        timeout: Duration,
        f: impl FnOnce() -> Result<T>,
    ) -> Result<T> {
        let mutex = self.entry(playlist_id);
        let deadline = Instant::now() + timeout;
        loop {
            match mutex.try_lock() {
                Ok(_guard) => return f(),
                Err(TryLockError::Poisoned(poisoned)) => {
                    let _guard = poisoned.into_inner();
                    return f();
                }
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(Error::Usecase(UsecaseError::Conflict));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_access_to_the_same_playlist() {
        let locks = PlaylistLocks::new();
        let playlist_id = PlaylistId::new("p1").unwrap();
        let first = locks.with_lock(&playlist_id, DEFAULT_LOCK_TIMEOUT, || Ok(1));
        assert_eq!(first.unwrap(), 1);
    }

    #[test]
    fn distinct_playlists_do_not_contend() {
        let locks = PlaylistLocks::new();
        let a = PlaylistId::new("a").unwrap();
        let b = PlaylistId::new("b").unwrap();
        assert_eq!(locks.with_lock(&a, DEFAULT_LOCK_TIMEOUT, || Ok(())).is_ok(), true);
        assert_eq!(locks.with_lock(&b, DEFAULT_LOCK_TIMEOUT, || Ok(())).is_ok(), true);
    }

    #[test]
    fn times_out_as_conflict_when_already_held() {
        let locks = Arc::new(PlaylistLocks::new());
        let playlist_id = PlaylistId::new("p1").unwrap();
        let held = locks.entry(&playlist_id);
        let _guard = held.lock().unwrap();

        let result = locks.with_lock(&playlist_id, Duration::from_millis(20), || Ok(()));
        assert!(matches!(result, Err(Error::Usecase(UsecaseError::Conflict))));
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::{ContextId, TrackId};
use listmagify_repo_sqlite::{prelude::Connection as RepoConnection, DbConnection};
use listmagify_usecases::dismissal as uc;

use crate::{Error, Result};

/// `dismiss` (C5, §4.5).
pub fn dismiss(connection: &mut DbConnection, track_id: &TrackId, context_id: &ContextId) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::dismiss(&mut repo, track_id, context_id).map_err(Error::from)
}

/// Remove a single dismissal.
pub fn undismiss(connection: &mut DbConnection, track_id: &TrackId, context_id: &ContextId) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::undismiss(&mut repo, track_id, context_id).map_err(Error::from)
}

/// `clear(context_id)`.
pub fn clear(connection: &mut DbConnection, context_id: &ContextId) -> Result<()> {
    let mut repo = RepoConnection::new(connection);
    uc::clear(&mut repo, context_id).map_err(Error::from)
}

pub fn is_dismissed(connection: &mut DbConnection, context_id: &ContextId, track_id: &TrackId) -> Result<bool> {
    let mut repo = RepoConnection::new(connection);
    uc::is_dismissed(&mut repo, context_id, track_id).map_err(Error::from)
}

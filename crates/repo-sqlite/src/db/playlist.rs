// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;

use super::schema::playlist_tracks;

#[derive(Debug, Clone, Queryable)]
pub(crate) struct Record {
    pub(crate) playlist_id: String,
    pub(crate) position: i32,
    pub(crate) track_id: String,
    pub(crate) snapshot_ms: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = playlist_tracks)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) playlist_id: &'a str,
    pub(crate) position: i32,
    pub(crate) track_id: &'a str,
    pub(crate) snapshot_ms: i64,
}

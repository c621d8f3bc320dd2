// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;

use super::schema::tracks;

#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = tracks, primary_key(id))]
pub(crate) struct QueryableRecord {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) artist_id: Option<String>,
    pub(crate) artist_name: Option<String>,
    pub(crate) updated_at_ms: i64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = tracks)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) id: &'a str,
    pub(crate) name: &'a str,
    pub(crate) artist_id: Option<&'a str>,
    pub(crate) artist_name: Option<&'a str>,
    pub(crate) updated_at_ms: i64,
}

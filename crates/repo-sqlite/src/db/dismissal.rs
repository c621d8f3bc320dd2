// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;

use super::schema::dismissed_recommendations;

#[derive(Debug, Clone, Queryable)]
pub(crate) struct Record {
    pub(crate) context_id: String,
    pub(crate) track_id: String,
    pub(crate) dismissed_ms: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = dismissed_recommendations)]
pub(crate) struct InsertableRecord<'a> {
    pub(crate) context_id: &'a str,
    pub(crate) track_id: &'a str,
    pub(crate) dismissed_ms: i64,
}

// SPDX-License-Identifier: AGPL-3.0-or-later

use diesel::prelude::*;

use super::schema::{track_cooccurrence, track_edges_seq};

#[derive(Debug, Clone, Queryable)]
pub(crate) struct SeqRecord {
    pub(crate) from_track_id: String,
    pub(crate) to_track_id: String,
    pub(crate) weight: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = track_edges_seq)]
pub(crate) struct InsertableSeqRecord<'a> {
    pub(crate) from_track_id: &'a str,
    pub(crate) to_track_id: &'a str,
    pub(crate) weight: i64,
}

#[derive(Debug, Clone, Queryable)]
pub(crate) struct CoocRecord {
    pub(crate) track_a_id: String,
    pub(crate) track_b_id: String,
    pub(crate) weight: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = track_cooccurrence)]
pub(crate) struct InsertableCoocRecord<'a> {
    pub(crate) track_a_id: &'a str,
    pub(crate) track_b_id: &'a str,
    pub(crate) weight: i64,
}

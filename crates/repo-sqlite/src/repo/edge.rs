// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core::TrackId;
use listmagify_repo::{
    edge::{CoocNeighbor, Direction, EdgeRepo, SeqNeighbor},
    RepoResult,
};

use crate::{
    db::{
        edge::{CoocRecord, InsertableCoocRecord, InsertableSeqRecord, SeqRecord},
        schema::{track_cooccurrence, track_edges_seq},
    },
    prelude::*,
    repo_error,
};

impl<'db> EdgeRepo for crate::Connection<'db> {
    fn increment_adjacency(&mut self, from: &TrackId, to: &TrackId, delta: u32) -> RepoResult<()> {
        if from == to {
            return Ok(());
        }
        let record = InsertableSeqRecord {
            from_track_id: from.as_str(),
            to_track_id: to.as_str(),
            weight: i64::from(delta),
        };
        diesel::insert_into(track_edges_seq::table)
            .values(&record)
            .on_conflict((track_edges_seq::from_track_id, track_edges_seq::to_track_id))
            .do_update()
            .set(track_edges_seq::weight.eq(track_edges_seq::weight + i64::from(delta)))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        Ok(())
    }

    fn increment_cooccurrence(&mut self, a: &TrackId, b: &TrackId, delta: u32) -> RepoResult<()> {
        if a == b {
            return Ok(());
        }
        // Canonicalize so the pair is always stored with a < b (§4.1
        // "Edge Canonicalization"); callers may pass either order.
        let (a, b) = if a.as_str() <= b.as_str() { (a, b) } else { (b, a) };
        let record = InsertableCoocRecord {
            track_a_id: a.as_str(),
            track_b_id: b.as_str(),
            weight: i64::from(delta),
        };
        diesel::insert_into(track_cooccurrence::table)
            .values(&record)
            .on_conflict((track_cooccurrence::track_a_id, track_cooccurrence::track_b_id))
            .do_update()
            .set(track_cooccurrence::weight.eq(track_cooccurrence::weight + i64::from(delta)))
            .execute(self.as_mut())
            .map_err(repo_error)?;
        Ok(())
    }

    fn neighbors_seq(&mut self, track_id: &TrackId) -> RepoResult<Vec<SeqNeighbor>> {
        let outgoing = track_edges_seq::table
            .filter(track_edges_seq::from_track_id.eq(track_id.as_str()))
            .load::<SeqRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(|record| SeqNeighbor {
                neighbor_id: TrackId::new(record.to_track_id).expect("stored track id is valid"),
                weight: u32::try_from(record.weight).unwrap_or(u32::MAX),
                direction: Direction::Out,
            });
        let incoming = track_edges_seq::table
            .filter(track_edges_seq::to_track_id.eq(track_id.as_str()))
            .load::<SeqRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(|record| SeqNeighbor {
                neighbor_id: TrackId::new(record.from_track_id).expect("stored track id is valid"),
                weight: u32::try_from(record.weight).unwrap_or(u32::MAX),
                direction: Direction::In,
            });
        Ok(outgoing.chain(incoming).collect())
    }

    fn neighbors_cooccur(&mut self, track_id: &TrackId) -> RepoResult<Vec<CoocNeighbor>> {
        let as_a = track_cooccurrence::table
            .filter(track_cooccurrence::track_a_id.eq(track_id.as_str()))
            .load::<CoocRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(|record| CoocNeighbor {
                neighbor_id: TrackId::new(record.track_b_id).expect("stored track id is valid"),
                weight: u32::try_from(record.weight).unwrap_or(u32::MAX),
            });
        let as_b = track_cooccurrence::table
            .filter(track_cooccurrence::track_b_id.eq(track_id.as_str()))
            .load::<CoocRecord>(self.as_mut())
            .map_err(repo_error)?
            .into_iter()
            .map(|record| CoocNeighbor {
                neighbor_id: TrackId::new(record.track_a_id).expect("stored track id is valid"),
                weight: u32::try_from(record.weight).unwrap_or(u32::MAX),
            });
        Ok(as_a.chain(as_b).collect())
    }
}

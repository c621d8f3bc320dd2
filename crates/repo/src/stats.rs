// SPDX-License-Identifier: AGPL-3.0-or-later

use listmagify_core_api::Stats;

use crate::RepoResult;

/// `stats()` (§4.1, §6: `GET /stats/recs`).
pub trait StatsRepo {
    fn stats(&mut self) -> RepoResult<Stats>;
}

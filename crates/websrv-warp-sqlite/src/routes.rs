// SPDX-License-Identifier: AGPL-3.0-or-later

use std::convert::Infallible;

use warp::{Filter, Rejection, Reply};

use listmagify_backend_webapi_json::{dismiss, recs_appendix, recs_capture, recs_seed, stats};

use crate::{reject_on_error, AppState};

fn with_state(
    state: AppState,
) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// `POST /recs/capture`.
pub fn recs_capture(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("recs" / "capture")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(|request_body: recs_capture::RequestBody, state: AppState| async move {
            recs_capture::handle_request(
                &state.db_gatekeeper,
                &state.playlist_locks,
                state.config.recs_enabled,
                request_body,
            )
            .await
            .map(|response| warp::reply::json(&response))
            .map_err(reject_on_error)
        })
}

/// `POST /recs/seed`.
pub fn recs_seed(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("recs" / "seed")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(|request_body: recs_seed::RequestBody, state: AppState| async move {
            recs_seed::handle_request(
                &state.db_gatekeeper,
                state.config.recs_enabled,
                state.config.query_timeout,
                request_body,
            )
            .await
            .map(|response| warp::reply::json(&response))
            .map_err(reject_on_error)
        })
}

/// `POST /recs/playlist-appendix` and `GET
/// /recs/playlist-appendix?playlistId=&topN=&includeMetadata=` (§6:
/// "identical semantics").
pub fn recs_appendix(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let post = warp::path!("recs" / "playlist-appendix")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state.clone()))
        .and_then(handle_appendix);
    let get = warp::path!("recs" / "playlist-appendix")
        .and(warp::get())
        .and(warp::query::<recs_appendix::QueryParams>())
        .map(recs_appendix::RequestBody::from)
        .and(with_state(state))
        .and_then(handle_appendix);
    post.or(get)
}

async fn handle_appendix(
    request_body: recs_appendix::RequestBody,
    state: AppState,
) -> Result<impl Reply, Rejection> {
    recs_appendix::handle_request(
        &state.db_gatekeeper,
        state.config.recs_enabled,
        state.config.query_timeout,
        request_body,
    )
    .await
    .map(|response| warp::reply::json(&response))
    .map_err(reject_on_error)
}

/// `POST /recs/dismiss`.
pub fn dismiss(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("recs" / "dismiss")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_state(state))
        .and_then(|request_body: dismiss::RequestBody, state: AppState| async move {
            dismiss::handle_request(&state.db_gatekeeper, request_body)
                .await
                .map(|response| warp::reply::json(&response))
                .map_err(reject_on_error)
        })
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClearDismissalsQueryParams {
    context_id: Option<String>,
}

/// `DELETE /recs/dismiss?contextId=`.
pub fn clear_dismissals(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("recs" / "dismiss")
        .and(warp::delete())
        .and(warp::query::<ClearDismissalsQueryParams>())
        .and(with_state(state))
        .and_then(
            |params: ClearDismissalsQueryParams, state: AppState| async move {
                dismiss::handle_clear_request(&state.db_gatekeeper, params.context_id)
                    .await
                    .map(|response| warp::reply::json(&response))
                    .map_err(reject_on_error)
            },
        )
}

#[derive(Debug, Default, serde::Deserialize)]
struct StatsQueryParams {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

/// `GET /stats/recs`, gated by `stats_allowed_user_ids` (§6).
pub fn stats(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    warp::path!("stats" / "recs")
        .and(warp::get())
        .and(warp::query::<StatsQueryParams>())
        .and(with_state(state))
        .and_then(
            |params: StatsQueryParams, state: AppState| async move {
                if !state.config.stats_allowed(params.user_id.as_deref()) {
                    return Err(reject_on_error(crate::Error::NotFound));
                }
                stats::handle_request(&state.db_gatekeeper)
                    .await
                    .map(|response| warp::reply::json(&response))
                    .map_err(reject_on_error)
            },
        )
}

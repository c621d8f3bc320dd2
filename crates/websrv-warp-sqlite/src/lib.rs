// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::wildcard_imports)]

//! warp routes and rejection handling for the Dispatch Surface (C7,
//! §4.7, §6). The JSON codec and domain calls live in
//! `listmagify-backend-webapi-json`; this crate owns the HTTP framing
//! — status codes, query-string/body extraction, and the `enabled`/
//! `stats_allowed_user_ids` feature gates.

use std::{convert::Infallible, error::Error as StdError, result::Result as StdResult, sync::Arc, time::Duration};

use serde::Serialize;
use thiserror::Error;
use warp::{
    body::BodyDeserializeError,
    http::StatusCode,
    reject::{self, InvalidQuery, MethodNotAllowed, Reject, Rejection},
    Filter, Reply,
};

use listmagify_backend_webapi_json as api;
use listmagify_repo::RepoError;
use listmagify_storage_sqlite::connection::pool::gatekeeper::Gatekeeper;
use listmagify_usecases::Error as UsecaseError;
use listmagify_usecases_sqlite::{playlist_lock::PlaylistLocks, Error as UsecaseSqliteError};

pub mod config;
pub mod routes;

pub use config::Config;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        match err {
            api::Error::BadRequest(err) => Self::BadRequest(err),
            api::Error::Backend(err) => err.into(),
            api::Error::Other(err) => Self::Other(err),
        }
    }
}

impl From<UsecaseSqliteError> for Error {
    fn from(err: UsecaseSqliteError) -> Self {
        match err {
            UsecaseSqliteError::Usecase(err) => err.into(),
            UsecaseSqliteError::Storage(err) => Self::Other(err.into()),
            UsecaseSqliteError::Repository(err) => err.into(),
            UsecaseSqliteError::Other(err) => Self::Other(err),
        }
    }
}

impl From<UsecaseError> for Error {
    fn from(err: UsecaseError) -> Self {
        match err {
            UsecaseError::InvalidInput(msg) => Self::BadRequest(anyhow::Error::msg(msg)),
            UsecaseError::NotFound => Self::NotFound,
            UsecaseError::Conflict => Self::Conflict,
            UsecaseError::StoreFailure(err) => {
                log::error!("store failure: {err:#}");
                Self::ServiceUnavailable
            }
            UsecaseError::Cancelled => Self::Timeout { reason: "request cancelled".to_owned() },
            UsecaseError::Internal(err) => Self::Other(err),
        }
    }
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound,
            RepoError::Conflict => Self::Conflict,
            RepoError::Other(err) => Self::Other(err),
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

/// Shared, cheaply cloneable handle to everything a route needs: the
/// Store, the per-playlist advisory locks, and the feature-flag
/// configuration (§6).
#[derive(Debug, Clone)]
pub struct AppState {
    pub db_gatekeeper: Arc<Gatekeeper>,
    pub playlist_locks: Arc<PlaylistLocks>,
    pub config: Arc<Config>,
}

/// An API error serializable to JSON (mirrors `Error`, never leaks
/// internals beyond a human-readable `message`).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorResponseBody {
    code: u16,
    message: String,
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_owned()
}

#[allow(clippy::unused_async)]
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let message;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        message = status_code_to_string(code);
    } else if let Some(err) = reject.find::<InvalidQuery>() {
        code = StatusCode::BAD_REQUEST;
        message = err.source().map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<BodyDeserializeError>() {
        code = StatusCode::BAD_REQUEST;
        message = err.source().map_or_else(|| err.to_string(), ToString::to_string);
    } else if let Some(err) = reject.find::<Error>() {
        match err {
            Error::BadRequest(err) => {
                code = StatusCode::BAD_REQUEST;
                message = err.to_string();
            }
            Error::NotFound => {
                code = StatusCode::NOT_FOUND;
                message = status_code_to_string(code);
            }
            Error::Conflict => {
                code = StatusCode::CONFLICT;
                message = status_code_to_string(code);
            }
            Error::ServiceUnavailable => {
                code = StatusCode::SERVICE_UNAVAILABLE;
                message = status_code_to_string(code);
            }
            Error::Timeout { reason } => {
                // §7: "Cancelled (499-equivalent or connection-closed)";
                // warp has no 499, 408 is the closest standard code.
                code = StatusCode::REQUEST_TIMEOUT;
                message = reason.clone();
            }
            Error::Other(err) => {
                code = StatusCode::INTERNAL_SERVER_ERROR;
                message = err.to_string();
            }
        }
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // Least priority: most rejections also carry a MethodNotAllowed.
        code = StatusCode::METHOD_NOT_ALLOWED;
        message = err.to_string();
    } else {
        log::error!("unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        message = format!("{reject:?}");
    }

    let json_reply = warp::reply::json(&ErrorResponseBody { code: code.as_u16(), message });
    Ok(warp::reply::with_status(json_reply, code))
}

pub(crate) const DEFAULT_INGESTION_TIMEOUT: Duration = Duration::from_secs(30);
pub(crate) const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(10);

pub fn create_filters(
    state: AppState,
) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    routes::recs_capture(state.clone())
        .or(routes::recs_seed(state.clone()))
        .or(routes::recs_appendix(state.clone()))
        .or(routes::dismiss(state.clone()))
        .or(routes::clear_dismissals(state.clone()))
        .or(routes::stats(state))
}

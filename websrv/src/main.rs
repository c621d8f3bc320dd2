// SPDX-License-Identifier: AGPL-3.0-or-later

#![warn(rust_2018_idioms)]
#![warn(missing_debug_implementations)]
#![warn(unreachable_pub)]
#![warn(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Standalone daemon: loads a RON config, provisions the embedded
//! SQLite store, binds the warp server, and serves the Dispatch
//! Surface (C7, §6) until a shutdown signal arrives.

use std::{
    net::SocketAddr,
    num::{NonZeroU32, NonZeroU64},
    path::PathBuf,
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use listmagify_backend_embedded::storage::{provision_database, DatabaseConfig};
use listmagify_storage_sqlite::connection::{
    pool::{self, gatekeeper},
    Config as ConnectionConfig, Storage,
};
use listmagify_usecases_sqlite::playlist_lock::PlaylistLocks;
use listmagify_websrv_warp_sqlite::{self as websrv, AppState, Config as DispatchConfig};

/// Exit code for a clean shutdown (§6).
const EXIT_OK: i32 = 0;
/// Exit code for any fatal error other than the two below (§6).
const EXIT_FATAL: i32 = 1;
/// Exit code when schema migration fails during startup (§6).
const EXIT_MIGRATION_FAILED: i32 = 2;
/// Exit code when the listener fails to bind (§6).
const EXIT_BIND_FAILED: i32 = 3;

const DEFAULT_CONFIG_FILE_NAME: &str = "listmagify.ron";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppConfig {
    bind_address: SocketAddr,
    database_path: PathBuf,
    #[serde(default)]
    dispatch: DispatchConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: ([127, 0, 0, 1], 8080).into(),
            database_path: PathBuf::from("listmagify.sqlite"),
            dispatch: DispatchConfig::default(),
        }
    }
}

fn config_file_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("LISTMAGIFY_CONFIG") {
        return Some(PathBuf::from(path));
    }
    directories::ProjectDirs::from("", "", "listmagify")
        .map(|dirs| dirs.config_dir().join(DEFAULT_CONFIG_FILE_NAME))
}

fn load_config() -> anyhow::Result<AppConfig> {
    let Some(path) = config_file_path() else {
        return Ok(AppConfig::default());
    };
    if !path.exists() {
        log::info!("No config file at {}, using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(&path)?;
    let config = ron::from_str(&contents)?;
    Ok(config)
}

fn database_config(database_path: &std::path::Path) -> DatabaseConfig {
    DatabaseConfig {
        connection: ConnectionConfig {
            storage: Storage::File { path: database_path.to_owned() },
            pool: pool::Config {
                max_size: NonZeroU32::new(4).expect("non-zero"),
                gatekeeper: gatekeeper::Config {
                    acquire_read_timeout_millis: NonZeroU64::new(5_000).expect("non-zero"),
                    acquire_write_timeout_millis: NonZeroU64::new(5_000).expect("non-zero"),
                },
            },
        },
    }
}

fn init_logging() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing_log::LogTracer::init().expect("failed to bridge `log` into `tracing`");
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    let exit_code = match run().await {
        Ok(()) => EXIT_OK,
        Err(err) => {
            log::error!("fatal error: {err:#}");
            err.downcast_ref::<StartupFailure>().map_or(EXIT_FATAL, StartupFailure::exit_code)
        }
    };
    std::process::exit(exit_code);
}

#[derive(Debug, thiserror::Error)]
enum StartupFailure {
    #[error("database migration failed: {0}")]
    Migration(#[source] anyhow::Error),

    #[error("failed to bind {0}: {1}")]
    Bind(SocketAddr, #[source] std::io::Error),
}

impl StartupFailure {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Migration(_) => EXIT_MIGRATION_FAILED,
            Self::Bind(..) => EXIT_BIND_FAILED,
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = load_config()?;
    let db_config = database_config(&config.database_path);

    let db_gatekeeper = tokio::task::spawn_blocking(move || provision_database(&db_config))
        .await?
        .map_err(StartupFailure::Migration)?;

    let state = AppState {
        db_gatekeeper: Arc::new(db_gatekeeper),
        playlist_locks: Arc::new(PlaylistLocks::new()),
        config: Arc::new(config.dispatch),
    };

    let filters = websrv::create_filters(state).recover(websrv::handle_rejection);

    let (_, server) = warp::serve(filters)
        .try_bind_with_graceful_shutdown(config.bind_address, async {
            tokio::signal::ctrl_c().await.ok();
            log::info!("shutdown signal received");
        })
        .map_err(|err| {
            StartupFailure::Bind(config.bind_address, std::io::Error::new(std::io::ErrorKind::AddrInUse, err))
        })?;

    log::info!("listening on {}", config.bind_address);
    server.await;
    Ok(())
}

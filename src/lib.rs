pub mod core;
pub mod schemas;
pub mod services;
pub mod storage;
pub mod stores;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use crate::core::{config::Settings, state::AppState, telemetry};
use crate::services::file_store::FileStore;
use crate::storage::json_file::JsonFileBackend;
use crate::storage::KeyValueBackend;
use crate::stores::data::DataStore;
use crate::stores::session::SessionStore;

/// Composition root: loads settings from the environment, initializes
/// tracing, opens the file-backed persistence under the configured data
/// directory, and constructs the stores.
pub fn init() -> anyhow::Result<AppState> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init_tracing(&settings);

    let backend: Arc<dyn KeyValueBackend> =
        Arc::new(JsonFileBackend::open(settings.storage().state_dir())?);

    let session = SessionStore::open(Arc::clone(&backend), settings.auth());
    let data = DataStore::open(Arc::clone(&backend))?;
    let files =
        FileStore::open(settings.storage().data_dir(), Arc::clone(&backend), settings.uploads())?;

    tracing::info!(
        data_dir = %settings.storage().data_dir().display(),
        environment = settings.runtime().environment.as_str(),
        "EasyEdu core ready"
    );

    Ok(AppState::new(settings, session, data, files))
}

use std::sync::Arc;

use crate::core::config::Settings;
use crate::services::file_store::FileStore;
use crate::stores::data::DataStore;
use crate::stores::session::SessionStore;

/// Shared handle over the configured stores. Cheap to clone; the view layer
/// reads through the accessors and invokes the stores' mutators.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<InnerState>,
}

struct InnerState {
    settings: Settings,
    session: SessionStore,
    data: DataStore,
    files: FileStore,
}

impl AppState {
    pub fn new(settings: Settings, session: SessionStore, data: DataStore, files: FileStore) -> Self {
        Self { inner: Arc::new(InnerState { settings, session, data, files }) }
    }

    pub fn settings(&self) -> &Settings {
        &self.inner.settings
    }

    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    pub fn data(&self) -> &DataStore {
        &self.inner.data
    }

    pub fn files(&self) -> &FileStore {
        &self.inner.files
    }
}

use tracing_subscriber::{fmt, EnvFilter};

use crate::core::config::Settings;

pub(crate) fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.telemetry().log_level.clone()));

    let builder = fmt().with_env_filter(filter).with_target(false);

    let result =
        if settings.telemetry().json { builder.json().try_init() } else { builder.try_init() };

    if result.is_err() {
        // A subscriber is already installed, e.g. when tests reopen the app.
        tracing::debug!("tracing subscriber already installed; keeping the existing one");
    }
}

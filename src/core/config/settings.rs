use std::path::PathBuf;

use super::parsing::{
    env_optional, env_or_default, is_supported_document_extension, is_supported_video_extension,
    parse_bool, parse_class_level, parse_environment, parse_string_list, parse_u64,
};
use super::types::{
    AuthSettings, ConfigError, RuntimeSettings, Settings, StorageSettings, TelemetrySettings,
    UploadSettings,
};

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            parse_environment(env_optional("EASYEDU_ENV").or_else(|| env_optional("ENVIRONMENT")));
        let strict_config =
            env_optional("EASYEDU_STRICT_CONFIG").map(|value| parse_bool(&value)).unwrap_or(false)
                || environment.is_production();

        let data_dir = PathBuf::from(env_or_default("EASYEDU_DATA_DIR", "data"));

        let simulated_latency_ms = parse_u64(
            "AUTH_SIMULATED_LATENCY_MS",
            env_or_default("AUTH_SIMULATED_LATENCY_MS", "1000"),
        )?;
        let default_student_class = parse_class_level(
            "DEFAULT_STUDENT_CLASS",
            env_or_default("DEFAULT_STUDENT_CLASS", "6th"),
        )?;

        let max_upload_size_mb =
            parse_u64("MAX_UPLOAD_SIZE_MB", env_or_default("MAX_UPLOAD_SIZE_MB", "100"))?;
        let allowed_video_extensions =
            parse_string_list(env_optional("ALLOWED_VIDEO_EXTENSIONS"), &["mp4", "webm", "mov"]);
        let allowed_document_extensions =
            parse_string_list(env_optional("ALLOWED_DOCUMENT_EXTENSIONS"), &["pdf"]);

        let log_level = env_or_default("EASYEDU_LOG_LEVEL", "info");
        let json = env_optional("EASYEDU_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            runtime: RuntimeSettings { environment, strict_config },
            storage: StorageSettings { data_dir },
            auth: AuthSettings { simulated_latency_ms, default_student_class },
            uploads: UploadSettings {
                max_upload_size_mb,
                allowed_video_extensions,
                allowed_document_extensions,
            },
            telemetry: TelemetrySettings { log_level, json },
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    pub fn storage(&self) -> &StorageSettings {
        &self.storage
    }

    pub fn auth(&self) -> &AuthSettings {
        &self.auth
    }

    pub fn uploads(&self) -> &UploadSettings {
        &self.uploads
    }

    pub fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingValue("EASYEDU_DATA_DIR"));
        }

        if self.uploads.max_upload_size_mb == 0 {
            return Err(ConfigError::InvalidValue {
                field: "MAX_UPLOAD_SIZE_MB",
                value: "0".to_string(),
            });
        }

        if self.uploads.allowed_video_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ALLOWED_VIDEO_EXTENSIONS",
                value: String::from("<empty>"),
            });
        }

        for extension in &self.uploads.allowed_video_extensions {
            if !is_supported_video_extension(extension) {
                return Err(ConfigError::InvalidValue {
                    field: "ALLOWED_VIDEO_EXTENSIONS",
                    value: extension.clone(),
                });
            }
        }

        if self.uploads.allowed_document_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "ALLOWED_DOCUMENT_EXTENSIONS",
                value: String::from("<empty>"),
            });
        }

        for extension in &self.uploads.allowed_document_extensions {
            if !is_supported_document_extension(extension) {
                return Err(ConfigError::InvalidValue {
                    field: "ALLOWED_DOCUMENT_EXTENSIONS",
                    value: extension.clone(),
                });
            }
        }

        if self.runtime.strict_config || self.runtime.environment.is_production() {
            let data_dir = self.storage.data_dir.as_path();
            if !data_dir.exists() || !data_dir.is_dir() {
                return Err(ConfigError::InvalidValue {
                    field: "EASYEDU_DATA_DIR",
                    value: data_dir.display().to_string(),
                });
            }
        }

        Ok(())
    }
}

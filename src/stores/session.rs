use std::sync::{Arc, RwLock};
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

use crate::core::config::AuthSettings;
use crate::schemas::auth::{LoginRequest, SignupRequest};
use crate::schemas::describe_validation_errors;
use crate::storage::models::User;
use crate::storage::types::{ClassLevel, UserRole};
use crate::storage::{keys, load_json, store_json, KeyValueBackend, StorageError};
use crate::stores::{read_lock, write_lock};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Invalid(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Holds the single current session. Login and signup are mock boundaries:
/// no credential is ever verified, they always succeed on valid input. A
/// real backend would replace this store wholesale.
pub struct SessionStore {
    backend: Arc<dyn KeyValueBackend>,
    simulated_latency: Duration,
    default_student_class: ClassLevel,
    current: RwLock<Option<User>>,
}

impl SessionStore {
    /// Restores the persisted session, if any. A corrupt or unreadable
    /// record is logged and treated as signed out.
    pub fn open(backend: Arc<dyn KeyValueBackend>, auth: &AuthSettings) -> Self {
        let current = match load_json::<User>(backend.as_ref(), keys::USER) {
            Ok(user) => user,
            Err(err) => {
                tracing::error!(error = %err, "failed to restore session; starting signed out");
                None
            }
        };

        if let Some(user) = &current {
            tracing::info!(user_id = %user.id, role = user.role.as_str(), "session restored");
        }

        Self {
            backend,
            simulated_latency: Duration::from_millis(auth.simulated_latency_ms),
            default_student_class: auth.default_student_class,
            current: RwLock::new(current),
        }
    }

    pub async fn login(&self, request: LoginRequest) -> Result<User, AuthError> {
        request.validate().map_err(|errors| AuthError::Invalid(describe_validation_errors(&errors)))?;

        self.simulate_network_delay().await;

        let name =
            request.email.split('@').next().filter(|part| !part.is_empty()).unwrap_or("user");
        let class = (request.role == UserRole::Student).then_some(self.default_student_class);

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: request.email,
            role: request.role,
            class,
        };

        self.replace_session(user)
    }

    pub async fn signup(&self, request: SignupRequest) -> Result<User, AuthError> {
        request.validate().map_err(|errors| AuthError::Invalid(describe_validation_errors(&errors)))?;

        self.simulate_network_delay().await;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: request.name,
            email: request.email,
            role: request.role,
            class: request.class,
        };

        self.replace_session(user)
    }

    /// Clears the current user and the persisted record synchronously.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.backend.remove(keys::USER)?;
        let mut current = write_lock(&self.current);
        if let Some(user) = current.take() {
            tracing::info!(user_id = %user.id, "session cleared");
        }
        Ok(())
    }

    pub fn user(&self) -> Option<User> {
        read_lock(&self.current).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        read_lock(&self.current).is_some()
    }

    fn replace_session(&self, user: User) -> Result<User, AuthError> {
        store_json(self.backend.as_ref(), keys::USER, &user)?;
        *write_lock(&self.current) = Some(user.clone());
        tracing::info!(user_id = %user.id, role = user.role.as_str(), "session replaced");
        Ok(user)
    }

    async fn simulate_network_delay(&self) {
        if !self.simulated_latency.is_zero() {
            tokio::time::sleep(self.simulated_latency).await;
        }
    }
}

//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::{AuthService, AuthServiceConfig, Authenticator, LogMailer};
use common::Database;
use review_service_lib::repository::ReviewStore;
use review_service_lib::service::{ReviewManager, ReviewService};
use user_service_lib::repository::UserStore;
use user_service_lib::service::{UserManager, UserService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub user_service: Arc<dyn UserService>,
    pub review_service: Arc<dyn ReviewService>,
    pub database: Database,
}

impl AppState {
    /// Wire the SeaORM-backed services onto one connection pool.
    pub fn from_database(database: Database, config: AuthServiceConfig) -> Self {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let reviews = Arc::new(ReviewStore::new(database.get_connection()));
        let notifier = Arc::new(LogMailer::new(config.mail.clone()));

        Self {
            auth_service: Arc::new(Authenticator::new(users.clone(), notifier, config)),
            user_service: Arc::new(UserManager::new(users)),
            review_service: Arc::new(ReviewManager::new(reviews)),
            database,
        }
    }

    /// Create app state from already constructed services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        review_service: Arc<dyn ReviewService>,
        database: Database,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            review_service,
            database,
        }
    }
}

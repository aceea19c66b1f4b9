pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod forms;
pub mod models;
pub mod routes;
pub mod templates;
pub mod urls;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{auth::LoginThrottle, catalog::Catalog, config::Config};

pub use routes::router;

pub struct AppState {
    pub config: Arc<Config>,
    pub db: DatabaseConnection,
    pub catalog: Catalog,
    pub login_throttle: Arc<LoginThrottle>,
}

impl AppState {
    pub fn new(config: Arc<Config>, db: DatabaseConnection) -> Self {
        let login_throttle = Arc::new(LoginThrottle::new(config.login_attempts_per_minute));
        Self { catalog: Catalog::new(db.clone()), config, db, login_throttle }
    }
}

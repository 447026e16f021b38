//! Student records service: CRUD over a single PostgreSQL table, served with axum.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{AppConfig, ServerConfig, StoreConfig};
pub use error::{Action, AppError, ConfigError, StoreError};
pub use model::{Student, StudentInput};
pub use routes::{app, common_routes, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_students_table, PgStudentStore, StudentStore};

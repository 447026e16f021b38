//! Persistence seam for students. Handlers only see [`StudentStore`]; the PostgreSQL
//! implementation lives in [`postgres`].

pub mod postgres;

use crate::error::StoreError;
use crate::model::{Student, StudentInput};
use async_trait::async_trait;

pub use postgres::{ensure_database_exists, ensure_students_table, PgStudentStore};

#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All students ordered by ascending id.
    async fn list(&self) -> Result<Vec<Student>, StoreError>;

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError>;

    /// Insert a row; the store assigns `id` and `created_at`. A duplicate email is
    /// rolled back and reported as [`StoreError::Duplicate`].
    async fn create(&self, input: &StudentInput) -> Result<Student, StoreError>;

    /// Overwrite all writable columns of row `id`. `Ok(None)` when no row matches.
    async fn update(&self, id: i32, input: &StudentInput) -> Result<Option<Student>, StoreError>;

    /// Remove row `id`. `Ok(false)` when no row matches.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;
}

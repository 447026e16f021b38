//! The student row and the values written for it.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of the `students` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Student {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub course: String,
    pub created_at: NaiveDateTime,
}

/// Values bound to an INSERT or full-row UPDATE. `None` binds SQL NULL, which the
/// store rejects for every column.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<i32>,
    pub course: Option<String>,
}

/// Writable fields, in the order presence is checked on create.
pub const STUDENT_FIELDS: [&str; 4] = ["name", "email", "age", "course"];

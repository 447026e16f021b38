//! HTTP handlers for student CRUD.

pub mod students;
pub use students::*;

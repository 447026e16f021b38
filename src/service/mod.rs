//! StudentService: the five record operations over a [`crate::store::StudentStore`].

mod students;
mod validation;
pub use students::StudentService;
pub use validation::RequestValidator;

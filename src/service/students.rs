//! Student operations: payload checks, store calls, and error mapping per action.

use crate::error::{Action, AppError};
use crate::model::Student;
use crate::service::RequestValidator;
use crate::store::StudentStore;
use serde_json::{Map, Value};

pub struct StudentService;

impl StudentService {
    pub async fn list(store: &dyn StudentStore) -> Result<Vec<Student>, AppError> {
        store
            .list()
            .await
            .map_err(|e| AppError::from_store(Action::ListStudents, e))
    }

    pub async fn get(store: &dyn StudentStore, id: i32) -> Result<Student, AppError> {
        store
            .get(id)
            .await
            .map_err(|e| AppError::from_store(Action::FetchStudent, e))?
            .ok_or(AppError::NotFound)
    }

    /// Insert after checking that all four fields are present. Values themselves are not validated.
    pub async fn create(
        store: &dyn StudentStore,
        body: &Map<String, Value>,
    ) -> Result<Student, AppError> {
        if let Some(field) = RequestValidator::first_missing(body) {
            return Err(AppError::MissingField(field));
        }
        let failed = |e| AppError::from_store(Action::CreateStudent, e);
        let input = RequestValidator::create_input(body).map_err(failed)?;
        let student = store.create(&input).await.map_err(failed)?;
        tracing::info!(id = student.id, "created student");
        Ok(student)
    }

    /// Overwrite every writable field of `id`; fields absent from `body` are reset.
    pub async fn update(
        store: &dyn StudentStore,
        id: i32,
        body: &Map<String, Value>,
    ) -> Result<Student, AppError> {
        let failed = |e| AppError::from_store(Action::UpdateStudent, e);
        let input = match RequestValidator::replace_input(body) {
            Ok(input) => input,
            // A missing row takes precedence over a value the store would refuse.
            Err(e) => {
                return match store.get(id).await.map_err(failed)? {
                    Some(_) => Err(failed(e)),
                    None => Err(AppError::NotFound),
                };
            }
        };
        let student = store
            .update(id, &input)
            .await
            .map_err(failed)?
            .ok_or(AppError::NotFound)?;
        tracing::info!(id, "updated student");
        Ok(student)
    }

    pub async fn delete(store: &dyn StudentStore, id: i32) -> Result<(), AppError> {
        let deleted = store
            .delete(id)
            .await
            .map_err(|e| AppError::from_store(Action::DeleteStudent, e))?;
        if !deleted {
            return Err(AppError::NotFound);
        }
        tracing::info!(id, "deleted student");
        Ok(())
    }
}

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use student_records::{app, AppState, Student, StudentInput, StoreError, StudentStore};
use tower::ServiceExt;

/// In-memory stand-in for the students table: serial ids, unique email, NOT NULL columns.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Table>,
    unavailable: AtomicBool,
}

#[derive(Default)]
struct Table {
    last_id: i32,
    rows: BTreeMap<i32, Student>,
}

impl MemoryStore {
    /// Make every operation fail as if the server could not be reached.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn rows(&self) -> Vec<Student> {
        self.rows.lock().unwrap().rows.values().cloned().collect()
    }

    pub fn count_with_email(&self, email: &str) -> usize {
        self.rows().iter().filter(|s| s.email == email).count()
    }

    fn check_reachable(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

fn not_null<T: Clone>(field: &'static str, value: &Option<T>) -> Result<T, StoreError> {
    value.clone().ok_or(StoreError::Rejected {
        field,
        reason: "null value violates not-null constraint".into(),
    })
}

struct Columns {
    name: String,
    email: String,
    age: i32,
    course: String,
}

fn columns(input: &StudentInput) -> Result<Columns, StoreError> {
    Ok(Columns {
        name: not_null("name", &input.name)?,
        email: not_null("email", &input.email)?,
        age: not_null("age", &input.age)?,
        course: not_null("course", &input.course)?,
    })
}

#[async_trait]
impl StudentStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        self.check_reachable()?;
        Ok(self.rows())
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError> {
        self.check_reachable()?;
        Ok(self.rows.lock().unwrap().rows.get(&id).cloned())
    }

    async fn create(&self, input: &StudentInput) -> Result<Student, StoreError> {
        self.check_reachable()?;
        let cols = columns(input)?;
        let mut table = self.rows.lock().unwrap();
        if table.rows.values().any(|s| s.email == cols.email) {
            return Err(StoreError::Duplicate);
        }
        table.last_id += 1;
        let student = Student {
            id: table.last_id,
            name: cols.name,
            email: cols.email,
            age: cols.age,
            course: cols.course,
            created_at: chrono::Utc::now().naive_utc(),
        };
        table.rows.insert(student.id, student.clone());
        Ok(student)
    }

    async fn update(&self, id: i32, input: &StudentInput) -> Result<Option<Student>, StoreError> {
        self.check_reachable()?;
        let mut table = self.rows.lock().unwrap();
        if !table.rows.contains_key(&id) {
            return Ok(None);
        }
        let cols = columns(input)?;
        if table.rows.values().any(|s| s.id != id && s.email == cols.email) {
            return Err(StoreError::Duplicate);
        }
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.name = cols.name;
        row.email = cols.email;
        row.age = cols.age;
        row.course = cols.course;
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        self.check_reachable()?;
        Ok(self.rows.lock().unwrap().rows.remove(&id).is_some())
    }
}

pub fn test_app() -> (Router, Arc<MemoryStore>) {
    test_app_with_limit(1024 * 1024)
}

pub fn test_app_with_limit(body_limit: usize) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let state = AppState {
        store: store.clone(),
    };
    (app(state, body_limit), store)
}

/// Send one request through the router and decode the JSON response (Null when empty).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, request).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

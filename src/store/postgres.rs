//! PostgreSQL-backed [`StudentStore`]. Every operation opens its own connection and closes it
//! before returning; writes run in a transaction that is rolled back on failure.

use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::model::{Student, StudentInput};
use crate::store::StudentStore;
use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection};
use sqlx::query::QueryAs;
use sqlx::{ConnectOptions, Connection, Postgres, Transaction};

const CREATE_STUDENTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS students (
        id SERIAL PRIMARY KEY,
        name VARCHAR(100) NOT NULL,
        email VARCHAR(100) UNIQUE NOT NULL,
        age INTEGER NOT NULL,
        course VARCHAR(100) NOT NULL,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
"#;

const SELECT_STUDENTS: &str =
    "SELECT id, name, email, age, course, created_at FROM students ORDER BY id";
const SELECT_STUDENT: &str =
    "SELECT id, name, email, age, course, created_at FROM students WHERE id = $1";
const SELECT_STUDENT_ID: &str = "SELECT id FROM students WHERE id = $1";
const INSERT_STUDENT: &str = "INSERT INTO students (name, email, age, course) \
     VALUES ($1, $2, $3, $4) RETURNING id, name, email, age, course, created_at";
const UPDATE_STUDENT: &str = "UPDATE students SET name = $1, email = $2, age = $3, course = $4 \
     WHERE id = $5 RETURNING id, name, email, age, course, created_at";
const DELETE_STUDENT: &str = "DELETE FROM students WHERE id = $1";

#[derive(Clone, Debug)]
pub struct PgStudentStore {
    options: PgConnectOptions,
}

impl PgStudentStore {
    pub fn new(config: &StoreConfig) -> Self {
        PgStudentStore {
            options: config.connect_options(),
        }
    }

    async fn connect(&self) -> Result<PgConnection, StoreError> {
        self.options.connect().await.map_err(StoreError::Unavailable)
    }
}

#[async_trait]
impl StudentStore for PgStudentStore {
    async fn list(&self) -> Result<Vec<Student>, StoreError> {
        let mut conn = self.connect().await?;
        tracing::debug!(sql = %SELECT_STUDENTS, "query");
        let result = sqlx::query_as::<_, Student>(SELECT_STUDENTS)
            .fetch_all(&mut conn)
            .await
            .map_err(StoreError::from);
        release(conn).await;
        result
    }

    async fn get(&self, id: i32) -> Result<Option<Student>, StoreError> {
        let mut conn = self.connect().await?;
        tracing::debug!(sql = %SELECT_STUDENT, id, "query");
        let result = sqlx::query_as::<_, Student>(SELECT_STUDENT)
            .bind(id)
            .fetch_optional(&mut conn)
            .await
            .map_err(StoreError::from);
        release(conn).await;
        result
    }

    async fn create(&self, input: &StudentInput) -> Result<Student, StoreError> {
        let mut conn = self.connect().await?;
        let result = insert(&mut conn, input).await;
        release(conn).await;
        result
    }

    async fn update(&self, id: i32, input: &StudentInput) -> Result<Option<Student>, StoreError> {
        let mut conn = self.connect().await?;
        let result = replace(&mut conn, id, input).await;
        release(conn).await;
        result
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut conn = self.connect().await?;
        let result = remove(&mut conn, id).await;
        release(conn).await;
        result
    }
}

fn bind_input<'q>(
    query: QueryAs<'q, Postgres, Student, PgArguments>,
    input: &'q StudentInput,
) -> QueryAs<'q, Postgres, Student, PgArguments> {
    query
        .bind(input.name.as_deref())
        .bind(input.email.as_deref())
        .bind(input.age)
        .bind(input.course.as_deref())
}

async fn insert(conn: &mut PgConnection, input: &StudentInput) -> Result<Student, StoreError> {
    let mut tx = conn.begin().await?;
    tracing::debug!(sql = %INSERT_STUDENT, "query (tx)");
    let inserted = bind_input(sqlx::query_as(INSERT_STUDENT), input)
        .fetch_one(&mut *tx)
        .await;
    match inserted {
        Ok(student) => {
            tx.commit().await?;
            Ok(student)
        }
        Err(e) => Err(abort(tx, e).await),
    }
}

/// Existence check then full-row overwrite, both inside one transaction.
async fn replace(
    conn: &mut PgConnection,
    id: i32,
    input: &StudentInput,
) -> Result<Option<Student>, StoreError> {
    let mut tx = conn.begin().await?;
    tracing::debug!(sql = %SELECT_STUDENT_ID, id, "query (tx)");
    let existing = sqlx::query_scalar::<_, i32>(SELECT_STUDENT_ID)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await;
    match existing {
        Ok(Some(_)) => {}
        Ok(None) => {
            tx.rollback().await?;
            return Ok(None);
        }
        Err(e) => return Err(abort(tx, e).await),
    }

    tracing::debug!(sql = %UPDATE_STUDENT, id, "query (tx)");
    let updated = bind_input(sqlx::query_as(UPDATE_STUDENT), input)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await;
    match updated {
        Ok(row) => {
            tx.commit().await?;
            Ok(row)
        }
        Err(e) => Err(abort(tx, e).await),
    }
}

async fn remove(conn: &mut PgConnection, id: i32) -> Result<bool, StoreError> {
    let mut tx = conn.begin().await?;
    tracing::debug!(sql = %DELETE_STUDENT, id, "query (tx)");
    let deleted = sqlx::query(DELETE_STUDENT).bind(id).execute(&mut *tx).await;
    match deleted {
        Ok(done) if done.rows_affected() == 0 => {
            tx.rollback().await?;
            Ok(false)
        }
        Ok(_) => {
            tx.commit().await?;
            Ok(true)
        }
        Err(e) => Err(abort(tx, e).await),
    }
}

/// Roll back `tx` and classify the statement error that caused it.
async fn abort(tx: Transaction<'_, Postgres>, e: sqlx::Error) -> StoreError {
    if let Err(rollback) = tx.rollback().await {
        tracing::warn!(error = %rollback, "rollback failed");
    }
    StoreError::from(e)
}

async fn release(conn: PgConnection) {
    if let Err(e) = conn.close().await {
        tracing::warn!(error = %e, "closing store connection");
    }
}

/// Create the `students` table if it does not exist.
pub async fn ensure_students_table(config: &StoreConfig) -> Result<(), StoreError> {
    let mut conn = config
        .connect_options()
        .connect()
        .await
        .map_err(StoreError::Unavailable)?;
    let result = sqlx::query(CREATE_STUDENTS_TABLE)
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(StoreError::from);
    release(conn).await;
    result
}

/// Ensure the configured database exists; create it if not. Connects to the maintenance
/// `postgres` database to run CREATE DATABASE. Call before [`ensure_students_table`].
pub async fn ensure_database_exists(config: &StoreConfig) -> Result<(), StoreError> {
    if config.database.is_empty() || config.database == "postgres" {
        return Ok(());
    }
    let mut conn = config
        .connect_options_for("postgres")
        .connect()
        .await
        .map_err(StoreError::Unavailable)?;
    let result = create_database_if_missing(&mut conn, &config.database).await;
    release(conn).await;
    result
}

async fn create_database_if_missing(conn: &mut PgConnection, name: &str) -> Result<(), StoreError> {
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(name)
            .fetch_one(&mut *conn)
            .await?;
    if !exists.0 {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(name)))
            .execute(&mut *conn)
            .await?;
        tracing::info!(database = %name, "created database");
    }
    Ok(())
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

use crate::domain::model::{Person, PersonFilter};
use crate::domain::ports::PersonStore;
use crate::utils::error::{AppError, Result};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgPoolOptions;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use std::time::Duration;

const PERSON_COLUMNS: &str = "id, name, surname, patronymic, age, gender, nationality, \
     is_active, created_at, updated_at, deleted_at";

const MIGRATIONS: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS persons (
        id          BIGSERIAL PRIMARY KEY,
        name        TEXT NOT NULL,
        surname     TEXT NOT NULL,
        patronymic  TEXT NOT NULL DEFAULT '',
        age         INTEGER NOT NULL DEFAULT 0,
        gender      TEXT NOT NULL DEFAULT '',
        nationality TEXT NOT NULL DEFAULT '',
        is_active   BOOLEAN NOT NULL DEFAULT TRUE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        deleted_at  TIMESTAMPTZ
    )",
    "CREATE INDEX IF NOT EXISTS idx_persons_name ON persons (name)",
    "CREATE INDEX IF NOT EXISTS idx_persons_surname ON persons (surname)",
];

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Storage {
            message: e.to_string(),
        }
    }
}

#[derive(Debug, FromRow)]
struct PersonRow {
    id: i64,
    name: String,
    surname: String,
    patronymic: String,
    age: i32,
    gender: String,
    nationality: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
}

impl From<PersonRow> for Person {
    fn from(row: PersonRow) -> Self {
        Self {
            id: row.id.max(0) as u64,
            name: row.name,
            surname: row.surname,
            patronymic: row.patronymic,
            age: row.age.max(0) as u32,
            gender: row.gender,
            nationality: row.nationality,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
            deleted_at: row.deleted_at,
        }
    }
}

fn row_id(id: u64) -> Result<i64> {
    i64::try_from(id).map_err(|_| AppError::NotFound { id })
}

fn row_age(age: u32) -> Result<i32> {
    i32::try_from(age).map_err(|_| AppError::ValidationError {
        message: format!("age {} is out of range", age),
    })
}

/// 依 filter 組出列表查詢；只列出 is_active 的紀錄
fn list_query(filter: &PersonFilter) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "SELECT {} FROM persons WHERE is_active = TRUE",
        PERSON_COLUMNS
    ));

    let text_filters = [
        ("name", &filter.name),
        ("surname", &filter.surname),
        ("patronymic", &filter.patronymic),
        ("gender", &filter.gender),
        ("nationality", &filter.nationality),
    ];
    for (column, value) in text_filters {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            query.push(format!(" AND {} ILIKE ", column));
            query.push_bind(format!("%{}%", value));
        }
    }

    if let Some(min_age) = filter.min_age {
        query.push(" AND age >= ");
        query.push_bind(min_age as i64);
    }
    if let Some(max_age) = filter.max_age {
        query.push(" AND age <= ");
        query.push_bind(max_age as i64);
    }

    query.push(" ORDER BY id LIMIT ");
    query.push_bind(filter.limit as i64);
    query.push(" OFFSET ");
    query.push_bind(filter.offset as i64);
    query
}

/// 以 PostgreSQL 保存的 person 表（`--storage postgres`）
#[derive(Debug, Clone)]
pub struct PostgresPersonStore {
    pool: PgPool,
}

impl PostgresPersonStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await
            .map_err(|e| {
                tracing::warn!("Failed to connect to database: {}", e);
                e
            })?;

        tracing::info!("Database connection pool created");
        Ok(Self::new(pool))
    }

    /// 建立 persons 表與索引，可重複執行
    pub async fn migrate(&self) -> Result<()> {
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::debug!("persons table is up to date");
        Ok(())
    }
}

impl PersonStore for PostgresPersonStore {
    async fn create(&self, person: Person) -> Result<Person> {
        let row: PersonRow = sqlx::query_as(&format!(
            "INSERT INTO persons (name, surname, patronymic, age, gender, nationality, \
             is_active, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING {}",
            PERSON_COLUMNS
        ))
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(row_age(person.age)?)
        .bind(&person.gender)
        .bind(&person.nationality)
        .bind(person.is_active)
        .bind(person.created_at)
        .bind(person.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn get_by_id(&self, id: u64) -> Result<Person> {
        let row: Option<PersonRow> = sqlx::query_as(&format!(
            "SELECT {} FROM persons WHERE id = $1",
            PERSON_COLUMNS
        ))
        .bind(row_id(id)?)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Person::from).ok_or(AppError::NotFound { id })
    }

    async fn get_all(&self, filter: &PersonFilter) -> Result<Vec<Person>> {
        let rows: Vec<PersonRow> = list_query(filter)
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Person::from).collect())
    }

    async fn update(&self, person: Person) -> Result<Person> {
        let row: Option<PersonRow> = sqlx::query_as(&format!(
            "UPDATE persons SET name = $2, surname = $3, patronymic = $4, age = $5, \
             gender = $6, nationality = $7, updated_at = $8 \
             WHERE id = $1 RETURNING {}",
            PERSON_COLUMNS
        ))
        .bind(row_id(person.id)?)
        .bind(&person.name)
        .bind(&person.surname)
        .bind(&person.patronymic)
        .bind(row_age(person.age)?)
        .bind(&person.gender)
        .bind(&person.nationality)
        .bind(person.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Person::from).ok_or(AppError::NotFound { id: person.id })
    }

    async fn soft_delete(&self, id: u64) -> Result<()> {
        let result = sqlx::query(
            "UPDATE persons SET is_active = FALSE, deleted_at = NOW(), updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(row_id(id)?)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound { id });
        }
        Ok(())
    }
}

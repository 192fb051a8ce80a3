use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use super::{Employee, EmployeeUpdate, NewEmployee, Store, StoreError};
use async_trait::async_trait;

const SELECT_COLUMNS: &str = "employee_id, name, age, address, superior_id";

/// PostgreSQL-backed store. One pool for the lifetime of the process.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connects and bootstraps the schema. `superior_id` carries a
    /// self-referential foreign key as a backstop; cycle prevention is
    /// deliberately not attempted here (cycles are detected at traversal
    /// time instead).
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS employees (
                employee_id BIGSERIAL PRIMARY KEY,
                name VARCHAR(30) NOT NULL,
                age INTEGER NOT NULL,
                address VARCHAR(255) NOT NULL,
                superior_id BIGINT REFERENCES employees (employee_id)
            )",
        )
        .execute(&pool)
        .await?;

        info!("connected to employees database");
        Ok(Self { pool })
    }
}

/// Escape LIKE metacharacters so a search prefix matches literally.
fn escape_like(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len());
    for c in prefix.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
impl Store for PgStore {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employees ORDER BY employee_id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        let row = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employees WHERE employee_id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Employee>, StoreError> {
        let pattern = format!("{}%", escape_like(prefix));
        let rows = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employees WHERE name LIKE $1 ESCAPE '\\' ORDER BY employee_id"
        ))
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn find_by_superior(&self, id: i64) -> Result<Vec<Employee>, StoreError> {
        let rows = sqlx::query_as::<_, Employee>(&format!(
            "SELECT {SELECT_COLUMNS} FROM employees WHERE superior_id = $1 ORDER BY employee_id"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let row = sqlx::query_as::<_, Employee>(&format!(
            "INSERT INTO employees (name, age, address, superior_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.age)
        .bind(&new.address)
        .bind(new.superior_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn update(&self, id: i64, change: EmployeeUpdate) -> Result<Employee, StoreError> {
        // COALESCE keeps the stored superior when no new one was supplied.
        let row = sqlx::query_as::<_, Employee>(&format!(
            "UPDATE employees
             SET name = $1, age = $2, address = $3,
                 superior_id = COALESCE($4, superior_id)
             WHERE employee_id = $5
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(&change.name)
        .bind(change.age)
        .bind(&change.address)
        .bind(change.superior_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.ok_or(StoreError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let orphaned = sqlx::query("UPDATE employees SET superior_id = NULL WHERE superior_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let removed = sqlx::query("DELETE FROM employees WHERE employee_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if removed == 0 {
            tx.rollback().await?;
            return Err(StoreError::NotFound(id));
        }

        tx.commit().await?;
        Ok(orphaned)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

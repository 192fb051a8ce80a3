use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// A single employee record as persisted.
///
/// `superior_id` is absent for roots. The column is named `employee_id` in
/// the database but serializes as `id` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Employee {
    #[sqlx(rename = "employee_id")]
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub address: String,
    pub superior_id: Option<i64>,
}

/// Wire shape for hierarchy traversal results: `{id, name, superior_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRef {
    pub id: i64,
    pub name: String,
    pub superior_id: Option<i64>,
}

impl From<&Employee> for EmployeeRef {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            superior_id: e.superior_id,
        }
    }
}

/// Wire shape for name search results: `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeName {
    pub id: i64,
    pub name: String,
}

impl From<&Employee> for EmployeeName {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
        }
    }
}

/// Fields for a new record. The id is generated by the store; superior
/// validation happens in the API layer before this is built.
#[derive(Debug, Clone)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub superior_id: Option<i64>,
}

/// Changes applied by `Store::update`. `name`/`age`/`address` always
/// overwrite; `superior_id: None` leaves the stored superior unchanged
/// (an update cannot clear a superior, only deletion of the superior can).
#[derive(Debug, Clone)]
pub struct EmployeeUpdate {
    pub name: String,
    pub age: i32,
    pub address: String,
    pub superior_id: Option<i64>,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("employee {0} not found")]
    NotFound(i64),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence seam for employee records.
///
/// Constructed once at startup and passed by handle into the API layer and
/// hierarchy engine. `PgStore` backs production; `MemoryStore` backs
/// development without a database and the test suite.
#[async_trait]
pub trait Store: Send + Sync {
    /// Every record, in id order.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError>;

    /// Case-sensitive match anchored at the start of the name. Returns an
    /// empty vec, not an error, when nothing matches.
    async fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Employee>, StoreError>;

    /// Direct subordinates only. Unused or nonexistent ids yield an empty vec.
    async fn find_by_superior(&self, id: i64) -> Result<Vec<Employee>, StoreError>;

    async fn insert(&self, new: NewEmployee) -> Result<Employee, StoreError>;

    async fn update(&self, id: i64, change: EmployeeUpdate) -> Result<Employee, StoreError>;

    /// Removes the record and clears `superior_id` on every direct
    /// subordinate as one operation. Returns the number of orphaned
    /// subordinates.
    async fn delete(&self, id: i64) -> Result<u64, StoreError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

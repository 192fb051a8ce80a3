use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Employee, EmployeeUpdate, NewEmployee, Store, StoreError};

/// In-process store. Used when no `DATABASE_URL` is configured and by the
/// test suite. A `BTreeMap` keyed by id keeps listings in id order like the
/// SQL store.
pub struct MemoryStore {
    records: RwLock<BTreeMap<i64, Employee>>,
    next_id: AtomicI64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>, StoreError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_name_prefix(&self, prefix: &str) -> Result<Vec<Employee>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|e| e.name.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn find_by_superior(&self, id: i64) -> Result<Vec<Employee>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|e| e.superior_id == Some(id))
            .cloned()
            .collect())
    }

    async fn insert(&self, new: NewEmployee) -> Result<Employee, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let employee = Employee {
            id,
            name: new.name,
            age: new.age,
            address: new.address,
            superior_id: new.superior_id,
        };
        self.records.write().await.insert(id, employee.clone());
        Ok(employee)
    }

    async fn update(&self, id: i64, change: EmployeeUpdate) -> Result<Employee, StoreError> {
        let mut records = self.records.write().await;
        let employee = records.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        employee.name = change.name;
        employee.age = change.age;
        employee.address = change.address;
        if let Some(superior_id) = change.superior_id {
            employee.superior_id = Some(superior_id);
        }
        Ok(employee.clone())
    }

    async fn delete(&self, id: i64) -> Result<u64, StoreError> {
        let mut records = self.records.write().await;
        records.remove(&id).ok_or(StoreError::NotFound(id))?;

        let mut orphaned = 0;
        for employee in records.values_mut() {
            if employee.superior_id == Some(id) {
                employee.superior_id = None;
                orphaned += 1;
            }
        }
        Ok(orphaned)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

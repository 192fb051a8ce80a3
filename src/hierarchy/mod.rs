//! Read-only traversal over the store: command chains and subordinate
//! listings. The store tolerates cycles in `superior_id` at write time, so
//! every upward walk here carries a visited set and fails instead of looping.

use std::collections::{HashSet, VecDeque};

use thiserror::Error;

use crate::store::{EmployeeRef, Store, StoreError};

#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("employee {0} not found")]
    NotFound(i64),

    /// The superior chain starting at this employee revisits an id.
    #[error("superior chain for employee {0} contains a cycle")]
    CycleDetected(i64),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Walks `superior_id` references upward from the given employee,
/// prepending each one visited, so the result is ordered root first with
/// the queried employee last. A root employee yields a chain of itself.
///
/// Fails with `NotFound` when the starting id does not resolve (or when a
/// stored superior reference turns out to be dangling mid-walk), and with
/// `CycleDetected` when the walk revisits an id.
pub async fn command_chain(
    store: &dyn Store,
    employee_id: i64,
) -> Result<Vec<EmployeeRef>, HierarchyError> {
    let mut current = store
        .find_by_id(employee_id)
        .await?
        .ok_or(HierarchyError::NotFound(employee_id))?;

    let mut chain = VecDeque::new();
    chain.push_back(EmployeeRef::from(&current));

    let mut seen = HashSet::new();
    seen.insert(current.id);

    while let Some(superior_id) = current.superior_id {
        let superior = store
            .find_by_id(superior_id)
            .await?
            .ok_or(HierarchyError::NotFound(superior_id))?;

        if !seen.insert(superior.id) {
            return Err(HierarchyError::CycleDetected(employee_id));
        }

        chain.push_front(EmployeeRef::from(&superior));
        current = superior;
    }

    Ok(chain.into())
}

/// Direct subordinates only, one level down. No existence check on the id:
/// an unused or nonexistent id simply yields an empty vec, matching the
/// store's unconditional query.
pub async fn subordinates(
    store: &dyn Store,
    employee_id: i64,
) -> Result<Vec<EmployeeRef>, HierarchyError> {
    let employees = store.find_by_superior(employee_id).await?;
    Ok(employees.iter().map(EmployeeRef::from).collect())
}

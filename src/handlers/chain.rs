//! Hierarchy traversal endpoints, thin wrappers over the hierarchy engine.

use axum::extract::{Path, State};
use axum::Json;

use crate::error::ApiError;
use crate::hierarchy;
use crate::messages;
use crate::store::EmployeeRef;
use crate::AppState;

/// GET /command-chain/:employee_id - path from the root down to the
/// employee, root first
pub async fn command_chain(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<EmployeeRef>>, ApiError> {
    if employee_id == 0 {
        return Err(ApiError::bad_request(messages::INVALID_EMPLOYEE));
    }

    let chain = hierarchy::command_chain(state.store.as_ref(), employee_id).await?;
    Ok(Json(chain))
}

/// GET /subordinates/:employee_id - direct reports only
pub async fn subordinates(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<EmployeeRef>>, ApiError> {
    if employee_id == 0 {
        return Err(ApiError::bad_request(messages::INVALID_EMPLOYEE));
    }

    let subs = hierarchy::subordinates(state.store.as_ref(), employee_id).await?;
    Ok(Json(subs))
}

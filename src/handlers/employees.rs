//! CRUD endpoints for the employee table. Request bodies parse into typed
//! structs with optional fields, then an explicit validation step produces
//! the exact legacy error messages before any store call runs.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::messages;
use crate::store::{Employee, EmployeeName, EmployeeUpdate, NewEmployee};
use crate::AppState;

const MAX_NAME_LEN: usize = 30;
const MAX_ADDRESS_LEN: usize = 255;

/// GET / - every employee, full records
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.store.list_all().await?))
}

/// GET /search/:name - anchored case-sensitive prefix match on the name
pub async fn search(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<EmployeeName>>, ApiError> {
    if name.is_empty() {
        return Err(ApiError::bad_request(messages::INVALID_EMPLOYEE_NAME));
    }

    let matches = state.store.find_by_name_prefix(&name).await?;
    Ok(Json(matches.iter().map(EmployeeName::from).collect()))
}

/// GET /get-employee/:employee_id
pub async fn show(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    if employee_id == 0 {
        return Err(ApiError::bad_request(messages::INVALID_EMPLOYEE));
    }

    state
        .store
        .find_by_id(employee_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(messages::NO_EMPLOYEE))
}

#[derive(Debug, Deserialize)]
pub struct AddEmployeeRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub superior_id: Option<i64>,
}

/// POST /add
pub async fn add(
    State(state): State<AppState>,
    body: Result<Json<AddEmployeeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body.map_err(|_| ApiError::bad_request(messages::INVALID_EMPLOYEE_DATA))?;

    let new = validate_add(req)?;
    if let Some(superior_id) = new.superior_id {
        ensure_superior_exists(&state, superior_id).await?;
    }

    state.store.insert(new).await?;
    Ok(Json(json!(messages::EMPLOYEE_ADDED)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub address: Option<String>,
    pub superior_id: Option<i64>,
}

/// POST /update
pub async fn update(
    State(state): State<AppState>,
    body: Result<Json<UpdateEmployeeRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(req) = body.map_err(|_| ApiError::bad_request(messages::INVALID_EMPLOYEE_DATA))?;

    let id = req
        .id
        .ok_or_else(|| ApiError::bad_request(messages::INVALID_EMPLOYEE_DATA))?;
    if state.store.find_by_id(id).await?.is_none() {
        return Err(ApiError::not_found(messages::NO_EMPLOYEE));
    }

    let change = validate_update(req)?;
    if let Some(superior_id) = change.superior_id {
        ensure_superior_exists(&state, superior_id).await?;
    }

    state.store.update(id, change).await?;
    Ok(Json(json!(messages::EMPLOYEE_UPDATED)))
}

/// DELETE /delete/:employee_id - also orphans direct subordinates and
/// reports how many were affected
pub async fn destroy(
    State(state): State<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    if employee_id == 0 {
        return Err(ApiError::bad_request(messages::INVALID_EMPLOYEE));
    }

    let orphaned = state.store.delete(employee_id).await?;
    Ok(Json(json!(format!(
        "{} {}",
        messages::EMPLOYEE_DELETED,
        orphaned
    ))))
}

async fn ensure_superior_exists(state: &AppState, superior_id: i64) -> Result<(), ApiError> {
    if state.store.find_by_id(superior_id).await?.is_none() {
        return Err(ApiError::bad_request(messages::INVALID_SUPERIOR));
    }
    Ok(())
}

fn validate_add(req: AddEmployeeRequest) -> Result<NewEmployee, ApiError> {
    let (name, age, address) =
        validate_details(req.name, req.age, req.address)?;

    Ok(NewEmployee {
        name,
        age,
        address,
        // Only a positive superior id counts; anything else means root.
        superior_id: req.superior_id.filter(|s| *s > 0),
    })
}

fn validate_update(req: UpdateEmployeeRequest) -> Result<EmployeeUpdate, ApiError> {
    let (name, age, address) =
        validate_details(req.name, req.age, req.address)?;

    Ok(EmployeeUpdate {
        name,
        age,
        address,
        // Any nonzero superior id is validated against the store; zero or
        // absent leaves the stored superior unchanged.
        superior_id: req.superior_id.filter(|s| *s != 0),
    })
}

fn validate_details(
    name: Option<String>,
    age: Option<i32>,
    address: Option<String>,
) -> Result<(String, i32, String), ApiError> {
    let name = name.unwrap_or_default();
    let age = age.unwrap_or(0);
    let address = address.unwrap_or_default();

    if name.is_empty() || age == 0 || address.is_empty() {
        return Err(ApiError::bad_request(messages::MISSING_DETAILS));
    }
    if name.len() > MAX_NAME_LEN || address.len() > MAX_ADDRESS_LEN {
        return Err(ApiError::bad_request(messages::INVALID_EMPLOYEE_DATA));
    }

    Ok((name, age, address))
}

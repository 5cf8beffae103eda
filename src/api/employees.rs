//! Employee API endpoints.

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::{EmployeeId, JsonBody, SearchName};
use crate::errors::AppError;
use crate::models::{apply_partial_update, to_record, to_representation, Employee};
use crate::AppState;

/// GET /employees - List all employees.
pub async fn list_employees(State(state): State<AppState>) -> Result<Json<Vec<Employee>>, AppError> {
    let records = state.repo.find_all().await?;
    Ok(Json(records.iter().map(to_representation).collect()))
}

/// GET /employees/{id} - Get a single employee.
pub async fn get_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
) -> Result<Json<Employee>, AppError> {
    match state.repo.find_by_id(id).await? {
        Some(record) => Ok(Json(to_representation(&record))),
        None => {
            tracing::debug!("Employee {} not found", id);
            Err(AppError::employee_not_found(id))
        }
    }
}

/// GET /employees/search?name= - Case-insensitive search on first and father's last name.
pub async fn search_employees(
    State(state): State<AppState>,
    SearchName(name): SearchName,
) -> Result<Json<Vec<Employee>>, AppError> {
    let records = state.repo.search_by_name(&name).await?;
    Ok(Json(records.iter().map(to_representation).collect()))
}

/// POST /employees - Create a batch of employees.
///
/// Every element is validated before anything is written; one bad element
/// rejects the whole batch.
pub async fn create_employees(
    State(state): State<AppState>,
    JsonBody(employees): JsonBody<Vec<Employee>>,
) -> Result<Json<Vec<Employee>>, AppError> {
    for (index, employee) in employees.iter().enumerate() {
        validate_new_employee(index, employee)?;
    }

    let now = Utc::now();
    let records: Vec<_> = employees
        .iter()
        .map(|employee| {
            let mut record = to_record(employee);
            record.created_at = Some(now);
            record
        })
        .collect();

    let saved = state.repo.save_all(&records).await?;
    tracing::info!("Created {} employees", saved.len());

    Ok(Json(saved.iter().map(to_representation).collect()))
}

/// PUT /employees/{id} - Partially update an employee.
pub async fn update_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
    JsonBody(update): JsonBody<Employee>,
) -> Result<Json<Employee>, AppError> {
    let Some(mut record) = state.repo.find_by_id(id).await? else {
        tracing::debug!("Employee {} not found for update", id);
        return Err(AppError::employee_not_found(id));
    };

    apply_partial_update(&update, &mut record);
    let saved = state.repo.save(&record).await?;
    tracing::info!("Updated employee {}", id);

    Ok(Json(to_representation(&saved)))
}

/// DELETE /employees/{id} - Delete an employee.
pub async fn delete_employee(
    State(state): State<AppState>,
    EmployeeId(id): EmployeeId,
) -> Result<StatusCode, AppError> {
    let Some(record) = state.repo.find_by_id(id).await? else {
        tracing::debug!("Employee {} not found for delete", id);
        return Err(AppError::employee_not_found(id));
    };

    state.repo.delete(&record).await?;
    tracing::info!("Deleted employee {}", id);

    Ok(StatusCode::NO_CONTENT)
}

/// Check the fields a new employee must carry.
fn validate_new_employee(index: usize, employee: &Employee) -> Result<(), AppError> {
    let required = [
        ("firstName", &employee.first_name),
        ("lastNameFather", &employee.last_name_father),
    ];

    for (field, value) in required {
        if value.as_deref().map_or(true, |v| v.trim().is_empty()) {
            tracing::warn!("Rejected employee at index {}: {} missing", index, field);
            return Err(AppError::Validation(format!(
                "employees[{}].{} is required",
                index, field
            )));
        }
    }

    Ok(())
}

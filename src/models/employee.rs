//! Employee record and its external representation.
//!
//! The mapping functions here are pure; persistence lives in `db`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The externally exposed form of an employee, used in request and response bodies.
///
/// `id` and `created_at` are server-assigned: they are emitted in responses and
/// ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name_father: Option<String>,
    pub last_name_mother: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub active: bool,
}

/// The persisted form of an employee, one row of the `employees` table.
///
/// `id` is `None` until the store assigns one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeeRecord {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub last_name_father: Option<String>,
    pub last_name_mother: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub position: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub active: bool,
}

/// Copy every field of a record into its representation.
pub fn to_representation(record: &EmployeeRecord) -> Employee {
    Employee {
        id: record.id,
        first_name: record.first_name.clone(),
        middle_name: record.middle_name.clone(),
        last_name_father: record.last_name_father.clone(),
        last_name_mother: record.last_name_mother.clone(),
        age: record.age,
        gender: record.gender.clone(),
        birth_date: record.birth_date,
        position: record.position.clone(),
        created_at: record.created_at,
        active: record.active,
    }
}

/// Build a new, unsaved record. `id` and `created_at` are left unset.
pub fn to_record(employee: &Employee) -> EmployeeRecord {
    EmployeeRecord {
        id: None,
        first_name: employee.first_name.clone(),
        middle_name: employee.middle_name.clone(),
        last_name_father: employee.last_name_father.clone(),
        last_name_mother: employee.last_name_mother.clone(),
        age: employee.age,
        gender: employee.gender.clone(),
        birth_date: employee.birth_date,
        position: employee.position.clone(),
        created_at: None,
        active: employee.active,
    }
}

/// Merge an update into an existing record.
///
/// Present fields overwrite, absent ones keep the stored value. `active` is
/// always taken from the update. `id` and `created_at` are never touched.
pub fn apply_partial_update(update: &Employee, record: &mut EmployeeRecord) {
    merge(&mut record.first_name, &update.first_name);
    merge(&mut record.middle_name, &update.middle_name);
    merge(&mut record.last_name_father, &update.last_name_father);
    merge(&mut record.last_name_mother, &update.last_name_mother);
    merge(&mut record.age, &update.age);
    merge(&mut record.gender, &update.gender);
    merge(&mut record.birth_date, &update.birth_date);
    merge(&mut record.position, &update.position);
    record.active = update.active;
}

fn merge<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if let Some(value) = value {
        *target = Some(value.clone());
    }
}

//! Employee repository: CRUD and name search over the `employees` table.
//!
//! Uses prepared statements and transactions for data integrity.

use sqlx::sqlite::{SqliteConnection, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::EmployeeRecord;

const SELECT_EMPLOYEES: &str = "SELECT id, first_name, middle_name, last_name_father, last_name_mother, age, gender, birth_date, position, created_at, active FROM employees";

/// Database repository for employee records.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all employees in insertion order.
    pub async fn find_all(&self) -> Result<Vec<EmployeeRecord>, AppError> {
        let sql = format!("{} ORDER BY id", SELECT_EMPLOYEES);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let records = rows
            .iter()
            .map(employee_from_row)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// Get an employee by ID.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<EmployeeRecord>, AppError> {
        let sql = format!("{} WHERE id = ?", SELECT_EMPLOYEES);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(employee_from_row).transpose()?)
    }

    /// Insert the record if it has no id, otherwise update the row with that id.
    pub async fn save(&self, record: &EmployeeRecord) -> Result<EmployeeRecord, AppError> {
        let mut conn = self.pool.acquire().await?;
        write_employee(&mut conn, record).await
    }

    /// Save every record in one transaction. The result keeps the input order.
    pub async fn save_all(
        &self,
        records: &[EmployeeRecord],
    ) -> Result<Vec<EmployeeRecord>, AppError> {
        let mut tx = self.pool.begin().await?;

        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            saved.push(write_employee(&mut tx, record).await?);
        }

        tx.commit().await?;
        Ok(saved)
    }

    /// Delete a stored employee. The caller checks that it exists.
    pub async fn delete(&self, record: &EmployeeRecord) -> Result<(), AppError> {
        let id = record
            .id
            .ok_or_else(|| AppError::Internal("Cannot delete an unsaved employee".to_string()))?;

        sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Case-insensitive substring match on "first name + father's last name".
    ///
    /// An empty fragment matches every employee.
    pub async fn search_by_name(&self, fragment: &str) -> Result<Vec<EmployeeRecord>, AppError> {
        let needle = fragment.to_lowercase();
        let records = self.find_all().await?;

        Ok(records
            .into_iter()
            .filter(|record| search_name(record).to_lowercase().contains(&needle))
            .collect())
    }
}

async fn write_employee(
    conn: &mut SqliteConnection,
    record: &EmployeeRecord,
) -> Result<EmployeeRecord, AppError> {
    match record.id {
        None => {
            let result = sqlx::query(
                "INSERT INTO employees (first_name, middle_name, last_name_father, last_name_mother, age, gender, birth_date, position, created_at, active) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"
            )
            .bind(&record.first_name)
            .bind(&record.middle_name)
            .bind(&record.last_name_father)
            .bind(&record.last_name_mother)
            .bind(record.age)
            .bind(&record.gender)
            .bind(record.birth_date)
            .bind(&record.position)
            .bind(record.created_at)
            .bind(record.active as i32)
            .execute(&mut *conn)
            .await?;

            Ok(EmployeeRecord {
                id: Some(result.last_insert_rowid()),
                ..record.clone()
            })
        }
        Some(id) => {
            // created_at is written once on insert and never updated
            let result = sqlx::query(
                r#"UPDATE employees SET
                    first_name = ?, middle_name = ?, last_name_father = ?, last_name_mother = ?,
                    age = ?, gender = ?, birth_date = ?, position = ?, active = ?
                WHERE id = ?"#,
            )
            .bind(&record.first_name)
            .bind(&record.middle_name)
            .bind(&record.last_name_father)
            .bind(&record.last_name_mother)
            .bind(record.age)
            .bind(&record.gender)
            .bind(record.birth_date)
            .bind(&record.position)
            .bind(record.active as i32)
            .bind(id)
            .execute(&mut *conn)
            .await?;

            if result.rows_affected() == 0 {
                return Err(AppError::employee_not_found(id));
            }

            Ok(record.clone())
        }
    }
}

fn search_name(record: &EmployeeRecord) -> String {
    format!(
        "{} {}",
        record.first_name.as_deref().unwrap_or_default(),
        record.last_name_father.as_deref().unwrap_or_default()
    )
}

fn employee_from_row(row: &SqliteRow) -> Result<EmployeeRecord, sqlx::Error> {
    let active: i32 = row.try_get("active")?;
    Ok(EmployeeRecord {
        id: row.try_get("id")?,
        first_name: row.try_get("first_name")?,
        middle_name: row.try_get("middle_name")?,
        last_name_father: row.try_get("last_name_father")?,
        last_name_mother: row.try_get("last_name_mother")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        birth_date: row.try_get("birth_date")?,
        position: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
        active: active != 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_database;
    use chrono::{NaiveDate, Utc};
    use tempfile::TempDir;

    async fn repo() -> (Repository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let pool = init_database(&temp_dir.path().join("test.sqlite"), 1)
            .await
            .expect("Failed to init DB");
        (Repository::new(pool), temp_dir)
    }

    fn new_record(first: &str, last: &str) -> EmployeeRecord {
        EmployeeRecord {
            first_name: Some(first.to_string()),
            last_name_father: Some(last.to_string()),
            created_at: Some(Utc::now()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_assigns_ids_in_order() {
        let (repo, _dir) = repo().await;

        let first = repo.save(&new_record("John", "Doe")).await.unwrap();
        let second = repo.save(&new_record("Jane", "Smith")).await.unwrap();

        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));

        let all = repo.find_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].first_name.as_deref(), Some("John"));
        assert_eq!(all[1].first_name.as_deref(), Some("Jane"));
    }

    #[tokio::test]
    async fn test_find_by_id_round_trips_every_column() {
        let (repo, _dir) = repo().await;
        let record = EmployeeRecord {
            middle_name: Some("Q".into()),
            last_name_mother: Some("Lopez".into()),
            age: Some(41),
            gender: Some("F".into()),
            birth_date: NaiveDate::from_ymd_opt(1983, 7, 9),
            position: Some("Manager".into()),
            active: true,
            ..new_record("Maria", "Garcia")
        };

        let saved = repo.save(&record).await.unwrap();
        let loaded = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();

        assert_eq!(loaded, saved);
        assert!(repo.find_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_existing_updates_but_keeps_created_at() {
        let (repo, _dir) = repo().await;
        let saved = repo.save(&new_record("John", "Doe")).await.unwrap();

        let mut changed = saved.clone();
        changed.first_name = Some("Johnny".into());
        changed.created_at = Some(Utc::now() + chrono::Duration::days(1));
        repo.save(&changed).await.unwrap();

        let loaded = repo.find_by_id(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(loaded.first_name.as_deref(), Some("Johnny"));
        assert_eq!(loaded.created_at, saved.created_at);
    }

    #[tokio::test]
    async fn test_save_all_is_atomic() {
        let (repo, _dir) = repo().await;
        let mut missing_timestamp = new_record("Bad", "Row");
        missing_timestamp.created_at = None;

        let result = repo
            .save_all(&[new_record("John", "Doe"), missing_timestamp])
            .await;

        assert!(result.is_err());
        assert!(repo.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let (repo, _dir) = repo().await;
        let saved = repo.save(&new_record("John", "Doe")).await.unwrap();

        repo.delete(&saved).await.unwrap();

        assert!(repo.find_by_id(saved.id.unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let (repo, _dir) = repo().await;
        repo.save_all(&[
            new_record("John", "Doe"),
            new_record("Jane", "Smith"),
            new_record("Álvaro", "Núñez"),
        ])
        .await
        .unwrap();

        let johns = repo.search_by_name("john").await.unwrap();
        assert_eq!(johns.len(), 1);
        assert_eq!(johns[0].last_name_father.as_deref(), Some("Doe"));

        // spans the space between first name and father's last name
        let spanning = repo.search_by_name("E SMI").await.unwrap();
        assert_eq!(spanning.len(), 1);

        let accented = repo.search_by_name("núñez").await.unwrap();
        assert_eq!(accented.len(), 1);

        assert_eq!(repo.search_by_name("").await.unwrap().len(), 3);
        assert!(repo.search_by_name("zzz").await.unwrap().is_empty());
    }
}

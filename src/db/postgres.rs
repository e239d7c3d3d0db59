use async_trait::async_trait;
use log::{debug, info};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::db::store::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};
use crate::utils::validation::validate_payload;

const COLUMNS: &str = "id, name, dob, gender, department";

#[derive(Debug, Clone)]
pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        PgEmployeeStore { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(&self, fields: NewEmployee) -> Result<Employee, AppError> {
        validate_payload(&fields)?;

        let employee_id = Uuid::new_v4();
        let employee = sqlx::query_as::<_, Employee>(&format!(
            "INSERT INTO employees ({COLUMNS}) VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
        ))
        .bind(employee_id)
        .bind(&fields.name)
        .bind(fields.dob)
        .bind(&fields.gender)
        .bind(&fields.department)
        .fetch_one(&self.pool)
        .await?;

        info!("created employee {}", employee.id);
        Ok(employee)
    }

    async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        sqlx::query_as::<_, Employee>(&format!("SELECT {COLUMNS} FROM employees WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(id))
    }

    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, AppError> {
        let mut query_builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {COLUMNS} FROM employees WHERE TRUE"));

        if let Some(name) = &filter.name {
            query_builder.push(" AND name = ").push_bind(name.clone());
        }
        if let Some(dob) = filter.dob {
            query_builder.push(" AND dob = ").push_bind(dob);
        }
        if let Some(gender) = &filter.gender {
            query_builder.push(" AND gender = ").push_bind(gender.clone());
        }
        if let Some(department) = &filter.department {
            query_builder.push(" AND department = ").push_bind(department.clone());
        }

        // "C" collation keeps the order byte-wise, matching the in-memory store.
        query_builder.push(" ORDER BY name COLLATE \"C\", id");

        if let Some(limit) = filter.limit {
            query_builder.push(" LIMIT ").push_bind(i64::from(limit));
        }
        if let Some(offset) = filter.offset {
            query_builder.push(" OFFSET ").push_bind(i64::from(offset));
        }

        let employees = query_builder
            .build_query_as::<Employee>()
            .fetch_all(&self.pool)
            .await?;

        debug!("listed {} employees", employees.len());
        Ok(employees)
    }

    async fn update(&self, id: Uuid, changes: EmployeeChanges) -> Result<Employee, AppError> {
        validate_payload(&changes)?;

        if changes.is_empty() {
            return self.get(id).await;
        }

        let mut query_builder: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("UPDATE employees SET ");
        {
            let mut set_clauses = query_builder.separated(", ");
            if let Some(name) = changes.name {
                set_clauses.push("name = ").push_bind_unseparated(name);
            }
            if let Some(dob) = changes.dob {
                set_clauses.push("dob = ").push_bind_unseparated(dob);
            }
            if let Some(gender) = changes.gender {
                set_clauses.push("gender = ").push_bind_unseparated(gender);
            }
            if let Some(department) = changes.department {
                set_clauses.push("department = ").push_bind_unseparated(department);
            }
        }
        query_builder
            .push(" WHERE id = ")
            .push_bind(id)
            .push(format!(" RETURNING {COLUMNS}"));

        let employee = query_builder
            .build_query_as::<Employee>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(id))?;

        info!("updated employee {}", id);
        Ok(employee)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(id));
        }

        info!("deleted employee {}", id);
        Ok(())
    }
}

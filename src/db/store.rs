use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};

/// Persistence boundary for employee records.
///
/// Implementations validate field constraints before writing and report
/// missing identifiers as [`AppError::NotFound`].
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, fields: NewEmployee) -> Result<Employee, AppError>;

    async fn get(&self, id: Uuid) -> Result<Employee, AppError>;

    /// Records matching `filter`, sorted by name (byte-wise, case-sensitive) then id.
    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, AppError>;

    async fn update(&self, id: Uuid, changes: EmployeeChanges) -> Result<Employee, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

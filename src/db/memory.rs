use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::db::store::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};
use crate::utils::validation::validate_payload;

/// Process-local store, used when no database is configured and in tests.
#[derive(Debug, Default)]
pub struct MemoryEmployeeStore {
    employees: RwLock<HashMap<Uuid, Employee>>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn create(&self, fields: NewEmployee) -> Result<Employee, AppError> {
        validate_payload(&fields)?;

        let mut employees = self.employees.write().await;
        let mut id = Uuid::new_v4();
        while employees.contains_key(&id) {
            id = Uuid::new_v4();
        }

        let employee = Employee::new(id, fields);
        employees.insert(id, employee.clone());
        debug!("created employee {}", id);
        Ok(employee)
    }

    async fn get(&self, id: Uuid) -> Result<Employee, AppError> {
        self.employees
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(AppError::NotFound(id))
    }

    async fn list(&self, filter: &EmployeeFilter) -> Result<Vec<Employee>, AppError> {
        let mut matching: Vec<Employee> = self
            .employees
            .read()
            .await
            .values()
            .filter(|employee| filter.matches(employee))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));

        let offset = filter.offset.unwrap_or(0) as usize;
        let limit = filter.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn update(&self, id: Uuid, changes: EmployeeChanges) -> Result<Employee, AppError> {
        validate_payload(&changes)?;

        let mut employees = self.employees.write().await;
        let employee = employees.get_mut(&id).ok_or(AppError::NotFound(id))?;
        employee.apply(changes);
        debug!("updated employee {}", id);
        Ok(employee.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        match self.employees.write().await.remove(&id) {
            Some(_) => {
                debug!("deleted employee {}", id);
                Ok(())
            }
            None => Err(AppError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn fields(name: &str, department: &str) -> NewEmployee {
        NewEmployee {
            name: name.to_string(),
            dob: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: "female".to_string(),
            department: department.to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryEmployeeStore::new();
        let created = store.create(fields("Alice Smith", "Engineering")).await.unwrap();

        assert_eq!(created.to_string(), "Alice Smith");
        assert_eq!(store.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn identical_fields_get_distinct_ids() {
        let store = MemoryEmployeeStore::new();
        let first = store.create(fields("Alice Smith", "Engineering")).await.unwrap();
        let second = store.create(fields("Alice Smith", "Engineering")).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.list(&EmployeeFilter::default()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn overlong_name_is_rejected() {
        let store = MemoryEmployeeStore::new();
        let err = store
            .create(fields(&"a".repeat(256), "Engineering"))
            .await
            .unwrap_err();

        assert!(err.is_constraint_violation());
        assert!(store.list(&EmployeeFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_persists_department() {
        let store = MemoryEmployeeStore::new();
        let created = store.create(fields("Alice Smith", "Engineering")).await.unwrap();

        store
            .update(
                created.id,
                EmployeeChanges {
                    department: Some("Sales".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let reread = store.get(created.id).await.unwrap();
        assert_eq!(reread.department, "Sales");
        assert_eq!(reread.name, "Alice Smith");
    }

    #[tokio::test]
    async fn invalid_update_leaves_record_untouched() {
        let store = MemoryEmployeeStore::new();
        let created = store.create(fields("Alice Smith", "Engineering")).await.unwrap();

        let err = store
            .update(
                created.id,
                EmployeeChanges {
                    gender: Some("x".repeat(11)),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(err.is_constraint_violation());
        assert_eq!(store.get(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn update_of_missing_id_is_not_found() {
        let store = MemoryEmployeeStore::new();
        let err = store
            .update(Uuid::new_v4(), EmployeeChanges::default())
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = MemoryEmployeeStore::new();
        let created = store.create(fields("Alice Smith", "Engineering")).await.unwrap();

        store.delete(created.id).await.unwrap();

        assert!(store.get(created.id).await.unwrap_err().is_not_found());
        assert!(store.delete(created.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn list_filters_and_pages() {
        let store = MemoryEmployeeStore::new();
        store.create(fields("Carol", "Engineering")).await.unwrap();
        store.create(fields("Alice", "Engineering")).await.unwrap();
        store.create(fields("Bob", "Sales")).await.unwrap();

        let engineering = store
            .list(&EmployeeFilter {
                department: Some("Engineering".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        let names: Vec<_> = engineering.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Alice", "Carol"]);

        let page = store
            .list(&EmployeeFilter {
                limit: Some(1),
                offset: Some(1),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].name, "Bob");
    }

    #[tokio::test]
    async fn list_orders_names_byte_wise() {
        let store = MemoryEmployeeStore::new();
        store.create(fields("alice", "Engineering")).await.unwrap();
        store.create(fields("Bob", "Engineering")).await.unwrap();

        let listed = store.list(&EmployeeFilter::default()).await.unwrap();
        let names: Vec<_> = listed.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Bob", "alice"]);
    }
}

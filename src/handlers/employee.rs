use actix_web::{web, HttpResponse};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::db::EmployeeStore;
use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges, EmployeeFilter, NewEmployee};

/// Stored fields plus the age derived from `dob`.
#[derive(Serialize)]
struct EmployeeResponse {
    #[serde(flatten)]
    employee: Employee,
    age: i32,
}

impl EmployeeResponse {
    fn new(employee: Employee, today: NaiveDate) -> Self {
        let age = employee.age_on(today);
        EmployeeResponse { employee, age }
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub async fn get_employees(
    store: web::Data<dyn EmployeeStore>,
    query: web::Query<EmployeeFilter>,
) -> Result<HttpResponse, AppError> {
    let today = today();
    let employees: Vec<EmployeeResponse> = store
        .list(&query)
        .await?
        .into_iter()
        .map(|employee| EmployeeResponse::new(employee, today))
        .collect();
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    new_employee: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = store.create(new_employee.into_inner()).await?;
    Ok(HttpResponse::Created().json(EmployeeResponse::new(employee, today())))
}

pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let employee = store.get(employee_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::new(employee, today())))
}

/// PUT: every field must be supplied.
pub async fn replace_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<Uuid>,
    replacement: web::Json<NewEmployee>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .update(employee_id.into_inner(), replacement.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::new(employee, today())))
}

/// PATCH: any subset of fields.
pub async fn update_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<Uuid>,
    updates: web::Json<EmployeeChanges>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .update(employee_id.into_inner(), updates.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(EmployeeResponse::new(employee, today())))
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    store.delete(employee_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

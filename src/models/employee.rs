use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub department: String,
}

impl Employee {
    pub fn new(id: Uuid, fields: NewEmployee) -> Self {
        Employee {
            id,
            name: fields.name,
            dob: fields.dob,
            gender: fields.gender,
            department: fields.department,
        }
    }

    /// Overwrites every field present in `changes`, leaving the rest untouched.
    pub fn apply(&mut self, changes: EmployeeChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(dob) = changes.dob {
            self.dob = dob;
        }
        if let Some(gender) = changes.gender {
            self.gender = gender;
        }
        if let Some(department) = changes.department {
            self.department = department;
        }
    }

    /// Whole years elapsed between `dob` and `on`. Negative when `dob` lies in the future.
    pub fn age_on(&self, on: NaiveDate) -> i32 {
        let mut age = on.year() - self.dob.year();
        if (on.month(), on.day()) < (self.dob.month(), self.dob.day()) {
            age -= 1;
        }
        age
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[derive(Deserialize, Serialize, Validate, Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 255), custom = "not_blank")]
    pub name: String,
    pub dob: NaiveDate,
    #[validate(length(min = 1, max = 10), custom = "not_blank")]
    pub gender: String,
    #[validate(length(min = 1, max = 100), custom = "not_blank")]
    pub department: String,
}

/// Partial update payload. Absent fields keep their stored value.
#[derive(Deserialize, Serialize, Validate, Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeChanges {
    #[validate(length(min = 1, max = 255), custom = "not_blank")]
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    #[validate(length(min = 1, max = 10), custom = "not_blank")]
    pub gender: Option<String>,
    #[validate(length(min = 1, max = 100), custom = "not_blank")]
    pub department: Option<String>,
}

impl EmployeeChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.dob.is_none()
            && self.gender.is_none()
            && self.department.is_none()
    }
}

impl From<NewEmployee> for EmployeeChanges {
    fn from(fields: NewEmployee) -> Self {
        EmployeeChanges {
            name: Some(fields.name),
            dob: Some(fields.dob),
            gender: Some(fields.gender),
            department: Some(fields.department),
        }
    }
}

/// Exact-match filter over the stored fields, with optional paging.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct EmployeeFilter {
    pub name: Option<String>,
    pub dob: Option<NaiveDate>,
    pub gender: Option<String>,
    pub department: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl EmployeeFilter {
    pub fn matches(&self, employee: &Employee) -> bool {
        self.name.as_ref().map_or(true, |name| *name == employee.name)
            && self.dob.map_or(true, |dob| dob == employee.dob)
            && self.gender.as_ref().map_or(true, |gender| *gender == employee.gender)
            && self
                .department
                .as_ref()
                .map_or(true, |department| *department == employee.department)
    }
}

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use log::error;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

// SQLSTATE codes raised by column length and NOT NULL checks.
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
const NOT_NULL_VIOLATION: &str = "23502";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Constraint Violation: {message}")]
    ConstraintViolation {
        message: String,
        fields: Option<ValidationErrors>,
    },
    #[error("Not Found: employee {0} not found")]
    NotFound(Uuid),
    #[error("Database Error: {0}")]
    Database(#[source] sqlx::Error),
}

impl AppError {
    pub fn constraint(message: impl Into<String>) -> Self {
        AppError::ConstraintViolation {
            message: message.into(),
            fields: None,
        }
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, AppError::ConstraintViolation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ConstraintViolation {
            message: errors.to_string(),
            fields: Some(errors),
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            if matches!(
                code.as_deref(),
                Some(STRING_DATA_RIGHT_TRUNCATION) | Some(NOT_NULL_VIOLATION)
            ) {
                return AppError::constraint(db_err.message());
            }
        }
        AppError::Database(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a ValidationErrors>,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ConstraintViolation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ConstraintViolation { message, fields } => ErrorResponse {
                error: message.clone(),
                fields: fields.as_ref(),
            },
            AppError::NotFound(id) => ErrorResponse {
                error: format!("employee {id} not found"),
                fields: None,
            },
            AppError::Database(err) => {
                error!("database failure: {}", err);
                ErrorResponse {
                    error: "Internal Server Error".to_string(),
                    fields: None,
                }
            }
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn validation_errors_become_constraint_violations() {
        let mut errors = ValidationErrors::new();
        errors.add("name", ValidationError::new("length"));

        let err = AppError::from(errors);

        assert!(err.is_constraint_violation());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn not_found_maps_to_404() {
        let err = AppError::NotFound(Uuid::new_v4());

        assert!(err.is_not_found());
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unrelated_sqlx_errors_stay_database_errors() {
        let err = AppError::from(sqlx::Error::RowNotFound);

        assert!(matches!(err, AppError::Database(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

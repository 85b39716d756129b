pub mod project_service;
pub mod task_service;

use thiserror::Error;

use crate::database::models::non_blank;
use crate::database::StoreError;

pub use project_service::ProjectService;
pub use task_service::TaskService;

/// Failure of a single project/task operation. Every variant is terminal.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error(transparent)]
    Internal(#[from] StoreError),
}

impl ServiceError {
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field,
            message: message.into(),
        }
    }
}

/// Value of a required text field, stored as sent.
fn required_text(field: &'static str, value: Option<&str>) -> Result<String, ServiceError> {
    non_blank(value)
        .map(str::to_string)
        .ok_or_else(|| ServiceError::validation(field, format!("Field '{}' is required", field)))
}

fn optional_text(value: Option<&str>) -> Option<String> {
    non_blank(value).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(matches!(
            required_text("name", Some("  ")),
            Err(ServiceError::Validation { field: "name", .. })
        ));
        assert!(required_text("name", None).is_err());
        assert_eq!(required_text("name", Some(" Launch")).unwrap(), " Launch");
    }
}

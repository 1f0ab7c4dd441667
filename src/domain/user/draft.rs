use validator::{Validate, ValidationError};

use super::model::{User, UserFields, UserRole};
use crate::domain::validation::{FieldError, ValidationFailure};

/// Every writable user field, as submitted. Validated before each save.
#[derive(Debug, Clone, Default, Validate)]
pub struct UserDraft {
    #[validate(required, length(min = 2, max = 20))]
    pub first_name: Option<String>,
    #[validate(required, length(min = 2, max = 20))]
    pub last_name: Option<String>,
    #[validate(required, custom(function = "validate_role"))]
    pub role: Option<String>,
}

fn validate_role(value: &str) -> Result<(), ValidationError> {
    if UserRole::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("enum");
    err.add_param("value".into(), &value);
    Err(err)
}

/// The (first name, last name) pair is already taken.
pub fn duplicate_name(first_name: &str, last_name: &str) -> ValidationFailure {
    let message = format!("A user named `{} {}` already exists.", first_name, last_name);
    let mut failure = ValidationFailure::new("User");
    failure.push(FieldError::unique("firstName", first_name, message.clone()));
    failure.push(FieldError::unique("lastName", last_name, message));
    failure
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self {
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            role: Some(user.role.as_str().to_string()),
        }
    }
}

impl UserDraft {
    /// Run the field rules, adding to `failure`, and produce the validated
    /// fields when nothing failed.
    pub fn validate_into(self, mut failure: ValidationFailure) -> Result<UserFields, ValidationFailure> {
        if let Err(errors) = self.validate() {
            failure.merge(&errors);
        }
        failure.into_result()?;

        // The rules above guarantee presence; re-check without panicking.
        let role = self.role.as_deref().and_then(UserRole::parse);
        let (Some(first_name), Some(last_name), Some(role)) = (self.first_name, self.last_name, role)
        else {
            let mut failure = ValidationFailure::new("User");
            failure.push(FieldError::required("role"));
            return Err(failure);
        };

        Ok(UserFields {
            first_name,
            last_name,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(first: &str, last: &str, role: &str) -> UserDraft {
        UserDraft {
            first_name: Some(first.into()),
            last_name: Some(last.into()),
            role: Some(role.into()),
        }
    }

    #[test]
    fn valid_draft_produces_fields() {
        let fields = draft("Ada", "Lovelace", "manager")
            .validate_into(ValidationFailure::new("User"))
            .unwrap();
        assert_eq!(fields.role, UserRole::Manager);
        assert_eq!(fields.last_name, "Lovelace");
    }

    #[test]
    fn rejects_unknown_role() {
        let failure = draft("Ada", "Lovelace", "admin")
            .validate_into(ValidationFailure::new("User"))
            .unwrap_err();
        let err = failure.get("role").unwrap();
        assert_eq!(err.kind, "enum");
        assert_eq!(err.message, "`admin` is not a valid enum value for path `role`.");
    }

    #[test]
    fn rejects_short_and_long_names() {
        let failure = draft("A", "ThisLastNameIsWayTooLong", "citizen")
            .validate_into(ValidationFailure::new("User"))
            .unwrap_err();
        assert_eq!(failure.get("firstName").unwrap().kind, "minlength");
        assert_eq!(failure.get("lastName").unwrap().kind, "maxlength");
    }

    #[test]
    fn reports_every_missing_field() {
        let failure = UserDraft::default()
            .validate_into(ValidationFailure::new("User"))
            .unwrap_err();
        assert_eq!(failure.errors().len(), 3);
        assert!(failure.errors().values().all(|e| e.kind == "required"));
    }
}

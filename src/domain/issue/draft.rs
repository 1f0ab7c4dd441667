use validator::{Validate, ValidationError};

use super::model::{Issue, IssueFields, IssueStatus};
use crate::domain::validation::{FieldError, ValidationFailure};

const MAX_TAG_LENGTH: usize = 20;

/// Every writable issue field, as submitted. Validated before each save.
#[derive(Debug, Clone, Default, Validate)]
pub struct IssueDraft {
    #[validate(required, length(min = 1, max = 20))]
    pub title: Option<String>,
    #[validate(required, custom(function = "validate_status"))]
    pub status: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 500))]
    pub image_url: Option<String>,
    #[validate(required, range(min = -90.0, max = 90.0))]
    pub latitude: Option<f64>,
    #[validate(required, range(min = -180.0, max = 180.0))]
    pub longitude: Option<f64>,
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
    #[validate(required, length(min = 1))]
    pub created_by: Option<String>,
    #[validate(length(min = 1))]
    pub updated_by: Option<String>,
}

fn validate_status(value: &str) -> Result<(), ValidationError> {
    if IssueStatus::parse(value).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("enum");
    err.add_param("value".into(), &value);
    Err(err)
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    for (index, tag) in tags.iter().enumerate() {
        let code = if tag.trim().is_empty() {
            "required"
        } else if tag.chars().count() > MAX_TAG_LENGTH {
            "maxlength"
        } else {
            continue;
        };
        let mut err = ValidationError::new(code);
        err.add_param("index".into(), &index);
        err.add_param("max".into(), &MAX_TAG_LENGTH);
        err.add_param("value".into(), tag);
        return Err(err);
    }
    Ok(())
}

impl From<&Issue> for IssueDraft {
    fn from(issue: &Issue) -> Self {
        Self {
            title: Some(issue.title.clone()),
            status: Some(issue.status.as_str().to_string()),
            description: issue.description.clone(),
            image_url: issue.image_url.clone(),
            latitude: Some(issue.latitude),
            longitude: Some(issue.longitude),
            tags: issue.tags.clone(),
            created_by: Some(issue.created_by.clone()),
            updated_by: issue.updated_by.clone(),
        }
    }
}

impl IssueDraft {
    /// Run the field rules, adding to `failure` (which may already hold cast
    /// or reference errors), and produce the validated fields when nothing
    /// failed.
    pub fn validate_into(self, mut failure: ValidationFailure) -> Result<IssueFields, ValidationFailure> {
        if let Err(errors) = self.validate() {
            failure.merge(&errors);
        }
        failure.into_result()?;

        let status = self.status.as_deref().and_then(IssueStatus::parse);
        let (Some(title), Some(status), Some(latitude), Some(longitude), Some(created_by)) = (
            self.title,
            status,
            self.latitude,
            self.longitude,
            self.created_by,
        ) else {
            let mut failure = ValidationFailure::new("Issue");
            failure.push(FieldError::required("status"));
            return Err(failure);
        };

        Ok(IssueFields {
            title,
            status,
            description: self.description,
            image_url: self.image_url,
            latitude,
            longitude,
            tags: self.tags,
            created_by,
            updated_by: self.updated_by,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> IssueDraft {
        IssueDraft {
            title: Some("Broken lamp".into()),
            status: Some("new".into()),
            description: Some("Street lamp is out".into()),
            image_url: None,
            latitude: Some(46.78),
            longitude: Some(6.64),
            tags: vec!["lighting".into()],
            created_by: Some("u-1".into()),
            updated_by: None,
        }
    }

    fn fail(draft: IssueDraft) -> ValidationFailure {
        draft
            .validate_into(ValidationFailure::new("Issue"))
            .unwrap_err()
    }

    #[test]
    fn valid_draft_produces_fields() {
        let fields = valid()
            .validate_into(ValidationFailure::new("Issue"))
            .unwrap();
        assert_eq!(fields.status, IssueStatus::New);
        assert_eq!(fields.tags, vec!["lighting".to_string()]);
    }

    #[test]
    fn rejects_out_of_range_coordinates() {
        let failure = fail(IssueDraft {
            latitude: Some(90.5),
            longitude: Some(-181.0),
            ..valid()
        });
        assert_eq!(failure.get("latitude").unwrap().kind, "max");
        assert_eq!(failure.get("longitude").unwrap().kind, "min");
    }

    #[test]
    fn accepts_boundary_coordinates() {
        let fields = IssueDraft {
            latitude: Some(-90.0),
            longitude: Some(180.0),
            ..valid()
        }
        .validate_into(ValidationFailure::new("Issue"))
        .unwrap();
        assert_eq!(fields.latitude, -90.0);
    }

    #[test]
    fn rejects_unknown_status() {
        let failure = fail(IssueDraft {
            status: Some("test".into()),
            ..valid()
        });
        assert_eq!(
            failure.get("status").unwrap().message,
            "`test` is not a valid enum value for path `status`."
        );
    }

    #[test]
    fn rejects_long_text_fields() {
        let failure = fail(IssueDraft {
            title: Some("x".repeat(21)),
            description: Some("x".repeat(1001)),
            image_url: Some("x".repeat(501)),
            ..valid()
        });
        assert_eq!(failure.get("title").unwrap().kind, "maxlength");
        assert_eq!(failure.get("description").unwrap().kind, "maxlength");
        assert_eq!(failure.get("imageUrl").unwrap().kind, "maxlength");
    }

    #[test]
    fn rejects_bad_tags_with_indexed_path() {
        let failure = fail(IssueDraft {
            tags: vec!["ok".into(), "x".repeat(21)],
            ..valid()
        });
        assert_eq!(failure.get("tags.1").unwrap().kind, "maxlength");
    }

    #[test]
    fn requires_title_position_and_creator() {
        let failure = fail(IssueDraft {
            status: Some("new".into()),
            ..IssueDraft::default()
        });
        for path in ["title", "latitude", "longitude", "createdBy"] {
            assert_eq!(failure.get(path).unwrap().kind, "required", "{}", path);
        }
        assert!(failure.get("status").is_none());
    }

    #[test]
    fn empty_title_is_required() {
        let failure = fail(IssueDraft {
            title: Some(String::new()),
            ..valid()
        });
        let err = failure.get("title").unwrap();
        assert_eq!(err.kind, "required");
        assert_eq!(err.message, "Path `title` is required.");
    }
}

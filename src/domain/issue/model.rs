use std::fmt;

use chrono::{DateTime, Utc};

/// Issue status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatus {
    New,
    InProgress,
    Canceled,
    Completed,
}

impl IssueStatus {
    pub const ALL: [IssueStatus; 4] = [
        IssueStatus::New,
        IssueStatus::InProgress,
        IssueStatus::Canceled,
        IssueStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "inProgress",
            Self::Canceled => "canceled",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }
}

impl Default for IssueStatus {
    fn default() -> Self {
        Self::New
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Issue model
#[derive(Clone, Debug, PartialEq)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub status: IssueStatus,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Vec<String>,
    /// Id of the reporting user
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
    /// Incremented on every save
    pub revision: i32,
}

impl Issue {
    /// A fresh, not yet persisted issue.
    pub fn new(fields: IssueFields) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: fields.title,
            status: fields.status,
            description: fields.description,
            image_url: fields.image_url,
            latitude: fields.latitude,
            longitude: fields.longitude,
            tags: fields.tags,
            created_by: fields.created_by,
            created_at: Utc::now(),
            updated_at: None,
            updated_by: fields.updated_by,
            revision: 0,
        }
    }

    /// Overwrite every mutable field and stamp `updated_at`.
    /// `created_by` and `created_at` never change.
    pub fn apply(&mut self, fields: IssueFields) {
        self.title = fields.title;
        self.status = fields.status;
        self.description = fields.description;
        self.image_url = fields.image_url;
        self.latitude = fields.latitude;
        self.longitude = fields.longitude;
        self.tags = fields.tags;
        self.updated_by = fields.updated_by;
        self.updated_at = Some(Utc::now());
    }
}

/// Writable issue fields after validation.
#[derive(Clone, Debug, PartialEq)]
pub struct IssueFields {
    pub title: String,
    pub status: IssueStatus,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub tags: Vec<String>,
    pub created_by: String,
    pub updated_by: Option<String>,
}

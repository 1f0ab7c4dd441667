use std::fmt;

use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Citizen,
    Manager,
}

impl UserRole {
    pub const ALL: [UserRole; 2] = [UserRole::Citizen, UserRole::Manager];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Manager => "manager",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == value)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User model
#[derive(Clone, Debug, PartialEq)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    /// Incremented on every save
    pub revision: i32,
}

impl User {
    /// A fresh, not yet persisted user.
    pub fn new(fields: UserFields) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            first_name: fields.first_name,
            last_name: fields.last_name,
            role: fields.role,
            created_at: Utc::now(),
            revision: 0,
        }
    }

    /// Overwrite every writable field.
    pub fn apply(&mut self, fields: UserFields) {
        self.first_name = fields.first_name;
        self.last_name = fields.last_name;
        self.role = fields.role;
    }
}

/// Writable user fields after validation.
#[derive(Clone, Debug, PartialEq)]
pub struct UserFields {
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// A user together with the number of issues they reported.
#[derive(Clone, Debug, PartialEq)]
pub struct UserSummary {
    pub user: User,
    pub issues_count: u64,
}

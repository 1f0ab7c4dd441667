use crate::domain::input::{NumericInput, TagsInput};

/// Body of an issue create (POST).
#[derive(Debug, Clone, Default)]
pub struct CreateIssueDto {
    pub title: Option<String>,
    /// Defaults to `new`
    pub status: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<NumericInput>,
    pub longitude: Option<NumericInput>,
    pub tags: Option<TagsInput>,
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

/// Body of a full issue replace (PUT). The creator cannot change.
#[derive(Debug, Clone, Default)]
pub struct ReplaceIssueDto {
    pub title: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<NumericInput>,
    pub longitude: Option<NumericInput>,
    pub tags: Option<TagsInput>,
    pub updated_by: Option<String>,
}

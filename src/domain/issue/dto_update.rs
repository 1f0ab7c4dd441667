use crate::domain::input::{NumericInput, TagsInput};

/// Partial issue update (PATCH). Only these fields may change; the title and
/// the creator are fixed once reported.
#[derive(Debug, Clone, Default)]
pub struct UpdateIssueDto {
    pub status: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub latitude: Option<NumericInput>,
    pub longitude: Option<NumericInput>,
    pub tags: Option<TagsInput>,
    pub updated_by: Option<String>,
}

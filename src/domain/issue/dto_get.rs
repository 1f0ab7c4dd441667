use super::IssueStatus;

#[derive(Debug, Clone)]
pub struct GetIssuesDto {
    pub status: Option<IssueStatus>,
    pub created_by: Option<String>,
    pub page: u64,
    pub page_size: u64,
}

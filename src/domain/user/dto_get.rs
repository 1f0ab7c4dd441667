#[derive(Debug, Clone)]
pub struct GetUsersDto {
    pub page: u64,
    pub page_size: u64,
}

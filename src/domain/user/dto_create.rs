/// Body of a user create (POST) or full replace (PUT).
#[derive(Debug, Clone, Default)]
pub struct CreateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

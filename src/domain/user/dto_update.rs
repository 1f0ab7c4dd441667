/// Partial user update (PATCH). Only these fields may change.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
}

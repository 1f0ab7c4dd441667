/// Record ids are UUID v4 strings. Anything else can never name a record.
pub fn is_valid_id(id: &str) -> bool {
    uuid::Uuid::parse_str(id).is_ok()
}

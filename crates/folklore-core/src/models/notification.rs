use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub id: u64,
    pub content: String,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: String,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub avatar: Option<String>,
    pub rank: Option<String>,
    pub created_at: Option<String>,
}

impl User {
    /// Archive-style subject tag shown on the profile card ("A-07").
    pub fn subject_tag(&self) -> String {
        format!("A-{:02}", self.id)
    }

    pub fn rank_label(&self) -> &str {
        self.rank.as_deref().unwrap_or("OBSERVER")
    }
}

/// Payload of a successful login or register call.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_tag_pads_small_ids() {
        let user = User {
            id: 7,
            username: "mira".to_string(),
            avatar: None,
            rank: None,
            created_at: None,
        };
        assert_eq!(user.subject_tag(), "A-07");
        assert_eq!(user.rank_label(), "OBSERVER");
    }
}

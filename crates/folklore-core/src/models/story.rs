use serde::{Deserialize, Serialize};

use crate::constants::STORY_PREVIEW_CHARS;

/// A single archived story as it appears in a listing.
///
/// Stories are immutable snapshots from the server; the client never
/// edits them, it only replaces whole pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments_count: u64,
    #[serde(default)]
    pub evidence_count: u64,
    pub ai_persona: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Story {
    /// Short content excerpt for list rows.
    pub fn preview(&self) -> String {
        let mut out: String = self.content.chars().take(STORY_PREVIEW_CHARS).collect();
        if self.content.chars().count() > STORY_PREVIEW_CHARS {
            out.push('…');
        }
        out
    }

    /// Case-insensitive match against title and content, used by the
    /// client-side search over the cached page.
    pub fn matches(&self, keyword: &str) -> bool {
        let needle = keyword.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    #[serde(default)]
    pub has_prev: bool,
    #[serde(default)]
    pub has_next: bool,
    pub prev_page: Option<u32>,
    pub next_page: Option<u32>,
}

/// One page of the listing, replaced wholesale on every fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryPage {
    pub stories: Vec<Story>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentAuthor {
    pub username: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub author: CommentAuthor,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKind {
    Image,
    Audio,
}

/// Media attached to a story. The client shows the metadata only;
/// playback and image rendering are out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    pub file_path: String,
    #[serde(default)]
    pub description: String,
}

/// Detail view payload: the story itself plus its comments and
/// evidence attachments.
#[derive(Debug, Clone, Deserialize)]
pub struct StoryDetail {
    #[serde(flatten)]
    pub story: Story,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn story(content: &str) -> Story {
        Story {
            id: 1,
            title: "The Last Train".to_string(),
            content: content.to_string(),
            category: "subway_ghost".to_string(),
            views: 12,
            comments_count: 2,
            evidence_count: 0,
            ai_persona: None,
            created_at: "2024-05-01T22:13:00".to_string(),
        }
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let long = "x".repeat(200);
        let s = story(&long);
        assert_eq!(s.preview().chars().count(), STORY_PREVIEW_CHARS + 1);
        assert!(s.preview().ends_with('…'));

        let short = story("short enough");
        assert_eq!(short.preview(), "short enough");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let s = story("Someone knocked three times at 3am.");
        assert!(s.matches("KNOCKED"));
        assert!(s.matches("last train"));
        assert!(!s.matches("elevator"));
    }

    #[test]
    fn test_detail_deserializes_flattened_story() {
        let json = r#"{
            "id": 7, "title": "Room 404", "content": "The room was never on the floor plan.",
            "category": "rental_mystery", "views": 88, "comments_count": 1, "evidence_count": 1,
            "ai_persona": "Night Clerk", "created_at": "2024-06-11T01:00:00",
            "comments": [
                {"author": {"username": "kay", "avatar": "👻"}, "content": "same building?", "created_at": ""},
                {"author": {"username": "drifter"}, "content": "checked, no room 404", "created_at": ""}
            ],
            "evidence": [{"type": "image", "file_path": "/static/e/404.png", "description": "floor plan"}]
        }"#;
        let detail: StoryDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.story.id, 7);
        assert_eq!(detail.comments.len(), 2);
        assert_eq!(detail.comments[0].author.avatar.as_deref(), Some("👻"));
        assert_eq!(detail.comments[1].author.avatar, None);
        assert_eq!(detail.evidence[0].kind, EvidenceKind::Image);
    }
}

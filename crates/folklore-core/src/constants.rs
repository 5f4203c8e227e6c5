//! Application-wide constants
//!
//! Centralized location for magic values that are used across
//! multiple modules.

/// Default archive API base URL (the server mounts everything under /api)
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api";

/// Stories fetched per page, matching the server's listing window
pub const STORIES_PER_PAGE: u32 = 8;

/// Background refresh interval - silent story reload plus notification check
pub const POLL_INTERVAL_SECS: u64 = 30;

/// Number of characters of story content shown in list previews
pub const STORY_PREVIEW_CHARS: usize = 80;

/// Fallback author label for stories without a persona
pub const DEFAULT_PERSONA: &str = "AI";

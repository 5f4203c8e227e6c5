pub mod login;
pub mod profile;
pub mod stories;
pub mod story_detail;

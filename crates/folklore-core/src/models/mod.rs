pub mod category;
pub mod notification;
pub mod story;
pub mod user;

pub use category::CategoryStat;
pub use notification::Notification;
pub use story::{Comment, Evidence, EvidenceKind, Pagination, Story, StoryDetail, StoryPage};
pub use user::{AuthResponse, User};

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod events;
pub mod models;
pub mod runtime;
pub mod session;
pub mod sync;

// Re-export the runtime surface at crate root for convenience
pub use error::ApiError;
pub use events::{Notice, NoticeLevel, SyncEvent};
pub use runtime::{SyncCommand, SyncHandle, SyncRuntime};
pub use sync::{SharedSyncState, SyncState};

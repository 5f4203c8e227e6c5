pub mod app;
pub mod format;
pub mod terminal;
pub mod theme;
pub mod toasts;
pub mod views;

pub use app::{App, InputMode, View};
pub use terminal::{init as init_terminal, restore as restore_terminal, Tui};

mod clipboard;
pub mod commands;
mod downloads;
mod session;
mod view;

pub use clipboard::SystemClipboard;
pub use downloads::DirectoryDownloads;
pub use session::{Session, run};
pub use view::TerminalView;

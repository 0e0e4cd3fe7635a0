pub mod api;
pub mod config;
pub mod error;
pub mod terminal;
pub mod ui;

pub use error::{Error, Result};

use crate::{Result, api::Language};
use async_trait::async_trait;
use std::path::PathBuf;

pub const SNIPPET_FILE_NAME: &str = "codepal_snippet.txt";
pub const SNIPPET_MIME: &str = "text/plain";

/// Typed access to the controls the handlers read and write.
///
/// Implementations use interior mutability so one view can be shared by
/// every in-flight action.
pub trait View: Send + Sync {
    fn language(&self) -> Language;

    fn prompt(&self) -> String;

    fn code(&self) -> String;

    fn set_code(&self, code: &str);

    fn set_output(&self, text: &str);
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Sink for downloaded snippets. Returns where the file ended up.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Downloads: Send + Sync {
    async fn save(&self, snippet: Snippet) -> Result<PathBuf>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    pub file_name: &'static str,
    pub mime: &'static str,
    pub contents: String,
}

impl Snippet {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            file_name: SNIPPET_FILE_NAME,
            mime: SNIPPET_MIME,
            contents: contents.into(),
        }
    }
}

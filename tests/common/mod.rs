#![allow(dead_code)]

use async_trait::async_trait;
use codepal::{
    Error, Result,
    api::{HttpApiClient, Language},
    config::ApiConfig,
    ui::{Clipboard, Controller, Downloads, MemoryView, Snippet},
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wiremock::MockServer;

/// Clipboard double that records writes, or fails with a fixed message.
#[derive(Debug, Default)]
pub struct RecordingClipboard {
    pub writes: Mutex<Vec<String>>,
    pub error: Option<String>,
}

impl RecordingClipboard {
    pub fn failing(message: &str) -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
            error: Some(message.to_string()),
        }
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if let Some(ref error) = self.error {
            return Err(Error::clipboard(error.clone()));
        }
        self.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingDownloads {
    pub saved: Mutex<Vec<Snippet>>,
}

#[async_trait]
impl Downloads for RecordingDownloads {
    async fn save(&self, snippet: Snippet) -> Result<PathBuf> {
        let path = PathBuf::from(snippet.file_name);
        self.saved.lock().unwrap().push(snippet);
        Ok(path)
    }
}

pub struct Harness {
    pub view: Arc<MemoryView>,
    pub clipboard: Arc<RecordingClipboard>,
    pub downloads: Arc<RecordingDownloads>,
    pub controller: Controller,
}

/// Controller wired to a real HTTP client pointed at `server`.
pub fn harness(server: &MockServer, language: Language) -> Harness {
    harness_with_clipboard(server, language, RecordingClipboard::default())
}

pub fn harness_with_clipboard(
    server: &MockServer,
    language: Language,
    clipboard: RecordingClipboard,
) -> Harness {
    let view = Arc::new(MemoryView::new(language));
    let clipboard = Arc::new(clipboard);
    let downloads = Arc::new(RecordingDownloads::default());
    let api = Arc::new(HttpApiClient::new(ApiConfig {
        base_url: server.uri(),
    }));

    let controller = Controller::new(api, view.clone(), clipboard.clone(), downloads.clone());

    Harness {
        view,
        clipboard,
        downloads,
        controller,
    }
}

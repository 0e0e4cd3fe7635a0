use super::{
    outcome::{Outcome, render},
    ports::{Clipboard, Downloads, Snippet, View},
};
use crate::{
    Error,
    api::{CodePalApi, Endpoint, Envelope},
};
use std::{fmt, sync::Arc};
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Generate,
    Explain,
    Debug,
    Copy,
    Download,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Generate => "generate",
            Action::Explain => "explain",
            Action::Debug => "debug",
            Action::Copy => "copy",
            Action::Download => "download",
        };
        f.write_str(name)
    }
}

/// Binds the five actions to the API and the local ports.
///
/// Actions share nothing but the view. Several may be in flight at once and
/// whichever finishes last decides the final output; nothing is cancelled.
#[derive(Clone)]
pub struct Controller {
    api: Arc<dyn CodePalApi>,
    view: Arc<dyn View>,
    clipboard: Arc<dyn Clipboard>,
    downloads: Arc<dyn Downloads>,
}

impl Controller {
    pub fn new(
        api: Arc<dyn CodePalApi>,
        view: Arc<dyn View>,
        clipboard: Arc<dyn Clipboard>,
        downloads: Arc<dyn Downloads>,
    ) -> Self {
        Self {
            api,
            view,
            clipboard,
            downloads,
        }
    }

    /// The only place the view's output and code area get written.
    pub fn apply(&self, outcome: &Outcome) {
        let rendered = render(outcome);
        if let Some(code) = &rendered.code {
            self.view.set_code(code);
        }
        self.view.set_output(&rendered.output);
    }

    pub async fn run(&self, action: Action) {
        match action {
            Action::Generate => self.generate().await,
            Action::Explain => self.explain().await,
            Action::Debug => self.debug().await,
            Action::Copy => self.copy().await,
            Action::Download => self.download().await,
        }
    }

    /// Runs `action` on its own task, tagged with a fresh action id.
    pub fn spawn(&self, action: Action) -> JoinHandle<()> {
        let controller = self.clone();
        let span = info_span!("action", id = %Uuid::new_v4(), %action);
        tokio::spawn(async move { controller.run(action).await }.instrument(span))
    }

    pub async fn generate(&self) {
        let language = self.view.language();
        let prompt = self.view.prompt().trim().to_string();
        self.apply(&Outcome::Pending(Endpoint::Generate));

        let outcome = match self.api.generate(language, prompt).await {
            Ok(envelope) if envelope.ok => Outcome::Generated {
                code: envelope.code,
            },
            Ok(envelope) => Outcome::GenerateRejected {
                error: envelope.error,
            },
            Err(e) => request_error(Endpoint::Generate, e),
        };
        self.apply(&outcome);
    }

    pub async fn explain(&self) {
        let language = self.view.language();
        let code = self.view.code();
        self.apply(&Outcome::Pending(Endpoint::Explain));

        let outcome = match self.api.explain(language, code).await {
            Ok(envelope) if envelope.ok => Outcome::Explained {
                explanation: envelope.explanation,
            },
            Ok(envelope) => rejected(Endpoint::Explain, envelope),
            Err(e) => request_error(Endpoint::Explain, e),
        };
        self.apply(&outcome);
    }

    pub async fn debug(&self) {
        let language = self.view.language();
        let code = self.view.code();
        self.apply(&Outcome::Pending(Endpoint::Debug));

        let outcome = match self.api.debug(language, code).await {
            Ok(envelope) if envelope.ok => Outcome::Debugged {
                issues: envelope.issues.unwrap_or_default(),
                suggestion: envelope.suggestion,
            },
            Ok(envelope) => rejected(Endpoint::Debug, envelope),
            Err(e) => request_error(Endpoint::Debug, e),
        };
        self.apply(&outcome);
    }

    pub async fn copy(&self) {
        let code = self.view.code();
        let outcome = match self.clipboard.write_text(&code).await {
            Ok(()) => {
                debug!("Copied {} bytes to clipboard", code.len());
                Outcome::Copied
            }
            Err(e) => {
                warn!("Clipboard write failed: {}", e);
                Outcome::CopyFailed(e.to_string())
            }
        };
        self.apply(&outcome);
    }

    /// Saves the code area as a snippet file. Never touches the output area.
    pub async fn download(&self) {
        let snippet = Snippet::new(self.view.code());
        match self.downloads.save(snippet).await {
            Ok(path) => info!("Saved snippet to {}", path.display()),
            Err(e) => warn!("Failed to save snippet: {}", e),
        }
    }
}

fn request_error(endpoint: Endpoint, error: Error) -> Outcome {
    warn!("{} failed: {}", endpoint.path(), error);
    Outcome::RequestError(error.to_string())
}

// Explain and debug hide the server's error text, unlike generate.
fn rejected(endpoint: Endpoint, envelope: Envelope) -> Outcome {
    debug!(
        "{} rejected: {}",
        endpoint.path(),
        envelope.error.as_deref().unwrap_or("<no error text>")
    );
    Outcome::Rejected
}

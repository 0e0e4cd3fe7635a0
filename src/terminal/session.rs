use super::{
    clipboard::SystemClipboard,
    commands::{self, Command, HELP},
    downloads::DirectoryDownloads,
    view::TerminalView,
};
use crate::{
    Result,
    api::{CodePalApi, HttpApiClient},
    config::Config,
    ui::{Clipboard, Controller, Downloads, View},
};
use std::sync::Arc;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, BufReader},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

const CODE_TERMINATOR: &str = ".";

/// Interactive front end: reads commands line by line and runs actions in
/// the background so input stays live while requests are pending.
pub struct Session {
    view: Arc<TerminalView>,
    controller: Controller,
    in_flight: Vec<JoinHandle<()>>,
}

impl Session {
    pub fn new(
        view: Arc<TerminalView>,
        api: Arc<dyn CodePalApi>,
        clipboard: Arc<dyn Clipboard>,
        downloads: Arc<dyn Downloads>,
    ) -> Self {
        let controller = Controller::new(api, view.clone(), clipboard, downloads);
        Self {
            view,
            controller,
            in_flight: Vec::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(TerminalView::stdout(config.editor.language)),
            Arc::new(HttpApiClient::new(config.api.clone())),
            Arc::new(SystemClipboard::new(config.clipboard.clone())),
            Arc::new(DirectoryDownloads::new(config.downloads.clone())),
        )
    }

    pub fn view(&self) -> &Arc<TerminalView> {
        &self.view
    }

    /// Processes `input` until `quit` or end of input, then waits for
    /// actions still running. A read error also waits before it is returned.
    pub async fn run<R>(&mut self, mut input: R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let result = self.read_commands(&mut input).await;
        self.finish().await;
        result
    }

    async fn read_commands<R>(&mut self, input: &mut R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        while let Some(line) = next_line(input).await? {
            match commands::parse(&line) {
                Ok(Command::Quit) => break,
                Ok(command) => self.execute(command, input).await?,
                Err(message) => self.view.print(&message),
            }
        }
        Ok(())
    }

    async fn execute<R>(&mut self, command: Command, input: &mut R) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        match command {
            Command::Empty | Command::Quit => {}
            Command::Language(language) => {
                self.view.set_language(language);
                self.view.print(&format!("language: {language}"));
            }
            Command::Prompt(prompt) => self.view.set_prompt(prompt),
            Command::EditCode => {
                let code = read_code_block(input).await?;
                self.view.set_code(&code);
            }
            Command::Open(path) => match tokio::fs::read_to_string(&path).await {
                Ok(code) => {
                    self.view.set_code(&code);
                    self.view
                        .print(&format!("loaded {} bytes from {}", code.len(), path.display()));
                }
                Err(e) => {
                    warn!("Failed to open {}: {}", path.display(), e);
                    self.view
                        .print(&format!("could not open {}: {}", path.display(), e));
                }
            },
            Command::Show => {
                let state = self.view.snapshot();
                self.view.print(&format!(
                    "language: {}\nprompt: {}\n--- code ---\n{}\n------------",
                    state.language, state.prompt, state.code
                ));
            }
            Command::Run(action) => {
                debug!("Dispatching {}", action);
                self.in_flight.retain(|handle| !handle.is_finished());
                self.in_flight.push(self.controller.spawn(action));
            }
            Command::Help => self.view.print(HELP),
        }
        Ok(())
    }

    async fn finish(&mut self) {
        let pending = std::mem::take(&mut self.in_flight);
        if !pending.is_empty() {
            info!("Waiting for {} running action(s)", pending.len());
        }
        for handle in pending {
            if let Err(e) = handle.await {
                warn!("Action task failed: {}", e);
            }
        }
    }
}

/// Next line without its terminator. Bytes that are not UTF-8 are replaced
/// instead of failing the read.
async fn next_line<R>(input: &mut R) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    if input.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Collects lines up to a lone `.` (or end of input), newline-terminated.
async fn read_code_block<R>(input: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut code = String::new();
    while let Some(line) = next_line(input).await? {
        if line.trim_end() == CODE_TERMINATOR {
            break;
        }
        code.push_str(&line);
        code.push('\n');
    }
    Ok(code)
}

/// Runs a session on stdin/stdout with the given configuration.
pub async fn run(config: Config) -> Result<()> {
    info!("Using CodePal API at {}", config.api.base_url);

    let mut session = Session::from_config(&config);
    session.view().print("CodePal ready. Type 'help' for commands.");
    session.run(BufReader::new(tokio::io::stdin())).await
}

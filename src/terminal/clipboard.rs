use crate::{Error, Result, config::ClipboardConfig, ui::Clipboard};
use async_trait::async_trait;
use std::{env, process::Stdio};
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::debug;

/// Copies by piping the text into a clipboard program.
pub struct SystemClipboard {
    command: Vec<String>,
}

impl SystemClipboard {
    pub fn new(config: ClipboardConfig) -> Self {
        let command = config.command.or_else(detect_command).unwrap_or_default();
        debug!("Clipboard command: {:?}", command);
        Self { command }
    }
}

fn detect_command() -> Option<Vec<String>> {
    let argv: &[&str] = if cfg!(target_os = "macos") {
        &["pbcopy"]
    } else if cfg!(windows) {
        &["clip"]
    } else if env::var_os("WAYLAND_DISPLAY").is_some() {
        &["wl-copy"]
    } else if env::var_os("DISPLAY").is_some() {
        &["xclip", "-selection", "clipboard"]
    } else {
        return None;
    };
    Some(argv.iter().map(|s| s.to_string()).collect())
}

#[async_trait]
impl Clipboard for SystemClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| Error::clipboard("no clipboard command available"))?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::clipboard(format!("failed to start '{program}': {e}")))?;

        if let Some(mut stdin) = child.stdin.take() {
            let written = match stdin.write_all(text.as_bytes()).await {
                Ok(()) => stdin.shutdown().await,
                Err(e) => Err(e),
            };
            // A program that exits early closes the pipe; its exit status says more.
            if let Err(e) = written {
                debug!("Writing to '{}' failed: {}", program, e);
            }
        }

        // Only the direct child is awaited. Clipboard owners such as xclip fork
        // a background process that outlives it, and no pipe here may be held
        // open by that process.
        let status = child.wait().await?;
        if !status.success() {
            return Err(Error::clipboard(format!("'{program}' exited with {status}")));
        }

        Ok(())
    }
}

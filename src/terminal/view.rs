use crate::{
    api::Language,
    ui::{View, ViewState},
};
use std::{
    io::{self, Write},
    sync::{Mutex, MutexGuard},
};
use tracing::warn;

struct Screen {
    state: ViewState,
    out: Box<dyn Write + Send>,
}

impl Screen {
    fn print(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

/// View backed by in-memory controls; every output is echoed to a writer.
///
/// Controls and writer share one lock, so the last line printed is always
/// the stored output.
pub struct TerminalView {
    screen: Mutex<Screen>,
}

impl TerminalView {
    pub fn stdout(language: Language) -> Self {
        Self::with_writer(language, Box::new(io::stdout()))
    }

    pub fn with_writer(language: Language, out: Box<dyn Write + Send>) -> Self {
        Self {
            screen: Mutex::new(Screen {
                state: ViewState {
                    language,
                    ..ViewState::default()
                },
                out,
            }),
        }
    }

    pub fn set_language(&self, language: Language) {
        self.lock().state.language = language;
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.lock().state.prompt = prompt.into();
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock().state.clone()
    }

    pub fn print(&self, text: &str) {
        self.lock().print(text);
    }

    fn lock(&self) -> MutexGuard<'_, Screen> {
        self.screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl View for TerminalView {
    fn language(&self) -> Language {
        self.lock().state.language
    }

    fn prompt(&self) -> String {
        self.lock().state.prompt.clone()
    }

    fn code(&self) -> String {
        self.lock().state.code.clone()
    }

    fn set_code(&self, code: &str) {
        self.lock().state.code = code.to_string();
    }

    fn set_output(&self, text: &str) {
        let mut screen = self.lock();
        screen.state.output = text.to_string();
        screen.print(text);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Writer whose contents can be read back after the view took ownership.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuffer(pub Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_output_is_echoed() {
        let buffer = SharedBuffer::default();
        let view = TerminalView::with_writer(Language::Python, Box::new(buffer.clone()));

        view.set_output("Explaining...");
        view.set_code("x = 1");

        assert_eq!(buffer.contents(), "Explaining...\n");
        assert_eq!(view.snapshot().output, "Explaining...");
        assert_eq!(view.code(), "x = 1");
    }

    #[test]
    fn test_last_printed_line_matches_output_under_contention() {
        let buffer = SharedBuffer::default();
        let view = Arc::new(TerminalView::with_writer(
            Language::Python,
            Box::new(buffer.clone()),
        ));

        let writers: Vec<_> = (0..8)
            .map(|worker| {
                let view = view.clone();
                std::thread::spawn(move || {
                    for i in 0..200 {
                        view.set_output(&format!("worker {worker} step {i}"));
                    }
                })
            })
            .collect();
        for writer in writers {
            writer.join().unwrap();
        }

        let contents = buffer.contents();
        let last_line = contents.lines().last().unwrap();
        assert_eq!(last_line, view.snapshot().output);
    }
}

use super::ports::View;
use crate::api::Language;
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard},
};

/// Outputs kept by [`MemoryView::outputs`]; older ones are dropped.
pub const OUTPUT_HISTORY_LIMIT: usize = 64;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub language: Language,
    pub prompt: String,
    pub code: String,
    pub output: String,
}

/// Headless view: holds control values in memory and keeps the most recent
/// outputs written to it, oldest first.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<ViewState>,
    outputs: Mutex<VecDeque<String>>,
}

impl MemoryView {
    pub fn new(language: Language) -> Self {
        Self {
            state: Mutex::new(ViewState {
                language,
                ..ViewState::default()
            }),
            outputs: Mutex::new(VecDeque::new()),
        }
    }

    pub fn set_language(&self, language: Language) {
        self.lock_state().language = language;
    }

    pub fn set_prompt(&self, prompt: impl Into<String>) {
        self.lock_state().prompt = prompt.into();
    }

    pub fn snapshot(&self) -> ViewState {
        self.lock_state().clone()
    }

    pub fn output(&self) -> String {
        self.lock_state().output.clone()
    }

    pub fn outputs(&self) -> Vec<String> {
        self.outputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl View for MemoryView {
    fn language(&self) -> Language {
        self.lock_state().language
    }

    fn prompt(&self) -> String {
        self.lock_state().prompt.clone()
    }

    fn code(&self) -> String {
        self.lock_state().code.clone()
    }

    fn set_code(&self, code: &str) {
        self.lock_state().code = code.to_string();
    }

    fn set_output(&self, text: &str) {
        let mut state = self.lock_state();
        state.output = text.to_string();
        let mut outputs = self
            .outputs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if outputs.len() == OUTPUT_HISTORY_LIMIT {
            outputs.pop_front();
        }
        outputs.push_back(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_output_overwrites_and_records() {
        let view = MemoryView::new(Language::Cpp);
        view.set_output("Generating...");
        view.set_output("Generated ✅");

        assert_eq!(view.output(), "Generated ✅");
        assert_eq!(view.outputs(), vec!["Generating...", "Generated ✅"]);
        assert_eq!(view.language(), Language::Cpp);
    }

    #[test]
    fn test_output_history_is_bounded() {
        let view = MemoryView::default();
        for i in 0..OUTPUT_HISTORY_LIMIT + 10 {
            view.set_output(&format!("output {i}"));
        }

        let outputs = view.outputs();
        assert_eq!(outputs.len(), OUTPUT_HISTORY_LIMIT);
        assert_eq!(outputs[0], "output 10");
        assert_eq!(view.output(), format!("output {}", OUTPUT_HISTORY_LIMIT + 9));
    }
}

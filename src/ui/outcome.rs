use crate::api::{Endpoint, Reported};

pub const GENERATED_TEXT: &str = "Generated ✅";
pub const COPIED_TEXT: &str = "Copied to clipboard ✅";
pub const NO_ISSUES_TEXT: &str = "No obvious issues found.";
pub const GENERIC_ERROR_TEXT: &str = "Error";
/// Rendered in place of a field the server left out.
pub const UNSET_TEXT: &str = "undefined";
/// Rendered in place of a field the server sent as `null`.
pub const NULL_TEXT: &str = "null";

/// Everything a handler can end up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Pending(Endpoint),
    Generated { code: Reported<String> },
    /// `ok: false` from generate; the server's error text is shown.
    GenerateRejected { error: Reported<String> },
    Explained { explanation: Reported<String> },
    Debugged {
        issues: Vec<String>,
        suggestion: Reported<String>,
    },
    /// `ok: false` from explain or debug; only a generic marker is shown.
    Rejected,
    RequestError(String),
    Copied,
    CopyFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub output: String,
    /// New code area contents, when the outcome replaces them.
    pub code: Option<String>,
}

impl Rendered {
    fn output(text: impl Into<String>) -> Self {
        Self {
            output: text.into(),
            code: None,
        }
    }
}

pub fn render(outcome: &Outcome) -> Rendered {
    match outcome {
        Outcome::Pending(endpoint) => Rendered::output(pending_text(*endpoint)),
        Outcome::Generated { code } => Rendered {
            output: GENERATED_TEXT.to_string(),
            // A null code empties the code area; a missing one fills it with the unset marker.
            code: Some(match code {
                Reported::Value(code) => code.clone(),
                Reported::Null => String::new(),
                Reported::Missing => UNSET_TEXT.to_string(),
            }),
        },
        Outcome::GenerateRejected { error } => {
            Rendered::output(format!("Error: {}", inline_text(error)))
        }
        Outcome::Explained { explanation } => {
            Rendered::output(explanation.as_deref().unwrap_or_default())
        }
        Outcome::Debugged { issues, suggestion } => {
            Rendered::output(debug_report(issues, suggestion))
        }
        Outcome::Rejected => Rendered::output(GENERIC_ERROR_TEXT),
        Outcome::RequestError(message) => Rendered::output(format!("Error: {message}")),
        Outcome::Copied => Rendered::output(COPIED_TEXT),
        Outcome::CopyFailed(message) => Rendered::output(format!("Copy failed: {message}")),
    }
}

fn pending_text(endpoint: Endpoint) -> &'static str {
    match endpoint {
        Endpoint::Generate => "Generating...",
        Endpoint::Explain => "Explaining...",
        Endpoint::Debug => "Debugging...",
    }
}

/// Text of a field spliced into a larger message.
fn inline_text(field: &Reported<String>) -> &str {
    match field {
        Reported::Value(text) => text,
        Reported::Null => NULL_TEXT,
        Reported::Missing => UNSET_TEXT,
    }
}

fn debug_report(issues: &[String], suggestion: &Reported<String>) -> String {
    let issues = issues
        .iter()
        .map(|issue| format!("• {issue}"))
        .collect::<Vec<_>>()
        .join("\n");
    let issues = if issues.is_empty() {
        NO_ISSUES_TEXT.to_string()
    } else {
        issues
    };

    format!("{issues}\n\nSuggestion: {}", inline_text(suggestion))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(Endpoint::Generate, "Generating...")]
    #[case(Endpoint::Explain, "Explaining...")]
    #[case(Endpoint::Debug, "Debugging...")]
    fn test_pending_text(#[case] endpoint: Endpoint, #[case] expected: &str) {
        assert_eq!(render(&Outcome::Pending(endpoint)), Rendered::output(expected));
    }

    #[test]
    fn test_generated_replaces_code() {
        let rendered = render(&Outcome::Generated {
            code: Reported::Value("def r(s): return s[::-1]".to_string()),
        });

        assert_eq!(rendered.output, "Generated ✅");
        assert_eq!(rendered.code.as_deref(), Some("def r(s): return s[::-1]"));
    }

    #[test]
    fn test_generate_rejected_shows_server_error() {
        let rendered = render(&Outcome::GenerateRejected {
            error: Reported::Value("Unsupported language".to_string()),
        });
        assert_eq!(rendered, Rendered::output("Error: Unsupported language"));
    }

    #[test]
    fn test_generate_rejected_without_error_text() {
        let rendered = render(&Outcome::GenerateRejected {
            error: Reported::Missing,
        });
        assert_eq!(rendered.output, "Error: undefined");

        let rendered = render(&Outcome::GenerateRejected {
            error: Reported::Null,
        });
        assert_eq!(rendered.output, "Error: null");
    }

    #[test]
    fn test_explained_is_verbatim() {
        let text = "  1: x = 1 (assigns a value)\n".to_string();
        let rendered = render(&Outcome::Explained {
            explanation: Reported::Value(text.clone()),
        });
        assert_eq!(rendered, Rendered::output(text));
    }

    #[test]
    fn test_debug_report_lists_issues_in_order() {
        let rendered = render(&Outcome::Debugged {
            issues: vec![
                "missing null check".to_string(),
                "unused variable".to_string(),
            ],
            suggestion: Reported::Value("add a guard clause".to_string()),
        });

        assert_eq!(
            rendered.output,
            "• missing null check\n• unused variable\n\nSuggestion: add a guard clause"
        );
        assert!(rendered.code.is_none());
    }

    #[test]
    fn test_debug_report_without_issues() {
        let rendered = render(&Outcome::Debugged {
            issues: vec![],
            suggestion: Reported::Value("Consider unit tests.".to_string()),
        });
        assert_eq!(
            rendered.output,
            "No obvious issues found.\n\nSuggestion: Consider unit tests."
        );
    }

    #[test]
    fn test_debug_report_without_suggestion() {
        let rendered = render(&Outcome::Debugged {
            issues: vec!["x".to_string()],
            suggestion: Reported::Missing,
        });
        assert_eq!(rendered.output, "• x\n\nSuggestion: undefined");
    }

    #[test]
    fn test_debug_report_with_null_suggestion() {
        let rendered = render(&Outcome::Debugged {
            issues: vec![],
            suggestion: Reported::Null,
        });
        assert_eq!(rendered.output, "No obvious issues found.\n\nSuggestion: null");
    }

    #[rstest]
    #[case(Reported::Missing, "undefined")]
    #[case(Reported::Null, "")]
    fn test_generated_without_code(#[case] code: Reported<String>, #[case] expected: &str) {
        let rendered = render(&Outcome::Generated { code });

        assert_eq!(rendered.output, "Generated ✅");
        assert_eq!(rendered.code.as_deref(), Some(expected));
    }

    #[rstest]
    #[case(Reported::Missing)]
    #[case(Reported::Null)]
    fn test_explained_without_explanation(#[case] explanation: Reported<String>) {
        let rendered = render(&Outcome::Explained { explanation });
        assert_eq!(rendered, Rendered::output(""));
    }

    #[test]
    fn test_copy_outputs_are_distinct() {
        let ok = render(&Outcome::Copied).output;
        let failed = render(&Outcome::CopyFailed("denied".to_string())).output;

        assert_eq!(ok, "Copied to clipboard ✅");
        assert_eq!(failed, "Copy failed: denied");
        assert!(!ok.starts_with("Copy failed: "));
    }
}

use crate::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::{fmt, str::FromStr};

/// Languages offered by the language selector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Python,
    Javascript,
    Cpp,
    Java,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::Javascript,
        Language::Cpp,
        Language::Java,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Cpp => "cpp",
            Language::Java => "java",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.as_str() == wanted)
            .ok_or_else(|| Error::UnknownLanguage {
                name: s.trim().to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Generate,
    Explain,
    Debug,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Generate => "/api/generate",
            Endpoint::Explain => "/api/explain",
            Endpoint::Debug => "/api/debug",
        }
    }
}

/// Body of every POST. Built fresh for each action from the current view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeRequest {
    pub language: Language,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CodeRequest {
    pub fn generate(language: Language, prompt: impl Into<String>) -> Self {
        Self {
            language,
            prompt: Some(prompt.into()),
            code: None,
        }
    }

    pub fn with_code(language: Language, code: impl Into<String>) -> Self {
        Self {
            language,
            prompt: None,
            code: Some(code.into()),
        }
    }
}

/// Response shape shared by all endpoints; `ok` tells success from failure.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Envelope {
    #[serde(default, deserialize_with = "truthy")]
    pub ok: bool,
    #[serde(default)]
    pub code: Reported<String>,
    #[serde(default)]
    pub explanation: Reported<String>,
    #[serde(default)]
    pub issues: Option<Vec<String>>,
    #[serde(default)]
    pub suggestion: Reported<String>,
    #[serde(default)]
    pub error: Reported<String>,
}

/// A response field that may be left out, sent as `null`, or carry a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Reported<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl Reported<String> {
    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Reported::Value(value) => Some(value),
            Reported::Missing | Reported::Null => None,
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Reported<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Reported::Value(value),
            None => Reported::Null,
        })
    }
}

// `ok` follows JavaScript truthiness: `1` and `"yes"` succeed, `0`, `""` and `null` fail.
fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

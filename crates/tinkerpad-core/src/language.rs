use serde::{Deserialize, Serialize};
use std::fmt;

/// Language tag inferred from a file name, used for editor mode selection
/// and for routing a "run" request to an execution engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    JavaScript,
    TypeScript,
    Python,
    Sql,
    Markdown,
    Json,
    Html,
    Css,
    PlainText,
}

impl Language {
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "js" | "jsx" | "mjs" => Language::JavaScript,
            "ts" | "tsx" => Language::TypeScript,
            "py" => Language::Python,
            "sql" => Language::Sql,
            "md" | "markdown" => Language::Markdown,
            "json" => Language::Json,
            "html" | "htm" => Language::Html,
            "css" => Language::Css,
            _ => Language::PlainText,
        }
    }

    pub fn from_file_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((stem, extension)) if !stem.is_empty() => Self::from_extension(extension),
            _ => Language::PlainText,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Python => "python",
            Language::Sql => "sql",
            Language::Markdown => "markdown",
            Language::Json => "json",
            Language::Html => "html",
            Language::Css => "css",
            Language::PlainText => "plaintext",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

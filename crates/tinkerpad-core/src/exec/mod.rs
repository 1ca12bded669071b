//! Pluggable execution seam for the "run" action.
//!
//! The playground never interprets code itself; a real sandbox plugs in
//! behind [`ExecutionEngine`]. The bundled [`OfflineEngine`] answers with
//! per-language guidance so the rest of the system can be exercised
//! without one.

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Success,
    Error,
    Info,
}

/// Console-style transcript of one run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub timestamp: i64,
}

impl ExecutionResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
            kind: ResultKind::Success,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn info(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            error: None,
            kind: ResultKind::Info,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            output: message.clone(),
            error: Some(message),
            kind: ResultKind::Error,
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ResultKind::Error
    }
}

#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    fn name(&self) -> &str;

    async fn execute(&self, source: &str, language: Language) -> Result<ExecutionResult>;
}

/// Run a source through an engine, folding any failure into an
/// error-kinded result. This is the only place a failure surfaces to the
/// end user as such.
pub async fn run(engine: &dyn ExecutionEngine, source: &str, language: Language) -> ExecutionResult {
    match engine.execute(source, language).await {
        Ok(result) => result,
        Err(err) => ExecutionResult::error(err.to_string()),
    }
}

/// Engine used when no sandbox is attached: canned guidance per language,
/// never touching the source text.
pub struct OfflineEngine;

#[async_trait]
impl ExecutionEngine for OfflineEngine {
    fn name(&self) -> &str {
        "offline"
    }

    async fn execute(&self, _source: &str, language: Language) -> Result<ExecutionResult> {
        let result = match language {
            Language::Sql => {
                ExecutionResult::info("SQL execution not yet implemented. Query saved successfully.")
            }
            Language::Html | Language::Css | Language::Markdown | Language::Json => {
                ExecutionResult::success(
                    "File saved successfully. Use the Preview panel to see the result.",
                )
            }
            Language::JavaScript | Language::TypeScript | Language::Python => {
                ExecutionResult::info(format!(
                    "No {language} sandbox is attached. Connect an execution engine to run this file."
                ))
            }
            Language::PlainText => ExecutionResult::success("File saved successfully."),
        };
        Ok(result)
    }
}

pub mod config;
pub mod error;
pub mod exec;
pub mod language;
pub mod project;
pub mod storage;
pub mod templates;

// Re-export key types
pub use config::Settings;
pub use error::TinkerError;
pub use exec::{ExecutionEngine, ExecutionResult, OfflineEngine, ResultKind};
pub use language::Language;
pub use project::{FileNode, FileUpdate, NodeKind, Project, ProjectStore};
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use templates::Template;

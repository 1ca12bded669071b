// Library interface for tinkerpad-cli
// This allows integration tests to access internal modules

// NOTE: Since commands.rs is also declared in main.rs, we use a path
// attribute to reference the same source file to avoid "file loaded
// multiple times" errors.

#[path = "commands.rs"]
pub mod commands;

// Re-export commonly used items for easier testing
pub use commands::{dispatch, Command};

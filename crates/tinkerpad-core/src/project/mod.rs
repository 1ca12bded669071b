mod store;
pub mod tree;

pub use store::{
    ClipboardRecord, ProjectStore, CLIPBOARD_KEY, CURRENT_PROJECT_KEY, PROJECTS_KEY,
};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::language::Language;

/// Generate a unique node/project id.
pub fn generate_file_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

/// A node in a project's file tree.
///
/// Invariants: `content` is only ever present on files, `children` only on
/// folders. `parent_id` is a non-owning back-reference; the tree structure
/// via `children` is the sole ownership path.
///
/// Serde names match the persisted JSON of the playground state
/// (`type`, `isOpen`, `parent`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(rename = "isOpen", default, skip_serializing_if = "std::ops::Not::not")]
    pub is_expanded: bool,
    #[serde(rename = "parent", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl FileNode {
    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        let name = name.into();
        let language = Language::from_file_name(&name);
        Self {
            id: generate_file_id(),
            name,
            kind: NodeKind::File,
            content: Some(content.into()),
            language: Some(language),
            children: None,
            is_expanded: false,
            parent_id: None,
        }
    }

    pub fn folder(name: impl Into<String>, children: Vec<FileNode>) -> Self {
        let id = generate_file_id();
        let children = children
            .into_iter()
            .map(|mut child| {
                child.parent_id = Some(id.clone());
                child
            })
            .collect();
        Self {
            id,
            name: name.into(),
            kind: NodeKind::Folder,
            content: None,
            language: None,
            children: Some(children),
            is_expanded: false,
            parent_id: None,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }

    pub fn is_folder(&self) -> bool {
        self.kind == NodeKind::Folder
    }

    /// Merge a partial update, preserving the kind invariants: content never
    /// lands on a folder and the expansion flag never lands on a file.
    pub fn apply(&mut self, update: FileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
            if self.is_file() {
                self.language = Some(Language::from_file_name(&self.name));
            }
        }
        if let Some(content) = update.content {
            if self.is_file() {
                self.content = Some(content);
            }
        }
        if let Some(expanded) = update.is_expanded {
            if self.is_folder() {
                self.is_expanded = expanded;
            }
        }
    }
}

/// Partial update applied to a node by id.
#[derive(Debug, Clone, Default)]
pub struct FileUpdate {
    pub name: Option<String>,
    pub content: Option<String>,
    pub is_expanded: Option<bool>,
}

impl FileUpdate {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn expanded(expanded: bool) -> Self {
        Self {
            is_expanded: Some(expanded),
            ..Self::default()
        }
    }
}

/// One named workspace: a file tree plus tab/selection state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub files: Vec<FileNode>,
    #[serde(rename = "openTabs", default)]
    pub open_tabs: Vec<String>,
    #[serde(rename = "activeFile", default, skip_serializing_if = "Option::is_none")]
    pub active_file: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: generate_file_id(),
            name: name.into(),
            files: Vec::new(),
            open_tabs: Vec::new(),
            active_file: None,
        }
    }
}

/// Default content for a freshly created file, keyed off its extension.
pub fn default_content(name: &str) -> String {
    match Language::from_file_name(name) {
        Language::JavaScript | Language::TypeScript => {
            format!("// {name}\nconsole.log('Hello from {name}');\n")
        }
        Language::Python => format!(
            "# {name}\n\ndef main():\n    print(\"Hello from {name}!\")\n\n\nif __name__ == \"__main__\":\n    main()\n"
        ),
        Language::Html => format!(
            "<!DOCTYPE html>\n<html>\n<head>\n    <title>{name}</title>\n</head>\n<body>\n    <h1>Hello from {name}</h1>\n</body>\n</html>\n"
        ),
        _ => format!("// {name}\n// Start coding here...\n"),
    }
}

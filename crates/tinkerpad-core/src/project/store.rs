use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::storage::Storage;
use crate::templates::Template;

use super::{default_content, tree, FileNode, FileUpdate, NodeKind, Project};

/// Storage key holding the JSON array of projects.
pub const PROJECTS_KEY: &str = "projects";
/// Storage key holding the JSON string id of the project to activate on load.
pub const CURRENT_PROJECT_KEY: &str = "currentProjectId";
/// Storage key holding the pending copy-source for the next paste.
pub const CLIPBOARD_KEY: &str = "clipboard";

/// The single pending copy-source held between `copy_file` and `paste_file`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipboardRecord {
    pub file: FileNode,
    pub action: String,
}

/// Canonical owner of the project list, current-project pointer, and
/// tab/selection state, with write-through persistence after every
/// mutation.
///
/// Constructed once at application start and passed by reference; there is
/// no ambient global. Lookups that fail to resolve an id degrade to no-ops
/// (best-effort UI-state model); only storage I/O surfaces errors.
///
/// The store always holds at least one project, and the current-project
/// pointer always names one of them.
pub struct ProjectStore {
    storage: Box<dyn Storage>,
    projects: Vec<Project>,
    current_id: String,
}

impl ProjectStore {
    /// Load persisted state, falling back to the default template when the
    /// store is empty or unreadable, and self-healing a current-project
    /// pointer that names no loaded project.
    pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
        let mut projects = match storage.get(PROJECTS_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Project>>(&raw) {
                Ok(projects) => projects,
                Err(err) => {
                    warn!(%err, "stored projects are unreadable, starting from template");
                    Vec::new()
                }
            },
            None => Vec::new(),
        };
        if projects.is_empty() {
            projects.push(Template::JavaScript.seed());
        }

        let stored_id = match storage.get(CURRENT_PROJECT_KEY)? {
            Some(raw) => serde_json::from_str::<String>(&raw).ok(),
            None => None,
        };

        let mut store = Self {
            storage,
            projects,
            current_id: String::new(),
        };

        match stored_id {
            Some(id) if store.projects.iter().any(|p| p.id == id) => {
                store.current_id = id;
            }
            stored => {
                let fallback = store.projects[0].id.clone();
                if let Some(ghost) = stored {
                    info!(ghost = %ghost, actual = %fallback, "current project pointer mismatch, correcting");
                }
                store.current_id = fallback;
                store.persist()?;
            }
        }

        Ok(store)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn current_project(&self) -> &Project {
        self.projects
            .iter()
            .find(|p| p.id == self.current_id)
            .unwrap_or(&self.projects[0])
    }

    pub fn current_project_id(&self) -> &str {
        &self.current_id
    }

    fn current_mut(&mut self) -> &mut Project {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == self.current_id)
            .unwrap_or(0);
        &mut self.projects[index]
    }

    /// Switch the current project. No-op on an unknown id.
    pub fn select_project(&mut self, id: &str) -> Result<bool> {
        if !self.projects.iter().any(|p| p.id == id) {
            return Ok(false);
        }
        self.current_id = id.to_string();
        self.persist()?;
        Ok(true)
    }

    /// Add a project (typically template-seeded) and make it current.
    pub fn add_project(&mut self, project: Project) -> Result<String> {
        let id = project.id.clone();
        info!(project = %id, name = %project.name, "adding project");
        self.projects.push(project);
        self.current_id = id.clone();
        self.persist()?;
        Ok(id)
    }

    /// Remove a project. The store never goes empty: removing the last
    /// project reseeds the default template.
    pub fn remove_project(&mut self, id: &str) -> Result<bool> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Ok(false);
        }
        if self.projects.is_empty() {
            self.projects.push(Template::JavaScript.seed());
        }
        if self.current_id == id {
            self.current_id = self.projects[0].id.clone();
        }
        self.persist()?;
        Ok(true)
    }

    /// Create a file or folder under `parent_id` (project root when absent).
    /// Returns `None` without touching the tree when the parent does not
    /// resolve to a folder. Files with no explicit content get a default
    /// body keyed off their extension.
    pub fn create_file(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
        kind: NodeKind,
        content: Option<String>,
    ) -> Result<Option<FileNode>> {
        let mut node = match kind {
            NodeKind::File => {
                let content = content.unwrap_or_else(|| default_content(name));
                FileNode::file(name, content)
            }
            NodeKind::Folder => FileNode::folder(name, Vec::new()),
        };

        let project = self.current_mut();
        match parent_id {
            Some(parent_id) => {
                let Some(parent) = tree::find_node_mut(&mut project.files, parent_id) else {
                    debug!(parent = parent_id, "create parent not found, skipping");
                    return Ok(None);
                };
                if !parent.is_folder() {
                    debug!(parent = parent_id, "create parent is not a folder, skipping");
                    return Ok(None);
                }
                node.parent_id = Some(parent.id.clone());
                parent.is_expanded = true;
                parent
                    .children
                    .get_or_insert_with(Vec::new)
                    .push(node.clone());
            }
            None => {
                project.files.push(node.clone());
            }
        }

        debug!(id = %node.id, name = %node.name, "created node");
        self.persist()?;
        Ok(Some(node))
    }

    /// Depth-first lookup over the current project's tree.
    pub fn find_file(&self, id: &str) -> Option<FileNode> {
        tree::find_node(&self.current_project().files, id).cloned()
    }

    /// Merge a partial update into the node with the given id.
    pub fn update_file(&mut self, id: &str, update: FileUpdate) -> Result<()> {
        let changed = tree::update_node(&mut self.current_mut().files, id, update);
        if changed {
            self.persist()?;
        }
        Ok(())
    }

    pub fn rename_file(&mut self, id: &str, new_name: &str) -> Result<()> {
        self.update_file(id, FileUpdate::name(new_name))
    }

    /// Write file content on explicit save or autosave.
    pub fn save_file(&mut self, id: &str, content: &str) -> Result<()> {
        self.update_file(id, FileUpdate::content(content))
    }

    /// Flip a folder's expansion flag. No-op on files.
    pub fn toggle_folder(&mut self, id: &str) -> Result<()> {
        let project = self.current_mut();
        let Some(node) = tree::find_node_mut(&mut project.files, id) else {
            return Ok(());
        };
        if !node.is_folder() {
            return Ok(());
        }
        node.is_expanded = !node.is_expanded;
        self.persist()
    }

    /// Remove the subtree rooted at `id`, severing any open tabs into it and
    /// re-targeting the active file to the last remaining tab.
    pub fn delete_file(&mut self, id: &str) -> Result<()> {
        let project = self.current_mut();
        let Some(removed) = tree::remove_node(&mut project.files, id) else {
            return Ok(());
        };

        let severed = tree::collect_ids(std::slice::from_ref(&removed));
        project.open_tabs.retain(|tab| !severed.contains(tab));
        if project
            .active_file
            .as_ref()
            .is_some_and(|active| severed.contains(active))
        {
            project.active_file = project.open_tabs.last().cloned();
        }

        debug!(id, name = %removed.name, "deleted node");
        self.persist()
    }

    /// Re-home the subtree rooted at `id` under `target_folder_id`.
    /// Refuses to move a folder into its own subtree and to move into a
    /// non-folder target; both degrade to no-ops.
    pub fn move_file(&mut self, id: &str, target_folder_id: &str) -> Result<()> {
        let project = self.current_mut();

        {
            let Some(moving) = tree::find_node(&project.files, id) else {
                return Ok(());
            };
            if tree::subtree_contains(moving, target_folder_id) {
                warn!(id, target = target_folder_id, "refusing move into own subtree");
                return Ok(());
            }
        }
        match tree::find_node(&project.files, target_folder_id) {
            Some(target) if target.is_folder() => {}
            _ => return Ok(()),
        }

        let Some(mut moved) = tree::remove_node(&mut project.files, id) else {
            return Ok(());
        };
        match tree::find_node_mut(&mut project.files, target_folder_id) {
            Some(target) => {
                moved.parent_id = Some(target.id.clone());
                target.is_expanded = true;
                target.children.get_or_insert_with(Vec::new).push(moved);
            }
            None => {
                moved.parent_id = None;
                project.files.push(moved);
            }
        }

        debug!(id, target = target_folder_id, "moved node");
        self.persist()
    }

    /// Snapshot the subtree rooted at `id` as the pending copy-source.
    pub fn copy_file(&mut self, id: &str) -> Result<()> {
        let Some(file) = self.find_file(id) else {
            return Ok(());
        };
        debug!(id, name = %file.name, "copied node to clipboard");
        let record = ClipboardRecord {
            file,
            action: "copy".to_string(),
        };
        let raw = serde_json::to_string(&record)?;
        self.storage.set(CLIPBOARD_KEY, &raw)
    }

    /// Deep-clone the clipboard subtree with fresh ids under `parent_id`
    /// (project root when absent), renaming the clone root to avoid a
    /// same-name collision. Returns `None` when there is nothing to paste.
    /// The clipboard is cleared after a successful paste.
    pub fn paste_file(&mut self, parent_id: Option<&str>) -> Result<Option<FileNode>> {
        let Some(raw) = self.storage.get(CLIPBOARD_KEY)? else {
            return Ok(None);
        };
        let record: ClipboardRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "discarding unreadable clipboard record");
                self.storage.remove(CLIPBOARD_KEY)?;
                return Ok(None);
            }
        };

        let mut clone = tree::clone_with_new_ids(&record.file, parent_id);
        clone.name = tree::copy_name(&clone.name);

        let project = self.current_mut();
        match parent_id {
            Some(parent_id) => {
                let Some(parent) = tree::find_node_mut(&mut project.files, parent_id) else {
                    return Ok(None);
                };
                if !parent.is_folder() {
                    return Ok(None);
                }
                parent.is_expanded = true;
                parent
                    .children
                    .get_or_insert_with(Vec::new)
                    .push(clone.clone());
            }
            None => {
                project.files.push(clone.clone());
            }
        }

        debug!(id = %clone.id, name = %clone.name, "pasted node");
        self.storage.remove(CLIPBOARD_KEY)?;
        self.persist()?;
        Ok(Some(clone))
    }

    /// Open a file in a tab (appending only when not already open) and make
    /// it active. No-op on folders and unknown ids.
    pub fn open_file(&mut self, id: &str) -> Result<()> {
        let project = self.current_mut();
        let is_file = tree::find_node(&project.files, id).is_some_and(FileNode::is_file);
        if !is_file {
            return Ok(());
        }
        if !project.open_tabs.iter().any(|tab| tab == id) {
            project.open_tabs.push(id.to_string());
        }
        project.active_file = Some(id.to_string());
        self.persist()
    }

    /// Close a tab; closing an already-closed tab is a no-op. When the
    /// active tab closes, the last remaining tab becomes active.
    pub fn close_file(&mut self, id: &str) -> Result<()> {
        let project = self.current_mut();
        let before = project.open_tabs.len();
        project.open_tabs.retain(|tab| tab != id);
        if project.open_tabs.len() == before {
            return Ok(());
        }
        if project.active_file.as_deref() == Some(id) {
            project.active_file = project.open_tabs.last().cloned();
        }
        self.persist()
    }

    /// Make an already-open tab active. Ids outside `open_tabs` are
    /// rejected as no-ops, keeping the active-file invariant.
    pub fn set_active_file(&mut self, id: &str) -> Result<()> {
        let project = self.current_mut();
        if !project.open_tabs.iter().any(|tab| tab == id) {
            return Ok(());
        }
        project.active_file = Some(id.to_string());
        self.persist()
    }

    /// The active file's node, when one is set.
    pub fn active_file(&self) -> Option<FileNode> {
        let project = self.current_project();
        let id = project.active_file.as_deref()?;
        tree::find_node(&project.files, id).cloned()
    }

    fn persist(&mut self) -> Result<()> {
        let projects = serde_json::to_string(&self.projects)?;
        self.storage.set(PROJECTS_KEY, &projects)?;
        let current = serde_json::to_string(&self.current_id)?;
        self.storage.set(CURRENT_PROJECT_KEY, &current)
    }
}

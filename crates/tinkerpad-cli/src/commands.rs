use clap::Subcommand;
use tracing::debug;

use tinkerpad_core::{
    exec, FileNode, NodeKind, OfflineEngine, ProjectStore, ResultKind, Template,
};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available project templates
    Templates,
    /// Create a new project from a template and make it current
    New {
        /// Template id (see `templates`)
        template: String,
        /// Override the template's default project name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// List projects; the current one is marked with `*`
    Projects,
    /// Switch the current project
    Switch { project_id: String },
    /// Print the current project's file tree with node ids
    Tree,
    /// Create a file (default content is keyed off the extension)
    Touch {
        name: String,
        /// Parent folder id; project root when omitted
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Create a folder
    Mkdir {
        name: String,
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Print a file's content
    Show { file_id: String },
    /// Overwrite a file's content
    Write { file_id: String, content: String },
    /// Rename a file or folder
    Rename { file_id: String, new_name: String },
    /// Delete a file or folder (and any tabs into it)
    Rm { file_id: String },
    /// Move a file or folder into a folder
    Mv {
        file_id: String,
        target_folder_id: String,
    },
    /// Copy a file or folder to the clipboard
    Copy { file_id: String },
    /// Paste the clipboard under a folder (project root when omitted)
    Paste {
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Open a file in a tab and make it active
    Open { file_id: String },
    /// Close a tab
    Close { file_id: String },
    /// List open tabs; the active one is marked with `*`
    Tabs,
    /// Run the active file through the execution engine
    Run,
}

/// Execute one command against the store and return the printable outcome.
pub async fn dispatch(store: &mut ProjectStore, command: Command) -> anyhow::Result<String> {
    debug!(?command, project = %store.current_project_id(), "dispatching");
    let outcome = match command {
        Command::Templates => {
            let mut lines = Vec::new();
            for template in Template::ALL {
                lines.push(format!(
                    "{:<14} {} - {}",
                    template.id(),
                    template.label(),
                    template.description()
                ));
            }
            lines.join("\n")
        }
        Command::New { template, name } => {
            let Some(template) = Template::from_id(&template) else {
                return Ok(format!(
                    "Unknown template '{template}'. Run `tinkerpad templates` for the list."
                ));
            };
            let mut project = template.seed();
            if let Some(name) = name {
                project.name = name;
            }
            let project_name = project.name.clone();
            let id = store.add_project(project)?;
            format!("Created project '{project_name}' [{id}]")
        }
        Command::Projects => {
            let current = store.current_project_id().to_string();
            let mut lines = Vec::new();
            for project in store.projects() {
                let marker = if project.id == current { "*" } else { " " };
                lines.push(format!("{marker} {}  [{}]", project.name, project.id));
            }
            lines.join("\n")
        }
        Command::Switch { project_id } => {
            if store.select_project(&project_id)? {
                format!("Switched to project [{project_id}]")
            } else {
                format!("No project with id [{project_id}]")
            }
        }
        Command::Tree => {
            let project = store.current_project();
            if project.files.is_empty() {
                format!("{} (empty)", project.name)
            } else {
                let mut out = String::new();
                render_tree(&project.files, 0, &mut out);
                format!("{}\n{}", project.name, out.trim_end())
            }
        }
        Command::Touch { name, parent } => {
            match store.create_file(&name, parent.as_deref(), NodeKind::File, None)? {
                Some(node) => format!("Created file '{}' [{}]", node.name, node.id),
                None => "Parent does not resolve to a folder; nothing created".to_string(),
            }
        }
        Command::Mkdir { name, parent } => {
            match store.create_file(&name, parent.as_deref(), NodeKind::Folder, None)? {
                Some(node) => format!("Created folder '{}' [{}]", node.name, node.id),
                None => "Parent does not resolve to a folder; nothing created".to_string(),
            }
        }
        Command::Show { file_id } => match store.find_file(&file_id) {
            Some(node) if node.is_file() => node.content.unwrap_or_default(),
            Some(node) => format!("'{}' is a folder", node.name),
            None => format!("No node with id [{file_id}]"),
        },
        Command::Write { file_id, content } => {
            store.save_file(&file_id, &content)?;
            match store.find_file(&file_id) {
                Some(node) => format!("Saved '{}'", node.name),
                None => format!("No node with id [{file_id}]"),
            }
        }
        Command::Rename { file_id, new_name } => {
            store.rename_file(&file_id, &new_name)?;
            match store.find_file(&file_id) {
                Some(node) => format!("Renamed to '{}'", node.name),
                None => format!("No node with id [{file_id}]"),
            }
        }
        Command::Rm { file_id } => {
            store.delete_file(&file_id)?;
            format!("Deleted [{file_id}]")
        }
        Command::Mv {
            file_id,
            target_folder_id,
        } => {
            store.move_file(&file_id, &target_folder_id)?;
            format!("Moved [{file_id}] into [{target_folder_id}]")
        }
        Command::Copy { file_id } => {
            store.copy_file(&file_id)?;
            format!("Copied [{file_id}] to clipboard")
        }
        Command::Paste { parent } => match store.paste_file(parent.as_deref())? {
            Some(node) => format!("Pasted '{}' [{}]", node.name, node.id),
            None => "Nothing to paste".to_string(),
        },
        Command::Open { file_id } => {
            store.open_file(&file_id)?;
            match store.active_file() {
                Some(node) if node.id == file_id => format!("Opened '{}'", node.name),
                _ => format!("[{file_id}] is not an openable file"),
            }
        }
        Command::Close { file_id } => {
            store.close_file(&file_id)?;
            format!("Closed [{file_id}]")
        }
        Command::Tabs => {
            let project = store.current_project();
            if project.open_tabs.is_empty() {
                "No open tabs".to_string()
            } else {
                let mut lines = Vec::new();
                for tab in &project.open_tabs {
                    let marker = if project.active_file.as_deref() == Some(tab.as_str()) {
                        "*"
                    } else {
                        " "
                    };
                    let name = store
                        .find_file(tab)
                        .map(|node| node.name)
                        .unwrap_or_else(|| "?".to_string());
                    lines.push(format!("{marker} {name}  [{tab}]"));
                }
                lines.join("\n")
            }
        }
        Command::Run => match store.active_file() {
            Some(node) => {
                let language = node
                    .language
                    .unwrap_or(tinkerpad_core::Language::PlainText);
                let source = node.content.as_deref().unwrap_or_default();
                let result = exec::run(&OfflineEngine, source, language).await;
                let prefix = match result.kind {
                    ResultKind::Success => "ok",
                    ResultKind::Error => "error",
                    ResultKind::Info => "info",
                };
                format!("[{prefix}] {}", result.output)
            }
            None => "No active file to run".to_string(),
        },
    };
    Ok(outcome)
}

fn render_tree(files: &[FileNode], depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    for node in files {
        match node.kind {
            NodeKind::Folder => {
                out.push_str(&format!("{indent}{}/  [{}]\n", node.name, node.id));
                if let Some(children) = &node.children {
                    render_tree(children, depth + 1, out);
                }
            }
            NodeKind::File => {
                out.push_str(&format!("{indent}{}  [{}]\n", node.name, node.id));
            }
        }
    }
}

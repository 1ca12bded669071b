use tempfile::TempDir;

use tinkerpad_core::project::{
    tree, ProjectStore, CURRENT_PROJECT_KEY, PROJECTS_KEY,
};
use tinkerpad_core::{
    FileStorage, FileUpdate, MemoryStorage, NodeKind, Project, Storage, Template,
};

fn empty_store() -> ProjectStore {
    let mut store = ProjectStore::open(Box::new(MemoryStorage::new())).unwrap();
    store.add_project(Template::Empty.seed()).unwrap();
    store
}

/// Every id in openTabs resolves to a file, activeFile is one of the open
/// tabs, and node ids are unique across the tree.
fn assert_invariants(project: &Project) {
    let ids = tree::collect_ids(&project.files);
    let mut unique = ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(ids.len(), unique.len(), "node ids must be unique");

    for tab in &project.open_tabs {
        let node = tree::find_node(&project.files, tab)
            .unwrap_or_else(|| panic!("tab {tab} does not resolve"));
        assert!(node.is_file(), "tab {tab} is not a file");
    }
    if let Some(active) = &project.active_file {
        assert!(
            project.open_tabs.contains(active),
            "active file {active} is not an open tab"
        );
    }
}

// ------------------------------------------------------------------------
// Tree store operations
// ------------------------------------------------------------------------

#[test]
fn test_create_then_lookup_returns_created_node() {
    let mut store = empty_store();
    let created = store
        .create_file("a.js", None, NodeKind::File, Some("x".to_string()))
        .unwrap()
        .unwrap();

    let found = store.find_file(&created.id).unwrap();
    assert_eq!(found, created);
    assert_eq!(found.content.as_deref(), Some("x"));
}

#[test]
fn test_create_without_content_uses_extension_default() {
    let mut store = empty_store();
    let node = store
        .create_file("hello.py", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    assert!(node.content.as_deref().unwrap().contains("Hello from hello.py"));
}

#[test]
fn test_create_under_file_parent_is_a_noop() {
    let mut store = empty_store();
    let file = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();

    let nested = store
        .create_file("b.js", Some(&file.id), NodeKind::File, None)
        .unwrap();
    assert!(nested.is_none());
    assert_eq!(store.current_project().files.len(), 1);
}

#[test]
fn test_create_in_folder_marks_it_expanded() {
    let mut store = empty_store();
    let folder = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    assert!(!folder.is_expanded);

    let child = store
        .create_file("a.js", Some(&folder.id), NodeKind::File, None)
        .unwrap()
        .unwrap();
    assert_eq!(child.parent_id.as_deref(), Some(folder.id.as_str()));

    let folder = store.find_file(&folder.id).unwrap();
    assert!(folder.is_expanded);
    assert_eq!(folder.children.as_ref().unwrap().len(), 1);
}

#[test]
fn test_remove_severs_lookup_and_tabs() {
    let mut store = empty_store();
    let node = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    store.open_file(&node.id).unwrap();
    assert_eq!(store.current_project().open_tabs, vec![node.id.clone()]);

    store.delete_file(&node.id).unwrap();
    assert!(store.find_file(&node.id).is_none());
    assert!(store.current_project().open_tabs.is_empty());
    assert!(store.current_project().active_file.is_none());
    assert_invariants(store.current_project());
}

#[test]
fn test_deleting_a_folder_severs_tabs_into_it() {
    let mut store = empty_store();
    let folder = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    let inner = store
        .create_file("a.js", Some(&folder.id), NodeKind::File, None)
        .unwrap()
        .unwrap();
    let outer = store
        .create_file("b.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    store.open_file(&inner.id).unwrap();
    store.open_file(&outer.id).unwrap();
    store.set_active_file(&inner.id).unwrap();

    store.delete_file(&folder.id).unwrap();
    let project = store.current_project();
    assert_eq!(project.open_tabs, vec![outer.id.clone()]);
    assert_eq!(project.active_file.as_deref(), Some(outer.id.as_str()));
    assert_invariants(project);
}

#[test]
fn test_update_and_rename() {
    let mut store = empty_store();
    let node = store
        .create_file("old.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();

    store.rename_file(&node.id, "new.ts").unwrap();
    store.save_file(&node.id, "let x = 1;").unwrap();

    let node = store.find_file(&node.id).unwrap();
    assert_eq!(node.name, "new.ts");
    assert_eq!(node.content.as_deref(), Some("let x = 1;"));

    // Updates on unknown ids fall through silently
    store
        .update_file("missing", FileUpdate::name("nope"))
        .unwrap();
}

#[test]
fn test_toggle_folder_flips_only_folders() {
    let mut store = empty_store();
    let folder = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    let file = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();

    store.toggle_folder(&folder.id).unwrap();
    assert!(store.find_file(&folder.id).unwrap().is_expanded);
    store.toggle_folder(&folder.id).unwrap();
    assert!(!store.find_file(&folder.id).unwrap().is_expanded);

    store.toggle_folder(&file.id).unwrap();
    assert!(!store.find_file(&file.id).unwrap().is_expanded);
}

// ------------------------------------------------------------------------
// Move
// ------------------------------------------------------------------------

#[test]
fn test_move_scenario() {
    let mut store = empty_store();
    let n1 = store
        .create_file("a.js", None, NodeKind::File, Some("x".to_string()))
        .unwrap()
        .unwrap();
    store.open_file(&n1.id).unwrap();
    let project = store.current_project();
    assert_eq!(project.open_tabs, vec![n1.id.clone()]);
    assert_eq!(project.active_file.as_deref(), Some(n1.id.as_str()));

    let n2 = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    store.move_file(&n1.id, &n2.id).unwrap();

    let project = store.current_project();
    assert_eq!(project.files.len(), 1);
    assert_eq!(project.files[0].id, n2.id);

    let moved = store.find_file(&n1.id).unwrap();
    assert_eq!(moved.parent_id.as_deref(), Some(n2.id.as_str()));
    assert_eq!(moved.content.as_deref(), Some("x"));
    assert_invariants(store.current_project());
}

#[test]
fn test_move_into_own_subtree_is_refused() {
    let mut store = empty_store();
    let outer = store
        .create_file("outer", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    let inner = store
        .create_file("inner", Some(&outer.id), NodeKind::Folder, None)
        .unwrap()
        .unwrap();

    store.move_file(&outer.id, &inner.id).unwrap();

    // Tree unchanged: outer still at root, inner still inside it
    let project = store.current_project();
    assert_eq!(project.files.len(), 1);
    assert_eq!(project.files[0].id, outer.id);
    assert!(store.find_file(&inner.id).is_some());
}

#[test]
fn test_move_into_a_file_is_a_noop() {
    let mut store = empty_store();
    let a = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    let b = store
        .create_file("b.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();

    store.move_file(&a.id, &b.id).unwrap();
    assert_eq!(store.current_project().files.len(), 2);
    assert!(store.find_file(&b.id).unwrap().children.is_none());
}

// ------------------------------------------------------------------------
// Copy / paste
// ------------------------------------------------------------------------

#[test]
fn test_copy_paste_scenario() {
    let mut store = empty_store();
    let n1 = store
        .create_file("a.js", None, NodeKind::File, Some("x".to_string()))
        .unwrap()
        .unwrap();

    store.copy_file(&n1.id).unwrap();
    let n3 = store.paste_file(None).unwrap().unwrap();

    assert_eq!(n3.name, "a_copy.js");
    assert_ne!(n3.id, n1.id);
    assert_eq!(n3.content.as_deref(), Some("x"));
    assert_invariants(store.current_project());
}

#[test]
fn test_paste_of_folder_is_isomorphic_with_fresh_ids() {
    let mut store = empty_store();
    let folder = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    store
        .create_file("a.js", Some(&folder.id), NodeKind::File, Some("aa".to_string()))
        .unwrap();
    store
        .create_file("sub", Some(&folder.id), NodeKind::Folder, None)
        .unwrap();

    let original_ids = tree::collect_ids(&store.current_project().files);

    store.copy_file(&folder.id).unwrap();
    let clone = store.paste_file(None).unwrap().unwrap();

    assert_eq!(clone.name, "src_copy");
    let children = clone.children.as_ref().unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0].name, "a.js");
    assert_eq!(children[0].content.as_deref(), Some("aa"));

    // Every id in the clone is distinct from every pre-existing id
    let clone_ids = tree::collect_ids(std::slice::from_ref(&clone));
    for id in &clone_ids {
        assert!(!original_ids.contains(id));
    }
    assert_invariants(store.current_project());
}

#[test]
fn test_paste_with_empty_clipboard_returns_none() {
    let mut store = empty_store();
    assert!(store.paste_file(None).unwrap().is_none());
}

#[test]
fn test_clipboard_is_cleared_after_paste() {
    let mut store = empty_store();
    let node = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();

    store.copy_file(&node.id).unwrap();
    assert!(store.paste_file(None).unwrap().is_some());
    assert!(store.paste_file(None).unwrap().is_none());
}

// ------------------------------------------------------------------------
// Tabs and active file
// ------------------------------------------------------------------------

#[test]
fn test_open_is_idempotent_and_sets_active() {
    let mut store = empty_store();
    let a = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    let b = store
        .create_file("b.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();

    store.open_file(&a.id).unwrap();
    store.open_file(&b.id).unwrap();
    store.open_file(&a.id).unwrap();

    let project = store.current_project();
    assert_eq!(project.open_tabs, vec![a.id.clone(), b.id.clone()]);
    assert_eq!(project.active_file.as_deref(), Some(a.id.as_str()));
}

#[test]
fn test_open_ignores_folders_and_unknown_ids() {
    let mut store = empty_store();
    let folder = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();

    store.open_file(&folder.id).unwrap();
    store.open_file("missing").unwrap();
    assert!(store.current_project().open_tabs.is_empty());
}

#[test]
fn test_close_twice_is_a_noop_the_second_time() {
    let mut store = empty_store();
    let a = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    let b = store
        .create_file("b.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    store.open_file(&a.id).unwrap();
    store.open_file(&b.id).unwrap();

    store.close_file(&b.id).unwrap();
    let after_first = store.current_project().clone();
    store.close_file(&b.id).unwrap();
    assert_eq!(store.current_project(), &after_first);

    assert_eq!(after_first.open_tabs, vec![a.id.clone()]);
    assert_eq!(after_first.active_file.as_deref(), Some(a.id.as_str()));
}

#[test]
fn test_set_active_rejects_ids_outside_open_tabs() {
    let mut store = empty_store();
    let a = store
        .create_file("a.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    let b = store
        .create_file("b.js", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    store.open_file(&a.id).unwrap();

    store.set_active_file(&b.id).unwrap();
    assert_eq!(
        store.current_project().active_file.as_deref(),
        Some(a.id.as_str())
    );
}

#[test]
fn test_invariants_hold_across_an_operation_sequence() {
    let mut store = empty_store();
    let src = store
        .create_file("src", None, NodeKind::Folder, None)
        .unwrap()
        .unwrap();
    let a = store
        .create_file("a.js", Some(&src.id), NodeKind::File, None)
        .unwrap()
        .unwrap();
    let b = store
        .create_file("b.md", None, NodeKind::File, None)
        .unwrap()
        .unwrap();
    store.open_file(&a.id).unwrap();
    store.open_file(&b.id).unwrap();

    store.move_file(&b.id, &src.id).unwrap();
    assert_invariants(store.current_project());

    store.copy_file(&src.id).unwrap();
    store.paste_file(None).unwrap().unwrap();
    assert_invariants(store.current_project());

    store.delete_file(&a.id).unwrap();
    assert_invariants(store.current_project());

    store.delete_file(&src.id).unwrap();
    assert_invariants(store.current_project());
}

// ------------------------------------------------------------------------
// Persistence
// ------------------------------------------------------------------------

#[test]
fn test_state_survives_reopen() {
    let tmp = TempDir::new().unwrap();

    let node_id = {
        let storage = FileStorage::with_dir(tmp.path()).unwrap();
        let mut store = ProjectStore::open(Box::new(storage)).unwrap();
        store.add_project(Template::Empty.seed()).unwrap();
        let node = store
            .create_file("notes.md", None, NodeKind::File, Some("# hi".to_string()))
            .unwrap()
            .unwrap();
        store.open_file(&node.id).unwrap();
        node.id
    };

    let storage = FileStorage::with_dir(tmp.path()).unwrap();
    let store = ProjectStore::open(Box::new(storage)).unwrap();
    let node = store.find_file(&node_id).unwrap();
    assert_eq!(node.content.as_deref(), Some("# hi"));
    assert_eq!(
        store.current_project().active_file.as_deref(),
        Some(node_id.as_str())
    );
}

#[test]
fn test_ghost_current_project_pointer_self_heals() {
    let tmp = TempDir::new().unwrap();
    let mut seeded = FileStorage::with_dir(tmp.path()).unwrap();

    let mut p1 = Template::JavaScript.seed();
    p1.id = "p1".to_string();
    seeded
        .set(PROJECTS_KEY, &serde_json::to_string(&vec![p1]).unwrap())
        .unwrap();
    seeded.set(CURRENT_PROJECT_KEY, "\"ghost\"").unwrap();

    let store = ProjectStore::open(Box::new(seeded)).unwrap();
    assert_eq!(store.current_project().id, "p1");

    let corrected =
        std::fs::read_to_string(tmp.path().join(format!("{CURRENT_PROJECT_KEY}.json"))).unwrap();
    assert_eq!(corrected, "\"p1\"");
}

#[test]
fn test_unreadable_state_falls_back_to_default_template() {
    let mut storage = MemoryStorage::new();
    storage.set(PROJECTS_KEY, "not json at all").unwrap();

    let store = ProjectStore::open(Box::new(storage)).unwrap();
    assert_eq!(store.projects().len(), 1);
    assert_eq!(store.current_project().name, "New JavaScript Project");
    assert_invariants(store.current_project());
}

// ------------------------------------------------------------------------
// Project management
// ------------------------------------------------------------------------

#[test]
fn test_select_project_rejects_unknown_ids() {
    let mut store = empty_store();
    let current = store.current_project_id().to_string();
    assert!(!store.select_project("nope").unwrap());
    assert_eq!(store.current_project_id(), current);
}

#[test]
fn test_remove_project_never_leaves_the_store_empty() {
    let mut store = ProjectStore::open(Box::new(MemoryStorage::new())).unwrap();
    let only = store.current_project_id().to_string();

    assert!(store.remove_project(&only).unwrap());
    assert_eq!(store.projects().len(), 1);
    assert_ne!(store.current_project_id(), only);
}

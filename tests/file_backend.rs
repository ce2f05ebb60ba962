//! Documents persisted through the filesystem backend

mod common;

use std::rc::Rc;

use docbind::document::{
    CodeEditor, Context, DocumentContext, DocumentError, FileContentsManager, TextModelFactory,
};

fn open(root: &std::path::Path, path: &str) -> Rc<Context<FileContentsManager>> {
    common::init_tracing();
    Rc::new(Context::new(
        FileContentsManager::new(root),
        &TextModelFactory::new(),
        path,
        None,
    ))
}

#[tokio::test]
async fn edits_should_be_written_to_disk_on_save() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), "hello").unwrap();
    let context = open(dir.path(), "a.txt");
    let widget = common::editor_factory().create_new(Rc::clone(&context) as Rc<dyn DocumentContext>);

    let (_, init) = tokio::join!(widget.bind_when_ready(), context.initialize(false));
    init.unwrap();
    widget.content().editor().replace_all("hello from disk");
    context.save().await.unwrap();

    let on_disk = std::fs::read_to_string(dir.path().join("a.txt")).unwrap();
    assert_eq!(on_disk, "hello from disk");
    assert!(context.last_modified().is_some());
    assert!(!widget.is_marked_dirty());
}

#[tokio::test]
async fn drive_prefix_should_be_ignored_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("notes")).unwrap();
    std::fs::write(dir.path().join("notes/b.md"), "# title").unwrap();
    let context = open(dir.path(), "shared:notes/b.md");

    context.initialize(false).await.unwrap();

    assert_eq!(context.local_path(), "notes/b.md");
    assert_eq!(context.model().to_string(), "# title");
}

#[tokio::test]
async fn colon_in_file_name_should_not_touch_other_files() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("30.txt"), "UNRELATED FILE").unwrap();
    let context = open(dir.path(), "notes/10:30.txt");
    let widget = common::editor_factory().create_new(Rc::clone(&context) as Rc<dyn DocumentContext>);

    let (_, init) = tokio::join!(widget.bind_when_ready(), context.initialize(true));
    init.unwrap();

    assert_eq!(context.local_path(), "notes/10:30.txt");
    assert_eq!(widget.title().label(), "10:30.txt");
    assert!(dir.path().join("notes/10:30.txt").exists());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("30.txt")).unwrap(),
        "UNRELATED FILE"
    );
}

#[tokio::test]
async fn path_outside_root_should_fail_initialization() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("root");
    std::fs::create_dir(&root).unwrap();
    let context = open(&root, "../outside.txt");

    let result = context.initialize(true).await;

    assert!(matches!(result, Err(DocumentError::InvalidPath(_))));
    assert!(!dir.path().join("outside.txt").exists());
    assert!(!context.is_ready());
}

#[tokio::test]
async fn missing_file_should_fail_initialization_and_stay_unready() {
    let dir = tempfile::tempdir().unwrap();
    let context = open(dir.path(), "absent.txt");

    let result = context.initialize(false).await;

    assert!(matches!(result, Err(DocumentError::NotFound(_))));
    assert!(!context.is_ready());
}

#[tokio::test]
async fn new_document_should_create_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let context = open(dir.path(), "deep/nested/new.txt");

    context.initialize(true).await.unwrap();

    assert!(context.is_ready());
    assert!(dir.path().join("deep/nested/new.txt").exists());
}

#[tokio::test]
async fn rename_should_move_file_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("old.txt"), "content").unwrap();
    let context = open(dir.path(), "old.txt");
    context.initialize(false).await.unwrap();

    context.rename("moved/new.txt").await.unwrap();

    assert!(!dir.path().join("old.txt").exists());
    assert_eq!(
        std::fs::read_to_string(dir.path().join("moved/new.txt")).unwrap(),
        "content"
    );
}

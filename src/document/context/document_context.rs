//! # Document Context
//!
//! Mediates between a document model and its persistence backend. A context
//! owns exactly one model for its whole life; renames change the path but
//! never the model.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::SystemTime;

use super::contents::ContentsManager;
use super::paths;
use crate::document::collab::CollaborativeSession;
use crate::document::errors::{DocumentError, Result};
use crate::document::events::{ReadySignal, ReadyWaiter, SaveState, Signal};
use crate::document::models::{DocumentModel, ModelFactory};

/// What widgets need to know about a context
pub trait DocumentContext {
    /// Full path, possibly prefixed with `drive:`
    fn path(&self) -> String;

    /// Path with any drive prefix removed
    fn local_path(&self) -> String {
        paths::local_path(&self.path()).to_string()
    }

    /// Emitted with the new path after every rename
    fn path_changed(&self) -> &Signal<String>;

    /// One-shot readiness; abandoned if the context is disposed first
    fn ready(&self) -> ReadyWaiter;

    fn is_ready(&self) -> bool;

    fn model(&self) -> Rc<DocumentModel>;

    fn is_disposed(&self) -> bool;

    /// Emitted once when the context is disposed
    fn disposed(&self) -> &Signal<()>;
}

/// Context backed by a [`ContentsManager`]
pub struct Context<M: ContentsManager> {
    manager: M,
    path: RefCell<String>,
    model: Rc<DocumentModel>,
    ready: RefCell<Option<ReadySignal>>,
    is_disposed: Cell<bool>,
    last_modified: Cell<Option<SystemTime>>,
    path_changed: Signal<String>,
    save_state: Signal<SaveState>,
    save_in_flight: Cell<bool>,
    disposed: Signal<()>,
}

impl<M: ContentsManager> Context<M> {
    /// Create a context and its model. Nothing is loaded until `initialize`.
    pub fn new(
        manager: M,
        model_factory: &dyn ModelFactory,
        path: &str,
        session: Option<Rc<CollaborativeSession>>,
    ) -> Self {
        let language = model_factory.preferred_language(path);
        let model = model_factory.create_new(&language, session);
        tracing::debug!(
            "Context: created '{}' model for {}",
            model_factory.name(),
            path
        );

        Self {
            manager,
            path: RefCell::new(path.to_string()),
            model,
            ready: RefCell::new(Some(ReadySignal::new())),
            is_disposed: Cell::new(false),
            last_modified: Cell::new(None),
            path_changed: Signal::new(),
            save_state: Signal::new(),
            save_in_flight: Cell::new(false),
            disposed: Signal::new(),
        }
    }

    pub fn manager(&self) -> &M {
        &self.manager
    }

    pub fn save_state(&self) -> &Signal<SaveState> {
        &self.save_state
    }

    pub fn last_modified(&self) -> Option<SystemTime> {
        self.last_modified.get()
    }

    /// Load (or create) the backing file, then resolve readiness
    pub async fn initialize(&self, is_new: bool) -> Result<()> {
        self.ensure_live()?;

        if is_new {
            self.model.initialize();
            self.save().await?;
        } else {
            self.revert().await?;
        }

        self.ensure_live()?;
        self.populate();
        Ok(())
    }

    /// Write the model to the backend and clear the dirty flag
    pub async fn save(&self) -> Result<()> {
        self.ensure_live()?;
        let path = self.path();
        if self.model.read_only() {
            return Err(DocumentError::ReadOnly(path));
        }

        self.save_state.emit(&SaveState::Started);
        self.save_in_flight.set(true);
        let content = self.model.to_string();

        let result = self.manager.save(&path, &content).await;
        // Cleared by dispose, which has already reported the save as failed
        if !self.save_in_flight.replace(false) {
            tracing::debug!("Context: {} disposed while saving", path);
            return Err(result.err().unwrap_or(DocumentError::Disposed(path)));
        }

        match result {
            Ok(contents) => {
                self.last_modified.set(contents.last_modified);
                self.model.set_dirty(false);
                tracing::info!("Context: saved {} ({} bytes)", path, content.len());
                self.save_state.emit(&SaveState::Completed);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Context: failed to save {}: {}", path, e);
                self.save_state.emit(&SaveState::Failed);
                Err(e)
            }
        }
    }

    /// Replace the model's content with the backend's copy
    pub async fn revert(&self) -> Result<()> {
        self.ensure_live()?;
        let path = self.path();

        let contents = self.manager.get(&path).await?;
        self.ensure_live()?;

        self.last_modified.set(contents.last_modified);
        self.model.from_string(&contents.content);
        self.model.set_dirty(false);
        tracing::debug!("Context: loaded {} ({} bytes)", path, contents.content.len());
        Ok(())
    }

    /// Move the backing file and announce the new path
    pub async fn rename(&self, new_path: &str) -> Result<()> {
        self.ensure_live()?;
        let old_path = self.path();

        self.manager.rename(&old_path, new_path).await?;
        self.ensure_live()?;

        *self.path.borrow_mut() = new_path.to_string();
        tracing::info!("Context: renamed {} to {}", old_path, new_path);
        self.path_changed.emit(&new_path.to_string());
        Ok(())
    }

    /// Tear down the context. Pending readiness waiters are abandoned.
    pub fn dispose(&self) {
        if self.is_disposed.replace(true) {
            return;
        }
        tracing::debug!("Context: disposing {}", self.path());

        let abandoned = self.ready.borrow_mut().take();
        drop(abandoned);

        if self.save_in_flight.replace(false) {
            self.save_state.emit(&SaveState::Failed);
        }
        self.disposed.emit(&());
        self.disposed.disconnect_all();
        self.path_changed.disconnect_all();
        self.save_state.disconnect_all();
    }

    fn populate(&self) {
        if let Some(ready) = self.ready.borrow().as_ref() {
            if ready.resolve() {
                tracing::debug!("Context: {} is ready", self.path());
            }
        }
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_disposed.get() {
            Err(DocumentError::Disposed(self.path()))
        } else {
            Ok(())
        }
    }
}

impl<M: ContentsManager> DocumentContext for Context<M> {
    fn path(&self) -> String {
        self.path.borrow().clone()
    }

    fn path_changed(&self) -> &Signal<String> {
        &self.path_changed
    }

    fn ready(&self) -> ReadyWaiter {
        match self.ready.borrow().as_ref() {
            Some(ready) => ready.waiter(),
            // Disposed: hand out a waiter whose signal is already gone
            None => ReadySignal::new().waiter(),
        }
    }

    fn is_ready(&self) -> bool {
        self.ready
            .borrow()
            .as_ref()
            .is_some_and(ReadySignal::is_resolved)
    }

    fn model(&self) -> Rc<DocumentModel> {
        Rc::clone(&self.model)
    }

    fn is_disposed(&self) -> bool {
        self.is_disposed.get()
    }

    fn disposed(&self) -> &Signal<()> {
        &self.disposed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::context::contents::{FileContents, MemoryContentsManager};
    use crate::document::events::ReadyError;
    use crate::document::models::TextModelFactory;

    fn context_with(manager: MemoryContentsManager, path: &str) -> Context<Rc<MemoryContentsManager>> {
        Context::new(Rc::new(manager), &TextModelFactory::new(), path, None)
    }

    /// Memory backend whose saves wait until released
    #[derive(Default)]
    struct GatedContentsManager {
        inner: MemoryContentsManager,
        gate: tokio::sync::Notify,
    }

    impl ContentsManager for GatedContentsManager {
        async fn get(&self, path: &str) -> Result<FileContents> {
            self.inner.get(path).await
        }

        async fn save(&self, path: &str, content: &str) -> Result<FileContents> {
            self.gate.notified().await;
            self.inner.save(path, content).await
        }

        async fn rename(&self, old_path: &str, new_path: &str) -> Result<FileContents> {
            self.inner.rename(old_path, new_path).await
        }
    }

    #[tokio::test]
    async fn dispose_during_save_should_report_terminal_state() {
        let context = Context::new(
            GatedContentsManager::default(),
            &TextModelFactory::new(),
            "a.txt",
            None,
        );
        context.model().from_string("pending");
        let states = record_save_states(&context);

        let (result, _) = tokio::join!(context.save(), async {
            context.dispose();
            context.manager().gate.notify_one();
        });

        assert!(matches!(result, Err(DocumentError::Disposed(_))));
        assert_eq!(*states.borrow(), vec![SaveState::Started, SaveState::Failed]);
        assert!(context.manager().inner.contains("a.txt"));
        assert!(context.model().dirty());
    }

    fn record_save_states<M: ContentsManager>(context: &Context<M>) -> Rc<RefCell<Vec<SaveState>>> {
        let states = Rc::new(RefCell::new(Vec::new()));
        let states_clone = Rc::clone(&states);
        context
            .save_state()
            .connect(move |state| states_clone.borrow_mut().push(*state));
        states
    }

    #[tokio::test]
    async fn initialize_should_load_content_and_resolve_ready() {
        let context = context_with(MemoryContentsManager::new().with_file("a.txt", "hello"), "a.txt");
        assert!(!context.is_ready());

        context.initialize(false).await.unwrap();

        assert!(context.is_ready());
        assert_eq!(context.model().to_string(), "hello");
        assert!(!context.model().dirty());
        assert_eq!(context.ready().wait().await, Ok(()));
    }

    #[tokio::test]
    async fn initialize_new_should_create_backing_file() {
        let context = context_with(MemoryContentsManager::new(), "new.txt");

        context.initialize(true).await.unwrap();

        assert!(context.manager().contains("new.txt"));
        assert!(context.is_ready());
    }

    #[tokio::test]
    async fn initialize_should_not_resolve_ready_on_failure() {
        let context = context_with(MemoryContentsManager::new(), "missing.txt");

        let result = context.initialize(false).await;

        assert!(matches!(result, Err(DocumentError::NotFound(_))));
        assert!(!context.is_ready());
    }

    #[tokio::test]
    async fn save_should_persist_and_clear_dirty() {
        let context = context_with(MemoryContentsManager::new().with_file("a.txt", ""), "a.txt");
        context.initialize(false).await.unwrap();
        let states = record_save_states(&context);

        context.model().from_string("edited");
        assert!(context.model().dirty());
        context.save().await.unwrap();

        assert!(!context.model().dirty());
        assert_eq!(context.manager().content("a.txt").as_deref(), Some("edited"));
        assert_eq!(*states.borrow(), vec![SaveState::Started, SaveState::Completed]);
    }

    #[tokio::test]
    async fn failed_save_should_keep_model_dirty() {
        let context = context_with(MemoryContentsManager::new().with_file("a.txt", "orig"), "a.txt");
        context.initialize(false).await.unwrap();
        let states = record_save_states(&context);
        context.manager().set_fail_saves(true);

        context.model().from_string("unsaved");
        let result = context.save().await;

        assert!(matches!(result, Err(DocumentError::Io { .. })));
        assert!(context.model().dirty());
        assert_eq!(context.model().to_string(), "unsaved");
        assert_eq!(*states.borrow(), vec![SaveState::Started, SaveState::Failed]);
    }

    #[tokio::test]
    async fn save_should_refuse_read_only_models() {
        let context = context_with(MemoryContentsManager::new().with_file("a.txt", ""), "a.txt");
        context.initialize(false).await.unwrap();
        context.model().set_read_only(true);

        let result = context.save().await;

        assert!(matches!(result, Err(DocumentError::ReadOnly(_))));
    }

    #[tokio::test]
    async fn rename_should_keep_model_identity_and_emit_path() {
        let context = context_with(MemoryContentsManager::new().with_file("a.txt", "x"), "a.txt");
        context.initialize(false).await.unwrap();
        let model_before = context.model();
        let paths = Rc::new(RefCell::new(Vec::new()));
        let paths_clone = Rc::clone(&paths);
        context
            .path_changed()
            .connect(move |path| paths_clone.borrow_mut().push(path.clone()));

        context.rename("b.txt").await.unwrap();

        assert_eq!(context.path(), "b.txt");
        assert!(Rc::ptr_eq(&model_before, &context.model()));
        assert_eq!(*paths.borrow(), vec!["b.txt".to_string()]);
    }

    #[tokio::test]
    async fn revert_should_discard_local_edits() {
        let context = context_with(MemoryContentsManager::new().with_file("a.txt", "disk"), "a.txt");
        context.initialize(false).await.unwrap();

        context.model().from_string("local");
        context.revert().await.unwrap();

        assert_eq!(context.model().to_string(), "disk");
        assert!(!context.model().dirty());
    }

    #[tokio::test]
    async fn dispose_should_abandon_pending_waiters() {
        let context = context_with(MemoryContentsManager::new(), "a.txt");
        let waiter = context.ready();

        context.dispose();
        context.dispose();

        assert_eq!(waiter.wait().await, Err(ReadyError::Abandoned));
        assert!(context.is_disposed());
        assert_eq!(context.ready().wait().await, Err(ReadyError::Abandoned));
        assert!(matches!(context.save().await, Err(DocumentError::Disposed(_))));
    }

    #[test]
    fn local_path_should_strip_drive() {
        let context = context_with(MemoryContentsManager::new(), "shared:dir/a.txt");
        assert_eq!(context.local_path(), "dir/a.txt");
    }
}

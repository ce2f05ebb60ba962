//! Shared fixtures for the integration tests
#![allow(dead_code)]

use std::rc::Rc;

use docbind::config::get_log_level;
use docbind::document::{
    CollaborativeSession, Context, DocumentContext, DocumentWidget, EditorServices,
    FileEditorFactory, MemoryContentsManager, TextModelFactory, WidgetFactoryOptions,
};

pub type MemoryContext = Context<Rc<MemoryContentsManager>>;

/// Route tracing output through the test harness. Level comes from DOCBIND_LOG_LEVEL.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(get_log_level())
        .with_test_writer()
        .try_init();
}

pub fn editor_factory() -> FileEditorFactory {
    let mut options = WidgetFactoryOptions::new("Editor", &["text", "python", "*"]);
    options.default_for = vec!["text".to_string()];
    FileEditorFactory::new(options, EditorServices::new())
        .unwrap_or_else(|e| panic!("factory options should be valid: {e}"))
}

/// One open document: backend, context, and the widget created for it
pub struct Fixture {
    pub manager: Rc<MemoryContentsManager>,
    pub context: Rc<MemoryContext>,
    pub widget: Rc<DocumentWidget>,
}

impl Fixture {
    pub fn open(path: &str, content: &str) -> Self {
        Self::build(MemoryContentsManager::new().with_file(path, content), path, None)
    }

    pub fn open_new(path: &str) -> Self {
        Self::build(MemoryContentsManager::new(), path, None)
    }

    pub fn open_shared(path: &str, content: &str, session: Rc<CollaborativeSession>) -> Self {
        Self::build(
            MemoryContentsManager::new().with_file(path, content),
            path,
            Some(session),
        )
    }

    fn build(
        manager: MemoryContentsManager,
        path: &str,
        session: Option<Rc<CollaborativeSession>>,
    ) -> Self {
        init_tracing();
        let manager = Rc::new(manager);
        let context = Rc::new(Context::new(
            Rc::clone(&manager),
            &TextModelFactory::new(),
            path,
            session,
        ));
        let widget = editor_factory().create_new(Rc::clone(&context) as Rc<dyn DocumentContext>);
        Self {
            manager,
            context,
            widget,
        }
    }

    /// Initialize the context while the widget waits for readiness
    pub async fn load(&self, is_new: bool) {
        let (_, result) = tokio::join!(
            self.widget.bind_when_ready(),
            self.context.initialize(is_new)
        );
        result.unwrap_or_else(|e| panic!("context should initialize: {e}"));
    }
}

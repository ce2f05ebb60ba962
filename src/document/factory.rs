//! # Widget Factory
//!
//! Builds document widgets for contexts and advertises what those widgets
//! can do to whatever registry hosts the factory. The advertised
//! capabilities are fixed when the factory is constructed.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::context::DocumentContext;
use super::errors::{DocumentError, Result};
use super::events::Signal;
use super::services::EditorServices;
use super::widgets::{DocumentWidget, ToolbarItem};

bitflags! {
    /// Behaviour a widget factory advertises to its registry
    ///
    /// ```rust
    /// use docbind::document::factory::WidgetCapabilities;
    ///
    /// let caps = WidgetCapabilities::PREFER_KERNEL | WidgetCapabilities::CAN_START_KERNEL;
    /// assert!(!caps.contains(WidgetCapabilities::READ_ONLY));
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WidgetCapabilities: u32 {
        const NONE              = 0b0000;
        /// Widgets only display content
        const READ_ONLY         = 0b0001;
        /// Opening a widget should start a kernel if possible
        const PREFER_KERNEL     = 0b0010;
        /// Widgets are allowed to start a kernel at all
        const CAN_START_KERNEL  = 0b0100;
        /// Closing the last widget shuts its kernel down
        const SHUTDOWN_ON_CLOSE = 0b1000;
    }
}

/// Produces toolbar items for a freshly created widget
pub type ToolbarFactory = Rc<dyn Fn(&DocumentWidget) -> Vec<(String, ToolbarItem)>>;

/// Construction options for [`FileEditorFactory`]
#[derive(Clone)]
pub struct WidgetFactoryOptions {
    pub name: String,
    pub file_types: Vec<String>,
    pub default_for: Vec<String>,
    pub default_rendered: Vec<String>,
    pub model_name: String,
    pub capabilities: WidgetCapabilities,
    pub toolbar_factory: Option<ToolbarFactory>,
}

impl WidgetFactoryOptions {
    /// Options for a text-model factory with no special capabilities
    pub fn new(name: &str, file_types: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            file_types: file_types.iter().map(|t| t.to_string()).collect(),
            default_for: Vec::new(),
            default_rendered: Vec::new(),
            model_name: "text".to_string(),
            capabilities: WidgetCapabilities::NONE,
            toolbar_factory: None,
        }
    }
}

impl fmt::Debug for WidgetFactoryOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetFactoryOptions")
            .field("name", &self.name)
            .field("file_types", &self.file_types)
            .field("default_for", &self.default_for)
            .field("model_name", &self.model_name)
            .field("capabilities", &self.capabilities)
            .field("toolbar_factory", &self.toolbar_factory.is_some())
            .finish()
    }
}

/// Serializable description of a factory, as a registry sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetFactoryDescriptor {
    pub name: String,
    pub file_types: Vec<String>,
    pub default_for: Vec<String>,
    pub default_rendered: Vec<String>,
    pub read_only: bool,
    pub prefer_kernel: bool,
    pub can_start_kernel: bool,
    pub shutdown_on_close: bool,
    pub model_name: String,
}

/// Creates [`DocumentWidget`]s hosting a text editor
pub struct FileEditorFactory {
    descriptor: WidgetFactoryDescriptor,
    capabilities: WidgetCapabilities,
    toolbar_factory: Option<ToolbarFactory>,
    services: EditorServices,
    widget_created: Signal<Rc<DocumentWidget>>,
    is_disposed: Cell<bool>,
}

impl FileEditorFactory {
    /// Validate options and build the factory
    pub fn new(options: WidgetFactoryOptions, services: EditorServices) -> Result<Self> {
        if options.name.trim().is_empty() {
            return Err(DocumentError::InvalidFactory(
                "factory name must not be empty".to_string(),
            ));
        }
        if options.file_types.is_empty() {
            return Err(DocumentError::InvalidFactory(format!(
                "factory '{}' must handle at least one file type",
                options.name
            )));
        }
        if let Some(unknown) = options
            .default_for
            .iter()
            .find(|t| !options.file_types.contains(t))
        {
            return Err(DocumentError::InvalidFactory(format!(
                "factory '{}' cannot be default for unhandled file type '{}'",
                options.name, unknown
            )));
        }

        let caps = options.capabilities;
        let descriptor = WidgetFactoryDescriptor {
            name: options.name,
            file_types: options.file_types,
            default_for: options.default_for,
            default_rendered: options.default_rendered,
            read_only: caps.contains(WidgetCapabilities::READ_ONLY),
            prefer_kernel: caps.contains(WidgetCapabilities::PREFER_KERNEL),
            can_start_kernel: caps.contains(WidgetCapabilities::CAN_START_KERNEL),
            shutdown_on_close: caps.contains(WidgetCapabilities::SHUTDOWN_ON_CLOSE),
            model_name: options.model_name,
        };
        tracing::debug!("FileEditorFactory: registered '{}'", descriptor.name);

        Ok(Self {
            descriptor,
            capabilities: caps,
            toolbar_factory: options.toolbar_factory,
            services,
            widget_created: Signal::new(),
            is_disposed: Cell::new(false),
        })
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &WidgetFactoryDescriptor {
        &self.descriptor
    }

    pub fn capabilities(&self) -> WidgetCapabilities {
        self.capabilities
    }

    pub fn services(&self) -> &EditorServices {
        &self.services
    }

    /// Emitted once per [`create_new`](Self::create_new) with the new widget
    pub fn widget_created(&self) -> &Signal<Rc<DocumentWidget>> {
        &self.widget_created
    }

    /// Build a widget for `context`. Never fails; content is only looked
    /// at once the context becomes ready.
    pub fn create_new(&self, context: Rc<dyn DocumentContext>) -> Rc<DocumentWidget> {
        let widget = DocumentWidget::new(context, &self.services);

        if let Some(toolbar_factory) = &self.toolbar_factory {
            for (name, item) in toolbar_factory(&widget) {
                if !widget.toolbar().add_item(&name, item) {
                    tracing::warn!(
                        "FileEditorFactory: '{}' produced duplicate toolbar item '{}', keeping the first",
                        self.descriptor.name,
                        name
                    );
                }
            }
        }

        tracing::info!(
            "FileEditorFactory: '{}' created widget for {}",
            self.descriptor.name,
            widget.context().path()
        );
        self.widget_created.emit(&widget);
        widget
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed.get()
    }

    pub fn dispose(&self) {
        if self.is_disposed.replace(true) {
            return;
        }
        self.widget_created.disconnect_all();
    }
}

impl fmt::Debug for FileEditorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileEditorFactory")
            .field("descriptor", &self.descriptor)
            .field("is_disposed", &self.is_disposed.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::context::{Context, MemoryContentsManager};
    use crate::document::models::TextModelFactory;
    use std::cell::RefCell;

    fn context(path: &str) -> Rc<dyn DocumentContext> {
        let manager = MemoryContentsManager::new().with_file(path, "");
        Rc::new(Context::new(
            Rc::new(manager),
            &TextModelFactory::new(),
            path,
            None,
        ))
    }

    fn editor_options() -> WidgetFactoryOptions {
        let mut options = WidgetFactoryOptions::new("Editor", &["text", "python"]);
        options.default_for = vec!["text".to_string()];
        options.capabilities =
            WidgetCapabilities::PREFER_KERNEL | WidgetCapabilities::CAN_START_KERNEL;
        options
    }

    #[test]
    fn descriptor_should_reflect_capabilities() {
        let factory = FileEditorFactory::new(editor_options(), EditorServices::new()).unwrap();
        let descriptor = factory.descriptor();

        assert_eq!(descriptor.name, "Editor");
        assert_eq!(descriptor.file_types, vec!["text", "python"]);
        assert_eq!(descriptor.default_for, vec!["text"]);
        assert!(!descriptor.read_only);
        assert!(descriptor.prefer_kernel);
        assert!(descriptor.can_start_kernel);
        assert_eq!(descriptor.model_name, "text");
    }

    #[test]
    fn descriptor_should_serialize_with_camel_case_keys() {
        let factory = FileEditorFactory::new(editor_options(), EditorServices::new()).unwrap();

        let json = serde_json::to_value(factory.descriptor()).unwrap();

        assert_eq!(json["fileTypes"], serde_json::json!(["text", "python"]));
        assert_eq!(json["readOnly"], serde_json::json!(false));
        assert_eq!(json["canStartKernel"], serde_json::json!(true));
        assert_eq!(json["modelName"], serde_json::json!("text"));
    }

    #[test]
    fn invalid_options_should_fail_construction() {
        let nameless = WidgetFactoryOptions::new("  ", &["text"]);
        assert!(matches!(
            FileEditorFactory::new(nameless, EditorServices::new()),
            Err(DocumentError::InvalidFactory(_))
        ));

        let typeless = WidgetFactoryOptions::new("Editor", &[]);
        assert!(FileEditorFactory::new(typeless, EditorServices::new()).is_err());

        let mut bad_default = WidgetFactoryOptions::new("Editor", &["text"]);
        bad_default.default_for = vec!["json".to_string()];
        assert!(FileEditorFactory::new(bad_default, EditorServices::new()).is_err());
    }

    #[test]
    fn create_new_should_emit_widget_created_once_per_call() {
        let factory = FileEditorFactory::new(editor_options(), EditorServices::new()).unwrap();
        let created = Rc::new(RefCell::new(Vec::new()));
        let created_clone = Rc::clone(&created);
        factory
            .widget_created()
            .connect(move |widget| created_clone.borrow_mut().push(Rc::clone(widget)));

        let first = factory.create_new(context("a.txt"));
        let second = factory.create_new(context("b.txt"));

        let created = created.borrow();
        assert_eq!(created.len(), 2);
        assert!(Rc::ptr_eq(&created[0], &first));
        assert!(Rc::ptr_eq(&created[1], &second));
    }

    #[test]
    fn toolbar_factory_should_populate_new_widgets() {
        let mut options = editor_options();
        options.toolbar_factory = Some(Rc::new(|widget: &DocumentWidget| {
            vec![
                ("save".to_string(), ToolbarItem::new("Save", "Save the file")),
                (
                    "path".to_string(),
                    ToolbarItem::new(&widget.title().label(), "Current file"),
                ),
            ]
        }));
        let factory = FileEditorFactory::new(options, EditorServices::new()).unwrap();

        let widget = factory.create_new(context("dir/a.txt"));

        assert_eq!(widget.toolbar().names(), vec!["save", "path"]);
        assert_eq!(widget.toolbar().item("path").unwrap().label, "a.txt");
    }

    #[test]
    fn duplicate_toolbar_names_should_keep_first_item() {
        let mut options = editor_options();
        options.toolbar_factory = Some(Rc::new(|_: &DocumentWidget| {
            vec![
                ("run".to_string(), ToolbarItem::new("Run", "first")),
                ("run".to_string(), ToolbarItem::new("Run", "second")),
                ("stop".to_string(), ToolbarItem::new("Stop", "")),
            ]
        }));
        let factory = FileEditorFactory::new(options, EditorServices::new()).unwrap();

        let widget = factory.create_new(context("a.txt"));

        assert_eq!(widget.toolbar().names(), vec!["run", "stop"]);
        assert_eq!(widget.toolbar().item("run").unwrap().tooltip, "first");
    }

    #[test]
    fn dispose_should_drop_created_listeners() {
        let factory = FileEditorFactory::new(editor_options(), EditorServices::new()).unwrap();
        factory.widget_created().connect(|_| {});

        factory.dispose();

        assert!(factory.is_disposed());
        assert_eq!(factory.widget_created().slot_count(), 0);
    }
}

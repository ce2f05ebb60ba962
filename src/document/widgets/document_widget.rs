//! # Document Widget
//!
//! Displayable unit a shell hosts for one open document: a title, a toolbar
//! region, and the file editor content. The title label tracks the path;
//! the dirty marker on the title is maintained by the editor binding.

use std::cell::Cell;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use super::file_editor::FileEditor;
use super::title::{Title, DIRTY_CLASS};
use super::toolbar::Toolbar;
use crate::document::context::paths::{basename, local_path};
use crate::document::context::DocumentContext;
use crate::document::events::{Signal, SlotId, UiEvent};
use crate::document::services::EditorServices;

/// Icon class given to text editor titles
pub const TEXT_EDITOR_ICON_CLASS: &str = "text-editor-icon";

/// Title label for a path: the last segment after any `scheme:` prefix
pub fn title_for_path(path: &str) -> &str {
    basename(local_path(path))
}

pub struct DocumentWidget {
    context: Rc<dyn DocumentContext>,
    content: Rc<FileEditor>,
    toolbar: Toolbar,
    title: Rc<Title>,
    path_slot: Cell<Option<SlotId>>,
    context_disposed_slot: Cell<Option<SlotId>>,
    is_disposed: Cell<bool>,
    disposed: Signal<()>,
}

impl DocumentWidget {
    pub fn new(context: Rc<dyn DocumentContext>, services: &EditorServices) -> Rc<Self> {
        let title = Rc::new(Title::new());
        title.set_icon_class(TEXT_EDITOR_ICON_CLASS);
        let content = FileEditor::new(Rc::clone(&context), services, Rc::clone(&title));

        let widget = Rc::new(Self {
            context,
            content,
            toolbar: Toolbar::new(),
            title,
            path_slot: Cell::new(None),
            context_disposed_slot: Cell::new(None),
            is_disposed: Cell::new(false),
            disposed: Signal::new(),
        });

        let weak = Rc::downgrade(&widget);
        let path_slot = widget.context.path_changed().connect(move |_| {
            if let Some(widget) = weak.upgrade() {
                widget.on_path_changed();
            }
        });
        widget.path_slot.set(Some(path_slot));

        let weak = Rc::downgrade(&widget);
        let disposed_slot = widget.context.disposed().connect(move |_| {
            if let Some(widget) = weak.upgrade() {
                widget.dispose();
            }
        });
        widget.context_disposed_slot.set(Some(disposed_slot));

        widget.on_path_changed();
        widget
    }

    pub fn context(&self) -> &Rc<dyn DocumentContext> {
        &self.context
    }

    pub fn content(&self) -> &Rc<FileEditor> {
        &self.content
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn title(&self) -> &Rc<Title> {
        &self.title
    }

    /// Whether the title currently carries the dirty marker
    pub fn is_marked_dirty(&self) -> bool {
        self.title.has_class(DIRTY_CLASS)
    }

    /// See [`EditorBinding::bind_when_ready`](super::binding::EditorBinding::bind_when_ready)
    pub fn bind_when_ready(&self) -> impl Future<Output = ()> + 'static {
        self.content.bind_when_ready()
    }

    pub fn connect_collaboration(&self) -> impl Future<Output = ()> + 'static {
        self.content.connect_collaboration()
    }

    pub fn on_after_attach(&self) {
        self.content.on_after_attach();
    }

    pub fn on_before_detach(&self) {
        self.content.on_before_detach();
    }

    pub fn handle_event(&self, event: &UiEvent) -> bool {
        !self.is_disposed.get() && self.content.handle_event(event)
    }

    pub fn activate(&self) {
        if !self.is_disposed.get() {
            self.content.activate();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed.get()
    }

    /// Emitted once when the widget is disposed
    pub fn disposed(&self) -> &Signal<()> {
        &self.disposed
    }

    pub fn dispose(&self) {
        if self.is_disposed.replace(true) {
            return;
        }
        if let Some(slot) = self.path_slot.take() {
            self.context.path_changed().disconnect(slot);
        }
        if let Some(slot) = self.context_disposed_slot.take() {
            self.context.disposed().disconnect(slot);
        }
        self.content.dispose();
        tracing::debug!("DocumentWidget: disposed '{}'", self.title.label());

        self.disposed.emit(&());
        self.disposed.disconnect_all();
    }

    fn on_path_changed(&self) {
        if self.is_disposed.get() {
            return;
        }
        self.title.set_label(title_for_path(&self.context.path()));
    }
}

impl fmt::Debug for DocumentWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentWidget")
            .field("title", &self.title.label())
            .field("binding", self.content.binding())
            .field("is_disposed", &self.is_disposed.get())
            .finish()
    }
}

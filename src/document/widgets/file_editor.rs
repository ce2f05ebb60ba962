//! # File Editor
//!
//! Editor content of a document widget: owns the binding, keeps the editor's
//! mime type in step with the document path, and pulls focus into the
//! editor on pointer presses.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use super::binding::{BindingState, EditorBinding};
use super::title::Title;
use crate::document::context::DocumentContext;
use crate::document::editor::CodeEditor;
use crate::document::events::{ReadyWaiter, SlotId, UiEvent};
use crate::document::services::{EditorServices, MimeTypeService};

pub struct FileEditor {
    context: Rc<dyn DocumentContext>,
    binding: Rc<EditorBinding>,
    mime_type_service: Rc<dyn MimeTypeService>,
    attached: Cell<bool>,
    path_slot: Cell<Option<SlotId>>,
    is_disposed: Cell<bool>,
}

impl FileEditor {
    pub fn new(
        context: Rc<dyn DocumentContext>,
        services: &EditorServices,
        title: Rc<Title>,
    ) -> Rc<Self> {
        let binding = EditorBinding::new(
            Rc::clone(&context),
            services.factory_service.as_ref(),
            services.editor_config.clone(),
            title,
        );

        let file_editor = Rc::new(Self {
            context,
            binding,
            mime_type_service: Rc::clone(&services.mime_type_service),
            attached: Cell::new(false),
            path_slot: Cell::new(None),
            is_disposed: Cell::new(false),
        });

        let weak = Rc::downgrade(&file_editor);
        let slot = file_editor.context.path_changed().connect(move |_| {
            if let Some(file_editor) = weak.upgrade() {
                file_editor.on_path_changed();
            }
        });
        file_editor.path_slot.set(Some(slot));
        file_editor.on_path_changed();

        file_editor
    }

    pub fn editor(&self) -> &Rc<dyn CodeEditor> {
        self.binding.editor()
    }

    pub fn binding(&self) -> &Rc<EditorBinding> {
        &self.binding
    }

    pub fn binding_state(&self) -> BindingState {
        self.binding.state()
    }

    /// Readiness of the underlying context
    pub fn ready(&self) -> ReadyWaiter {
        self.context.ready()
    }

    pub fn bind_when_ready(&self) -> impl Future<Output = ()> + 'static {
        self.binding.bind_when_ready()
    }

    pub fn connect_collaboration(&self) -> impl Future<Output = ()> + 'static {
        self.binding.connect_collaboration()
    }

    pub fn is_attached(&self) -> bool {
        self.attached.get()
    }

    /// The host inserted the widget; start handling pointer events
    pub fn on_after_attach(&self) {
        if !self.is_disposed.get() {
            self.attached.set(true);
        }
    }

    /// The host is about to remove the widget; stop handling pointer events
    pub fn on_before_detach(&self) {
        self.attached.set(false);
    }

    /// Handle an event from the host. Returns true if it was consumed.
    pub fn handle_event(&self, event: &UiEvent) -> bool {
        if self.is_disposed.get() || !self.attached.get() {
            return false;
        }
        match event {
            UiEvent::PointerDown => {
                self.ensure_focus();
                true
            }
            UiEvent::ActivateRequest => {
                self.activate();
                true
            }
            UiEvent::Other(_) => false,
        }
    }

    /// Make this editor the focus target
    pub fn activate(&self) {
        if !self.is_disposed.get() {
            self.ensure_focus();
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.is_disposed.get()
    }

    pub fn dispose(&self) {
        if self.is_disposed.replace(true) {
            return;
        }
        self.attached.set(false);
        if let Some(slot) = self.path_slot.take() {
            self.context.path_changed().disconnect(slot);
        }
        self.binding.dispose();
    }

    fn ensure_focus(&self) {
        let editor = self.binding.editor();
        if !editor.has_focus() {
            editor.focus();
        }
    }

    fn on_path_changed(&self) {
        if self.is_disposed.get() {
            return;
        }
        let local_path = self.context.local_path();
        let mime_type = self.mime_type_service.mime_type_by_file_path(&local_path);
        tracing::debug!("FileEditor: {} uses mime type {}", local_path, mime_type);
        self.binding.editor().model().set_mime_type(&mime_type);
    }
}

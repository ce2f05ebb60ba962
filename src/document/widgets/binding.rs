//! # Editor Binding
//!
//! Keeps an editor surface and a context's document model in sync.
//!
//! ```text
//! Constructing ──▶ AwaitingContextReady ──(context ready)──▶ Bound
//!       │                   │                                  │
//!       └───────────────────┴──────────(dispose)───────────────┴──▶ Disposed
//! ```
//!
//! Content loaded by the context flows model → editor. User edits flow
//! editor → model. Both directions compare plain strings first, so a value
//! that just came from the other side is never written back.
//!
//! Every handler holds only a weak reference to the binding and checks the
//! disposed state before touching anything.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use super::title::{Title, DIRTY_CLASS};
use crate::document::collab::CollaboratorRoster;
use crate::document::context::DocumentContext;
use crate::document::editor::{
    CodeEditor, EditorConfig, EditorFactory, EditorModel, EditorOptions, SelectionStyle,
};
use crate::document::events::{SlotId, StateAttribute, StateChange};

/// Lifecycle of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingState {
    Constructing,
    AwaitingContextReady,
    Bound,
    Disposed,
}

#[derive(Debug, Default)]
struct BindingSlots {
    model_state: Option<SlotId>,
    model_content: Option<SlotId>,
    editor_value: Option<SlotId>,
}

/// Two-way link between a context's model and an editor surface
pub struct EditorBinding {
    context: Rc<dyn DocumentContext>,
    editor: Rc<dyn CodeEditor>,
    title: Rc<Title>,
    state: Cell<BindingState>,
    slots: RefCell<BindingSlots>,
    roster: RefCell<Option<(Rc<CollaboratorRoster>, SlotId)>>,
}

impl EditorBinding {
    /// Build the editor and seed it with whatever the model holds right now
    pub fn new(
        context: Rc<dyn DocumentContext>,
        editor_factory: &dyn EditorFactory,
        config: EditorConfig,
        title: Rc<Title>,
    ) -> Rc<Self> {
        let editor = editor_factory.new_document_editor(EditorOptions {
            model: Rc::new(EditorModel::new()),
            config,
        });

        let binding = Rc::new(Self {
            context,
            editor,
            title,
            state: Cell::new(BindingState::Constructing),
            slots: RefCell::new(BindingSlots::default()),
            roster: RefCell::new(None),
        });

        let initial = binding.context.model().to_string();
        binding.editor.model().set_text(&initial);
        binding.state.set(BindingState::AwaitingContextReady);
        tracing::debug!(
            "EditorBinding: awaiting context ready for {}",
            binding.context.path()
        );
        binding
    }

    pub fn state(&self) -> BindingState {
        self.state.get()
    }

    pub fn is_disposed(&self) -> bool {
        self.state.get() == BindingState::Disposed
    }

    pub fn editor(&self) -> &Rc<dyn CodeEditor> {
        &self.editor
    }

    pub fn context(&self) -> &Rc<dyn DocumentContext> {
        &self.context
    }

    /// Future that finishes the binding once the context is ready.
    ///
    /// The host drives it (e.g. with `tokio::task::spawn_local`). It does
    /// nothing if the binding was disposed or dropped in the meantime, or if
    /// the context was disposed before becoming ready.
    pub fn bind_when_ready(self: &Rc<Self>) -> impl Future<Output = ()> + 'static {
        let waiter = self.context.ready();
        let weak = Rc::downgrade(self);

        async move {
            let result = waiter.wait().await;

            let Some(binding) = weak.upgrade() else {
                return;
            };
            if binding.is_disposed() {
                tracing::debug!("EditorBinding: disposed before context became ready");
                return;
            }
            if let Err(e) = result {
                tracing::debug!("EditorBinding: {}", e);
                return;
            }
            binding.on_context_ready();
        }
    }

    /// Future that wires up collaborator identity and stale-selection cleanup.
    ///
    /// Finishes immediately when the model has no collaborative session.
    pub fn connect_collaboration(self: &Rc<Self>) -> impl Future<Output = ()> + 'static {
        let session = self
            .context
            .model()
            .session()
            .filter(|session| session.is_collaborative())
            .cloned();
        let weak = Rc::downgrade(self);

        async move {
            let Some(session) = session else {
                return;
            };
            if session.connected().wait().await.is_err() {
                return;
            }

            let Some(binding) = weak.upgrade() else {
                return;
            };
            if binding.is_disposed() {
                return;
            }
            match session.collaborators() {
                Some(roster) => binding.adopt_roster(roster),
                None => tracing::debug!("EditorBinding: session connected without a roster"),
            }
        }
    }

    /// Drop every selection whose owner is no longer in the roster.
    /// Returns how many owners were pruned.
    pub fn prune_stale_selections(&self) -> usize {
        if self.is_disposed() {
            return 0;
        }
        let roster = match self.roster.borrow().as_ref() {
            Some((roster, _)) => Rc::clone(roster),
            None => return 0,
        };

        let model = self.editor.model();
        let mut pruned = 0;
        for key in model.selection_keys() {
            if !roster.has(&key) && model.remove_selections(&key) {
                tracing::debug!("EditorBinding: pruned stale selections of {}", key);
                pruned += 1;
            }
        }
        pruned
    }

    /// Release every subscription; later notifications are ignored
    pub fn dispose(&self) {
        if self.is_disposed() {
            return;
        }
        self.state.set(BindingState::Disposed);

        let slots = std::mem::take(&mut *self.slots.borrow_mut());
        let model = self.context.model();
        if let Some(id) = slots.model_state {
            model.state_changed().disconnect(id);
        }
        if let Some(id) = slots.model_content {
            model.content_changed().disconnect(id);
        }
        if let Some(id) = slots.editor_value {
            self.editor.model().value_changed().disconnect(id);
        }

        let roster = self.roster.borrow_mut().take();
        if let Some((roster, id)) = roster {
            roster.changed.disconnect(id);
        }
        tracing::debug!("EditorBinding: disposed for {}", self.context.path());
    }

    fn on_context_ready(self: &Rc<Self>) {
        if self.state.get() != BindingState::AwaitingContextReady {
            return;
        }
        let model = self.context.model();

        self.editor.model().set_text(&model.to_string());
        // Loading from the backend is not an undoable edit
        self.editor.clear_history();
        self.handle_dirty_state();
        self.editor.set_read_only(model.read_only());

        let weak = Rc::downgrade(self);
        let model_state = model.state_changed().connect(move |change| {
            if let Some(binding) = weak.upgrade() {
                binding.on_model_state_changed(change);
            }
        });

        let weak = Rc::downgrade(self);
        let model_content = model.content_changed().connect(move |_| {
            if let Some(binding) = weak.upgrade() {
                binding.on_model_content_changed();
            }
        });

        let weak = Rc::downgrade(self);
        let editor_value = self.editor.model().value_changed().connect(move |_| {
            if let Some(binding) = weak.upgrade() {
                binding.on_editor_value_changed();
            }
        });

        *self.slots.borrow_mut() = BindingSlots {
            model_state: Some(model_state),
            model_content: Some(model_content),
            editor_value: Some(editor_value),
        };
        self.state.set(BindingState::Bound);
        tracing::info!("EditorBinding: bound to {}", self.context.path());
    }

    fn on_model_state_changed(&self, change: &StateChange) {
        if self.is_disposed() {
            return;
        }
        match change.name {
            StateAttribute::Dirty => self.handle_dirty_state(),
            StateAttribute::ReadOnly => self.editor.set_read_only(change.new_value),
        }
    }

    fn on_model_content_changed(&self) {
        if self.is_disposed() {
            return;
        }
        let editor_model = self.editor.model();
        let new_value = self.context.model().to_string();
        if editor_model.text() != new_value {
            editor_model.set_text(&new_value);
        }
    }

    fn on_editor_value_changed(&self) {
        if self.is_disposed() {
            return;
        }
        let model = self.context.model();
        let text = self.editor.model().text();
        if model.to_string() != text {
            model.from_string(&text);
        }
    }

    fn handle_dirty_state(&self) {
        if self.context.model().dirty() {
            self.title.add_class(DIRTY_CLASS);
        } else {
            self.title.remove_class(DIRTY_CLASS);
        }
    }

    fn adopt_roster(self: &Rc<Self>, roster: Rc<CollaboratorRoster>) {
        let local = roster.local_collaborator();
        self.editor.set_uuid(&local.session_id);
        self.editor.set_selection_style(SelectionStyle {
            color: local.color.clone(),
            display_name: local.display_name.clone(),
            ..SelectionStyle::default()
        });

        let weak = Rc::downgrade(self);
        let id = roster.changed.connect(move |_| {
            if let Some(binding) = weak.upgrade() {
                binding.prune_stale_selections();
            }
        });
        tracing::info!(
            "EditorBinding: collaborating as {} ({})",
            local.display_name,
            local.session_id
        );
        *self.roster.borrow_mut() = Some((roster, id));

        self.prune_stale_selections();
    }
}

impl std::fmt::Debug for EditorBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBinding")
            .field("path", &self.context.path())
            .field("state", &self.state.get())
            .finish()
    }
}

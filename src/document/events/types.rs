//! # Event Payloads
//!
//! Arguments carried by the signals of models, contexts and widgets.

use std::fmt;

/// Boolean model attribute that reports state changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateAttribute {
    Dirty,
    ReadOnly,
}

impl StateAttribute {
    /// Stable attribute name used in notifications
    pub fn name(self) -> &'static str {
        match self {
            StateAttribute::Dirty => "dirty",
            StateAttribute::ReadOnly => "readOnly",
        }
    }
}

impl fmt::Display for StateAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Emitted when a model attribute changes value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateChange {
    pub name: StateAttribute,
    pub old_value: bool,
    pub new_value: bool,
}

/// Progress of a context save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Started,
    Completed,
    Failed,
}

/// UI events delivered to a widget at its host boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Pointer pressed inside the widget
    PointerDown,
    /// The shell asked the widget to become active
    ActivateRequest,
    /// Anything the widget does not handle
    Other(String),
}

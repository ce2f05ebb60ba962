//! # docbind - Document/Editor Binding
//!
//! Binds an editable text document model, persisted through a pluggable
//! contents backend, to a code editor widget. Edits flow both ways
//! without echo, the widget title carries a dirty marker, and remote
//! collaborators' selections are pruned when they leave the session.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐  create_new   ┌────────────────┐
//! │ FileEditorFactory│──────────────►│ DocumentWidget │
//! └──────────────────┘               │ - Title        │
//!                                    │ - Toolbar      │
//!                                    │ - FileEditor   │
//!                                    └───────┬────────┘
//!                                            │ EditorBinding
//!                     ┌──────────────────────┴─────────────────┐
//!                     ▼                                        ▼
//!             ┌───────────────┐   ready / path   ┌──────────────────────┐
//!             │  CodeEditor   │                  │ Context              │
//!             │ - EditorModel │                  │ - DocumentModel      │
//!             └───────────────┘                  │ - ContentsManager    │
//!                                                └──────────────────────┘
//! ```

pub mod cmd_args;
pub mod config;
pub mod document;

// Re-export main types for easy access
pub use document::*;

//! # Context Module
//!
//! The context contract widgets consume, the concrete context, and the
//! persistence backends it talks to.

pub mod contents;
pub mod document_context;
pub mod paths;

pub use contents::{ContentsManager, FileContents, FileContentsManager, MemoryContentsManager};
pub use document_context::{Context, DocumentContext};

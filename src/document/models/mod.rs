//! # Models Module
//!
//! Document model and the factories that create it.

pub mod document_model;
pub mod model_factory;

pub use document_model::DocumentModel;
pub use model_factory::{ModelFactory, TextModelFactory};

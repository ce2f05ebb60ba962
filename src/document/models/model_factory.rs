//! # Model Factory
//!
//! Creates document models for a context. The factory's name is what a
//! widget factory advertises as its preferred model type.

use std::rc::Rc;

use super::document_model::DocumentModel;
use crate::document::collab::CollaborativeSession;

/// Constructor for the models a context owns
pub trait ModelFactory {
    /// Name widget factories refer to, e.g. `"text"`
    fn name(&self) -> &str;

    /// Kind of backend entry the model represents
    fn content_type(&self) -> &str;

    /// Format the backend should use when transferring content
    fn file_format(&self) -> &str;

    /// Build a fresh, clean model
    fn create_new(
        &self,
        language_preference: &str,
        session: Option<Rc<CollaborativeSession>>,
    ) -> Rc<DocumentModel>;

    /// Language preferred for a given path, empty when there is none
    fn preferred_language(&self, path: &str) -> String;
}

/// Factory for plain text models
#[derive(Debug, Default, Clone)]
pub struct TextModelFactory;

impl TextModelFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ModelFactory for TextModelFactory {
    fn name(&self) -> &str {
        "text"
    }

    fn content_type(&self) -> &str {
        "file"
    }

    fn file_format(&self) -> &str {
        "text"
    }

    fn create_new(
        &self,
        language_preference: &str,
        session: Option<Rc<CollaborativeSession>>,
    ) -> Rc<DocumentModel> {
        let model = match session {
            Some(session) => DocumentModel::with_session(language_preference, session),
            None => DocumentModel::new(language_preference),
        };
        Rc::new(model)
    }

    fn preferred_language(&self, _path: &str) -> String {
        String::new()
    }
}

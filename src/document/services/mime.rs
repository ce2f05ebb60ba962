//! # Mime Type Service
//!
//! Resolves the mime type an editor should use for a file path.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::document::context::paths::{basename, extension};

/// Fallback for anything unrecognised
pub const DEFAULT_MIME_TYPE: &str = "text/plain";

/// Path to mime type lookup
pub trait MimeTypeService {
    fn mime_type_by_file_path(&self, path: &str) -> String;
}

/// Lookup by file extension, with a few well-known file names
#[derive(Debug)]
pub struct ExtensionMimeTypeService {
    by_extension: RefCell<HashMap<String, String>>,
    by_name: HashMap<String, String>,
}

impl ExtensionMimeTypeService {
    pub fn new() -> Self {
        let by_extension = [
            (".py", "text/x-python"),
            (".ipynb", "application/x-ipynb+json"),
            (".rs", "text/x-rustsrc"),
            (".js", "text/javascript"),
            (".ts", "application/typescript"),
            (".json", "application/json"),
            (".md", "text/x-markdown"),
            (".markdown", "text/x-markdown"),
            (".toml", "text/x-toml"),
            (".yaml", "text/x-yaml"),
            (".yml", "text/x-yaml"),
            (".html", "text/html"),
            (".css", "text/css"),
            (".sh", "text/x-sh"),
            (".c", "text/x-csrc"),
            (".h", "text/x-csrc"),
            (".cpp", "text/x-c++src"),
            (".r", "text/x-rsrc"),
            (".jl", "text/x-julia"),
            (".sql", "text/x-sql"),
            (".txt", DEFAULT_MIME_TYPE),
        ]
        .into_iter()
        .map(|(ext, mime)| (ext.to_string(), mime.to_string()))
        .collect();

        let by_name = [
            ("Dockerfile", "text/x-dockerfile"),
            ("Makefile", "text/x-makefile"),
        ]
        .into_iter()
        .map(|(name, mime)| (name.to_string(), mime.to_string()))
        .collect();

        Self {
            by_extension: RefCell::new(by_extension),
            by_name,
        }
    }

    /// Register or override a mapping; the extension may omit the dot
    pub fn register(&self, extension: &str, mime_type: &str) {
        let key = if extension.starts_with('.') {
            extension.to_lowercase()
        } else {
            format!(".{}", extension.to_lowercase())
        };
        self.by_extension
            .borrow_mut()
            .insert(key, mime_type.to_string());
    }
}

impl Default for ExtensionMimeTypeService {
    fn default() -> Self {
        Self::new()
    }
}

impl MimeTypeService for ExtensionMimeTypeService {
    fn mime_type_by_file_path(&self, path: &str) -> String {
        if let Some(mime) = self.by_name.get(basename(path)) {
            return mime.clone();
        }
        self.by_extension
            .borrow()
            .get(&extension(path))
            .cloned()
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string())
    }
}

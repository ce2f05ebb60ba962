//! # Title
//!
//! Label and class tokens a shell shows for a widget (e.g. on its tab).

use std::cell::RefCell;

use crate::document::events::Signal;

/// Class token present on a title while its document has unsaved changes
pub const DIRTY_CLASS: &str = "mod-dirty";

/// Widget title with whitespace-separated class tokens
#[derive(Debug, Default)]
pub struct Title {
    label: RefCell<String>,
    class_name: RefCell<String>,
    icon_class: RefCell<String>,
    changed: Signal<()>,
}

impl Title {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&self) -> String {
        self.label.borrow().clone()
    }

    pub fn set_label(&self, label: &str) {
        if *self.label.borrow() == label {
            return;
        }
        *self.label.borrow_mut() = label.to_string();
        self.changed.emit(&());
    }

    pub fn class_name(&self) -> String {
        self.class_name.borrow().clone()
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.class_name
            .borrow()
            .split_whitespace()
            .any(|existing| existing == token)
    }

    pub fn add_class(&self, token: &str) {
        if self.has_class(token) {
            return;
        }
        {
            let mut class_name = self.class_name.borrow_mut();
            if !class_name.is_empty() {
                class_name.push(' ');
            }
            class_name.push_str(token);
        }
        self.changed.emit(&());
    }

    pub fn remove_class(&self, token: &str) {
        if !self.has_class(token) {
            return;
        }
        let remaining: Vec<String> = self
            .class_name
            .borrow()
            .split_whitespace()
            .filter(|existing| *existing != token)
            .map(str::to_string)
            .collect();
        *self.class_name.borrow_mut() = remaining.join(" ");
        self.changed.emit(&());
    }

    pub fn icon_class(&self) -> String {
        self.icon_class.borrow().clone()
    }

    pub fn set_icon_class(&self, icon_class: &str) {
        *self.icon_class.borrow_mut() = icon_class.to_string();
        self.changed.emit(&());
    }

    pub fn changed(&self) -> &Signal<()> {
        &self.changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_class_should_not_duplicate_tokens() {
        let title = Title::new();

        title.add_class("tab");
        title.add_class(DIRTY_CLASS);
        title.add_class(DIRTY_CLASS);

        assert_eq!(title.class_name(), "tab mod-dirty");
    }

    #[test]
    fn remove_class_should_only_remove_whole_tokens() {
        let title = Title::new();
        title.add_class("mod-dirty-ish");
        title.add_class(DIRTY_CLASS);

        title.remove_class(DIRTY_CLASS);

        assert!(!title.has_class(DIRTY_CLASS));
        assert!(title.has_class("mod-dirty-ish"));
    }

    #[test]
    fn set_label_should_notify_only_on_change() {
        let title = Title::new();
        let count = std::rc::Rc::new(std::cell::Cell::new(0));
        let count_clone = std::rc::Rc::clone(&count);
        title
            .changed()
            .connect(move |_| count_clone.set(count_clone.get() + 1));

        title.set_label("a.txt");
        title.set_label("a.txt");

        assert_eq!(title.label(), "a.txt");
        assert_eq!(count.get(), 1);
    }
}

//! # Editor Types
//!
//! Positions, selections, and configuration shared by editor surfaces.

/// Logical position in text content (line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LogicalPosition {
    pub line: usize,
    pub column: usize,
}

impl LogicalPosition {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    pub fn zero() -> Self {
        Self::new(0, 0)
    }

    /// Byte offset of this position in `text`, clamped to valid bounds.
    /// Columns count characters, not bytes.
    pub fn to_offset(self, text: &str) -> usize {
        let mut offset = 0;
        for (index, line) in text.split('\n').enumerate() {
            if index == self.line {
                let column_bytes = line
                    .char_indices()
                    .nth(self.column)
                    .map_or(line.len(), |(byte, _)| byte);
                return offset + column_bytes;
            }
            offset += line.len() + 1;
        }
        text.len()
    }
}

/// Selected range attributed to one collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSelection {
    pub start: LogicalPosition,
    pub end: LogicalPosition,
}

impl TextSelection {
    pub fn new(start: LogicalPosition, end: LogicalPosition) -> Self {
        Self { start, end }
    }

    /// Empty selection, i.e. a cursor
    pub fn cursor(position: LogicalPosition) -> Self {
        Self::new(position, position)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// How a collaborator's selections are drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionStyle {
    pub class_name: String,
    pub color: String,
    pub display_name: String,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            class_name: "editor-selected".to_string(),
            color: String::new(),
            display_name: String::new(),
        }
    }
}

/// Editor preferences read from settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub tab_size: usize,
    pub line_wrap: bool,
    pub line_numbers: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            line_wrap: false,
            line_numbers: true,
        }
    }
}

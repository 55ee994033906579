//! Minimal command line editing used by the binary to drive the overlay.
//! Produces [`CommandLineModel`] values for the store; never reads the view.

use crate::components::command_line::Segmentation;
use crate::store::CommandLineModel;

/// First character of a nested (expression) command line.
const NESTED_FIRST_CHAR: &str = "=";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Entry {
    content: String,
    /// In segmentation units.
    position: usize,
    first_char: String,
    prompt: String,
}

#[derive(Debug, Clone, Default)]
pub struct CommandLineEditor {
    segmentation: Segmentation,
    visible: bool,
    current: Entry,
    parents: Vec<Entry>,
}

impl CommandLineEditor {
    pub fn new(segmentation: Segmentation) -> Self {
        Self {
            segmentation,
            ..Self::default()
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn level(&self) -> usize {
        self.parents.len() + 1
    }

    pub fn model(&self) -> CommandLineModel {
        CommandLineModel {
            visible: self.visible,
            content: self.current.content.clone(),
            position: self.current.position,
            first_char: self.current.first_char.clone(),
            level: self.level(),
            prompt: self.current.prompt.clone(),
        }
    }

    /// Switches the position unit, keeping the cursor at the same byte offset.
    pub fn set_segmentation(&mut self, segmentation: Segmentation) {
        if segmentation == self.segmentation {
            return;
        }
        let old = self.segmentation;
        for entry in self.parents.iter_mut().chain(std::iter::once(&mut self.current)) {
            let byte = old.byte_offset(&entry.content, entry.position);
            entry.position = segmentation.unit_count(&entry.content[..byte]);
        }
        self.segmentation = segmentation;
    }

    pub fn open(&mut self, first_char: &str, prompt: &str) -> bool {
        self.visible = true;
        self.parents.clear();
        self.current = Entry {
            first_char: first_char.to_string(),
            prompt: prompt.to_string(),
            ..Entry::default()
        };
        true
    }

    /// Opens a nested command line whose submitted text is inserted into the
    /// parent at its cursor.
    pub fn open_nested(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        let parent = std::mem::replace(
            &mut self.current,
            Entry {
                first_char: NESTED_FIRST_CHAR.to_string(),
                ..Entry::default()
            },
        );
        self.parents.push(parent);
        true
    }

    fn unit_count(&self) -> usize {
        self.segmentation.unit_count(&self.current.content)
    }

    fn byte_offset(&self, position: usize) -> usize {
        self.segmentation.byte_offset(&self.current.content, position)
    }

    pub fn insert_str(&mut self, text: &str) -> bool {
        if !self.visible || text.is_empty() {
            return false;
        }
        let byte = self.byte_offset(self.current.position);
        self.current.content.insert_str(byte, text);
        let end = byte + text.len();
        self.current.position = self.segmentation.unit_count(&self.current.content[..end]);
        true
    }

    pub fn insert_char(&mut self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.insert_str(c.encode_utf8(&mut buf))
    }

    /// Backspace. On an empty line this leaves the current level.
    pub fn delete_backward(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        if self.current.content.is_empty() {
            return self.cancel();
        }
        if self.current.position == 0 {
            return false;
        }
        let start = self.byte_offset(self.current.position - 1);
        let end = self.byte_offset(self.current.position);
        self.current.content.replace_range(start..end, "");
        self.current.position -= 1;
        true
    }

    pub fn delete_forward(&mut self) -> bool {
        if !self.visible || self.current.position >= self.unit_count() {
            return false;
        }
        let start = self.byte_offset(self.current.position);
        let end = self.byte_offset(self.current.position + 1);
        self.current.content.replace_range(start..end, "");
        true
    }

    pub fn move_left(&mut self) -> bool {
        if !self.visible || self.current.position == 0 {
            return false;
        }
        self.current.position -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if !self.visible || self.current.position >= self.unit_count() {
            return false;
        }
        self.current.position += 1;
        true
    }

    pub fn move_home(&mut self) -> bool {
        if !self.visible || self.current.position == 0 {
            return false;
        }
        self.current.position = 0;
        true
    }

    pub fn move_end(&mut self) -> bool {
        let end = self.unit_count();
        if !self.visible || self.current.position == end {
            return false;
        }
        self.current.position = end;
        true
    }

    /// Submits the current level. A nested level inserts its text into the
    /// parent and returns `None`; the outermost level hides the line and
    /// returns the full command including its first character.
    pub fn submit(&mut self) -> Option<String> {
        if !self.visible {
            return None;
        }
        if let Some(parent) = self.parents.pop() {
            let text = std::mem::replace(&mut self.current, parent).content;
            self.insert_str(&text);
            return None;
        }
        self.visible = false;
        Some(format!("{}{}", self.current.first_char, self.current.content))
    }

    /// Leaves the current level without submitting.
    pub fn cancel(&mut self) -> bool {
        if !self.visible {
            return false;
        }
        match self.parents.pop() {
            Some(parent) => self.current = parent,
            None => self.visible = false,
        }
        true
    }
}

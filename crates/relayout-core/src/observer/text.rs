// Relayout Text Capture
// Accumulates the text a stream of translated events types

use crate::KeyEvent;

/// In-memory text typed through the hook.
///
/// Only presses count. Named keys Backspace, Space, Tab and Enter edit the
/// buffer; other multi-character names (Shift, Caps Lock, ...) and codes
/// without a printable string are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextCapture {
    text: String,
}

impl TextCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a translated event. Returns true if the text changed.
    pub fn record(&mut self, event: &KeyEvent) -> bool {
        if !event.is_pressed() {
            return false;
        }
        let Some(key) = event.printable_string() else {
            return false;
        };

        match key {
            "Backspace" => self.text.pop().is_some(),
            "Space" => self.push(' '),
            "Tab" => self.push('\t'),
            "Enter" => self.push('\n'),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => self.push(c),
                    _ => false,
                }
            }
        }
    }

    fn push(&mut self, c: char) -> bool {
        self.text.push(c);
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The line currently being typed
    pub fn current_line(&self) -> &str {
        self.text.rsplit('\n').next().unwrap_or("")
    }

    /// Number of completed lines
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Take the captured text, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

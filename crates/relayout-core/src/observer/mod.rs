// Relayout Observers
// Headless consumers of translated events

mod pressed;
mod text;

pub use pressed::PressedKeys;
pub use text::TextCapture;

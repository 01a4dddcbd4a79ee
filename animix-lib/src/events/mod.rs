//! Event list editing: selection, time edits, copy and paste.

pub mod clipboard;
pub mod ops;
pub mod preview;
pub mod session;
pub mod template;

pub use clipboard::{ClipboardError, EventClipboard};
pub use preview::{ManualPreviewTime, PreviewTimeProvider};
pub use session::{EditableEvent, EventEditSession, EventId};
pub use template::{DefaultEventTemplate, EventTemplate, FunctionEventTemplate};

//! Copy buffer for event lists.
//!
//! The text form uses the field names of existing editor clipboards
//! (`Events`, `FunctionName`, `Time`, ...) so copied events can be pasted
//! between tools.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::clip::{AnimationEvent, MessageOptions};

#[derive(Debug, Clone, PartialEq)]
pub enum ClipboardError {
    Parse(String),
    Empty,
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid event clipboard: {}", err),
            Self::Empty => write!(f, "event clipboard is empty"),
        }
    }
}

impl std::error::Error for ClipboardError {}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ClipboardFile {
    #[serde(default)]
    events: Option<Vec<ClipboardEvent>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct ClipboardEvent {
    function_name: String,
    time: f32,
    string_parameter: String,
    int_parameter: i32,
    float_parameter: f32,
    object_reference_parameter: Option<String>,
    message_options: MessageOptions,
}

impl From<&AnimationEvent> for ClipboardEvent {
    fn from(event: &AnimationEvent) -> Self {
        Self {
            function_name: event.function_name.clone(),
            time: event.time,
            string_parameter: event.string_parameter.clone(),
            int_parameter: event.int_parameter,
            float_parameter: event.float_parameter,
            object_reference_parameter: event.object_reference_parameter.clone(),
            message_options: event.message_options,
        }
    }
}

impl From<ClipboardEvent> for AnimationEvent {
    fn from(event: ClipboardEvent) -> Self {
        Self {
            time: event.time,
            function_name: event.function_name,
            int_parameter: event.int_parameter,
            float_parameter: event.float_parameter,
            string_parameter: event.string_parameter,
            object_reference_parameter: event.object_reference_parameter,
            message_options: event.message_options,
        }
    }
}

/// Events captured by a copy, with their original times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventClipboard {
    pub events: Vec<AnimationEvent>,
}

impl EventClipboard {
    pub fn new(events: Vec<AnimationEvent>) -> Self {
        Self { events }
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn to_json(&self) -> String {
        let file = ClipboardFile {
            events: Some(self.events.iter().map(ClipboardEvent::from).collect()),
        };
        // Only strings, numbers and unit enums: serialization cannot fail.
        serde_json::to_string_pretty(&file).unwrap_or_default()
    }

    /// Parse clipboard text.
    ///
    /// # Errors
    /// [`ClipboardError::Empty`] when the text holds no events,
    /// [`ClipboardError::Parse`] when it is not clipboard JSON.
    pub fn from_json(text: &str) -> Result<Self, ClipboardError> {
        if text.trim().is_empty() {
            return Err(ClipboardError::Empty);
        }
        let file: ClipboardFile =
            serde_json::from_str(text).map_err(|e| ClipboardError::Parse(e.to_string()))?;
        let events: Vec<AnimationEvent> = file
            .events
            .unwrap_or_default()
            .into_iter()
            .map(AnimationEvent::from)
            .collect();
        if events.is_empty() {
            return Err(ClipboardError::Empty);
        }
        Ok(Self { events })
    }

    /// Whether `text` holds at least one pasteable event.
    pub fn can_paste(text: &str) -> bool {
        Self::from_json(text).is_ok()
    }
}

//! Discrete timed events embedded in a clip.

use serde::{Deserialize, Serialize};

/// Delivery policy for the function an event invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MessageOptions {
    #[default]
    RequireReceiver,
    DontRequireReceiver,
}

/// A named callback fired at a point in time, with its parameters.
///
/// `time` is in seconds from the clip start.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationEvent {
    pub time: f32,
    pub function_name: String,
    pub int_parameter: i32,
    pub float_parameter: f32,
    pub string_parameter: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_reference_parameter: Option<String>,
    pub message_options: MessageOptions,
}

impl AnimationEvent {
    pub fn new(time: f32, function_name: impl Into<String>) -> Self {
        Self {
            time,
            function_name: function_name.into(),
            ..Self::default()
        }
    }
}

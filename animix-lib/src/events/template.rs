use crate::clip::{AnimationClip, AnimationEvent};

/// Project-specific hook deciding what a freshly added event looks like.
pub trait EventTemplate: std::fmt::Debug {
    /// Event inserted by "add event"; its time is overwritten by the caller.
    fn default_event(&self) -> AnimationEvent {
        AnimationEvent::default()
    }

    /// Whether this template should be used for `clip`.
    fn is_valid_for(&self, _clip: &AnimationClip) -> bool {
        true
    }
}

/// Adds empty events.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEventTemplate;

impl EventTemplate for DefaultEventTemplate {}

/// Adds events calling a fixed function.
#[derive(Debug, Clone, Default)]
pub struct FunctionEventTemplate {
    pub function_name: String,
}

impl FunctionEventTemplate {
    pub fn new(function_name: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
        }
    }
}

impl EventTemplate for FunctionEventTemplate {
    fn default_event(&self) -> AnimationEvent {
        AnimationEvent::new(0.0, self.function_name.clone())
    }
}

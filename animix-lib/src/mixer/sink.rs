use crate::clip::{AnimationClip, AnimationEvent, ClipSettings, Curve, CurveBinding};

/// Destination of a mix. The host owns persistence of whatever it builds.
pub trait ClipSink {
    fn set_curve(&mut self, binding: CurveBinding, curve: Curve);
    fn set_events(&mut self, events: Vec<AnimationEvent>);
    fn set_clip_settings(&mut self, settings: ClipSettings);

    /// Frame rate inherited from the reference clip. Ignored by default.
    fn set_frame_rate(&mut self, _frame_rate: f32) {}
}

impl ClipSink for AnimationClip {
    fn set_curve(&mut self, binding: CurveBinding, curve: Curve) {
        self.insert_curve(binding, curve);
    }

    fn set_events(&mut self, events: Vec<AnimationEvent>) {
        self.events = events;
    }

    fn set_clip_settings(&mut self, settings: ClipSettings) {
        self.settings = settings;
    }

    fn set_frame_rate(&mut self, frame_rate: f32) {
        self.frame_rate = frame_rate;
    }
}

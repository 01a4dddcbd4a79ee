/// Source of the playhead position of a live preview, if the host has one.
///
/// Times are normalized to `[0, 1]` over the clip length.
pub trait PreviewTimeProvider {
    fn normalized_time(&self) -> f32;
    fn set_normalized_time(&mut self, time: f32);
}

/// Playhead driven by hand; the standalone stand-in for a host preview.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualPreviewTime {
    time: f32,
}

impl ManualPreviewTime {
    pub fn new(time: f32) -> Self {
        let mut preview = Self::default();
        preview.set_normalized_time(time);
        preview
    }
}

impl PreviewTimeProvider for ManualPreviewTime {
    fn normalized_time(&self) -> f32 {
        self.time
    }

    fn set_normalized_time(&mut self, time: f32) {
        self.time = if time.is_finite() {
            time.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }
}

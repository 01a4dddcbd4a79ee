//! Pure time transforms used while editing event lists.

/// Frame readouts are rounded to this many steps per frame.
pub const FRAME_PRECISION: f32 = 100.0;

/// Clamp `time` into `[0, length]`. Negative lengths clamp to zero.
pub fn clamp_time(time: f32, length: f32) -> f32 {
    time.clamp(0.0, length.max(0.0))
}

/// Shift `time` by `delta`, keeping the result inside the clip.
pub fn offset_time(time: f32, delta: f32, length: f32) -> f32 {
    clamp_time(time + delta, length)
}

/// Shift a group of times so that the earliest lands on `insertion_time`.
///
/// Relative spacing is preserved: `new = old - min(old) + insertion_time`.
pub fn rebase_times(times: &[f32], insertion_time: f32) -> Vec<f32> {
    let Some(min) = times.iter().copied().reduce(f32::min) else {
        return Vec::new();
    };
    times.iter().map(|time| time - min + insertion_time).collect()
}

/// Round `time` to the nearest whole frame.
pub fn snap_to_frame(time: f32, frame_rate: f32) -> f32 {
    if frame_rate <= 0.0 {
        return time;
    }
    (time * frame_rate).round() / frame_rate
}

pub fn frame_to_time(frame: f32, frame_rate: f32) -> f32 {
    if frame_rate <= 0.0 {
        return 0.0;
    }
    frame / frame_rate
}

/// Fractional frame index for `time`, rounded to [`FRAME_PRECISION`].
pub fn time_to_frame(time: f32, frame_rate: f32) -> f32 {
    (time * frame_rate * FRAME_PRECISION).round() / FRAME_PRECISION
}

/// `time / length`, or `time` unchanged for zero-length clips.
pub fn normalize_time(time: f32, length: f32) -> f32 {
    if length > 0.0 {
        time / length
    } else {
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_clamp_to_clip() {
        assert_eq!(offset_time(0.5, 0.25, 1.0), 0.75);
        assert_eq!(offset_time(0.5, 1.0, 1.0), 1.0);
        assert_eq!(offset_time(0.5, -2.0, 1.0), 0.0);
        assert_eq!(clamp_time(0.3, -1.0), 0.0);
    }

    #[test]
    fn rebase_aligns_earliest_time() {
        assert_eq!(rebase_times(&[1.5, 1.0, 2.0], 0.25), vec![0.75, 0.25, 1.25]);
        assert!(rebase_times(&[], 3.0).is_empty());
    }

    #[test]
    fn frame_conversions() {
        assert_eq!(snap_to_frame(0.51, 10.0), 0.5);
        assert_eq!(snap_to_frame(0.51, 0.0), 0.51);
        assert_eq!(frame_to_time(15.0, 30.0), 0.5);
        assert_eq!(time_to_frame(0.5, 30.0), 15.0);
        assert_eq!(time_to_frame(0.1234, 10.0), 1.23);
        assert_eq!(normalize_time(1.0, 4.0), 0.25);
        assert_eq!(normalize_time(1.0, 0.0), 1.0);
    }
}

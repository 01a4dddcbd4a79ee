//! Stepped-curve post-processing for clips marked as constant.

use log::debug;

use crate::clip::AnimationClip;

/// Clip-name suffix that opts a clip into [`process_constant_clip`].
pub const CONSTANT_SUFFIX: &str = "CONSTANT";

/// Whether `name` ends with [`CONSTANT_SUFFIX`], ignoring ASCII case.
pub fn is_constant_name(name: &str) -> bool {
    let suffix = CONSTANT_SUFFIX.len();
    name.len() >= suffix
        && name
            .get(name.len() - suffix..)
            .map(|tail| tail.eq_ignore_ascii_case(CONSTANT_SUFFIX))
            .unwrap_or(false)
}

/// Switch every curve that actually changes value to constant tangents.
///
/// Flat curves are skipped since stepping them has no visible effect.
///
/// # Returns
/// Number of curves changed.
pub fn apply_constant_tangents(clip: &mut AnimationClip) -> usize {
    let mut changed = 0;
    for (binding, curve) in clip.curves.iter_mut() {
        if curve.is_flat() {
            continue;
        }
        curve.set_constant();
        debug!("Stepped curve {}", binding);
        changed += 1;
    }
    changed
}

/// Apply [`apply_constant_tangents`] if the clip name carries the suffix.
///
/// # Returns
/// `None` when the clip is not marked, otherwise the number of curves changed.
pub fn process_constant_clip(clip: &mut AnimationClip) -> Option<usize> {
    if !is_constant_name(&clip.name) {
        return None;
    }
    Some(apply_constant_tangents(clip))
}

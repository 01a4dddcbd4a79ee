//! The clip mixing algorithm.
//!
//! Sources are visited in spec order. The first source that resolves becomes
//! the reference: its length drives time matching and its settings seed the
//! output. Every surviving curve is filtered, optionally rescaled, re-rooted
//! under the source's path prefix and written into a table keyed by binding,
//! where a later source replaces an earlier one outright.

use indexmap::IndexMap;
use log::{debug, info, warn};
use regex::Regex;

use crate::clip::{AnimationClip, AnimationEvent, ClipSettings, Curve, CurveBinding};

use super::resolver::{ClipResolver, ResolveError};
use super::sink::ClipSink;
use super::spec::{ClipRef, MixSpec};
use super::warning::MixWarning;

/// Summary of one mix run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MixReport {
    pub warnings: Vec<MixWarning>,
    /// Index of the reference source, if any source resolved.
    pub reference: Option<usize>,
    /// Sources with a non-null clip reference.
    pub referenced: usize,
    /// Sources the resolver answered for.
    pub resolved: usize,
}

impl MixReport {
    /// True when at least one source named a clip but none could be resolved.
    pub fn all_unresolved(&self) -> bool {
        self.referenced > 0 && self.resolved == 0
    }
}

/// A freshly built clip and the report of the run that produced it.
#[derive(Debug, Clone)]
pub struct MixOutput {
    pub clip: AnimationClip,
    pub report: MixReport,
}

impl MixOutput {
    pub fn warnings(&self) -> &[MixWarning] {
        &self.report.warnings
    }
}

struct ResolvedSource {
    length: f32,
    frame_rate: f32,
    settings: ClipSettings,
    curves: Vec<(CurveBinding, Curve)>,
    events: Vec<AnimationEvent>,
}

struct Reference {
    index: usize,
    length: f32,
    frame_rate: f32,
    settings: ClipSettings,
}

fn resolve_source(
    resolver: &dyn ClipResolver,
    clip: &ClipRef,
) -> Result<ResolvedSource, ResolveError> {
    let length = resolver.length(clip)?;
    let frame_rate = resolver.frame_rate(clip)?;
    let settings = resolver.clip_settings(clip)?;
    let events = resolver.events(clip)?;
    let curves = resolver
        .curve_bindings(clip)?
        .into_iter()
        .map(|binding| {
            let curve = resolver.curve(clip, &binding)?;
            Ok((binding, curve))
        })
        .collect::<Result<Vec<_>, ResolveError>>()?;

    Ok(ResolvedSource {
        length,
        frame_rate,
        settings,
        curves,
        events,
    })
}

/// Path of a curve after re-rooting it under `prefix`.
///
/// An empty source path maps onto the prefix itself; an empty prefix leaves
/// the source path unchanged.
pub fn compose_path(prefix: &str, path: &str) -> String {
    if path.is_empty() {
        prefix.to_string()
    } else if prefix.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", prefix, path)
    }
}

/// Factor that stretches a source of `source_length` onto `reference_length`.
///
/// Zero-length sources are left unscaled.
pub fn time_scale(reference_length: f32, source_length: f32) -> f32 {
    if source_length > 0.0 {
        reference_length / source_length
    } else {
        1.0
    }
}

fn record(report: &mut MixReport, warning: MixWarning) {
    warn!("{}", warning);
    report.warnings.push(warning);
}

/// Mix `spec` into `sink`.
///
/// Per-source problems never abort the run; they are returned as warnings in
/// the report. When no source resolves the sink receives no settings and no
/// curves, and an empty event list.
pub fn mix_into(spec: &MixSpec, resolver: &dyn ClipResolver, sink: &mut dyn ClipSink) -> MixReport {
    let mut report = MixReport::default();
    let mut curves: IndexMap<CurveBinding, Curve> = IndexMap::new();
    let mut events: Vec<AnimationEvent> = Vec::new();
    let mut reference: Option<Reference> = None;

    for (index, entry) in spec.sources.iter().enumerate() {
        let Some(clip_ref) = entry.clip_ref() else {
            record(&mut report, MixWarning::NullSource { index });
            continue;
        };
        report.referenced += 1;

        let source = match resolve_source(resolver, clip_ref) {
            Ok(source) => source,
            Err(reason) => {
                record(&mut report, MixWarning::Unresolved { index, reason });
                continue;
            }
        };
        report.resolved += 1;

        let scale = match reference.as_ref().map(|reference| reference.length) {
            None => {
                debug!("Source {} ({}) is the reference, length {}s", index, clip_ref, source.length);
                reference = Some(Reference {
                    index,
                    length: source.length,
                    frame_rate: source.frame_rate,
                    settings: source.settings.clone(),
                });
                1.0
            }
            Some(reference_length) if entry.match_time => {
                time_scale(reference_length, source.length)
            }
            Some(_) => 1.0,
        };

        if entry.copy_events {
            events.extend(source.events.iter().cloned());
        }

        let filter = match entry.filter_pattern().map(Regex::new).transpose() {
            Ok(filter) => filter,
            Err(err) => {
                record(
                    &mut report,
                    MixWarning::InvalidFilter {
                        index,
                        pattern: entry.filter.clone(),
                        reason: err.to_string(),
                    },
                );
                continue;
            }
        };

        debug!(
            "Source {} ({}): {} curve(s), scale {}",
            index,
            clip_ref,
            source.curves.len(),
            scale
        );

        for (binding, mut curve) in source.curves {
            if let Some(filter) = &filter {
                if !filter.is_match(&binding.filter_key()) {
                    continue;
                }
            }

            if scale != 1.0 {
                curve.scale_time(scale);
            }

            let target = CurveBinding {
                path: compose_path(&entry.path, &binding.path),
                property: binding.property,
            };

            if curves.contains_key(&target) {
                info!("Source {} overwrites curve {}", index, target);
            }
            curves.insert(target, curve);
        }
    }

    if let Some(reference) = &reference {
        let mut settings = reference.settings.clone();
        settings.loop_time = spec.looping;
        sink.set_clip_settings(settings);
        sink.set_frame_rate(reference.frame_rate);
        report.reference = Some(reference.index);
    }

    info!(
        "Mixed {} curve(s) and {} event(s) from {} of {} source(s)",
        curves.len(),
        events.len(),
        report.resolved,
        spec.sources.len()
    );

    for (binding, curve) in curves {
        sink.set_curve(binding, curve);
    }
    sink.set_events(events);

    report
}

/// Mix `spec` into a new, unnamed clip.
pub fn mix(spec: &MixSpec, resolver: &dyn ClipResolver) -> MixOutput {
    let mut clip = AnimationClip::default();
    let report = mix_into(spec, resolver, &mut clip);
    MixOutput { clip, report }
}

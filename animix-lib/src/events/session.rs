//! Editable event list for a single clip.

use std::collections::BTreeSet;

use log::debug;

use crate::clip::{AnimationClip, AnimationEvent};

use super::clipboard::EventClipboard;
use super::ops::{clamp_time, frame_to_time, normalize_time, offset_time, rebase_times, snap_to_frame};
use super::preview::PreviewTimeProvider;
use super::template::{DefaultEventTemplate, EventTemplate};

/// Stable identity of an event within one session.
///
/// Ids are never reused, so a selection stays meaningful across inserts and
/// removals; indices are derived on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(u64);

#[derive(Debug, Clone, PartialEq)]
pub struct EditableEvent {
    pub id: EventId,
    pub event: AnimationEvent,
}

/// Working copy of a clip's events plus the current selection.
///
/// Edits stay in the session until [`EventEditSession::apply_to`] writes them
/// back into a clip.
#[derive(Debug)]
pub struct EventEditSession {
    clip_name: String,
    length: f32,
    frame_rate: f32,
    events: Vec<EditableEvent>,
    selection: BTreeSet<EventId>,
    drag_origin: Vec<(EventId, f32)>,
    next_id: u64,
    snap: bool,
    modified: bool,
    template: Box<dyn EventTemplate>,
}

impl EventEditSession {
    pub fn from_clip(clip: &AnimationClip) -> Self {
        let mut session = Self {
            clip_name: clip.name.clone(),
            length: clip.length(),
            frame_rate: clip.frame_rate,
            events: Vec::with_capacity(clip.events.len()),
            selection: BTreeSet::new(),
            drag_origin: Vec::new(),
            next_id: 0,
            snap: true,
            modified: false,
            template: Box::new(DefaultEventTemplate),
        };
        for event in &clip.events {
            session.push(event.clone());
        }
        session
    }

    pub fn with_template(mut self, template: Box<dyn EventTemplate>) -> Self {
        self.template = template;
        self
    }

    pub fn clip_name(&self) -> &str {
        &self.clip_name
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn frame_rate(&self) -> f32 {
        self.frame_rate
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn snap(&self) -> bool {
        self.snap
    }

    /// Toggle whole-frame snapping of dragged events.
    pub fn set_snap(&mut self, snap: bool) {
        self.snap = snap;
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> impl Iterator<Item = &EditableEvent> + '_ {
        self.events.iter()
    }

    pub fn event(&self, id: EventId) -> Option<&AnimationEvent> {
        self.events
            .iter()
            .find(|editable| editable.id == id)
            .map(|editable| &editable.event)
    }

    pub fn index_of(&self, id: EventId) -> Option<usize> {
        self.events.iter().position(|editable| editable.id == id)
    }

    fn push(&mut self, event: AnimationEvent) -> EventId {
        let id = EventId(self.next_id);
        self.next_id += 1;
        self.events.push(EditableEvent { id, event });
        id
    }

    /// Append `event` and make it the only selected event.
    pub fn add_event(&mut self, event: AnimationEvent) -> EventId {
        let id = self.push(event);
        self.selection.clear();
        self.selection.insert(id);
        self.modified = true;
        id
    }

    /// Add the template's default event at `time` (clamped into the clip).
    pub fn add_event_at(&mut self, time: f32) -> EventId {
        let mut event = self.template.default_event();
        event.time = clamp_time(time, self.length);
        self.add_event(event)
    }

    /// Add the template's default event at the preview playhead.
    pub fn add_event_at_preview(&mut self, preview: &dyn PreviewTimeProvider) -> EventId {
        self.add_event_at(preview.normalized_time() * self.length)
    }

    /// Remove the given events. Unknown ids are ignored.
    ///
    /// # Returns
    /// Number of events removed.
    pub fn remove(&mut self, ids: &[EventId]) -> usize {
        let before = self.events.len();
        self.events.retain(|editable| !ids.contains(&editable.id));
        for id in ids {
            self.selection.remove(id);
        }
        let removed = before - self.events.len();
        if removed > 0 {
            self.modified = true;
        }
        removed
    }

    /// Remove every selected event and clear the selection.
    pub fn remove_selected(&mut self) -> usize {
        let ids: Vec<EventId> = self.selection.iter().copied().collect();
        let removed = self.remove(&ids);
        self.selection.clear();
        removed
    }

    /// Select `id`. Without `toggle` the selection becomes just `id`; with
    /// `toggle`, `id` is added or removed.
    ///
    /// # Returns
    /// `false` if `id` is not part of this session.
    pub fn select(&mut self, id: EventId, toggle: bool) -> bool {
        if self.index_of(id).is_none() {
            return false;
        }
        if !toggle {
            self.selection.clear();
            self.selection.insert(id);
        } else if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
        true
    }

    pub fn select_all(&mut self) {
        self.selection = self.events.iter().map(|editable| editable.id).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, id: EventId) -> bool {
        self.selection.contains(&id)
    }

    /// Selected ids in event-list order.
    pub fn selection(&self) -> Vec<EventId> {
        self.events
            .iter()
            .filter(|editable| self.selection.contains(&editable.id))
            .map(|editable| editable.id)
            .collect()
    }

    /// Current indices of the selected events, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.events
            .iter()
            .enumerate()
            .filter(|(_, editable)| self.selection.contains(&editable.id))
            .map(|(index, _)| index)
            .collect()
    }

    fn for_each_selected(&mut self, mut f: impl FnMut(&mut AnimationEvent)) -> usize {
        let mut touched = 0;
        for editable in &mut self.events {
            if self.selection.contains(&editable.id) {
                f(&mut editable.event);
                touched += 1;
            }
        }
        if touched > 0 {
            self.modified = true;
        }
        touched
    }

    /// Apply `f` to every selected event, e.g. to change a parameter.
    pub fn edit_selected(&mut self, f: impl FnMut(&mut AnimationEvent)) -> usize {
        self.for_each_selected(f)
    }

    /// Shift selected events by `delta` seconds, clamped into the clip.
    pub fn offset_selected(&mut self, delta: f32) -> usize {
        let length = self.length;
        self.for_each_selected(|event| event.time = offset_time(event.time, delta, length))
    }

    /// Move every selected event to `time`, clamped into the clip.
    pub fn set_selected_time(&mut self, time: f32) -> usize {
        let time = clamp_time(time, self.length);
        self.for_each_selected(|event| event.time = time)
    }

    /// Move every selected event to `frame`, clamped into the clip.
    pub fn set_selected_frame(&mut self, frame: f32) -> usize {
        self.set_selected_time(frame_to_time(frame, self.frame_rate))
    }

    /// Remember the current times of the selection as the origin of a drag.
    pub fn begin_drag(&mut self) {
        self.drag_origin = self
            .events
            .iter()
            .filter(|editable| self.selection.contains(&editable.id))
            .map(|editable| (editable.id, editable.event.time))
            .collect();
    }

    /// Place every dragged event at its origin time plus `delta`.
    ///
    /// With snapping on, `delta` is rounded to whole frames first. Calling
    /// this repeatedly during one drag does not accumulate.
    pub fn drag_by(&mut self, delta: f32) {
        if self.drag_origin.is_empty() {
            return;
        }
        let delta = if self.snap {
            snap_to_frame(delta, self.frame_rate)
        } else {
            delta
        };
        for (id, origin) in &self.drag_origin {
            if let Some(editable) = self.events.iter_mut().find(|editable| editable.id == *id) {
                editable.event.time = offset_time(*origin, delta, self.length);
            }
        }
        self.modified = true;
    }

    pub fn end_drag(&mut self) {
        self.drag_origin.clear();
    }

    /// Copy the selected events, in list order.
    pub fn copy_selected(&self) -> EventClipboard {
        EventClipboard::new(
            self.events
                .iter()
                .filter(|editable| self.selection.contains(&editable.id))
                .map(|editable| editable.event.clone())
                .collect(),
        )
    }

    /// Insert clipboard events so the earliest one lands on `insertion_time`.
    ///
    /// The pasted events replace the selection.
    pub fn paste(&mut self, clipboard: &EventClipboard, insertion_time: f32) -> Vec<EventId> {
        if clipboard.is_empty() {
            return Vec::new();
        }

        let times: Vec<f32> = clipboard.events.iter().map(|event| event.time).collect();
        let rebased = rebase_times(&times, insertion_time);

        self.selection.clear();
        let mut ids = Vec::with_capacity(rebased.len());
        for (event, time) in clipboard.events.iter().zip(rebased) {
            let mut event = event.clone();
            event.time = time;
            let id = self.push(event);
            self.selection.insert(id);
            ids.push(id);
        }
        self.modified = true;
        debug!("Pasted {} event(s) at {}s", ids.len(), insertion_time);
        ids
    }

    /// Paste at the preview playhead.
    pub fn paste_at_preview(
        &mut self,
        clipboard: &EventClipboard,
        preview: &dyn PreviewTimeProvider,
    ) -> Vec<EventId> {
        self.paste(clipboard, preview.normalized_time() * self.length)
    }

    /// Events with times normalized over the clip length, for hosts that
    /// store event times as a fraction of the clip.
    pub fn normalized_events(&self) -> Vec<AnimationEvent> {
        self.events
            .iter()
            .map(|editable| {
                let mut event = editable.event.clone();
                event.time = normalize_time(event.time, self.length);
                event
            })
            .collect()
    }

    /// Write the edited events into `clip` and mark the session clean.
    pub fn apply_to(&mut self, clip: &mut AnimationClip) {
        clip.events = self
            .events
            .iter()
            .map(|editable| editable.event.clone())
            .collect();
        self.modified = false;
    }

    /// Discard edits and reload events from `clip`. Snapping and the
    /// template are kept; ids continue from where they were.
    pub fn revert(&mut self, clip: &AnimationClip) {
        self.clip_name = clip.name.clone();
        self.length = clip.length();
        self.frame_rate = clip.frame_rate;
        self.events.clear();
        self.selection.clear();
        self.drag_origin.clear();
        for event in &clip.events {
            self.push(event.clone());
        }
        self.modified = false;
    }

    /// Whether the session's template wants to handle `clip`.
    pub fn template_applies(&self, clip: &AnimationClip) -> bool {
        self.template.is_valid_for(clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{Curve, CurveBinding};
    use crate::events::preview::ManualPreviewTime;
    use crate::events::template::FunctionEventTemplate;

    fn clip() -> AnimationClip {
        let mut clip = AnimationClip::new("Run");
        clip.frame_rate = 10.0;
        clip.insert_curve(
            CurveBinding::new("Root", "posZ"),
            Curve::from_points(&[(0.0, 0.0), (2.0, 4.0)]),
        );
        clip.events = vec![
            AnimationEvent::new(0.25, "Left"),
            AnimationEvent::new(0.75, "Right"),
            AnimationEvent::new(1.25, "Left"),
        ];
        clip
    }

    fn names(session: &EventEditSession) -> Vec<String> {
        session
            .events()
            .map(|editable| editable.event.function_name.clone())
            .collect()
    }

    #[test]
    fn selection_survives_inserts_and_removals() {
        let mut session = EventEditSession::from_clip(&clip());
        let ids: Vec<EventId> = session.events().map(|editable| editable.id).collect();

        assert!(session.select(ids[2], false));
        assert_eq!(session.selected_indices(), vec![2]);

        session.remove(&[ids[0]]);
        assert_eq!(session.selected_indices(), vec![1]);
        assert!(session.is_selected(ids[2]));

        let added = session.add_event(AnimationEvent::new(1.0, "Jump"));
        assert_eq!(session.selection(), vec![added]);
        assert_eq!(session.selected_indices(), vec![2]);
        assert_eq!(session.index_of(ids[2]), Some(1));
    }

    #[test]
    fn toggle_selection() {
        let mut session = EventEditSession::from_clip(&clip());
        let ids: Vec<EventId> = session.events().map(|editable| editable.id).collect();
        session.select(ids[0], false);
        session.select(ids[2], true);
        assert_eq!(session.selected_indices(), vec![0, 2]);
        session.select(ids[0], true);
        assert_eq!(session.selected_indices(), vec![2]);
        session.select(ids[1], false);
        assert_eq!(session.selected_indices(), vec![1]);
        session.clear_selection();
        assert!(session.selected_indices().is_empty());
        assert_eq!(session.offset_selected(0.5), 0);
        assert!(!session.is_modified());
    }

    #[test]
    fn removed_ids_are_not_reused() {
        let mut session = EventEditSession::from_clip(&clip());
        let first = session.events().next().map(|editable| editable.id).expect("first");
        session.remove(&[first]);
        let added = session.add_event_at(0.0);
        assert_ne!(added, first);
        assert!(!session.select(first, false));
    }

    #[test]
    fn remove_selected_clears_selection() {
        let mut session = EventEditSession::from_clip(&clip());
        session.select_all();
        let ids = session.selection();
        session.select(ids[1], true);
        assert_eq!(session.remove_selected(), 2);
        assert_eq!(names(&session), vec!["Right"]);
        assert!(session.selection().is_empty());
        assert!(session.is_modified());
    }

    #[test]
    fn offsets_clamp_into_clip() {
        let mut session = EventEditSession::from_clip(&clip());
        session.select_all();
        session.offset_selected(1.0);
        let times: Vec<f32> = session.events().map(|e| e.event.time).collect();
        assert_eq!(times, vec![1.25, 1.75, 2.0]);

        session.set_selected_time(-3.0);
        assert!(session.events().all(|e| e.event.time == 0.0));

        session.set_selected_frame(5.0);
        assert!(session.events().all(|e| e.event.time == 0.5));
    }

    #[test]
    fn drag_uses_origin_and_snaps() {
        let mut session = EventEditSession::from_clip(&clip());
        let ids: Vec<EventId> = session.events().map(|editable| editable.id).collect();
        session.select(ids[1], false);
        session.begin_drag();
        session.drag_by(0.12);
        session.drag_by(0.21);
        let time = session.event(ids[1]).map(|e| e.time).expect("dragged event");
        assert!((time - 0.95).abs() < 1e-6);
        session.end_drag();

        session.set_snap(false);
        session.begin_drag();
        session.drag_by(-5.0);
        assert_eq!(session.event(ids[1]).map(|e| e.time), Some(0.0));
    }

    #[test]
    fn paste_rebases_to_insertion_time() {
        let mut session = EventEditSession::from_clip(&clip());
        let ids: Vec<EventId> = session.events().map(|editable| editable.id).collect();
        session.select(ids[1], false);
        session.select(ids[2], true);
        let clipboard = session.copy_selected();

        let pasted = session.paste(&clipboard, 0.5);
        assert_eq!(pasted.len(), 2);
        assert_eq!(session.selection(), pasted);
        assert_eq!(session.event(pasted[0]).map(|e| e.time), Some(0.5));
        assert_eq!(session.event(pasted[1]).map(|e| e.time), Some(1.0));
        assert_eq!(session.len(), 5);
    }

    #[test]
    fn paste_through_text_clipboard() {
        let mut session = EventEditSession::from_clip(&clip());
        session.select_all();
        let text = session.copy_selected().to_json();
        let clipboard = EventClipboard::from_json(&text).expect("clipboard");

        let preview = ManualPreviewTime::new(0.5);
        let pasted = session.paste_at_preview(&clipboard, &preview);
        let times: Vec<f32> = pasted
            .iter()
            .filter_map(|id| session.event(*id).map(|e| e.time))
            .collect();
        assert_eq!(times, vec![1.0, 1.5, 2.0]);
    }

    #[test]
    fn template_and_preview_drive_new_events() {
        let mut session = EventEditSession::from_clip(&clip())
            .with_template(Box::new(FunctionEventTemplate::new("AnimEventFunc")));
        let preview = ManualPreviewTime::new(0.25);
        let id = session.add_event_at_preview(&preview);
        let event = session.event(id).expect("added event");
        assert_eq!(event.function_name, "AnimEventFunc");
        assert_eq!(event.time, 0.5);
        assert!(session.template_applies(&clip()));
    }

    #[test]
    fn apply_normalize_and_revert() {
        let source = clip();
        let mut session = EventEditSession::from_clip(&source);
        session.select_all();
        session.edit_selected(|event| event.int_parameter = 3);
        assert!(session.is_modified());

        let normalized: Vec<f32> = session.normalized_events().iter().map(|e| e.time).collect();
        assert_eq!(normalized, vec![0.125, 0.375, 0.625]);

        let mut target = source.clone();
        session.apply_to(&mut target);
        assert!(!session.is_modified());
        assert!(target.events.iter().all(|event| event.int_parameter == 3));

        session.offset_selected(0.5);
        session.revert(&source);
        assert!(!session.is_modified());
        assert!(session.selection().is_empty());
        let times: Vec<f32> = session.events().map(|e| e.event.time).collect();
        assert_eq!(times, vec![0.25, 0.75, 1.25]);
    }
}

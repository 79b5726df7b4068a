//! Live-edit controller: wires a host input surface to the reconciliation
//! engine.
//!
//! The session owns the surface, the compiled mask, and the annotation tags
//! for the surface's current text. It receives the host's raw edit
//! notifications, reformats the buffer through the engine, writes the result
//! back, and fans change notifications out to registered listeners, but
//! only when the unmasked value actually changed.
//!
//! Re-entrancy is the one hazard: the session's own surface write can echo
//! back through the notification path. It is rejected structurally by the
//! `Reconciling` state, not by locking; everything here is single-threaded
//! and synchronous.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::buffer::MaskedBuffer;
use crate::engine::{self, Reconciled};
use crate::selection::Selection;
use crate::slot::{self, Slot};

/// Host text-input surface.
///
/// The session mutates the surface; a surface implementation must not call
/// back into the session from `replace` or `set_selection`.
pub trait EditSurface {
    /// Current surface text
    fn text(&self) -> String;

    /// Replace the whole surface buffer
    fn replace(&mut self, text: &str);

    /// Current selection in char offsets
    fn selection(&self) -> Selection;

    fn set_selection(&mut self, selection: Selection);

    /// Whether the surface shows hint text while empty
    fn has_hint(&self) -> bool;
}

/// External observer of buffer changes.
///
/// `before_change` and `on_change` mirror the host surface's raw
/// notifications and are always forwarded. `after_change` fires only when
/// the unmasked value differs from the value captured before the edit.
pub trait ChangeListener {
    fn before_change(&mut self, _text: &str, _start: usize, _removed: usize, _inserted: usize) {}
    fn on_change(&mut self, _text: &str, _start: usize, _removed: usize, _inserted: usize) {}
    fn after_change(&mut self, _text: &str) {}
}

/// Handle returned by [`EditSession::add_listener`], used for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Idle,
    Reconciling,
}

#[derive(Debug, Clone, Copy)]
struct EditRegion {
    start: usize,
    removed: usize,
    inserted: usize,
}

/// Controller for one masked input surface.
pub struct EditSession<S: EditSurface> {
    surface: S,
    mask: String,
    placeholder: char,
    slots: Vec<Slot>,
    /// Tags for the surface's current text; kept aligned with it at all times
    annotations: MaskedBuffer,
    state: SessionState,
    listeners: Vec<(ListenerId, Rc<RefCell<dyn ChangeListener>>)>,
    next_listener_id: usize,
    /// Unmasked value captured on `before_change`, compared after reconciling
    previous_unmasked: String,
    /// Length of the text as last rendered; drives the deletion short-circuit
    rendered_len: usize,
    pending_edit: Option<EditRegion>,
}

impl<S: EditSurface> EditSession<S> {
    /// Wrap a surface, compiling `mask` and formatting whatever text the
    /// surface already holds.
    pub fn new(surface: S, mask: &str, placeholder: char) -> Self {
        let initial = surface.text();
        let mut session = Self {
            surface,
            mask: mask.to_string(),
            placeholder,
            slots: slot::compile(mask),
            annotations: MaskedBuffer::untagged(&initial),
            state: SessionState::Idle,
            listeners: Vec::new(),
            next_listener_id: 0,
            previous_unmasked: String::new(),
            rendered_len: initial.chars().count(),
            pending_edit: None,
        };
        if !session.slots.is_empty() {
            session.set_text(&initial);
        }
        session
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access for host glue that applies edits directly
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// Change the mask pattern; forces a full reformat of the current buffer.
    pub fn set_mask(&mut self, mask: &str) {
        self.mask = mask.to_string();
        self.slots = slot::compile(mask);
        debug!(mask = %self.mask, "mask changed, reformatting");
        self.reformat();
    }

    pub fn placeholder(&self) -> char {
        self.placeholder
    }

    /// Change the placeholder character; forces a full reformat.
    pub fn set_placeholder(&mut self, placeholder: char) {
        self.placeholder = placeholder;
        debug!(%placeholder, "placeholder changed, reformatting");
        self.reformat();
    }

    /// The rendered text, scaffolding included
    pub fn raw_text(&self) -> String {
        self.surface.text()
    }

    /// The semantic value: user-input characters only
    pub fn unmasked_text(&self) -> String {
        self.annotations.unmasked_text()
    }

    /// Placeholders stripped, literals retained
    pub fn text_without_placeholders(&self) -> String {
        self.annotations.text_without_placeholders()
    }

    pub fn add_listener(&mut self, listener: Rc<RefCell<dyn ChangeListener>>) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, listener));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    /// Programmatic text replacement, dispatching the full
    /// before/on/after notification cycle like a host-initiated edit and
    /// always running a full reconciliation pass.
    pub fn set_text(&mut self, text: &str) {
        let old = self.surface.text();
        let removed = old.chars().count();
        let inserted = text.chars().count();
        self.before_change(&old, 0, removed, inserted);
        self.surface.replace(text);
        self.surface.set_selection(Selection::caret(inserted));
        self.text_changed(text, 0, removed, inserted);
        self.handle_after_change(true);
    }

    /// Host notification: an edit is about to replace `removed` chars at
    /// `start` with `inserted` new ones. Captures the pre-edit unmasked
    /// value and forwards the notification.
    pub fn before_change(&mut self, text: &str, start: usize, removed: usize, inserted: usize) {
        if self.state == SessionState::Reconciling {
            return;
        }
        self.previous_unmasked = self.unmasked_text();
        for listener in self.listener_snapshot() {
            listener
                .borrow_mut()
                .before_change(text, start, removed, inserted);
        }
    }

    /// Host notification: the edit has been applied to the surface text.
    /// Records the edit region and forwards the notification.
    pub fn text_changed(&mut self, text: &str, start: usize, removed: usize, inserted: usize) {
        if self.state == SessionState::Reconciling {
            trace!("re-entrant text_changed ignored");
            return;
        }
        self.pending_edit = Some(EditRegion {
            start,
            removed,
            inserted,
        });
        for listener in self.listener_snapshot() {
            listener
                .borrow_mut()
                .on_change(text, start, removed, inserted);
        }
    }

    /// Host notification: the edit cycle is complete. Runs reconciliation
    /// and notifies listeners if the unmasked value changed.
    pub fn after_change(&mut self) {
        self.handle_after_change(false);
    }

    fn handle_after_change(&mut self, forced: bool) {
        if self.state == SessionState::Reconciling {
            trace!("re-entrant after_change suppressed");
            return;
        }

        let text = self.surface.text();
        if self.slots.is_empty() {
            // Empty mask: raw text passes through unmodified and untagged.
            self.annotations = MaskedBuffer::untagged(&text);
            self.pending_edit = None;
            self.rendered_len = self.annotations.len();
            self.notify_after_if_changed();
            return;
        }

        self.state = SessionState::Reconciling;
        self.run_pass(&text, forced);
        self.state = SessionState::Idle;
        self.rendered_len = self.surface.text().chars().count();
        self.notify_after_if_changed();
    }

    fn run_pass(&mut self, text: &str, forced: bool) {
        let new_len = text.chars().count();
        let annotated = match self.pending_edit.take() {
            Some(edit) => self
                .annotations
                .splice(text, edit.start, edit.removed, edit.inserted),
            None if self.annotations.len() == new_len => self.annotations.clone(),
            None => MaskedBuffer::untagged(text),
        };

        // Deletions must not re-synthesize what the user just removed. When
        // the edit did not grow the text, keep the buffer as the host left
        // it and only fix up the cursor; the next growing edit or forced
        // reformat runs the full pass.
        if !forced && new_len <= self.rendered_len {
            debug!(new_len, rendered_len = self.rendered_len, "edit did not grow text, skipping re-match");
            let sel = self.surface.selection().clamp(annotated.len());
            self.surface.set_selection(sel);
            self.annotations = annotated;
            return;
        }

        let candidates = annotated.unmasked_text();
        if candidates.is_empty() && self.surface.has_hint() {
            // Don't paint a bare literal skeleton over the hint text.
            debug!("stripped buffer empty with hint present, clearing surface");
            self.surface.replace("");
            self.surface.set_selection(Selection::caret(0));
            self.annotations = MaskedBuffer::new();
            return;
        }

        let sel = self.surface.selection().clamp(annotated.len());
        let anchor_start = annotated.candidates_before(sel.start);
        let anchor_end = annotated.candidates_before(sel.end);

        let Reconciled { buffer, consumed } =
            engine::reconcile(&candidates, &self.slots, self.placeholder);
        trace!(consumed, slots = self.slots.len(), "reconcile pass complete");

        let mapped = engine::remap_selection(&buffer, anchor_start, anchor_end);
        self.surface.replace(&buffer.raw_text());
        self.surface.set_selection(mapped);
        self.annotations = buffer;
    }

    fn notify_after_if_changed(&mut self) {
        let unmasked = self.unmasked_text();
        if unmasked == self.previous_unmasked {
            trace!("unmasked value unchanged, after_change suppressed");
            return;
        }
        let text = self.surface.text();
        for listener in self.listener_snapshot() {
            listener.borrow_mut().after_change(&text);
        }
    }

    /// Re-run the full edit cycle against the current buffer as a no-op
    /// edit. Unlike [`set_text`](Self::set_text), the existing annotations
    /// are kept, so stale scaffolding is not mistaken for user input.
    fn reformat(&mut self) {
        let text = self.surface.text();
        let len = text.chars().count();
        if self.slots.is_empty() {
            self.annotations = MaskedBuffer::untagged(&text);
            self.rendered_len = len;
            return;
        }
        self.before_change(&text, 0, len, len);
        for listener in self.listener_snapshot() {
            listener.borrow_mut().on_change(&text, 0, len, len);
        }
        self.pending_edit = None;
        self.handle_after_change(true);
    }

    // Dispatch iterates a snapshot so listener registration changes made
    // between cycles never shift ordering mid-dispatch.
    fn listener_snapshot(&self) -> Vec<Rc<RefCell<dyn ChangeListener>>> {
        self.listeners.iter().map(|(_, l)| Rc::clone(l)).collect()
    }
}

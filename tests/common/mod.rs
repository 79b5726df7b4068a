//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use maskfield::{ChangeListener, EditSession, EditSurface, ListenerId, Selection};

/// In-memory host surface: plain text, a selection, and a hint flag.
#[derive(Debug, Clone, Default)]
pub struct MockSurface {
    pub text: String,
    pub selection: Selection,
    pub hint: bool,
}

impl MockSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_hint() -> Self {
        Self {
            hint: true,
            ..Self::default()
        }
    }
}

impl EditSurface for MockSurface {
    fn text(&self) -> String {
        self.text.clone()
    }

    fn replace(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    fn has_hint(&self) -> bool {
        self.hint
    }
}

/// Create a session over an empty surface
pub fn session(mask: &str, placeholder: char) -> EditSession<MockSurface> {
    EditSession::new(MockSurface::new(), mask, placeholder)
}

/// Create a session over an empty surface that shows hint text
pub fn session_with_hint(mask: &str, placeholder: char) -> EditSession<MockSurface> {
    EditSession::new(MockSurface::with_hint(), mask, placeholder)
}

/// Simulate the host applying one typed character at the current selection,
/// dispatching the full before/on/after notification cycle.
pub fn type_char(session: &mut EditSession<MockSurface>, ch: char) {
    let old = session.raw_text();
    let len = old.chars().count();
    let sel = session.surface().selection().clamp(len);
    let chars: Vec<char> = old.chars().collect();

    let mut new: String = chars[..sel.start].iter().collect();
    new.push(ch);
    new.extend(chars[sel.end..].iter());

    let removed = sel.len();
    session.before_change(&old, sel.start, removed, 1);
    let surface = session.surface_mut();
    surface.replace(&new);
    surface.set_selection(Selection::caret(sel.start + 1));
    session.text_changed(&new, sel.start, removed, 1);
    session.after_change();
}

/// Type a string one keystroke at a time
pub fn type_str(session: &mut EditSession<MockSurface>, text: &str) {
    for ch in text.chars() {
        type_char(session, ch);
    }
}

/// Simulate a backspace keystroke: deletes the selection, or the character
/// before the caret.
pub fn backspace(session: &mut EditSession<MockSurface>) {
    let old = session.raw_text();
    let len = old.chars().count();
    let sel = session.surface().selection().clamp(len);

    let (start, removed) = if sel.is_caret() {
        if sel.start == 0 {
            return;
        }
        (sel.start - 1, 1)
    } else {
        (sel.start, sel.len())
    };

    let chars: Vec<char> = old.chars().collect();
    let mut new: String = chars[..start].iter().collect();
    new.extend(chars[start + removed..].iter());

    session.before_change(&old, start, removed, 0);
    let surface = session.surface_mut();
    surface.replace(&new);
    surface.set_selection(Selection::caret(start));
    session.text_changed(&new, start, removed, 0);
    session.after_change();
}

/// Simulate pasting `text` over the current selection in one edit
pub fn paste(session: &mut EditSession<MockSurface>, text: &str) {
    let old = session.raw_text();
    let len = old.chars().count();
    let sel = session.surface().selection().clamp(len);
    let chars: Vec<char> = old.chars().collect();

    let mut new: String = chars[..sel.start].iter().collect();
    new.push_str(text);
    new.extend(chars[sel.end..].iter());

    let removed = sel.len();
    let inserted = text.chars().count();
    session.before_change(&old, sel.start, removed, inserted);
    let surface = session.surface_mut();
    surface.replace(&new);
    surface.set_selection(Selection::caret(sel.start + inserted));
    session.text_changed(&new, sel.start, removed, inserted);
    session.after_change();
}

/// Set the surface selection directly, as a host click/drag would
pub fn select(session: &mut EditSession<MockSurface>, start: usize, end: usize) {
    session.surface_mut().set_selection(Selection::new(start, end));
}

/// One recorded listener notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Before {
        text: String,
        start: usize,
        removed: usize,
        inserted: usize,
    },
    On {
        text: String,
        start: usize,
        removed: usize,
        inserted: usize,
    },
    After {
        text: String,
    },
}

/// Listener that records every notification it receives
#[derive(Debug, Default)]
pub struct RecordingListener {
    pub events: Vec<Event>,
}

impl RecordingListener {
    pub fn after_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::After { .. }))
            .count()
    }
}

impl ChangeListener for RecordingListener {
    fn before_change(&mut self, text: &str, start: usize, removed: usize, inserted: usize) {
        self.events.push(Event::Before {
            text: text.to_string(),
            start,
            removed,
            inserted,
        });
    }

    fn on_change(&mut self, text: &str, start: usize, removed: usize, inserted: usize) {
        self.events.push(Event::On {
            text: text.to_string(),
            start,
            removed,
            inserted,
        });
    }

    fn after_change(&mut self, text: &str) {
        self.events.push(Event::After {
            text: text.to_string(),
        });
    }
}

/// Register a fresh recording listener on the session
pub fn recording_listener(
    session: &mut EditSession<MockSurface>,
) -> (ListenerId, Rc<RefCell<RecordingListener>>) {
    let listener = Rc::new(RefCell::new(RecordingListener::default()));
    let id = session.add_listener(listener.clone());
    (id, listener)
}

/// Listener that appends "<name>:<phase>" entries to a shared log, for
/// asserting dispatch order across multiple listeners.
pub struct NamedListener {
    pub name: &'static str,
    pub log: Rc<RefCell<Vec<String>>>,
}

impl ChangeListener for NamedListener {
    fn before_change(&mut self, _text: &str, _start: usize, _removed: usize, _inserted: usize) {
        self.log.borrow_mut().push(format!("{}:before", self.name));
    }

    fn on_change(&mut self, _text: &str, _start: usize, _removed: usize, _inserted: usize) {
        self.log.borrow_mut().push(format!("{}:on", self.name));
    }

    fn after_change(&mut self, _text: &str) {
        self.log.borrow_mut().push(format!("{}:after", self.name));
    }
}

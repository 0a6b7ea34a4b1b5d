//! In-memory host
//!
//! Keeps registrations in a table instead of the DOM, so session wiring and
//! teardown can be driven and inspected without a browser.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::host::{EventKind, Handler, Host, HostEvent, Target};
use crate::error::SessionError;

/// A live registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Listener { target: Target, kind: EventKind },
    Interval { period_ms: i32 },
}

enum Callback {
    Listener(Handler),
    Interval(Box<dyn FnMut()>),
}

struct Entry {
    registration: Registration,
    /// Taken out while it runs
    callback: Option<Callback>,
}

#[derive(Default)]
struct Table {
    next_id: u64,
    entries: BTreeMap<u64, Entry>,
}

/// Host backed by a registration table
pub struct RecordingHost {
    table: Rc<RefCell<Table>>,
    buttons: bool,
    fail_at: Option<usize>,
    attempts: Cell<usize>,
    pause_label: Rc<Cell<Option<bool>>>,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingHost {
    /// Window and canvas only
    pub fn new() -> Self {
        Self {
            table: Rc::default(),
            buttons: false,
            fail_at: None,
            attempts: Cell::new(0),
            pause_label: Rc::default(),
        }
    }

    /// Window, canvas, pause and reset buttons
    pub fn with_buttons() -> Self {
        Self {
            buttons: true,
            ..Self::new()
        }
    }

    /// Refuse the `n`th registration attempt (0-based)
    pub fn failing_at(mut self, n: usize) -> Self {
        self.fail_at = Some(n);
        self
    }

    pub fn live(&self) -> Vec<Registration> {
        self.table
            .borrow()
            .entries
            .values()
            .map(|e| e.registration)
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.table.borrow().entries.len()
    }

    /// Last label the pause button was given
    pub fn shown_pause_label(&self) -> Option<bool> {
        self.pause_label.get()
    }

    /// Deliver `event` to every listener on `target` for `kind`; returns how many ran
    pub fn fire(&self, target: Target, kind: EventKind, event: HostEvent) -> usize {
        let wanted = Registration::Listener { target, kind };
        let ids = self.ids_matching(|r| r == wanted);
        let mut ran = 0;
        for id in ids {
            let callback = self.take(id);
            if let Some(Callback::Listener(mut handler)) = callback {
                handler(event.clone());
                ran += 1;
                self.put_back(id, Callback::Listener(handler));
            }
        }
        ran
    }

    /// Fire every live interval once; returns how many ran
    pub fn run_intervals(&self) -> usize {
        let ids = self.ids_matching(|r| matches!(r, Registration::Interval { .. }));
        let mut ran = 0;
        for id in ids {
            if let Some(Callback::Interval(mut tick)) = self.take(id) {
                tick();
                ran += 1;
                self.put_back(id, Callback::Interval(tick));
            }
        }
        ran
    }

    fn ids_matching(&self, f: impl Fn(Registration) -> bool) -> Vec<u64> {
        self.table
            .borrow()
            .entries
            .iter()
            .filter(|(_, e)| f(e.registration))
            .map(|(id, _)| *id)
            .collect()
    }

    fn take(&self, id: u64) -> Option<Callback> {
        self.table
            .borrow_mut()
            .entries
            .get_mut(&id)
            .and_then(|e| e.callback.take())
    }

    /// Restore a callback unless its registration was dropped while it ran
    fn put_back(&self, id: u64, callback: Callback) {
        let mut table = self.table.borrow_mut();
        if let Some(entry) = table.entries.get_mut(&id) {
            entry.callback = Some(callback);
            return;
        }
        drop(table);
        drop(callback);
    }

    fn register(
        &self,
        registration: Registration,
        callback: Callback,
    ) -> Result<RecordingGuard, SessionError> {
        let attempt = self.attempts.get();
        self.attempts.set(attempt + 1);
        if self.fail_at == Some(attempt) {
            return Err(SessionError::Js(format!(
                "registration {} refused: {:?}",
                attempt, registration
            )));
        }

        let mut table = self.table.borrow_mut();
        let id = table.next_id;
        table.next_id += 1;
        table.entries.insert(
            id,
            Entry {
                registration,
                callback: Some(callback),
            },
        );
        Ok(RecordingGuard {
            table: self.table.clone(),
            id,
        })
    }
}

impl Host for RecordingHost {
    type Guard = RecordingGuard;

    fn has_target(&self, target: Target) -> bool {
        match target {
            Target::Window | Target::Canvas => true,
            Target::PauseButton | Target::ResetButton => self.buttons,
        }
    }

    fn listen(
        &self,
        target: Target,
        kind: EventKind,
        handler: Handler,
    ) -> Result<RecordingGuard, SessionError> {
        if !self.has_target(target) {
            return Err(SessionError::MissingElement(format!("{:?}", target)));
        }
        self.register(
            Registration::Listener { target, kind },
            Callback::Listener(handler),
        )
    }

    fn every(&self, period_ms: i32, tick: Box<dyn FnMut()>) -> Result<RecordingGuard, SessionError> {
        self.register(
            Registration::Interval { period_ms },
            Callback::Interval(tick),
        )
    }

    fn pause_label(&self) -> Box<dyn Fn(bool)> {
        let shown = self.pause_label.clone();
        Box::new(move |paused| shown.set(Some(paused)))
    }
}

/// Removes its table entry on drop
pub struct RecordingGuard {
    table: Rc<RefCell<Table>>,
    id: u64,
}

impl Drop for RecordingGuard {
    fn drop(&mut self) {
        let removed = self.table.borrow_mut().entries.remove(&self.id);
        // Callback captures are released outside the table borrow
        drop(removed);
    }
}

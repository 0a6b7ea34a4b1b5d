//! Session wiring
//!
//! Registers the tick timer and every input callback through a [`Host`].
//! Each registration comes back as a guard that undoes it on drop, so
//! dropping the returned guards (or bailing out of [`wire`] halfway) leaves
//! nothing registered.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::SessionError;
use crate::renderer::Surface;
use crate::session::Session;

/// Where a listener attaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Canvas,
    PauseButton,
    ResetButton,
}

/// Which platform event a listener wants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    TouchMove,
    /// Pointer moved with a button held (non-touch pointers)
    PointerDrag,
    Click,
    PageHide,
}

/// A platform event after the host has decoded it
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Key(String),
    /// First contact point's client x (`None`: no contact) and the surface's left offset
    Drag {
        client_x: Option<f32>,
        surface_left: f32,
    },
    Click,
    /// `persisted` is set when the page goes into the back-forward cache
    PageHide { persisted: bool },
}

pub type Handler = Box<dyn FnMut(HostEvent)>;

/// Registers callbacks with the platform
pub trait Host {
    /// Undoes its registration on drop
    type Guard;

    /// Whether an optional target (the buttons) exists
    fn has_target(&self, target: Target) -> bool;

    fn listen(
        &self,
        target: Target,
        kind: EventKind,
        handler: Handler,
    ) -> Result<Self::Guard, SessionError>;

    fn every(&self, period_ms: i32, tick: Box<dyn FnMut()>) -> Result<Self::Guard, SessionError>;

    /// Callback that shows the pause button's label for a pause state
    fn pause_label(&self) -> Box<dyn Fn(bool)>;
}

/// Run `f` on the session unless another callback still holds it
pub(crate) fn with_session(
    session: &RefCell<Session>,
    what: &str,
    f: impl FnOnce(&mut Session),
) -> bool {
    match session.try_borrow_mut() {
        Ok(mut session) => {
            f(&mut session);
            true
        }
        Err(_) => {
            log::warn!("{} skipped: session busy", what);
            false
        }
    }
}

/// Register the timer and all listeners for `session`
///
/// `on_leave` runs when the page is hidden for good (not cached).
pub fn wire<H, S>(
    host: &H,
    session: &Rc<RefCell<Session>>,
    mut surface: S,
    on_leave: Rc<dyn Fn()>,
) -> Result<Vec<H::Guard>, SessionError>
where
    H: Host,
    S: Surface + 'static,
{
    let mut guards = Vec::new();
    let (period_ms, paused) = {
        let session = session.borrow();
        (session.settings().tick_interval_ms, session.is_paused())
    };

    // Tick loop
    {
        let session = session.clone();
        guards.push(host.every(
            period_ms,
            Box::new(move || {
                with_session(&session, "Tick", |s| {
                    s.tick(&mut surface);
                });
            }),
        )?);
    }

    // Keyboard
    {
        let session = session.clone();
        guards.push(host.listen(
            Target::Window,
            EventKind::KeyDown,
            Box::new(move |event| {
                if let HostEvent::Key(key) = event {
                    with_session(&session, "Key", |s| {
                        s.handle_key(&key);
                    });
                }
            }),
        )?);
    }

    // Touch and pointer drag
    for kind in [EventKind::TouchMove, EventKind::PointerDrag] {
        let session = session.clone();
        guards.push(host.listen(
            Target::Canvas,
            kind,
            Box::new(move |event| {
                if let HostEvent::Drag {
                    client_x,
                    surface_left,
                } = event
                {
                    with_session(&session, "Drag", |s| {
                        s.handle_drag(client_x, surface_left);
                    });
                }
            }),
        )?);
    }

    // Pause/resume button
    let label = host.pause_label();
    label(paused);
    if host.has_target(Target::PauseButton) {
        let session = session.clone();
        guards.push(host.listen(
            Target::PauseButton,
            EventKind::Click,
            Box::new(move |_event| {
                with_session(&session, "Pause toggle", |s| label(s.toggle_pause()));
            }),
        )?);
    }

    // Optional reset button
    if host.has_target(Target::ResetButton) {
        let session = session.clone();
        guards.push(host.listen(
            Target::ResetButton,
            EventKind::Click,
            Box::new(move |_event| {
                with_session(&session, "Reset", Session::reset);
            }),
        )?);
    }

    // Leaving the page; a cached page keeps its session for when it comes back
    guards.push(host.listen(
        Target::Window,
        EventKind::PageHide,
        Box::new(move |event| match event {
            HostEvent::PageHide { persisted: false } => on_leave(),
            HostEvent::PageHide { persisted: true } => {
                log::info!("Page cached, keeping session");
            }
            _ => {}
        }),
    )?);

    Ok(guards)
}

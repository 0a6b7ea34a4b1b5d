//! Browser session: canvas, timer, input listeners, pause button
//!
//! One session is mounted at a time. It lives in a thread-local slot until
//! `unmount` (or leaving the page for good) drops it, which removes every
//! registration.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, Event, EventTarget, HtmlCanvasElement, KeyboardEvent, PageTransitionEvent,
    PointerEvent, TouchEvent, Window,
};

use super::host::{EventKind, Handler, Host, HostEvent, Target, wire, with_session};
use super::listeners::{EventListener, Interval};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::error::SessionError;
use crate::renderer::CanvasSurface;
use crate::session::Session;
use crate::settings::Settings;

thread_local! {
    static ACTIVE: RefCell<Option<WebSession>> = const { RefCell::new(None) };
}

/// A browser registration of either kind
pub enum WebGuard {
    Listener(EventListener),
    Interval(Interval),
}

type Decoder = fn(&Event, &HtmlCanvasElement) -> Option<HostEvent>;

/// The DOM as a [`Host`]
struct WebHost {
    window: Window,
    canvas: HtmlCanvasElement,
    pause_button: Option<Element>,
    reset_button: Option<Element>,
}

impl WebHost {
    fn target(&self, target: Target) -> Option<EventTarget> {
        match target {
            Target::Window => Some(self.window.clone().into()),
            Target::Canvas => Some(self.canvas.clone().into()),
            Target::PauseButton => self.pause_button.clone().map(Into::into),
            Target::ResetButton => self.reset_button.clone().map(Into::into),
        }
    }
}

impl Host for WebHost {
    type Guard = WebGuard;

    fn has_target(&self, target: Target) -> bool {
        self.target(target).is_some()
    }

    fn listen(
        &self,
        target: Target,
        kind: EventKind,
        mut handler: Handler,
    ) -> Result<WebGuard, SessionError> {
        let element = self
            .target(target)
            .ok_or_else(|| SessionError::MissingElement(format!("{:?}", target)))?;
        let event_type = match kind {
            EventKind::KeyDown => "keydown",
            EventKind::TouchMove => "touchmove",
            EventKind::PointerDrag => "pointermove",
            EventKind::Click => "click",
            EventKind::PageHide => "pagehide",
        };
        let decode: Decoder = match kind {
            EventKind::KeyDown => decode_key,
            EventKind::TouchMove => decode_touch,
            EventKind::PointerDrag => decode_pointer,
            EventKind::Click => decode_click,
            EventKind::PageHide => decode_page_hide,
        };
        let canvas = self.canvas.clone();
        let listener = EventListener::new(&element, event_type, move |event| {
            if let Some(decoded) = decode(&event, &canvas) {
                handler(decoded);
            }
        })?;
        Ok(WebGuard::Listener(listener))
    }

    fn every(&self, period_ms: i32, tick: Box<dyn FnMut()>) -> Result<WebGuard, SessionError> {
        Ok(WebGuard::Interval(Interval::new(&self.window, period_ms, tick)?))
    }

    fn pause_label(&self) -> Box<dyn Fn(bool)> {
        let button = self.pause_button.clone();
        Box::new(move |paused| update_pause_label(button.as_ref(), paused))
    }
}

/// Horizontal offset of the canvas in client coordinates
///
/// Uses the bounding rect rather than `offsetLeft` so the value matches
/// `clientX` under page scrolling and transformed ancestors.
fn surface_left(canvas: &HtmlCanvasElement) -> f32 {
    canvas.get_bounding_client_rect().left() as f32
}

fn decode_key(event: &Event, _canvas: &HtmlCanvasElement) -> Option<HostEvent> {
    event
        .dyn_ref::<KeyboardEvent>()
        .map(|event| HostEvent::Key(event.key()))
}

fn decode_touch(event: &Event, canvas: &HtmlCanvasElement) -> Option<HostEvent> {
    let event = event.dyn_ref::<TouchEvent>()?;
    event.prevent_default();
    Some(HostEvent::Drag {
        client_x: event.touches().get(0).map(|t| t.client_x() as f32),
        surface_left: surface_left(canvas),
    })
}

// Touch pointers are covered by touchmove
fn decode_pointer(event: &Event, canvas: &HtmlCanvasElement) -> Option<HostEvent> {
    let event = event.dyn_ref::<PointerEvent>()?;
    if event.buttons() == 0 || event.pointer_type() == "touch" {
        return None;
    }
    Some(HostEvent::Drag {
        client_x: Some(event.client_x() as f32),
        surface_left: surface_left(canvas),
    })
}

fn decode_click(_event: &Event, _canvas: &HtmlCanvasElement) -> Option<HostEvent> {
    Some(HostEvent::Click)
}

fn decode_page_hide(event: &Event, _canvas: &HtmlCanvasElement) -> Option<HostEvent> {
    event
        .dyn_ref::<PageTransitionEvent>()
        .map(|event| HostEvent::PageHide {
            persisted: event.persisted(),
        })
}

/// A mounted game. Dropping it tears the session down.
pub struct WebSession {
    session: Rc<RefCell<Session>>,
    pause_label: Box<dyn Fn(bool)>,
    _guards: Vec<WebGuard>,
}

impl WebSession {
    /// Attach to the canvas with id `canvas_id` and start ticking
    pub fn mount(canvas_id: &str) -> Result<Self, SessionError> {
        let window = web_sys::window().ok_or(SessionError::NoWindow)?;
        let document = window.document().ok_or(SessionError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| SessionError::MissingElement(canvas_id.to_owned()))?
            .dyn_into()
            .map_err(|_| SessionError::MissingElement(canvas_id.to_owned()))?;
        canvas.set_width(FIELD_WIDTH as u32);
        canvas.set_height(FIELD_HEIGHT as u32);

        let settings = Settings::from_optional_json(canvas.get_attribute("data-settings").as_deref());
        let period_ms = settings.tick_interval_ms;
        let session = Rc::new(RefCell::new(Session::new(settings)));

        let surface = CanvasSurface::new(&canvas)?;
        let host = WebHost {
            window,
            canvas,
            pause_button: document.get_element_by_id("pause-btn"),
            reset_button: document.get_element_by_id("reset-btn"),
        };

        // The drop must happen outside the pagehide callback
        let on_leave: Rc<dyn Fn()> = Rc::new(|| {
            wasm_bindgen_futures::spawn_local(async {
                unmount();
            });
        });
        let guards = wire(&host, &session, surface, on_leave)?;

        log::info!(
            "Session mounted on #{} ({} ms tick, {} registrations)",
            canvas_id,
            period_ms,
            guards.len()
        );

        Ok(Self {
            session,
            pause_label: host.pause_label(),
            _guards: guards,
        })
    }

    pub fn toggle_pause(&self) {
        with_session(&self.session, "Pause toggle", |s| {
            (self.pause_label)(s.toggle_pause())
        });
    }

    pub fn reset(&self) {
        with_session(&self.session, "Reset", Session::reset);
    }
}

impl Drop for WebSession {
    fn drop(&mut self) {
        log::info!("Session torn down");
    }
}

fn update_pause_label(button: Option<&Element>, paused: bool) {
    if let Some(button) = button {
        button.set_text_content(Some(if paused { "Resume" } else { "Pause" }));
    }
}

/// Mount a session on `canvas_id`, replacing any mounted one
pub fn start(canvas_id: &str) -> Result<(), SessionError> {
    unmount();
    let web_session = WebSession::mount(canvas_id)?;
    ACTIVE.with(|active| *active.borrow_mut() = Some(web_session));
    Ok(())
}

/// Tear down the mounted session, if any
#[wasm_bindgen]
pub fn unmount() {
    let taken = ACTIVE.with(|active| active.borrow_mut().take());
    drop(taken);
}

/// Restart the mounted match
#[wasm_bindgen]
pub fn reset() {
    ACTIVE.with(|active| {
        if let Some(web_session) = active.borrow().as_ref() {
            web_session.reset();
        }
    });
}

/// Pause or resume the mounted match
#[wasm_bindgen]
pub fn toggle_pause() {
    ACTIVE.with(|active| {
        if let Some(web_session) = active.borrow().as_ref() {
            web_session.toggle_pause();
        }
    });
}

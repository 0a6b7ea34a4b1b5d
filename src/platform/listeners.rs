//! Scoped browser registrations
//!
//! Each guard owns its JS closure and undoes the registration on drop, so a
//! dropped session leaves no callbacks behind.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, Window};

use crate::error::SessionError;

/// An `addEventListener` registration, removed on drop
pub struct EventListener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, f: F) -> Result<Self, SessionError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let function: &js_sys::Function = self.callback.as_ref().unchecked_ref();
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event_type, function)
        {
            log::warn!("Failed to remove {} listener: {:?}", self.event_type, e);
        }
    }
}

/// A `setInterval` timer, cleared on drop
pub struct Interval {
    window: Window,
    handle: i32,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new<F>(window: &Window, period_ms: i32, f: F) -> Result<Self, SessionError>
    where
        F: FnMut() + 'static,
    {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        let handle =
            window.set_interval_with_callback_and_timeout_and_arguments_0(function, period_ms)?;
        Ok(Self {
            window: window.clone(),
            handle,
            _callback: callback,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.handle);
    }
}

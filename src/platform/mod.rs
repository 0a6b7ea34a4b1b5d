//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - The tick timer (setInterval on web, a plain loop natively)
//! - Input events and the pause button
//! - Teardown of every registration
//!
//! [`host::wire`] does the registering against any [`host::Host`]; the DOM
//! and [`recording::RecordingHost`] are the two implementations.

pub mod headless;
pub mod host;
#[cfg(target_arch = "wasm32")]
pub mod listeners;
pub mod recording;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use host::{EventKind, Host, HostEvent, Target, wire};
pub use recording::RecordingHost;
#[cfg(target_arch = "wasm32")]
pub use web::{WebSession, start, unmount};

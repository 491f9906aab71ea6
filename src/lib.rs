//! Multi-seat host for the tsuzuri input method.
//!
//! The protocol layer owns one [`Host`] and feeds it compositor events per
//! seat. The host drives each seat's state machine, applies the resulting
//! [`KeyResponse`](tsuzuri_session::KeyResponse) through the collaborator
//! traits, and keeps the repeat timers of all seats in one queue.

pub mod config;
pub mod control;
pub mod host;
pub mod timer;
mod trace_init;

pub use config::ConfigError;
pub use control::{ControlError, ControlReply, ControlRequest, ControlServer};
pub use host::{CompositorSession, EngineFactory, Host, SeatId, VirtualKeyboard};
pub use timer::TimerQueue;
pub use trace_init::init_tracing;

pub use tsuzuri_core as core;
pub use tsuzuri_session as session;

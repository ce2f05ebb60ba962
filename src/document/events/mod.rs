//! # Events Module
//!
//! Notification primitives and event payloads for the document core.

pub mod readiness;
pub mod signal;
pub mod types;

pub use readiness::{ReadyError, ReadySignal, ReadyWaiter};
pub use signal::{Signal, SlotId};
pub use types::{SaveState, StateAttribute, StateChange, UiEvent};

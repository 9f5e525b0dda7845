//! # Pagewire Core
//!
//! Core types for Pagewire: the widget event bus, one-time events, the event
//! catalog and the shared error types.

pub mod error;
pub mod event_bus;

pub use error::{Error, EventBusError, Result};

pub use event_bus::{
    DispatchPolicy, DynamicHandler, Event, EventBus, EventBusConfig, Handler, OneTimeEvent,
    OneTimeState, Untyped, UnknownOneTimeEvent,
};

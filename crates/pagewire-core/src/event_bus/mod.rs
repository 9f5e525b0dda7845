//! # Event Bus Module
//!
//! Provides a typed event bus for decoupled communication between UI widgets.
//!
//! ## Overview
//!
//! - Widgets emit typed events without knowing who listens
//! - Each event name is bound to one argument type at compile time
//! - Handlers run synchronously, in registration order
//! - One-time events expose a future that every waiter can await, before or
//!   after the event completes
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagewire_core::event_bus::{catalog::Ply, EventBus, OneTimeEvent};
//!
//! let bus = EventBus::new();
//! let handler = bus.subscribe::<Ply, _>(|(ply, mainline)| {
//!     println!("ply {ply} (mainline: {mainline:?})");
//! });
//! bus.emit::<Ply>((7, Some(true)))?;
//! bus.off(&handler);
//!
//! let connected = bus.after(OneTimeEvent::SocketHasConnected);
//! bus.complete(OneTimeEvent::SocketHasConnected, serde_json::Value::Null);
//! connected.await?;
//! ```

mod bus;
pub mod catalog;
mod handler;
mod one_time;

pub use bus::*;
pub use handler::{DynamicHandler, Event, Handler, Untyped};
pub use one_time::{OneTimeEvent, OneTimeState, UnknownOneTimeEvent};

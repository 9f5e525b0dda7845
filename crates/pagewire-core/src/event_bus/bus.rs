//! Event Bus implementation.
//!
//! Provides the core EventBus struct. There is no global instance: create
//! one bus at startup and hand an `Arc<EventBus>` to the widgets that need it.

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, trace, warn};

use super::handler::{DynamicHandler, Event, Handler, Subscribers, Untyped};
use super::one_time::{OneTimeEvent, OneTimeRegistry, OneTimeState};
use crate::error::EventBusError;

/// What `emit` does when a handler fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchPolicy {
    /// Stop at the first failing handler and return its error.
    #[default]
    Propagate,
    /// Log the failure and keep dispatching to the remaining handlers.
    Isolate,
}

/// Configuration for the event bus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventBusConfig {
    /// Handler failure policy.
    pub dispatch_policy: DispatchPolicy,
}

type TypedRegistry = HashMap<TypeId, Box<dyn Any + Send + Sync>>;

/// Central event bus for widget-to-widget communication
///
/// Handlers run synchronously on the emitting thread. No lock is held while
/// a handler runs, so handlers may subscribe, unsubscribe and emit freely;
/// such changes take effect from the next `emit`.
pub struct EventBus {
    /// Typed subscribers, one `Subscribers<E>` per event type
    subscriptions: RwLock<TypedRegistry>,
    /// Subscribers of untyped events, keyed by runtime name
    dynamic: RwLock<HashMap<String, Subscribers<Untyped>>>,
    /// One-time events
    one_time: OneTimeRegistry,
    /// Configuration
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            dynamic: RwLock::new(HashMap::new()),
            one_time: OneTimeRegistry::default(),
            config,
        }
    }

    /// Register `handler` for event `E`
    ///
    /// Registering a handler that is already present has no effect.
    pub fn on<E: Event>(&self, handler: &Handler<E>) {
        let mut subscriptions = self.subscriptions.write();
        let entry = subscriptions
            .entry(TypeId::of::<E>())
            .or_insert_with(|| Box::new(Subscribers::<E>::default()));
        if let Some(subscribers) = entry.downcast_mut::<Subscribers<E>>() {
            if subscribers.insert(handler) {
                debug!(event = E::NAME, "Handler added");
            } else {
                trace!(event = E::NAME, "Handler already registered");
            }
        }
    }

    /// Wrap `callback` in a handler, register it and return the handle
    pub fn subscribe<E, F>(&self, callback: F) -> Handler<E>
    where
        E: Event,
        F: Fn(&E::Args) + Send + Sync + 'static,
    {
        let handler = Handler::new(callback);
        self.on(&handler);
        handler
    }

    /// Remove `handler` from event `E`; unknown handlers are ignored
    pub fn off<E: Event>(&self, handler: &Handler<E>) {
        let mut subscriptions = self.subscriptions.write();
        let Some(entry) = subscriptions.get_mut(&TypeId::of::<E>()) else {
            return;
        };
        let Some(subscribers) = entry.downcast_mut::<Subscribers<E>>() else {
            return;
        };
        if subscribers.remove(handler) {
            debug!(event = E::NAME, "Handler removed");
        }
        if subscribers.is_empty() {
            subscriptions.remove(&TypeId::of::<E>());
        }
    }

    /// Invoke every handler registered for `E` with `args`
    ///
    /// Returns the number of handlers that completed successfully. See
    /// [`DispatchPolicy`] for what happens when one fails.
    pub fn emit<E: Event>(&self, args: E::Args) -> Result<usize, EventBusError> {
        let handlers = self.snapshot::<E>();
        self.dispatch(E::NAME, &handlers, &args)
    }

    /// Deserialize `payload` into `E::Args` and emit it
    ///
    /// A payload of the wrong shape is rejected before any handler runs.
    pub fn emit_json<E>(&self, payload: Value) -> Result<usize, EventBusError>
    where
        E: Event,
        E::Args: DeserializeOwned,
    {
        let args = serde_json::from_value(payload).map_err(|source| EventBusError::Payload {
            event: E::NAME.to_string(),
            source,
        })?;
        self.emit::<E>(args)
    }

    /// Get the number of handlers registered for `E`
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscriptions
            .read()
            .get(&TypeId::of::<E>())
            .and_then(|entry| entry.downcast_ref::<Subscribers<E>>())
            .map_or(0, Subscribers::len)
    }

    /// Register a handler for the untyped event `name`
    pub fn on_dynamic(&self, name: impl Into<String>, handler: &DynamicHandler) {
        let name = name.into();
        let mut dynamic = self.dynamic.write();
        if dynamic.entry(name.clone()).or_default().insert(handler) {
            debug!(event = %name, "Dynamic handler added");
        }
    }

    /// Remove a handler from the untyped event `name`
    pub fn off_dynamic(&self, name: &str, handler: &DynamicHandler) {
        let mut dynamic = self.dynamic.write();
        let Some(subscribers) = dynamic.get_mut(name) else {
            return;
        };
        if subscribers.remove(handler) {
            debug!(event = name, "Dynamic handler removed");
        }
        if subscribers.is_empty() {
            dynamic.remove(name);
        }
    }

    /// Invoke every handler registered for the untyped event `name`
    pub fn emit_dynamic(&self, name: &str, payload: &Value) -> Result<usize, EventBusError> {
        let handlers = self
            .dynamic
            .read()
            .get(name)
            .map(Subscribers::snapshot)
            .unwrap_or_default();
        self.dispatch(name, &handlers, payload)
    }

    /// Get the number of handlers registered for the untyped event `name`
    pub fn dynamic_subscriber_count(&self, name: &str) -> usize {
        self.dynamic.read().get(name).map_or(0, Subscribers::len)
    }

    /// Wait for a one-time event
    ///
    /// Resolves immediately if the event already completed. Every waiter of
    /// the same event receives the value of the first completion.
    pub fn after(
        &self,
        event: OneTimeEvent,
    ) -> impl Future<Output = Result<Value, EventBusError>> + Send + 'static {
        self.one_time.after(event)
    }

    /// Wait for a one-time event and deserialize its payload
    pub fn after_as<T>(
        &self,
        event: OneTimeEvent,
    ) -> impl Future<Output = Result<T, EventBusError>> + Send + 'static
    where
        T: DeserializeOwned + Send + 'static,
    {
        let wait = self.one_time.after(event);
        async move {
            let value = wait.await?;
            serde_json::from_value(value).map_err(|source| EventBusError::Payload {
                event: event.to_string(),
                source,
            })
        }
    }

    /// Complete a one-time event with `value`
    ///
    /// Use `Value::Null` for events without payload. Only the first call has
    /// an effect; returns whether this call completed the event.
    pub fn complete(&self, event: OneTimeEvent, value: Value) -> bool {
        self.one_time.complete(event, value)
    }

    /// Serialize `value` and complete a one-time event with it
    pub fn complete_with<T: Serialize>(
        &self,
        event: OneTimeEvent,
        value: &T,
    ) -> Result<bool, EventBusError> {
        let value = serde_json::to_value(value).map_err(|source| EventBusError::Payload {
            event: event.to_string(),
            source,
        })?;
        Ok(self.complete(event, value))
    }

    /// Check if a one-time event has completed
    pub fn past(&self, event: OneTimeEvent) -> bool {
        self.state(event) == OneTimeState::Completed
    }

    /// Get the lifecycle state of a one-time event
    pub fn state(&self, event: OneTimeEvent) -> OneTimeState {
        self.one_time.state(event)
    }

    /// Get the current configuration
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    fn snapshot<E: Event>(&self) -> Vec<Handler<E>> {
        self.subscriptions
            .read()
            .get(&TypeId::of::<E>())
            .and_then(|entry| entry.downcast_ref::<Subscribers<E>>())
            .map(Subscribers::snapshot)
            .unwrap_or_default()
    }

    fn dispatch<E: Event>(
        &self,
        event: &str,
        handlers: &[Handler<E>],
        args: &E::Args,
    ) -> Result<usize, EventBusError> {
        trace!(event, handlers = handlers.len(), "Dispatching");
        let mut delivered = 0;
        for handler in handlers {
            match handler.call(args) {
                Ok(()) => delivered += 1,
                Err(source) => match self.config.dispatch_policy {
                    DispatchPolicy::Propagate => {
                        return Err(EventBusError::Handler {
                            event: event.to_string(),
                            source,
                        });
                    }
                    DispatchPolicy::Isolate => {
                        warn!(event, error = %source, "Handler failed, continuing dispatch");
                    }
                },
            }
        }
        Ok(delivered)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("typed_events", &self.subscriptions.read().len())
            .field("dynamic_events", &self.dynamic.read().len())
            .field("config", &self.config)
            .finish()
    }
}

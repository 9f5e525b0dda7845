//! Event contracts and handler handles.

use std::fmt;
use std::sync::Arc;

/// Compile-time contract binding an event name to its argument type.
///
/// Implementors are zero-sized marker types; see [`crate::event_bus::catalog`]
/// for the application catalog. Multi-argument events use tuples, events
/// without arguments use `()`.
pub trait Event: 'static {
    /// Wire name of the event, e.g. `"socket.in.fen"`.
    const NAME: &'static str;
    /// Arguments passed to every handler on dispatch.
    type Args: Send + Sync + 'static;
}

/// Untyped events addressed by a runtime name.
///
/// Only for genuinely dynamic or legacy events whose payload shape is not
/// known at compile time. Typed events should be added to the catalog instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Untyped;

impl Event for Untyped {
    const NAME: &'static str = "*";
    type Args = serde_json::Value;
}

/// Handler for [`Untyped`] events.
pub type DynamicHandler = Handler<Untyped>;

type HandlerFn<A> = dyn Fn(&A) -> anyhow::Result<()> + Send + Sync;

/// A registered callback for event `E`.
///
/// Identity is the shared allocation: clones of a handler are the same
/// handler, two handlers built from identical closures are not.
pub struct Handler<E: Event> {
    callback: Arc<HandlerFn<E::Args>>,
}

impl<E: Event> Handler<E> {
    /// Wrap an infallible callback
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&E::Args) + Send + Sync + 'static,
    {
        Self::fallible(move |args| {
            callback(args);
            Ok(())
        })
    }

    /// Wrap a callback that may fail
    ///
    /// Failures are handled according to the bus's dispatch policy.
    pub fn fallible<F>(callback: F) -> Self
    where
        F: Fn(&E::Args) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback
    pub fn call(&self, args: &E::Args) -> anyhow::Result<()> {
        (self.callback)(args)
    }

    /// Check whether both handles refer to the same handler
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.callback), Arc::as_ptr(&other.callback))
    }
}

impl<E: Event> Clone for Handler<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<E: Event> PartialEq for Handler<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<E: Event> Eq for Handler<E> {}

impl<E: Event> fmt::Debug for Handler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("event", &E::NAME)
            .field("id", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Ordered, duplicate-free list of handlers for one event.
pub(crate) struct Subscribers<E: Event> {
    handlers: Vec<Handler<E>>,
}

impl<E: Event> Subscribers<E> {
    /// Append `handler` unless it is already present. Returns true if added.
    pub(crate) fn insert(&mut self, handler: &Handler<E>) -> bool {
        if self.handlers.iter().any(|h| h.same_as(handler)) {
            return false;
        }
        self.handlers.push(handler.clone());
        true
    }

    /// Remove `handler` if present. Returns true if removed.
    pub(crate) fn remove(&mut self, handler: &Handler<E>) -> bool {
        match self.handlers.iter().position(|h| h.same_as(handler)) {
            Some(index) => {
                self.handlers.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn snapshot(&self) -> Vec<Handler<E>> {
        self.handlers.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<E: Event> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Ping;

    impl Event for Ping {
        const NAME: &'static str = "ping";
        type Args = u32;
    }

    #[test]
    fn test_clone_is_same_handler() {
        let handler = Handler::<Ping>::new(|_| {});
        let clone = handler.clone();
        assert!(handler.same_as(&clone));
        assert_eq!(handler, clone);
    }

    #[test]
    fn test_identical_closures_are_distinct() {
        let a = Handler::<Ping>::new(|_| {});
        let b = Handler::<Ping>::new(|_| {});
        assert_ne!(a, b);
    }

    #[test]
    fn test_subscribers_deduplicate_and_keep_order() {
        let a = Handler::<Ping>::new(|_| {});
        let b = Handler::<Ping>::new(|_| {});
        let mut subs = Subscribers::default();

        assert!(subs.insert(&a));
        assert!(subs.insert(&b));
        assert!(!subs.insert(&a));
        assert_eq!(subs.len(), 2);

        let order = subs.snapshot();
        assert!(order[0].same_as(&a));
        assert!(order[1].same_as(&b));

        assert!(subs.remove(&a));
        assert!(!subs.remove(&a));
        assert_eq!(subs.len(), 1);
    }

    #[test]
    fn test_fallible_handler_reports_error() {
        let handler = Handler::<Ping>::fallible(|n| {
            anyhow::ensure!(*n < 10, "too large: {}", n);
            Ok(())
        });
        assert!(handler.call(&3).is_ok());
        assert_eq!(handler.call(&12).unwrap_err().to_string(), "too large: 12");
    }
}

//! # Named Events
//!
//! A single-slot table: each event name maps to exactly one handler.
//! Registering a handler under a name that already has one replaces it in
//! place, so broadcast order stays the order in which names were first
//! registered.

use crate::container::Container;
use rivet_core::{Arguments, Callable, EventError, IntoCallable, Value};
use tracing::debug;

/// Event handlers in registration order.
#[derive(Clone, Default)]
pub(crate) struct EventTable {
    handlers: Vec<(String, Callable)>,
}

impl EventTable {
    pub(crate) fn insert(&mut self, name: String, handler: Callable) {
        match self.handlers.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = handler,
            None => self.handlers.push((name, handler)),
        }
    }

    pub(crate) fn remove(&mut self, name: &str) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(n, _)| n != name);
        self.handlers.len() != before
    }

    pub(crate) fn get(&self, name: &str) -> Option<Callable> {
        self.handlers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, handler)| handler.clone())
    }

    pub(crate) fn names(&self) -> Vec<String> {
        self.handlers.iter().map(|(n, _)| n.clone()).collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.len()
    }
}

impl Container {
    /// Register the handler for `name`, replacing any existing one.
    pub fn add_event_listener(&self, name: impl Into<String>, handler: impl IntoCallable) {
        let name = name.into();
        let handler = handler.into_callable();
        debug!(event = %name, "Event listener registered");
        self.inner.registry.lock().events.insert(name, handler);
    }

    /// Remove the handler for `name`. Removing an unknown name does nothing.
    pub fn remove_event_listener(&self, name: &str) {
        if self.inner.registry.lock().events.remove(name) {
            debug!(event = name, "Event listener removed");
        }
    }

    /// Whether a handler is registered for `name`.
    pub fn has_event_listener(&self, name: &str) -> bool {
        self.inner.registry.lock().events.get(name).is_some()
    }

    /// Registered event names in registration order.
    pub fn event_names(&self) -> Vec<String> {
        self.inner.registry.lock().events.names()
    }

    /// Dispatch one event, or broadcast to every handler when `name` is `None`.
    ///
    /// By name, the handler's result is returned. A broadcast passes a copy of
    /// `args` to each handler in registration order, stops at the first
    /// failure and returns `None` on success.
    pub fn dispatch_event(
        &self,
        name: Option<&str>,
        args: Arguments,
    ) -> Result<Option<Value>, EventError> {
        let Some(name) = name else {
            let names = self.event_names();
            debug!(handlers = names.len(), "Broadcasting to all event listeners");
            for name in names {
                self.dispatch_event(Some(&name), args.clone())?;
            }
            return Ok(None);
        };

        let handler = self
            .inner
            .registry
            .lock()
            .events
            .get(name)
            .ok_or_else(|| EventError::NotFound(name.to_owned()))?;

        debug!(event = name, "Dispatching event");
        self.call(&handler, args)
            .map(Some)
            .map_err(|source| EventError::Failed {
                event: name.to_owned(),
                source,
            })
    }
}

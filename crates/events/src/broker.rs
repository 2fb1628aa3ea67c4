//! In-process event broker (mechanics only).
//!
//! The broker is **synchronous and single-threaded**:
//!
//! - `emit` calls every matching handler before it returns; nothing is queued
//! - handlers run in subscription order
//! - handlers may emit, subscribe or unsubscribe re-entrantly; the subscriber
//!   list is snapshotted before dispatch, so changes take effect from the
//!   next `emit` on
//!
//! ## Overlapping subscriptions
//!
//! Every matching *subscription* fires, not every matching *handler*: a
//! handler registered under `basket:changed` and under a family that also
//! matches `basket:changed` runs twice for one emit. Avoid overlapping
//! subscriptions for the same handler.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::event::Event;
use crate::matcher::Matcher;

/// A targeted subscriber: receives the payload of matching events.
pub type Handler<P> = Rc<dyn Fn(&P)>;

/// A diagnostics subscriber: receives every event with its name.
pub type Tap<P> = Rc<dyn Fn(&str, &P)>;

struct Subscription<P> {
    matcher: Matcher,
    handler: Handler<P>,
}

/// Typed publish/subscribe hub.
///
/// Shared as `Rc<EventBroker<P>>`: producers keep a clone to emit, consumers
/// register closures.
pub struct EventBroker<P> {
    subscriptions: RefCell<Vec<Subscription<P>>>,
    taps: RefCell<Vec<Tap<P>>>,
}

impl<P> Default for EventBroker<P> {
    fn default() -> Self {
        Self {
            subscriptions: RefCell::new(Vec::new()),
            taps: RefCell::new(Vec::new()),
        }
    }
}

impl<P> core::fmt::Debug for EventBroker<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBroker")
            .field("subscriptions", &self.subscriptions.borrow().len())
            .field("taps", &self.taps.borrow().len())
            .finish()
    }
}

impl<P> EventBroker<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for the common case of a broker shared between producers
    /// and consumers.
    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    /// Register `handler` for every event name `matcher` selects.
    pub fn subscribe(&self, matcher: impl Into<Matcher>, handler: Handler<P>) {
        let matcher = matcher.into();
        tracing::trace!(matcher = %matcher, "subscribe");
        self.subscriptions
            .borrow_mut()
            .push(Subscription { matcher, handler });
    }

    /// Subscribe a closure and hand back the handler so it can later be
    /// passed to [`EventBroker::unsubscribe`].
    pub fn on<F>(&self, matcher: impl Into<Matcher>, f: F) -> Handler<P>
    where
        F: Fn(&P) + 'static,
        P: 'static,
    {
        let handler: Handler<P> = Rc::new(f);
        self.subscribe(matcher, Rc::clone(&handler));
        handler
    }

    /// Remove every subscription of `handler` under `matcher`.
    ///
    /// Handlers are compared by identity. Unsubscribing something that is not
    /// subscribed is a no-op.
    pub fn unsubscribe(&self, matcher: impl Into<Matcher>, handler: &Handler<P>) {
        let matcher = matcher.into();
        self.subscriptions
            .borrow_mut()
            .retain(|s| !(s.matcher == matcher && Rc::ptr_eq(&s.handler, handler)));
    }

    /// Register a tap that observes every emitted event.
    ///
    /// Taps run before targeted handlers of the same emit, so under
    /// re-entrant emission they still see events in emission order.
    pub fn subscribe_all(&self, tap: Tap<P>) {
        self.taps.borrow_mut().push(tap);
    }

    /// Remove a tap. Idempotent.
    pub fn unsubscribe_all(&self, tap: &Tap<P>) {
        self.taps.borrow_mut().retain(|t| !Rc::ptr_eq(t, tap));
    }

    /// Number of targeted subscriptions (taps excluded).
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.borrow().len()
    }

    /// Synchronously deliver `payload` to every tap, then to every
    /// subscription whose matcher selects `name`, in subscription order.
    pub fn emit(&self, name: &str, payload: P) {
        let taps: Vec<Tap<P>> = self.taps.borrow().iter().cloned().collect();
        let handlers: Vec<Handler<P>> = self
            .subscriptions
            .borrow()
            .iter()
            .filter(|s| s.matcher.matches(name))
            .map(|s| Rc::clone(&s.handler))
            .collect();

        tracing::trace!(event = name, handlers = handlers.len(), "emit");

        for tap in &taps {
            tap(name, &payload);
        }
        for handler in &handlers {
            handler(&payload);
        }
    }
}

impl<P: Event> EventBroker<P> {
    /// Emit `event` under its own name.
    pub fn publish(&self, event: P) {
        let name = event.event_name();
        self.emit(&name, event);
    }
}

impl<P: 'static> EventBroker<P> {
    /// Adapter for wiring UI callbacks: the returned function emits `name`
    /// with whatever payload it is called with.
    ///
    /// Only a weak reference to the broker is kept; once the broker is gone
    /// the callback does nothing.
    pub fn to_callback(self: &Rc<Self>, name: impl Into<String>) -> Box<dyn Fn(P)> {
        let broker: Weak<Self> = Rc::downgrade(self);
        let name = name.into();
        Box::new(move |payload| {
            if let Some(broker) = broker.upgrade() {
                broker.emit(&name, payload);
            }
        })
    }
}

//! Logs every broker event at `debug` (enable with `RUST_LOG=shopfront=debug`
//! or a plain `RUST_LOG=debug`).

use std::rc::Rc;

use shopfront_events::{EventBroker, Tap};

/// Attach the logging tap to `broker`. Keep the returned tap to detach it
/// again with [`EventBroker::unsubscribe_all`].
pub fn attach<P>(broker: &EventBroker<P>) -> Tap<P>
where
    P: core::fmt::Debug + 'static,
{
    let tap: Tap<P> = Rc::new(|name: &str, payload: &P| {
        ::tracing::debug!(target: "shopfront::events", event = name, payload = ?payload, "event");
    });
    broker.subscribe_all(Rc::clone(&tap));
    tap
}

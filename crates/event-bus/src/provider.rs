//! # Event Provider
//!
//! Components that own an [`EventBus`] expose it through this trait and get
//! `subscribe`/`unsubscribe`/`fire` on themselves. Each implementor keeps
//! its own bus, so two components never share subscribers.

use crate::bus::EventBus;
use crate::error::BusError;
use crate::handler::Handler;

/// Trait for components that publish named events.
///
/// # Example
///
/// ```
/// use event_bus::{EventBus, EventProvider, Handler};
///
/// #[derive(Default)]
/// struct Session {
///     events: EventBus<String>,
/// }
///
/// impl EventProvider<String> for Session {
///     fn event_bus(&self) -> &EventBus<String> {
///         &self.events
///     }
/// }
///
/// let session = Session::default();
/// session.subscribe("auth.sessionChange", Handler::infallible(|user: &String| {
///     println!("session changed for {user}");
/// }));
/// session.fire("auth.sessionChange", &"ada".to_string()).unwrap();
/// ```
pub trait EventProvider<A: ?Sized> {
    /// The bus owned by this component.
    fn event_bus(&self) -> &EventBus<A>;

    /// Bind `handler` to the event `name`.
    fn subscribe(&self, name: &str, handler: Handler<A>) {
        self.event_bus().subscribe(name, handler);
    }

    /// Inverse of [`EventProvider::subscribe`].
    fn unsubscribe(&self, name: &str, handler: &Handler<A>) -> usize {
        self.event_bus().unsubscribe(name, handler)
    }

    /// Fire `name`, passing `args` to every subscriber.
    fn fire(&self, name: &str, args: &A) -> Result<usize, BusError> {
        self.event_bus().fire(name, args)
    }
}

impl<A: ?Sized> EventProvider<A> for EventBus<A> {
    fn event_bus(&self) -> &EventBus<A> {
        self
    }
}

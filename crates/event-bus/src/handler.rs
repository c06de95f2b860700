//! # Event Handlers
//!
//! A [`Handler`] is a shared, identity-comparable callback. Clones of one
//! handler are the same subscriber; separately constructed handlers are
//! distinct even when built from identical closures.

use std::fmt;
use std::sync::Arc;

/// Error type a handler may fail with.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Return type of every handler invocation.
pub type HandlerResult = Result<(), HandlerError>;

type Callback<A> = dyn Fn(&A) -> HandlerResult + Send + Sync;

/// Callback registered on an [`EventBus`](crate::EventBus).
///
/// `A` is the positional argument list forwarded by `fire`, usually a
/// tuple such as `(u64, String)` or `()` for events without arguments.
pub struct Handler<A: ?Sized> {
    callback: Arc<Callback<A>>,
}

impl<A: ?Sized> Handler<A> {
    /// Wrap a fallible callback.
    ///
    /// An `Err` returned by the callback aborts the fire pass it runs in.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&A) -> HandlerResult + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Wrap a callback that cannot fail.
    pub fn infallible<F>(callback: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        Self::new(move |args: &A| {
            callback(args);
            Ok(())
        })
    }

    /// Invoke the callback.
    pub fn call(&self, args: &A) -> HandlerResult {
        (self.callback)(args)
    }

    /// Whether `other` is this handler (or a clone of it).
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        // Compare data pointers only; vtable addresses are not unique.
        std::ptr::eq(
            Arc::as_ptr(&self.callback).cast::<()>(),
            Arc::as_ptr(&other.callback).cast::<()>(),
        )
    }
}

impl<A: ?Sized> Clone for Handler<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> PartialEq for Handler<A> {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

impl<A: ?Sized> Eq for Handler<A> {}

impl<A: ?Sized> fmt::Debug for Handler<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

//! # Event Bus - Named Event Publish/Subscribe
//!
//! Callbacks are registered under a string name, removed later, and invoked
//! synchronously, in registration order, when the event fires.
//!
//! ## Dispatch Model
//!
//! ```text
//! ┌──────────────┐  subscribe("auth.change", h)   ┌──────────────┐
//! │  Component   │ ─────────────────────────────▶ │  Event Bus   │
//! └──────────────┘                                │              │
//!                                                 │ "auth.change"│
//! ┌──────────────┐  fire("auth.change", &args)    │  [h0, ✝, h2] │
//! │    Caller    │ ─────────────────────────────▶ │              │
//! └──────────────┘                                └──────┬───────┘
//!                                                        │ h0(&args), h2(&args)
//!                                                        ▼
//! ```
//!
//! ## Rules
//!
//! - **Order:** handlers run in ascending slot order (registration order)
//! - **Tombstones:** `unsubscribe` blanks slots instead of shifting them,
//!   so removal from inside a running handler is safe
//! - **Snapshot length:** slots appended during a fire pass are not visited
//!   by that pass
//! - **Fail-open:** the first handler error aborts the pass and is returned
//!   to the caller of `fire`
//! - **Isolation:** every `EventBus` owns its registry; nothing is global
//!
//! ## Usage
//!
//! ```rust
//! use event_bus::{EventBus, Handler};
//!
//! let bus: EventBus<(u32, &str)> = EventBus::new();
//! let greet: Handler<(u32, &str)> = Handler::infallible(|(n, who)| {
//!     println!("{n} hello {who}");
//! });
//!
//! bus.subscribe("greet", greet.clone());
//! assert_eq!(bus.fire("greet", &(1, "world")).unwrap(), 1);
//!
//! bus.unsubscribe("greet", &greet);
//! assert_eq!(bus.fire("greet", &(2, "world")).unwrap(), 0);
//! ```

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::panic))]

pub mod bus;
pub mod config;
pub mod error;
pub mod handler;
pub mod metrics;
pub mod provider;
mod registry;

// Re-export main types
pub use bus::EventBus;
pub use config::{CompactionPolicy, EventBusConfig};
pub use error::{BusError, ConfigError};
pub use handler::{Handler, HandlerError, HandlerResult};
pub use metrics::{BusMetrics, MetricsSnapshot};
pub use provider::EventProvider;

/// Tombstones a list may accumulate before the default policy compacts it.
pub const DEFAULT_TOMBSTONE_THRESHOLD: usize = 16;

/// Environment variable selecting the compaction policy.
pub const ENV_COMPACTION: &str = "EVENT_BUS_COMPACTION";

/// Environment variable pre-sizing the registry.
pub const ENV_EXPECTED_EVENTS: &str = "EVENT_BUS_EXPECTED_EVENTS";

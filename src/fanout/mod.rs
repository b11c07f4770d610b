//! Event fan-out engine
//!
//! Delivers each ingested event to every connected `/events` client.
//!
//! - `Mailbox`: unbounded per-subscriber FIFO with a wake signal
//! - `Subscriber`: identity, mailbox and liveness of one stream client
//! - `SubscriberRegistry`: the set of live subscribers
//! - `Broadcaster`: enqueues a payload into every connected mailbox
//! - `StreamPump`: drains one mailbox into SSE frames or keep-alives
//! - `Shutdown`: process-wide flag that wakes and closes every pump
//!
//! ```text
//!                 ┌──────────────┐   push    ┌─────────┐  pop   ┌────────────┐
//! publish(event) ─► Broadcaster  ├──────────►│ Mailbox ├───────►│ StreamPump ├──► SSE
//!                 └──────┬───────┘  (one per └────▲────┘        └────────────┘
//!                        │ snapshot  subscriber)  │ wake
//!                 ┌──────▼─────────────┐          │
//!                 │ SubscriberRegistry │◄── Shutdown::initiate
//!                 └────────────────────┘
//! ```

mod broadcaster;
mod mailbox;
mod pump;
mod registry;
mod shutdown;
mod subscriber;

pub use broadcaster::Broadcaster;
pub use mailbox::Mailbox;
pub use pump::{Frame, StreamPump};
pub use registry::SubscriberRegistry;
pub use shutdown::Shutdown;
pub use subscriber::{Liveness, Subscriber, SubscriberId};

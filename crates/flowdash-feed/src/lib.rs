//! Realtime transaction feed client
//!
//! Consumes the upstream event channel (one full snapshot, then incremental
//! batches) and maintains the canonical board state for the session. The
//! transport itself sits behind the [`FeedTransport`] seam; the client only
//! sees decoded [`FeedEvent`]s.

pub mod client;
pub mod error;
pub mod events;
pub mod transport;

pub use client::{FeedClient, FeedHandle, FeedSettings};
pub use error::{FeedError, FeedResult};
pub use events::FeedEvent;
pub use transport::{FeedTransport, JsonStreamTransport};

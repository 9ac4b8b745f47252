//! Middleware wrappers for shelf connectors.
//!
//! Layers wrap an inner [`shelf_core::MediaConnector`] without changing its
//! contract: callers keep talking to the capability traits while caching and
//! pacing happen transparently underneath.

mod builder;
mod cache;
mod pace;

pub use builder::ConnectorBuilder;
pub use cache::{CacheMiddleware, CachingConnector};
pub use pace::{PaceMiddleware, PacedConnector};

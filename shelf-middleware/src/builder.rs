//! Builder for composing connectors with middleware layers.
//!
//! # Middleware Ordering Convention
//!
//! Middleware layers form an "onion" around the raw connector:
//!
//! ```text
//! Router Request
//!     ↓
//! Outermost Middleware (e.g., Cache - answers hits without touching anything below)
//!     ↓
//! Inner Middleware (e.g., Pace - delays only the calls that actually go upstream)
//!     ↓
//! Raw Connector (e.g., BGG - makes actual API calls)
//! ```
//!
//! ## Storage vs Application Order
//!
//! The `layers` vector stores middleware in **outermost-first** order for intuitive
//! builder semantics (last added = outermost), but they are **applied in reverse**
//! during `build()` to construct the proper nesting.
//!
//! Example:
//! ```text
//! builder.with_pace(..).with_cache(..)
//!
//! Storage: [Cache, Pace]  (outermost first)
//! Applied:  Raw -> Pace -> Cache  (innermost to outermost)
//! Result:   Cache(Pace(Raw))
//! ```
//!
//! This convention matches [`MiddlewareStack`](shelf_types::MiddlewareStack) where
//! `layers[0]` is the outermost layer.

use std::collections::HashMap;
use std::sync::Arc;

use shelf_core::Middleware;
use shelf_core::connector::MediaConnector;
use shelf_types::{CacheConfig, MiddlewareLayer, MiddlewareStack, PaceConfig};
use serde_json::json;

/// Generic middleware builder for composing a connector with layered wrappers.
///
/// See [module-level documentation](self) for details on middleware ordering.
pub struct ConnectorBuilder {
    raw: Arc<dyn MediaConnector>,
    /// Middleware layers in outermost-first order.
    ///
    /// During `build()`, these are applied in reverse (innermost to outermost)
    /// to construct the proper nesting: `layers[0](layers[1](...(raw)))`.
    layers: Vec<Box<dyn Middleware>>,
}

impl ConnectorBuilder {
    /// Create a new builder from a raw, unwrapped connector.
    #[must_use]
    pub fn new(raw: Arc<dyn MediaConnector>) -> Self {
        Self {
            raw,
            layers: Vec::new(),
        }
    }

    /// Add or replace response caching.
    ///
    /// Adds cache middleware at the outermost position (index 0) so cache
    /// hits are answered before any other layer runs; in particular a hit
    /// never consumes pacing delay.
    ///
    /// If cache middleware already exists, it is removed and replaced.
    #[must_use]
    pub fn with_cache(mut self, cfg: &CacheConfig) -> Self {
        self.layers.retain(|m| m.name() != "CachingMiddleware");
        // Insert at position 0 to make this the outermost layer
        self.layers
            .insert(0, Box::new(crate::cache::CacheMiddleware::new(cfg.clone())));
        self
    }

    /// Remove caching if present.
    #[must_use]
    pub fn without_cache(mut self) -> Self {
        self.layers.retain(|m| m.name() != "CachingMiddleware");
        self
    }

    /// Add or replace request pacing.
    ///
    /// Pacing sits innermost by default (appended) so only calls that reach
    /// the raw connector are delayed.
    ///
    /// If pace middleware already exists, it is removed and replaced.
    #[must_use]
    pub fn with_pace(mut self, cfg: &PaceConfig) -> Self {
        self.layers.retain(|m| m.name() != "PacedConnector");
        self.layers.push(Box::new(crate::pace::PaceMiddleware::new(*cfg)));
        self
    }

    /// Remove pacing if present.
    #[must_use]
    pub fn without_pace(mut self) -> Self {
        self.layers.retain(|m| m.name() != "PacedConnector");
        self
    }

    /// Export the current middleware stack configuration for inspection.
    ///
    /// Returns a [`MiddlewareStack`] that preserves the outermost-first ordering
    /// convention. The resulting stack can be serialized, stored, and later
    /// reconstructed with [`from_stack`](Self::from_stack).
    ///
    /// The raw connector is appended as the innermost "layer" for observability.
    #[must_use]
    pub fn to_stack(&self) -> MiddlewareStack {
        let mut stack = MiddlewareStack::new();
        // Iterate in storage order (outermost first) and push_inner to maintain convention
        for layer in &self.layers {
            stack.push_inner(MiddlewareLayer::new(layer.name(), layer.config_json()));
        }
        // Document inner-most raw for observability only
        stack.push_inner(MiddlewareLayer::new(
            "RawConnector",
            json!({ "name": self.raw.name() }),
        ));
        stack
    }

    /// Construct a builder from a raw connector and an explicit stack.
    ///
    /// Reconstructs middleware layers from a serialized [`MiddlewareStack`],
    /// preserving the outermost-first ordering convention. Unknown middleware
    /// types are silently ignored (forward compatibility).
    ///
    /// This is the inverse of [`to_stack`](Self::to_stack).
    #[must_use]
    pub fn from_stack(raw: Arc<dyn MediaConnector>, stack: &MiddlewareStack) -> Self {
        let mut layers: Vec<Box<dyn Middleware>> = Vec::new();
        for l in &stack.layers {
            match l.name.as_str() {
                "CachingMiddleware" => {
                    let defaults = CacheConfig::default();
                    let default_ttl_ms = l
                        .config
                        .get("default_ttl_ms")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(defaults.default_ttl_ms);
                    let default_max_entries = l
                        .config
                        .get("default_max_entries")
                        .and_then(serde_json::Value::as_u64)
                        .and_then(|v| usize::try_from(v).ok())
                        .unwrap_or(defaults.default_max_entries);
                    let per_capability_ttl_ms: HashMap<String, u64> = l
                        .config
                        .get("per_capability_ttl_ms")
                        .and_then(|v| serde_json::from_value(v.clone()).ok())
                        .unwrap_or_default();
                    let per_capability_max_entries: HashMap<String, usize> = l
                        .config
                        .get("per_capability_max_entries")
                        .and_then(|v| serde_json::from_value(v.clone()).ok())
                        .unwrap_or_default();
                    layers.push(Box::new(crate::cache::CacheMiddleware::new(CacheConfig {
                        default_ttl_ms,
                        default_max_entries,
                        per_capability_ttl_ms,
                        per_capability_max_entries,
                    })));
                }
                "PacedConnector" => {
                    let min_delay_ms = l
                        .config
                        .get("min_delay_ms")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or_else(|| PaceConfig::default().min_delay_ms);
                    layers.push(Box::new(crate::pace::PaceMiddleware::new(PaceConfig {
                        min_delay_ms,
                    })));
                }
                _ => {}
            }
        }
        Self { raw, layers }
    }

    /// Build the wrapped connector according to the captured stack.
    ///
    /// Applies middleware layers in reverse order (innermost to outermost) to
    /// construct the proper nesting. Since `layers` stores middleware in
    /// outermost-first order, we reverse during iteration to apply them
    /// innermost-first.
    #[must_use]
    pub fn build(self) -> Arc<dyn MediaConnector> {
        let mut acc: Arc<dyn MediaConnector> = Arc::clone(&self.raw);
        // Reverse iteration: apply innermost middleware first, outermost last
        for m in self.layers.into_iter().rev() {
            acc = m.apply(acc);
        }
        acc
    }

    /// Add an arbitrary middleware layer at the outermost position.
    ///
    /// This method inserts the layer at index 0, making it the first to
    /// receive requests. Use this for custom middleware that should wrap all
    /// other layers.
    #[must_use]
    pub fn layer(mut self, layer: Box<dyn Middleware>) -> Self {
        // Insert at position 0 to make this the outermost layer
        self.layers.insert(0, layer);
        self
    }
}

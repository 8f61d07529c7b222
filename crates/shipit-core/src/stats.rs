//! Usage telemetry
//!
//! Events are emitted as structured tracing events on the `shipit::stats`
//! target at debug level, so they stay off the terminal at the default
//! verbosity. Whatever subscriber the binary installs decides where they go.

use serde_json::{Map, Value};
use tracing::debug;

/// Target every usage event is recorded under
pub const STATS_TARGET: &str = "shipit::stats";

/// A named usage event with optional properties
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub name: String,
    pub props: Map<String, Value>,
}

impl Event {
    /// Create an event with no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            props: Map::new(),
        }
    }

    /// Attach a property
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// Record a usage event
pub fn track(event: &Event) {
    let props = Value::Object(event.props.clone());
    debug!(target: STATS_TARGET, event = %event.name, props = %props, "track");
}

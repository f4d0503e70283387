//! Application state store seam.

use std::fmt;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use ssr_streaming::escape_json_for_script;

/// Read access to the application state produced by the state initializer.
pub trait Store: Send + Sync {
    /// Snapshot of the current state.
    fn state(&self) -> Value;
}

/// A store holding its state as a JSON value.
#[derive(Debug, Default)]
pub struct JsonStore {
    state: Mutex<Value>,
}

impl JsonStore {
    /// Create a store with the given initial state.
    pub fn new(state: Value) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// Replace the state.
    pub fn set(&self, state: Value) {
        *self.lock() = state;
    }

    /// Set a top-level key, turning a non-object state into an object.
    pub fn insert(&self, key: impl Into<String>, value: Value) {
        let mut state = self.lock();
        if !state.is_object() {
            *state = Value::Object(serde_json::Map::new());
        }
        if let Value::Object(map) = &mut *state {
            map.insert(key.into(), value);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Value> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Store for JsonStore {
    fn state(&self) -> Value {
        self.lock().clone()
    }
}

/// Client bootstrap script assigning the store state to `window._state`.
pub fn state_bootstrap_script(store: &dyn Store) -> String {
    format!(
        "window._state = {};",
        escape_json_for_script(&store.state().to_string())
    )
}

/// Render parameters produced by the state initializer and handed to the
/// page renderer.
#[derive(Clone)]
pub struct Parameters {
    store: Arc<dyn Store>,
    values: serde_json::Map<String, Value>,
}

impl Parameters {
    /// Create parameters around a store.
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            store,
            values: serde_json::Map::new(),
        }
    }

    /// Add a named value.
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// The state store.
    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Get a named value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// All named values.
    pub fn values(&self) -> &serde_json::Map<String, Value> {
        &self.values
    }
}

impl fmt::Debug for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameters")
            .field("state", &self.store.state())
            .field("values", &self.values)
            .finish()
    }
}

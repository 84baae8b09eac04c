//! Lazily created connection and session handles for one database.
//!
//! The manager never looks inside the handles it caches. A
//! [`ConnectionProvider`] turns a URL into an engine, and an engine into
//! connections and sessions; the manager keeps them keyed by name and tracks
//! which key is active.

use crate::constants::DEFAULT_KEY;
use crate::error::ResolveError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Creates the handles a [`ConnectionManager`] caches.
pub trait ConnectionProvider: Send + Sync {
    type Engine: Send + Sync;
    type Connection: Send + Sync;
    type Session: Send + Sync;

    fn create_engine(&self, url: &str) -> Result<Self::Engine, ResolveError>;

    fn connect(&self, engine: &Self::Engine) -> Result<Self::Connection, ResolveError>;

    fn open_session(&self, engine: &Self::Engine) -> Result<Self::Session, ResolveError>;
}

/// Handles cached under string keys, with one active key.
struct KeyedCache<T> {
    handles: HashMap<String, Arc<T>>,
    active: Option<String>,
}

impl<T> KeyedCache<T> {
    fn new() -> Self {
        Self {
            handles: HashMap::new(),
            active: None,
        }
    }

    fn active_key(&self) -> &str {
        self.active.as_deref().unwrap_or(DEFAULT_KEY)
    }

    fn get_or_create(
        &mut self,
        key: &str,
        create: impl FnOnce() -> Result<T, ResolveError>,
    ) -> Result<Arc<T>, ResolveError> {
        if let Some(handle) = self.handles.get(key) {
            return Ok(handle.clone());
        }
        let handle = Arc::new(create()?);
        self.handles.insert(key.to_string(), handle.clone());
        Ok(handle)
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.handles.keys().cloned().collect();
        keys.sort();
        keys
    }
}

struct State<P: ConnectionProvider> {
    engine: Option<Arc<P::Engine>>,
    connections: KeyedCache<P::Connection>,
    sessions: KeyedCache<P::Session>,
}

impl<P: ConnectionProvider> State<P> {
    fn new() -> Self {
        Self {
            engine: None,
            connections: KeyedCache::new(),
            sessions: KeyedCache::new(),
        }
    }
}

/// Connection and session cache for one resolved database.
pub struct ConnectionManager<P: ConnectionProvider> {
    name: String,
    url: String,
    schema: Option<String>,
    provider: P,
    state: Mutex<State<P>>,
}

impl<P: ConnectionProvider> ConnectionManager<P> {
    pub fn new(name: impl Into<String>, url: impl Into<String>, provider: P) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            schema: None,
            provider,
            state: Mutex::new(State::new()),
        }
    }

    pub fn with_schema(mut self, schema: Option<String>) -> Self {
        self.schema = schema;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The engine, created on first use.
    pub fn engine(&self) -> Result<Arc<P::Engine>, ResolveError> {
        let mut state = self.state.lock();
        self.engine_locked(&mut state)
    }

    fn engine_locked(&self, state: &mut State<P>) -> Result<Arc<P::Engine>, ResolveError> {
        if let Some(engine) = &state.engine {
            return Ok(engine.clone());
        }
        debug!("Creating engine for database '{}'", self.name);
        let engine = Arc::new(self.provider.create_engine(&self.url)?);
        state.engine = Some(engine.clone());
        Ok(engine)
    }

    /// The connection stored under the active key.
    pub fn connection(&self) -> Result<Arc<P::Connection>, ResolveError> {
        let mut state = self.state.lock();
        let key = state.connections.active_key().to_string();
        self.connection_locked(&mut state, &key)
    }

    fn connection_locked(
        &self,
        state: &mut State<P>,
        key: &str,
    ) -> Result<Arc<P::Connection>, ResolveError> {
        let engine = self.engine_locked(state)?;
        state.connections.get_or_create(key, || {
            debug!("Opening connection '{}' for database '{}'", key, self.name);
            self.provider.connect(&engine)
        })
    }

    pub fn active_connection_key(&self) -> String {
        self.state.lock().connections.active_key().to_string()
    }

    /// Make `key` the active connection, opening it if needed.
    ///
    /// `None` switches back to the default connection.
    pub fn set_active_connection_key(&self, key: Option<&str>) -> Result<(), ResolveError> {
        let mut state = self.state.lock();
        let key = key.filter(|k| !k.is_empty()).unwrap_or(DEFAULT_KEY);
        self.connection_locked(&mut state, key)?;
        state.connections.active = Some(key.to_string());
        Ok(())
    }

    /// Keys of every open connection.
    pub fn connection_keys(&self) -> Vec<String> {
        self.state.lock().connections.keys()
    }

    /// The session stored under the active key.
    pub fn session(&self) -> Result<Arc<P::Session>, ResolveError> {
        let mut state = self.state.lock();
        let key = state.sessions.active_key().to_string();
        self.session_locked(&mut state, &key)
    }

    fn session_locked(&self, state: &mut State<P>, key: &str) -> Result<Arc<P::Session>, ResolveError> {
        let engine = self.engine_locked(state)?;
        state.sessions.get_or_create(key, || {
            debug!("Opening session '{}' for database '{}'", key, self.name);
            self.provider.open_session(&engine)
        })
    }

    pub fn active_session_key(&self) -> String {
        self.state.lock().sessions.active_key().to_string()
    }

    /// Make `key` the active session, opening it if needed.
    ///
    /// `None` switches back to the default session.
    pub fn set_active_session_key(&self, key: Option<&str>) -> Result<(), ResolveError> {
        let mut state = self.state.lock();
        let key = key.filter(|k| !k.is_empty()).unwrap_or(DEFAULT_KEY);
        self.session_locked(&mut state, key)?;
        state.sessions.active = Some(key.to_string());
        Ok(())
    }

    /// Keys of every open session.
    pub fn session_keys(&self) -> Vec<String> {
        self.state.lock().sessions.keys()
    }

    /// Drop every cached handle and return to the default keys.
    pub fn reset(&self) {
        *self.state.lock() = State::new();
        debug!("Reset connection state for database '{}'", self.name);
    }
}

impl<P: ConnectionProvider> fmt::Debug for ConnectionManager<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("ConnectionManager")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .field("engine", &state.engine.is_some())
            .field("connections", &state.connections.keys())
            .field("sessions", &state.sessions.keys())
            .finish_non_exhaustive()
    }
}

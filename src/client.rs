//! Client Module
//!
//! The protocol client that talks to the registration service.
//!
//! ## Responsibilities
//! - Open one connection per operation and always close it
//! - Frame the `CHARGER` and `INSCRIRE` requests
//! - Check the shape of every response
//! - Remember the last course list and confirmation received

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{Mutex, RwLock};

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::model::{Course, RegistrationForm};
use crate::network::{Connection, Connector, TcpConnector};
use crate::protocol::Message;

/// Connection counters for one client instance
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConnectionStats {
    /// Connections fully established (channels built)
    pub opened: u64,

    /// Connections torn down, whether or not cleanup reported an error
    pub closed: u64,
}

/// Results remembered from the last successful exchanges
#[derive(Debug, Default)]
struct ClientState {
    courses: Vec<Course>,
    confirmation: Option<String>,
}

/// Client for the course-registration service
///
/// ## Concurrency Model
///
/// - **Exchanges** (load_courses/register): serialized by `exchange_lock`
///   - Only ONE request is outstanding per instance
///   - The lock is held from connect until the result is committed
///
/// - **Snapshots** (last_courses/last_confirmation): `state` RwLock
///   - Readers never wait on network I/O, only on a commit
///
/// Instances share nothing; callers that want parallel requests use one
/// client each.
pub struct ProtocolClient<C: Connector = TcpConnector> {
    /// Client configuration
    config: Config,

    /// Opens a fresh transport per exchange
    connector: C,

    /// Serializes exchanges
    exchange_lock: Mutex<()>,

    /// Last successfully received results
    state: RwLock<ClientState>,

    opened: AtomicU64,
    closed: AtomicU64,
}

impl ProtocolClient<TcpConnector> {
    /// Create a TCP client for the configured service
    pub fn new(config: Config) -> Result<Self> {
        Self::with_connector(config, TcpConnector)
    }
}

impl<C: Connector> ProtocolClient<C> {
    /// Create a client that opens its transports through `connector`
    pub fn with_connector(config: Config, connector: C) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            connector,
            exchange_lock: Mutex::new(()),
            state: RwLock::new(ClientState::default()),
            opened: AtomicU64::new(0),
            closed: AtomicU64::new(0),
        })
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// List the courses offered for `term`, in the order the service sent them
    ///
    /// 1. Connect
    /// 2. Send `CHARGER <term>`
    /// 3. Receive a course list
    /// 4. Disconnect
    /// 5. Remember and return the list
    pub fn load_courses(&self, term: &str) -> Result<Vec<Course>> {
        let _exchange = self.exchange_lock.lock();

        let courses = self.exchange("load_courses", |connection| {
            connection.send(&Message::load_request(term))?;
            connection.receive()?.into_courses()
        })?;

        tracing::debug!("Loaded {} courses for term {}", courses.len(), term);
        self.state.write().courses = courses.clone();
        Ok(courses)
    }

    /// Submit a registration form and return the service's confirmation
    ///
    /// The command tag and the form travel as two separate messages.
    pub fn register(&self, form: &RegistrationForm) -> Result<String> {
        let _exchange = self.exchange_lock.lock();

        let confirmation = self.exchange("register", |connection| {
            connection.send(&Message::register_request())?;
            connection.send(&Message::Form(form.clone()))?;
            connection.receive()?.into_text()
        })?;

        tracing::debug!(
            "Registration for {} confirmed: {}",
            form.course().code,
            confirmation
        );
        self.state.write().confirmation = Some(confirmation.clone());
        Ok(confirmation)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Course list from the last successful `load_courses`
    pub fn last_courses(&self) -> Vec<Course> {
        self.state.read().courses.clone()
    }

    /// Confirmation from the last successful `register`
    pub fn last_confirmation(&self) -> Option<String> {
        self.state.read().confirmation.clone()
    }

    pub fn stats(&self) -> ConnectionStats {
        ConnectionStats {
            opened: self.opened.load(Ordering::Relaxed),
            closed: self.closed.load(Ordering::Relaxed),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Run `f` over a fresh connection, disconnecting on every path
    ///
    /// A cleanup failure never replaces the exchange's own outcome: it is
    /// logged, and the exchange result (success or error) is returned.
    fn exchange<T, F>(&self, operation: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection<C::Stream>) -> Result<T>,
    {
        let mut connection = self.connect()?;
        let outcome = f(&mut connection);
        let cleanup = self.disconnect(connection);

        match (outcome, cleanup) {
            (outcome, Ok(())) => outcome,
            (Ok(value), Err(cleanup_err)) => {
                tracing::warn!("{} succeeded but cleanup failed: {}", operation, cleanup_err);
                Ok(value)
            }
            (Err(err), Err(cleanup_err)) => {
                tracing::warn!(
                    "{} failed: {} (cleanup also failed: {})",
                    operation,
                    err,
                    cleanup_err
                );
                Err(err)
            }
        }
    }

    fn connect(&self) -> Result<Connection<C::Stream>> {
        let stream = self.connector.connect(&self.config).map_err(|e| {
            tracing::warn!("Failed to connect to {}: {}", self.config.addr(), e);
            ClientError::Connection(e)
        })?;

        let connection = Connection::open(stream, &self.config)?;
        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(connection)
    }

    fn disconnect(&self, connection: Connection<C::Stream>) -> Result<()> {
        self.closed.fetch_add(1, Ordering::Relaxed);
        connection.close()
    }
}

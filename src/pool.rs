//! Connection pool and asynchronous fan-out.

use std::collections::VecDeque;

use crate::config::{Config, Target};
use crate::conn::Connection;
use crate::error::Result;
use crate::response::Response;
use crate::result::ResultSet;
use crate::transport::Transport;

/// Runs batches on several connections concurrently at the wire level and
/// reassembles one [`Response`] spanning all of them.
///
/// "Concurrently" means pipelined: all sends are fired before any wait, so
/// the round-trips of independent connections overlap in wall-clock time on
/// a single control thread. Idle connections are kept between rounds and
/// reused; all of them share the pool's `(target, config)` identity.
///
/// Not safe for concurrent access; use one instance per thread.
pub struct Pool<T: Transport> {
    target: Target,
    config: Config,
    /// Previously-used connections available for the next round.
    idle: VecDeque<Connection<T>>,
    /// Connections carrying statements of the round being assembled.
    active: Vec<Connection<T>>,
}

impl<T: Transport> Pool<T> {
    /// Pool dispatching to `target` with default configuration.
    pub fn new(target: Target) -> Self {
        Self::with_config(target, Config::default())
    }

    /// Pool dispatching to `target` with the supplied configuration.
    pub fn with_config(target: Target, config: Config) -> Self {
        Self {
            target,
            config,
            idle: VecDeque::new(),
            active: Vec::new(),
        }
    }

    /// Schedule one statement for the next round on its own connection,
    /// drawing an idle pooled connection first and connecting a new one only
    /// when the pool is empty.
    pub fn add(&mut self, statement: impl Into<String>, with_meta: bool) -> Result<()> {
        let mut conn = match self.idle.pop_front() {
            Some(conn) => conn,
            None => {
                let mut conn = Connection::with_config(self.config.clone());
                conn.connect(&self.target)?;
                conn
            }
        };
        conn.add(statement, with_meta);
        self.active.push(conn);
        Ok(())
    }

    /// Hand an externally built connection to the pool.
    ///
    /// A connection without pending statements joins the idle free-list;
    /// one that already carries statements joins the current round. An
    /// unconnected connection is first connected to the pool's target.
    /// A connection established against a different target is accepted
    /// as-is, but mixing targets within one round is risky: a failing round
    /// is aborted as a whole no matter which daemon each connection talks
    /// to.
    pub fn add_connection(&mut self, mut conn: Connection<T>) -> Result<()> {
        if !conn.is_connected() {
            conn.connect(&self.target)?;
        }
        if conn.is_empty() {
            self.idle.push_back(conn);
        } else {
            self.active.push(conn);
        }
        Ok(())
    }

    /// Drop the statements scheduled for the next round, recycling their
    /// connections. Not necessary after [`Pool::dispatch`].
    pub fn clear(&mut self) {
        for mut conn in self.active.drain(..) {
            conn.clear();
            self.idle.push_back(conn);
        }
    }

    /// Number of idle connections available for reuse.
    pub fn idle_connections(&self) -> usize {
        self.idle.len()
    }

    /// Number of statements scheduled for the next round.
    pub fn scheduled(&self) -> usize {
        self.active.len()
    }

    /// Run the round: fire every connection's send, wait for each reply,
    /// then demultiplex every batch in registration order into one
    /// [`Response`].
    ///
    /// The round is atomic from the client's perspective: the first failure
    /// in any phase aborts it, every involved connection is dropped rather
    /// than pooled (its protocol state is unknown), and no partial results
    /// are delivered. Whether statements already processed by the daemon had
    /// server-side effects is not observable here. On success every
    /// connection is cleared and returned to the free-list.
    pub fn dispatch(&mut self) -> Result<Response> {
        // Pooled connections not drawn for this round are not carried over.
        self.idle.clear();

        tracing::debug!("dispatching round of {} connections", self.active.len());
        match self.dispatch_inner() {
            Ok(results) => {
                for mut conn in self.active.drain(..) {
                    conn.clear();
                    self.idle.push_back(conn);
                }
                Ok(Response::new(results))
            }
            Err(err) => {
                self.active.clear();
                Err(err)
            }
        }
    }

    fn dispatch_inner(&mut self) -> Result<Vec<ResultSet>> {
        // Send everything before waiting on anything: with all requests in
        // flight at once, the slowest round-trip bounds the whole round.
        for conn in &mut self.active {
            conn.send()?;
        }
        for conn in &mut self.active {
            conn.wait()?;
        }

        let mut results = Vec::new();
        for conn in &mut self.active {
            results.extend(conn.collect_results()?);
        }
        Ok(results)
    }
}

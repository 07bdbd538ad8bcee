//! Connection: one transport handle plus its pending batch.

use crate::batch::Batch;
use crate::config::{Config, Target};
use crate::error::{Error, Result};
use crate::response::Response;
use crate::result::ResultSet;
use crate::transport::Transport;

/// One session with the search daemon.
///
/// Statements registered with [`Connection::add`] accumulate into a batch
/// that is dispatched as a single multi-statement payload by
/// [`Connection::execute`] (blocking) or by the two-phase
/// [`Connection::send`]/[`Connection::wait`] pair, which is what
/// [`crate::Pool`] uses to overlap round-trips across several connections.
///
/// Multiple statements in one batch can be optimized by the daemon to run
/// as a multi-query; if that optimization fails they are evaluated
/// sequentially, with identical results either way.
///
/// Not safe for concurrent access; use one instance per thread.
pub struct Connection<T: Transport> {
    transport: Option<T>,
    config: Config,
    batch: Batch,
}

impl<T: Transport> Connection<T> {
    /// Session with default configuration options.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Session with the supplied configuration.
    pub fn with_config(config: Config) -> Self {
        Self {
            transport: None,
            config,
            batch: Batch::new(),
        }
    }

    /// Establish the transport to `target`.
    ///
    /// Connecting an already-connected session drops the previous transport
    /// and replaces it; check [`Connection::is_connected`] first when that
    /// matters.
    pub fn connect(&mut self, target: &Target) -> Result<()> {
        tracing::debug!("connecting to {}", target);
        self.transport = Some(T::connect(target, &self.config)?);
        Ok(())
    }

    /// True once a transport has been established.
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// Register one statement for the next dispatch.
    ///
    /// The statement is sent as supplied and must already be terminated
    /// (semicolon included). With `with_meta` set, the daemon's `SHOW META`
    /// result for the statement is merged into its [`ResultSet`] and read
    /// back via [`ResultSet::meta`].
    pub fn add(&mut self, statement: impl Into<String>, with_meta: bool) {
        self.batch.push(statement, with_meta);
    }

    /// True if no statements are scheduled.
    pub fn is_empty(&self) -> bool {
        self.batch.is_empty()
    }

    /// Drop scheduled statements so the connection can be reused for an
    /// unrelated batch. Connection state is untouched. `execute` clears
    /// automatically.
    pub fn clear(&mut self) {
        self.batch.clear();
    }

    /// Dispatch the batch and block until all results are retrieved.
    ///
    /// The batch is cleared on return whether or not the dispatch succeeded.
    pub fn execute(&mut self) -> Result<Response> {
        if !self.is_connected() {
            return Err(Error::Usage("no connection established".into()));
        }
        let outcome = self.execute_inner();
        self.batch.clear();
        outcome
    }

    fn execute_inner(&mut self) -> Result<Response> {
        let payload = self.batch.payload();
        self.batch.begin_retrieval();
        let transport = self.transport_mut()?;
        transport.send(&payload)?;
        transport.wait()?;
        Ok(Response::new(self.collect_results()?))
    }

    /// Phase one of an asynchronous dispatch: transmit the batch payload
    /// without blocking for the reply.
    ///
    /// Must be paired with exactly one [`Connection::wait`] before any
    /// result retrieval; [`crate::Pool`] drives this pairing for a whole
    /// round of connections.
    pub fn send(&mut self) -> Result<()> {
        let payload = self.batch.payload();
        self.batch.begin_retrieval();
        self.transport_mut()?.send(&payload)?;
        Ok(())
    }

    /// Phase two of an asynchronous dispatch: block until the reply to the
    /// previous [`Connection::send`] is ready.
    pub fn wait(&mut self) -> Result<()> {
        self.transport_mut()?.wait()?;
        Ok(())
    }

    /// Pull exactly one result set off the current reply stream.
    ///
    /// The first call after a dispatch returns the reply's first result set
    /// unconditionally; later calls consult the transport's more-results
    /// signal and fail with [`Error::Protocol`] when the daemon produced
    /// fewer result sets than the batch asked for.
    pub fn next_result(&mut self) -> Result<ResultSet> {
        if self.transport.is_none() {
            return Err(Error::Usage("no connection established".into()));
        }
        let first = self.batch.take_first_pending();
        let transport = self.transport_mut()?;
        if !first && !transport.next_result()? {
            return Err(Error::Protocol("No result returned".into()));
        }
        Ok(ResultSet::from_raw(transport.store_result()?))
    }

    /// Demultiplex the reply stream back into one [`ResultSet`] per batch
    /// entry, in registration order, merging each requested meta result into
    /// the data result that precedes it on the wire.
    ///
    /// Any failure aborts retrieval for the remaining entries.
    pub(crate) fn collect_results(&mut self) -> Result<Vec<ResultSet>> {
        let mut results = Vec::with_capacity(self.batch.len());
        for entry in 0..self.batch.len() {
            let mut result = self.next_result()?;
            if self.batch.wants_meta(entry) {
                let meta = self.next_result()?;
                result.attach_meta(meta);
            }
            results.push(result);
        }
        Ok(results)
    }

    fn transport_mut(&mut self) -> Result<&mut T> {
        self.transport
            .as_mut()
            .ok_or_else(|| Error::Usage("no connection established".into()))
    }
}

impl<T: Transport> Default for Connection<T> {
    fn default() -> Self {
        Self::new()
    }
}

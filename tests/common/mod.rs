//! Scripted in-memory transport driving the engine without a daemon.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use searchql::transport::{RawResult, Transport, TransportError};
use searchql::{Config, Target};

/// Script for one connection, consumed in the order connections are opened.
#[derive(Debug, Default)]
pub struct Script {
    /// One entry per dispatch: the reply's result sets, in wire order.
    pub replies: VecDeque<Vec<RawResult>>,
    /// Fail the send phase with a generic transport failure.
    pub fail_send: bool,
    /// Fail the wait phase with the lost-connection condition.
    pub fail_wait: bool,
}

impl Script {
    pub fn replying(replies: Vec<Vec<RawResult>>) -> Self {
        Self {
            replies: replies.into(),
            ..Self::default()
        }
    }
}

thread_local! {
    static PLANNED: RefCell<VecDeque<Script>> = RefCell::new(VecDeque::new());
    static CONNECTS: Cell<usize> = const { Cell::new(0) };
    static SENT: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

/// Queue the script for the next connection the engine opens.
pub fn plan(script: Script) {
    PLANNED.with_borrow_mut(|planned| planned.push_back(script));
}

/// Number of connections opened on this thread so far.
pub fn connects() -> usize {
    CONNECTS.get()
}

/// Payloads sent on this thread so far, in order.
pub fn sent_payloads() -> Vec<String> {
    SENT.with_borrow(|sent| sent.clone())
}

/// Build a raw result set from string literals; `None` is SQL NULL.
pub fn raw(columns: &[&str], rows: &[Vec<Option<&str>>]) -> RawResult {
    RawResult {
        columns: columns.iter().map(|c| (*c).to_owned()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|v| v.map(str::to_owned)).collect())
            .collect(),
    }
}

/// Build a `SHOW META` style key/value result set.
pub fn meta_raw(pairs: &[(&str, &str)]) -> RawResult {
    raw(
        &["Variable_name", "Value"],
        &pairs
            .iter()
            .map(|(k, v)| vec![Some(*k), Some(*v)])
            .collect::<Vec<_>>(),
    )
}

pub struct ScriptedTransport {
    script: Script,
    /// Result sets of the currently-read reply, front is the current one.
    pending: VecDeque<RawResult>,
}

impl Transport for ScriptedTransport {
    fn connect(_target: &Target, _config: &Config) -> Result<Self, TransportError> {
        CONNECTS.set(CONNECTS.get() + 1);
        let script = PLANNED
            .with_borrow_mut(|planned| planned.pop_front())
            .ok_or_else(|| TransportError::Failed("no scripted connection planned".into()))?;
        Ok(Self {
            script,
            pending: VecDeque::new(),
        })
    }

    fn send(&mut self, payload: &str) -> Result<(), TransportError> {
        SENT.with_borrow_mut(|sent| sent.push(payload.to_owned()));
        if self.script.fail_send {
            return Err(TransportError::Failed("scripted send failure".into()));
        }
        self.pending = self
            .script
            .replies
            .pop_front()
            .unwrap_or_default()
            .into();
        Ok(())
    }

    fn wait(&mut self) -> Result<(), TransportError> {
        if self.script.fail_wait {
            return Err(TransportError::ConnectionLost("scripted server loss".into()));
        }
        Ok(())
    }

    fn store_result(&mut self) -> Result<RawResult, TransportError> {
        self.pending
            .pop_front()
            .ok_or_else(|| TransportError::Failed("no result set available".into()))
    }

    fn next_result(&mut self) -> Result<bool, TransportError> {
        Ok(!self.pending.is_empty())
    }
}

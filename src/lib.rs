//! A client engine for search daemons speaking an SQL dialect
//! (SphinxQL / Manticore).
//!
//! # Features
//!
//! - **Batched dispatch**: any number of statements go out as one
//!   multi-statement payload per connection
//! - **Meta merging**: each statement's optional `SHOW META` result is
//!   merged into its own result set, never delivered separately
//! - **Wire-level pipelining**: a [`Pool`] fires every connection's send
//!   before waiting on any reply, overlapping round-trips on one thread
//! - **Sans-I/O core**: the session engine is generic over a [`Transport`]
//!   so protocol plumbing stays outside and tests run without a daemon
//!
//! # Example
//!
//! ```ignore
//! use searchql::{Connection, Pool, Target};
//!
//! fn main() -> searchql::Result<()> {
//!     let mut query: Connection<MyTransport> = Connection::new();
//!     query.connect(&Target::tcp("localhost", 9306))?;
//!     query.add("SELECT id, title FROM idx_articles;", true);
//!
//!     let mut response = query.execute()?;
//!     let mut result = response.next().expect("one result per statement");
//!     println!("total found: {}", result.meta("total_found")?);
//!     while let Some(row) = result.next_row() {
//!         let id: u64 = row.get("id")?;
//!         let title: String = row.get("title")?;
//!         println!("{}: {}", id, title);
//!     }
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod response;
pub mod result;
pub mod row;
pub mod transport;
pub mod value;

mod batch;
mod conn;
mod pool;

pub use builder::QueryBuilder;
pub use config::{Config, Target};
pub use conn::Connection;
pub use error::{Error, Result};
pub use pool::Pool;
pub use response::Response;
pub use result::ResultSet;
pub use row::Row;
pub use transport::{RawResult, Transport, TransportError};
pub use value::FromField;

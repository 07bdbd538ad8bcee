//! Result set of one statement.

use std::cell::OnceCell;
use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::transport::RawResult;

/// One demultiplexed result set: row storage, column metadata and an
/// optionally merged meta map.
///
/// Owns its row data; [`Row`] views borrow from it and cannot outlive it.
/// Row and column counts are fixed at creation.
#[derive(Debug)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
    /// Field-name lookup, built on first use.
    column_index: OnceCell<BTreeMap<String, usize>>,
    /// Key/value pairs merged from the entry's `SHOW META` result set, if
    /// one was requested.
    meta: Option<BTreeMap<String, String>>,
    cursor: usize,
}

impl ResultSet {
    pub(crate) fn from_raw(raw: RawResult) -> Self {
        Self {
            columns: raw.columns,
            rows: raw.rows,
            column_index: OnceCell::new(),
            meta: None,
            cursor: 0,
        }
    }

    /// Number of rows in the result set.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the result set holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns in the result set.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Index of the column named `field`, usable with [`Row::raw`].
    ///
    /// The name lookup table is built lazily on the first call.
    pub fn column_index(&self, field: &str) -> Result<usize> {
        let index = self.column_index.get_or_init(|| {
            self.columns
                .iter()
                .enumerate()
                .map(|(i, name)| (name.clone(), i))
                .collect()
        });
        index
            .get(field)
            .copied()
            .ok_or_else(|| Error::OutOfRange(format!("no such field in result set: {}", field)))
    }

    /// Advance the read cursor and return a view of the next row, or `None`
    /// once the result set is exhausted.
    pub fn next_row(&mut self) -> Option<Row<'_>> {
        if self.cursor >= self.rows.len() {
            return None;
        }
        let current = self.cursor;
        self.cursor += 1;
        Some(Row::new(self, current))
    }

    pub(crate) fn row_values(&self, index: usize) -> &[Option<String>] {
        &self.rows[index]
    }

    /// Value of the meta variable `name` from the merged `SHOW META` result.
    ///
    /// Returns an empty string for a variable the daemon did not report.
    /// Fails with [`Error::Usage`] when the originating statement did not
    /// request meta information.
    pub fn meta(&self, name: &str) -> Result<String> {
        let meta = self
            .meta
            .as_ref()
            .ok_or_else(|| Error::Usage("no meta result was requested".into()))?;
        Ok(meta.get(name).cloned().unwrap_or_default())
    }

    /// Merge a `SHOW META` result set into this result. The meta result is
    /// consumed here and never surfaces as a result of its own.
    pub(crate) fn attach_meta(&mut self, meta: ResultSet) {
        let mut values = BTreeMap::new();
        for row in &meta.rows {
            let key = row.first().and_then(|v| v.as_deref()).unwrap_or("");
            if key.is_empty() {
                continue;
            }
            let value = row.get(1).and_then(|v| v.as_deref()).unwrap_or("");
            values.insert(key.to_owned(), value.to_owned());
        }
        self.meta = Some(values);
    }
}

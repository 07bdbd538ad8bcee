//! SELECT statement builder.
//!
//! Pure string templating: turns structured search parameters into one
//! semicolon-terminated statement for [`crate::Connection::add`]. The
//! builder performs no validation or escaping of the pieces it is given;
//! field names, match phrases and expressions are emitted verbatim.

use std::fmt::Write as _;

/// Builder for one search statement.
///
/// ```
/// use searchql::QueryBuilder;
///
/// let mut query = QueryBuilder::new();
/// query
///     .index("idx_products")
///     .matching("blue kettle")
///     .enum_filter("category", [3, 7])
///     .paging(0, 10);
/// assert_eq!(
///     query.build(),
///     "SELECT * FROM idx_products WHERE category IN (3, 7) AND MATCH('blue kettle') \
///      LIMIT 0, 10 OPTION max_query_time=5000, max_matches=3000;"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    select: String,
    index: String,
    matching: Option<String>,
    filters: Vec<String>,
    group_by: Option<String>,
    group_order: Option<String>,
    sorting: Option<String>,
    offset: u32,
    limit: u32,
    max_matches: u32,
    max_query_time: u32,
    weights: Vec<(String, u32)>,
    ranking: Option<String>,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self {
            select: "*".into(),
            index: String::new(),
            matching: None,
            filters: Vec::new(),
            group_by: None,
            group_order: None,
            sorting: None,
            offset: 0,
            limit: 20,
            max_matches: 3000,
            max_query_time: 5000,
            weights: Vec::new(),
            ranking: None,
        }
    }

    /// Set the select clause (fields retrieved by the statement).
    /// Default `*`.
    pub fn select_clause(&mut self, select: impl Into<String>) -> &mut Self {
        self.select = select.into();
        self
    }

    /// Get the current select clause.
    pub fn select_clause_text(&self) -> &str {
        &self.select
    }

    /// Set the searched index.
    pub fn index(&mut self, index: impl Into<String>) -> &mut Self {
        self.index = index.into();
        self
    }

    /// Set the searched keyword or phrase, emitted as `MATCH('...')`.
    pub fn matching(&mut self, phrase: impl AsRef<str>) -> &mut Self {
        self.matching = Some(format!("MATCH('{}')", phrase.as_ref()));
        self
    }

    /// Set result offset and row limit. Default `LIMIT 0, 20`.
    pub fn paging(&mut self, offset: u32, limit: u32) -> &mut Self {
        self.offset = offset;
        self.limit = limit;
        self
    }

    /// Set the daemon's `max_matches` option; zero omits it.
    pub fn max_matches(&mut self, max: u32) -> &mut Self {
        self.max_matches = max;
        self
    }

    /// Set the daemon's `max_query_time` option (milliseconds); zero omits
    /// it.
    pub fn max_query_time(&mut self, time: u32) -> &mut Self {
        self.max_query_time = time;
        self
    }

    /// Set the sorting expression (`ORDER BY`). An empty expression clears
    /// an already configured one.
    pub fn sorting(&mut self, expr: impl AsRef<str>) -> &mut Self {
        let expr = expr.as_ref();
        self.sorting = if expr.is_empty() {
            None
        } else {
            Some(format!("ORDER BY {}", expr))
        };
        self
    }

    /// Get the current sorting clause, empty if none is set.
    pub fn sorting_clause(&self) -> &str {
        self.sorting.as_deref().unwrap_or("")
    }

    /// Set the ranking expression, emitted as `ranker=expr('...')`.
    pub fn ranking(&mut self, expr: impl AsRef<str>) -> &mut Self {
        self.ranking = Some(format!("ranker=expr('{}')", expr.as_ref()));
        self
    }

    /// Set the grouping field and the in-group ordering expression
    /// (`GROUP BY f WITHIN GROUP ORDER BY expr`); an empty expression skips
    /// the `WITHIN GROUP` part.
    pub fn grouping(&mut self, field: impl Into<String>, order: impl Into<String>) -> &mut Self {
        self.group_by = Some(field.into());
        let order = order.into();
        self.group_order = if order.is_empty() { None } else { Some(order) };
        self
    }

    /// Add one field weight, accumulated into the `field_weights` option.
    pub fn field_weight(&mut self, field: impl Into<String>, weight: u32) -> &mut Self {
        self.weights.push((field.into(), weight));
        self
    }

    /// Add a set-membership filter (`field IN (v1, v2, ..)`). An empty
    /// value set adds nothing.
    pub fn enum_filter(
        &mut self,
        field: impl AsRef<str>,
        values: impl IntoIterator<Item = u64>,
    ) -> &mut Self {
        let mut values = values.into_iter();
        let Some(first) = values.next() else {
            return self;
        };
        let mut filter = format!("{} IN ({}", field.as_ref(), first);
        for value in values {
            let _ = write!(filter, ", {}", value);
        }
        filter.push(')');
        self.filters.push(filter);
        self
    }

    /// Add an inclusive range filter (`field BETWEEN min AND max`).
    pub fn range_filter(&mut self, field: impl AsRef<str>, min: u64, max: u64) -> &mut Self {
        self.filters
            .push(format!("{} BETWEEN {} AND {}", field.as_ref(), min, max));
        self
    }

    /// Assemble the final statement, semicolon included.
    pub fn build(&self) -> String {
        let mut out = format!("SELECT {} FROM {}", self.select, self.index);

        let filters = self.filters.join(" AND ");
        if !filters.is_empty() || self.matching.is_some() {
            out.push_str(" WHERE ");
            out.push_str(&filters);
            if let Some(matching) = &self.matching {
                if !filters.is_empty() {
                    out.push_str(" AND ");
                }
                out.push_str(matching);
            }
        }

        if let Some(group_by) = &self.group_by {
            let _ = write!(out, " GROUP BY {}", group_by);
            if let Some(order) = &self.group_order {
                let _ = write!(out, " WITHIN GROUP ORDER BY {}", order);
            }
        }

        if let Some(sorting) = &self.sorting {
            out.push(' ');
            out.push_str(sorting);
        }

        let _ = write!(out, " LIMIT {}, {}", self.offset, self.limit);

        let mut options = Vec::new();
        if !self.weights.is_empty() {
            let weights = self
                .weights
                .iter()
                .map(|(field, weight)| format!("{}={}", field, weight))
                .collect::<Vec<_>>()
                .join(",");
            options.push(format!("field_weights=({})", weights));
        }
        if let Some(ranking) = &self.ranking {
            options.push(ranking.clone());
        }
        if self.max_query_time > 0 {
            options.push(format!("max_query_time={}", self.max_query_time));
        }
        if self.max_matches > 0 {
            options.push(format!("max_matches={}", self.max_matches));
        }
        if !options.is_empty() {
            out.push_str(" OPTION ");
            out.push_str(&options.join(", "));
        }

        out.push(';');
        out
    }
}

impl Default for QueryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

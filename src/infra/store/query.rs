//! Collection paths and structured queries.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::{INTERVIEWS_COLLECTION, USERS_COLLECTION};
use crate::domain::{Document, Value};

/// Slash-separated path of a collection, e.g. `users/u1/interviews`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionPath(String);

impl CollectionPath {
    /// Interviews owned by one user.
    pub fn user_interviews(user_id: &str) -> Self {
        Self(format!("{}/{}/{}", USERS_COLLECTION, user_id, INTERVIEWS_COLLECTION))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Sort direction of an ordering clause
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

/// `field == value`
#[derive(Debug, Clone, PartialEq)]
pub struct FieldFilter {
    pub field: String,
    pub value: Value,
}

/// Query over one collection: equality filters plus an optional ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub order_by: Option<OrderBy>,
    pub filters: Vec<FieldFilter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy {
            field: field.into(),
            direction,
        });
        self
    }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter {
            field: field.into(),
            value: value.into(),
        });
        self
    }

    /// Whether a document passes the filters and has the ordering field.
    ///
    /// Documents without the ordered-by field never appear in ordered results.
    pub fn matches(&self, doc: &Document) -> bool {
        if let Some(order) = &self.order_by {
            if !doc.contains_key(&order.field) {
                return false;
            }
        }
        self.filters.iter().all(|filter| {
            doc.get(&filter.field)
                .map(|v| v.query_eq(&filter.value))
                .unwrap_or(false)
        })
    }

    /// Filter and sort documents. Ties keep their input order.
    pub fn apply<I>(&self, docs: I) -> Vec<Document>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut selected: Vec<Document> = docs.into_iter().filter(|d| self.matches(d)).collect();

        if let Some(order) = &self.order_by {
            selected.sort_by(|a, b| {
                let ord = match (a.get(&order.field), b.get(&order.field)) {
                    (Some(x), Some(y)) => x.order_cmp(y),
                    _ => Ordering::Equal,
                };
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        selected
    }
}

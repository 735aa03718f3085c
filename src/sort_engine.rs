//! Field aware, header aware sorting of materialized rows.
//!
//! Two strategies are available behind [SortStrategy]: [ComparisonSort] and
//! [TreeSort](crate::sort_tree::TreeSort). They differ in how they treat the header row and the
//! sort order:
//!
//! | strategy   | header row                | [Order::Desc] |
//! |------------|---------------------------|---------------|
//! | comparison | kept at position 0        | honored       |
//! | tree       | dropped from the output   | ignored       |
//!
//! # Examples
//! ```
//! use text_row_sort::algorithm::Algorithm;
//! use text_row_sort::order::Order;
//! use text_row_sort::row::Row;
//! use text_row_sort::sort_engine::{sort_rows, SortKey};
//!
//! let rows = vec![Row::from(vec!["b", "1"]), Row::from(vec!["a", "2"]), Row::from(vec!["c", "3"])];
//! let key = SortKey::new(0).with_order(Order::Desc);
//! let sorted = sort_rows(rows, &key, Algorithm::Comparison).unwrap();
//! assert_eq!(sorted[0], Row::from(vec!["c", "3"]));
//! ```

use std::cmp::Ordering;

use crate::algorithm::Algorithm;
use crate::cancellation::Cancellation;
use crate::error::SortError;
use crate::order::Order;
use crate::row::Row;

/// What to sort by
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SortKey {
    field: usize,
    order: Order,
    skip_header: bool,
}

impl SortKey {
    /// Sort ascending by the zero based `field`, without a header row
    pub fn new(field: usize) -> SortKey {
        SortKey {
            field,
            order: Order::Asc,
            skip_header: false,
        }
    }

    /// Set [Order]
    pub fn with_order(mut self, order: Order) -> SortKey {
        self.order = order;
        self
    }

    /// Hold the first row out of the sort
    pub fn with_skip_header(mut self, skip_header: bool) -> SortKey {
        self.skip_header = skip_header;
        self
    }

    pub fn field(&self) -> usize {
        self.field
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Index of the first row taking part in the sort
    pub fn header_offset(&self) -> usize {
        usize::from(self.skip_header)
    }

    /// Ascending comparison of two rows on the key field. Both rows must have the field.
    pub(crate) fn compare(&self, a: &Row, b: &Row) -> Ordering {
        a.key(self.field).cmp(b.key(self.field))
    }
}

/// A sorting algorithm over a materialized collection of rows
pub trait SortStrategy {
    /// Sort `rows` by `key`.
    ///
    /// Fails with [SortError::FieldIndex] before sorting when a row past the header offset is too
    /// short for the key field, and with [SortError::Cancelled] once `cancellation` fires.
    fn sort(&self, rows: Vec<Row>, key: &SortKey, cancellation: &Cancellation) -> Result<Vec<Row>, SortError>;
}

/// Sorts everything after the header offset in place with the standard library sort. The header,
/// if any, stays at position 0.
///
/// Cancellation is observed before the sort starts. The standard library sort itself runs to
/// completion, in O(n log n).
#[derive(Clone, Copy, Debug, Default)]
pub struct ComparisonSort;

impl SortStrategy for ComparisonSort {
    fn sort(&self, mut rows: Vec<Row>, key: &SortKey, cancellation: &Cancellation) -> Result<Vec<Row>, SortError> {
        validate_field(&rows, key)?;
        if cancellation.is_cancelled() {
            return Err(SortError::Cancelled);
        }
        let offset = key.header_offset().min(rows.len());
        let order = key.order();
        rows[offset..].sort_by(|a, b| order.apply(key.compare(a, b)));
        Ok(rows)
    }
}

/// Check that every row past the header offset has the key field
pub fn validate_field(rows: &[Row], key: &SortKey) -> Result<(), SortError> {
    match rows.iter().skip(key.header_offset()).find(|row| row.len() <= key.field()) {
        Some(row) => Err(SortError::FieldIndex { index: key.field(), fields: row.len() }),
        None => Ok(()),
    }
}

/// Sort `rows` with `algorithm`.
///
/// Fails with [SortError::FieldIndex] when a row past the header offset is too short for the key
/// field. Nothing is sorted in that case.
pub fn sort_rows(rows: Vec<Row>, key: &SortKey, algorithm: Algorithm) -> Result<Vec<Row>, anyhow::Error> {
    sort_rows_with_cancellation(rows, key, algorithm, &Cancellation::new())
}

/// Sort `rows` with `algorithm`, giving up with [SortError::Cancelled] once `cancellation` fires
pub fn sort_rows_with_cancellation(
    rows: Vec<Row>,
    key: &SortKey,
    algorithm: Algorithm,
    cancellation: &Cancellation,
) -> Result<Vec<Row>, anyhow::Error> {
    log::info!("Start {:?} sort of {} rows by field {}", algorithm, rows.len(), key.field());
    let sorted = algorithm.strategy().sort(rows, key, cancellation)?;
    log::info!("Finish {:?} sort, {} rows", algorithm, sorted.len());
    Ok(sorted)
}

/// Check whether the rows past the header offset are already ordered by `key`
pub fn is_sorted(rows: &[Row], key: &SortKey) -> Result<bool, anyhow::Error> {
    validate_field(rows, key)?;
    let offset = key.header_offset().min(rows.len());
    let order = key.order();
    Ok(
        rows[offset..]
            .windows(2)
            .all(|pair| order.apply(key.compare(&pair[0], &pair[1])) != Ordering::Greater)
    )
}
